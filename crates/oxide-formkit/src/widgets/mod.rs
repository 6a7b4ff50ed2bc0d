//! Form widgets.
//!
//! Every widget implements [`Widget`]. A variant builds the markup for its
//! own inputs and hands it to [`render_field`], which wraps it in the shared
//! container with label, description, and error text.

mod captcha;
mod color;
mod datetime;
mod hidden;
mod markup;
mod select;
mod text;

pub use captcha::CaptchaWidget;
pub use color::{ColorChoice, ColorSelectionWidget};
pub use datetime::DateTimeWidget;
pub use hidden::HiddenWidget;
pub use markup::HtmlWidget;
pub use select::{Choice, SelectionFormat, SelectionWidget, YesNoWidget};
pub use text::{StringWidget, TextAreaWidget};

use crate::html::{Attrs, HtmlRenderer};
use crate::value::{DateTimeField, Value};

/// Indent level of a widget's own markup inside its container.
pub(crate) const INNER_LEVEL: usize = 1;

/// The concrete kind of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Hidden,
    Html,
    Paragraph,
    String,
    Password,
    TextArea,
    DateTime,
    Date,
    Time,
    Selection,
    MultiSelection,
    YesNo,
    ColorSelection,
    Captcha,
}

impl WidgetKind {
    /// CSS class identifying the widget kind on its container.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Hidden => "hidden-widget",
            Self::Html => "html-widget",
            Self::Paragraph => "paragraph-widget",
            Self::String => "string-widget",
            Self::Password => "password-widget",
            Self::TextArea => "textarea-widget",
            Self::DateTime => "datetime-widget",
            Self::Date => "date-widget",
            Self::Time => "time-widget",
            Self::Selection => "selection-widget",
            Self::MultiSelection => "multi-selection-widget",
            Self::YesNo => "yes-no-widget",
            Self::ColorSelection => "color-selection-widget",
            Self::Captcha => "captcha-widget",
        }
    }

    /// Hidden widgets are kept apart from the grouped schema.
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// Composite widgets bind from several submitted sub-fields.
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::DateTime | Self::Date | Self::Time)
    }
}

/// State shared by every widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetBase {
    /// Input name, unique within a form.
    pub name: String,
    /// Label text.
    pub label: String,
    /// Optional description shown under the label.
    pub description: String,
    /// Whether a value must be entered.
    pub required: bool,
    /// Tab order, if any.
    pub tab_index: Option<u32>,
    /// Whether input is disabled.
    pub disabled: bool,
    /// Validation error text.
    pub error_text: String,
}

impl WidgetBase {
    /// Creates the shared state for a widget.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Adds the `tabindex` and `disabled` attributes when they apply.
    pub(crate) fn input_state(&self, attrs: Attrs) -> Attrs {
        let attrs = match self.tab_index {
            Some(index) => attrs.with("tabindex", index.to_string()),
            None => attrs,
        };
        attrs.with_if(self.disabled, "disabled", "disabled")
    }

    /// Renders the hidden input that resubmits a disabled widget's value.
    pub(crate) fn hidden_copy(&self, html: &HtmlRenderer, name: &str, value: &str) -> String {
        let attrs = Attrs::new()
            .with("type", "hidden")
            .with("name", name)
            .with("value", value);
        html.render_tag("input", &attrs, true, false, INNER_LEVEL)
    }
}

/// How a widget's container is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLayout {
    /// A `div` with a `label` pointing at the input.
    Block,
    /// A `fieldset` with a `legend`, for widgets made of several inputs.
    Fieldset,
}

/// Trait for form widgets.
pub trait Widget: Send + Sync {
    /// Returns the shared widget state.
    fn base(&self) -> &WidgetBase;

    /// Returns the shared widget state mutably.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Returns the widget kind.
    fn kind(&self) -> WidgetKind;

    /// Renders the widget as HTML, starting at indent level zero.
    fn render(&self, html: &HtmlRenderer) -> String;

    /// Returns the current value.
    fn value(&self) -> Value;

    /// Sets the current value.
    fn set_value(&mut self, value: Value);

    /// Returns the input name.
    fn name(&self) -> &str {
        &self.base().name
    }

    /// Returns the name of the widget kind.
    fn widget_name(&self) -> &'static str {
        self.kind().css_class()
    }

    /// Returns the label text.
    fn label(&self) -> &str {
        &self.base().label
    }

    /// Returns the validation error text.
    fn error_text(&self) -> &str {
        &self.base().error_text
    }

    /// Sets the validation error text.
    fn set_error_text(&mut self, text: &str) {
        self.base_mut().error_text = text.to_string();
    }

    /// Returns whether input is disabled.
    fn is_disabled(&self) -> bool {
        self.base().disabled
    }

    /// Disables or enables input.
    fn disable(&mut self, disabled: bool) {
        self.base_mut().disabled = disabled;
    }

    /// Sub-fields that must all be submitted before a composite widget binds.
    fn composite_fields(&self) -> Vec<DateTimeField> {
        Vec::new()
    }

    /// Sets the description.
    #[must_use]
    fn description(mut self, text: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.base_mut().description = text.into();
        self
    }

    /// Marks the widget as required.
    #[must_use]
    fn required(mut self) -> Self
    where
        Self: Sized,
    {
        self.base_mut().required = true;
        self
    }

    /// Sets the tab order.
    #[must_use]
    fn tab_index(mut self, index: u32) -> Self
    where
        Self: Sized,
    {
        self.base_mut().tab_index = Some(index);
        self
    }

    /// Disables the widget.
    #[must_use]
    fn disabled(mut self) -> Self
    where
        Self: Sized,
    {
        self.disable(true);
        self
    }

    /// Sets the initial value.
    #[must_use]
    fn initial(mut self, value: impl Into<Value>) -> Self
    where
        Self: Sized,
    {
        self.set_value(value.into());
        self
    }
}

/// Wraps a widget's own markup in the shared field container.
///
/// Emits, in order: the opening container tag, the label (or legend), the
/// description, the error text, `inner`, and the closing tag. `inner` is
/// expected to be indented one level already.
pub fn render_field(
    html: &HtmlRenderer,
    base: &WidgetBase,
    kind: WidgetKind,
    layout: FieldLayout,
    inner: &str,
) -> String {
    let tag = match layout {
        FieldLayout::Block => "div",
        FieldLayout::Fieldset => "fieldset",
    };

    let mut lines = vec![html.render_tag(tag, &container_attrs(base, kind), false, false, 0)];
    lines.push(render_label(html, base, layout));
    lines.push(render_description(html, base));
    lines.push(render_error_text(html, base));
    if !inner.is_empty() {
        lines.push(inner.to_string());
    }
    lines.push(format!("</{tag}>"));
    lines.join("\n")
}

pub(crate) fn container_attrs(base: &WidgetBase, kind: WidgetKind) -> Attrs {
    let mut classes = vec!["field", kind.css_class()];
    if !base.error_text.is_empty() {
        classes.push("error");
    }
    if base.disabled {
        classes.push("disabled");
    }
    Attrs::new()
        .with("class", classes.join(" "))
        .with("id", format!("field-{}", base.name))
}

pub(crate) fn render_label(html: &HtmlRenderer, base: &WidgetBase, layout: FieldLayout) -> String {
    let (tag, attrs) = match layout {
        FieldLayout::Block => (
            "label",
            Attrs::new()
                .with("class", "field-label")
                .with("for", &base.name),
        ),
        FieldLayout::Fieldset => ("legend", Attrs::new().with("class", "field-label")),
    };

    let mut label = html.render_tag(tag, &attrs, false, false, INNER_LEVEL);
    label.push_str(&base.label);
    if base.required && layout == FieldLayout::Fieldset {
        label.push(' ');
        label.push_str(&render_required(html));
    }
    label.push_str(&format!("</{tag}>"));
    if base.required && layout == FieldLayout::Block {
        label.push('\n');
        label.push_str(&html.indent(&render_required(html), INNER_LEVEL));
    }
    label
}

/// Renders a label as a plain `div`, for widgets without an input.
pub(crate) fn render_div_label(html: &HtmlRenderer, base: &WidgetBase) -> String {
    let attrs = Attrs::new().with("class", "field-label");
    format!(
        "{}{}</div>",
        html.render_tag("div", &attrs, false, false, INNER_LEVEL),
        base.label
    )
}

pub(crate) fn render_description(html: &HtmlRenderer, base: &WidgetBase) -> String {
    let attrs = Attrs::new()
        .with("class", "field-description")
        .with("id", format!("{}-description", base.name));
    format!(
        "{}{}</div>",
        html.render_tag("div", &attrs, false, false, INNER_LEVEL),
        base.description
    )
}

pub(crate) fn render_error_text(html: &HtmlRenderer, base: &WidgetBase) -> String {
    let attrs = Attrs::new().with("class", "field-error");
    format!(
        "{}{}</div>",
        html.render_tag("div", &attrs, false, false, INNER_LEVEL),
        base.error_text
    )
}

fn render_required(html: &HtmlRenderer) -> String {
    let attrs = Attrs::new()
        .with("class", "field-required")
        .with("title", "Required");
    format!(
        "{}(Required)</span>",
        html.render_tag("span", &attrs, false, false, 0)
    )
}
