//! Forms: ordered, grouped widgets rendered as one HTML form.

use tracing::{debug, trace, warn};

use crate::html::{Attrs, HtmlRenderer};
use crate::source::{Bindings, ErrorSource, MessageCategory, SafeValue, SafeValueSource};
use crate::value::{DateTimeParts, Value};
use crate::widgets::Widget;

/// A submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Text shown on the button.
    pub label: String,
    /// Input name and id.
    pub name: String,
    /// Whether this is the form's main action.
    pub primary: bool,
}

impl Button {
    fn css_class(&self) -> &'static str {
        if self.primary {
            "primary context"
        } else {
            "secondary standalone"
        }
    }
}

struct SchemaEntry {
    widget: Box<dyn Widget>,
    group: String,
}

/// An HTML form made of widgets.
///
/// Widgets are kept in the order they were added. A widget may belong to a
/// group; ungrouped widgets are rendered first, then one `fieldset` per
/// group in the order the groups were first seen. Hidden widgets are kept
/// apart and rendered next to the buttons.
///
/// # Example
///
/// ```rust
/// use oxide_formkit::{Bindings, Form, SafeValues};
/// use oxide_formkit::widgets::{StringWidget, Widget};
///
/// let mut form = Form::new("signup", "/signup");
/// form.add_widget(StringWidget::new("email", "Email").required(), "");
/// form.add_button("Sign up", "", true);
///
/// let submitted = SafeValues::new().with("email", "jane@example.com");
/// let html = form.render(&Bindings::none().values(&submitted), 0);
/// assert!(html.contains(r#"value="jane@example.com""#));
/// ```
pub struct Form {
    name: String,
    action: String,
    schema: Vec<SchemaEntry>,
    hidden: Vec<Box<dyn Widget>>,
    buttons: Vec<Button>,
    renderer: HtmlRenderer,
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.name)
            .field("action", &self.action)
            .field(
                "schema",
                &self
                    .schema
                    .iter()
                    .map(|e| (e.widget.name(), e.group.as_str()))
                    .collect::<Vec<_>>(),
            )
            .field(
                "hidden",
                &self.hidden.iter().map(|w| w.name()).collect::<Vec<_>>(),
            )
            .field("buttons", &self.buttons)
            .field("renderer", &self.renderer)
            .finish()
    }
}

impl Form {
    /// Creates an empty form using the default renderer.
    pub fn new(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            action: action.into().trim().to_string(),
            schema: Vec::new(),
            hidden: Vec::new(),
            buttons: Vec::new(),
            renderer: HtmlRenderer::default(),
        }
    }

    /// Builder method to use a specific renderer.
    #[must_use]
    pub const fn with_renderer(mut self, renderer: HtmlRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Returns the renderer.
    pub const fn renderer(&self) -> &HtmlRenderer {
        &self.renderer
    }

    /// Returns the renderer mutably, e.g. to change the indent width.
    pub fn renderer_mut(&mut self) -> &mut HtmlRenderer {
        &mut self.renderer
    }

    /// Returns the form name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the form name.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    /// Returns the URL the form submits to.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Sets the URL the form submits to.
    pub fn set_action(&mut self, action: &str) {
        self.action = action.trim().to_string();
    }

    /// Adds a widget to a group. An empty group means ungrouped.
    ///
    /// Hidden widgets ignore the group. Widgets without a name, or whose
    /// name is already taken by another widget, are not added; returns
    /// whether the widget was added.
    pub fn add_widget(&mut self, widget: impl Widget + 'static, group: &str) -> bool {
        self.add_boxed_widget(Box::new(widget), group)
    }

    /// Adds an already boxed widget. See [`Form::add_widget`].
    pub fn add_boxed_widget(&mut self, widget: Box<dyn Widget>, group: &str) -> bool {
        if widget.name().is_empty() {
            warn!(
                widget = widget.widget_name(),
                "ignoring widget without a name"
            );
            return false;
        }
        if self.widget(widget.name()).is_some() {
            warn!(
                form = %self.name,
                name = widget.name(),
                "ignoring widget with a duplicate name"
            );
            return false;
        }
        if widget.kind().is_hidden() {
            self.hidden.push(widget);
        } else {
            self.schema.push(SchemaEntry {
                widget,
                group: group.trim().to_string(),
            });
        }
        true
    }

    /// Adds a submit button.
    ///
    /// When `name` is empty it is derived from the label. The name is
    /// lowercased and spaces and underscores become dashes.
    pub fn add_button(&mut self, label: impl Into<String>, name: &str, primary: bool) {
        let label = label.into();
        let name = if name.is_empty() { label.as_str() } else { name };
        let name = name.trim().to_lowercase().replace(['_', ' '], "-");
        self.buttons.push(Button {
            label,
            name,
            primary,
        });
    }

    /// Returns the buttons.
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Returns the widgets of a group, in order.
    ///
    /// An empty group returns every non-hidden widget. Groups are matched
    /// case-insensitively.
    pub fn get_widgets(&self, group: &str) -> Vec<&dyn Widget> {
        let group = group.trim();
        self.schema
            .iter()
            .filter(|e| group.is_empty() || e.group.eq_ignore_ascii_case(group))
            .map(|e| e.widget.as_ref())
            .collect()
    }

    /// Returns the hidden widgets, in order.
    pub fn hidden_widgets(&self) -> Vec<&dyn Widget> {
        self.hidden.iter().map(AsRef::as_ref).collect()
    }

    /// Finds a widget by name, grouped or hidden.
    pub fn widget(&self, name: &str) -> Option<&dyn Widget> {
        self.widgets().find(|w| w.name() == name)
    }

    /// Returns the groups in the order they were first seen.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for entry in &self.schema {
            if !entry.group.is_empty() && !groups.contains(&entry.group.as_str()) {
                groups.push(&entry.group);
            }
        }
        groups
    }

    /// Removes every widget whose name is listed.
    ///
    /// Names not found among the grouped widgets are looked up among the
    /// hidden ones. Returns the number of widgets removed.
    pub fn remove_widgets(&mut self, names: &[&str]) -> usize {
        let before = self.schema.len() + self.hidden.len();

        let mut unmatched: Vec<&str> = names.to_vec();
        self.schema.retain(|entry| {
            let listed = names.contains(&entry.widget.name());
            if listed {
                unmatched.retain(|n| *n != entry.widget.name());
            }
            !listed
        });
        self.hidden.retain(|w| !unmatched.contains(&w.name()));

        let removed = before - self.schema.len() - self.hidden.len();
        debug!(form = %self.name, removed, "removed widgets");
        removed
    }

    /// Disables every widget whose name is listed. Returns how many matched.
    pub fn disable_widgets(&mut self, names: &[&str]) -> usize {
        self.set_disabled(names, true)
    }

    /// Enables every widget whose name is listed. Returns how many matched.
    pub fn enable_widgets(&mut self, names: &[&str]) -> usize {
        self.set_disabled(names, false)
    }

    fn set_disabled(&mut self, names: &[&str], disabled: bool) -> usize {
        let mut count = 0;
        for widget in self.widgets_mut() {
            if names.contains(&widget.name()) {
                widget.disable(disabled);
                count += 1;
            }
        }
        count
    }

    /// Replaces the widget named `existing` in place.
    ///
    /// A hidden replacement is looked up among the hidden widgets; any other
    /// among the grouped widgets, where it also takes `group`. The
    /// replacement may keep the old name but not take one held by another
    /// widget. Returns whether a widget was replaced.
    pub fn replace_widget(
        &mut self,
        existing: &str,
        widget: impl Widget + 'static,
        group: &str,
    ) -> bool {
        let widget: Box<dyn Widget> = Box::new(widget);
        if widget.name().is_empty()
            || (widget.name() != existing && self.widget(widget.name()).is_some())
        {
            warn!(
                form = %self.name,
                existing,
                name = widget.name(),
                "ignoring replacement with an empty or taken name"
            );
            return false;
        }
        if widget.kind().is_hidden() {
            if let Some(slot) = self.hidden.iter_mut().find(|w| w.name() == existing) {
                *slot = widget;
                return true;
            }
        } else if let Some(entry) = self
            .schema
            .iter_mut()
            .find(|e| e.widget.name() == existing)
        {
            entry.widget = widget;
            entry.group = group.trim().to_string();
            return true;
        }
        debug!(form = %self.name, existing, "no widget to replace");
        false
    }

    /// Sets the value of the named widget. Returns whether it was found.
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.widgets_mut().find(|w| w.name() == name) {
            Some(widget) => {
                widget.set_value(value.into());
                true
            }
            None => false,
        }
    }

    fn widgets(&self) -> impl Iterator<Item = &dyn Widget> {
        self.schema
            .iter()
            .map(|e| e.widget.as_ref())
            .chain(self.hidden.iter().map(AsRef::as_ref))
    }

    fn widgets_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Widget>> {
        self.schema
            .iter_mut()
            .map(|e| &mut e.widget)
            .chain(self.hidden.iter_mut())
    }

    /// Copies submitted values onto the grouped widgets.
    ///
    /// A date/time widget only binds when every sub-field it renders was
    /// submitted with a non-blank value; the sub-fields are then bound
    /// together as one [`DateTimeParts`].
    pub fn bind_values(&mut self, source: &dyn SafeValueSource) {
        for entry in &mut self.schema {
            let widget = &mut entry.widget;
            if widget.kind().is_composite() {
                bind_composite(&mut **widget, source);
            } else if let Some(value) = source.get(widget.name()) {
                debug!(name = widget.name(), "binding submitted value");
                widget.set_value(Value::from(value));
            }
        }
    }

    /// Copies validation messages onto every widget with a matching name.
    pub fn bind_errors(&mut self, source: &dyn ErrorSource) {
        let messages = source.get(MessageCategory::Validation);
        if messages.is_empty() {
            return;
        }
        for widget in self.widgets_mut() {
            if let Some(message) = messages.get(widget.name()) {
                debug!(name = widget.name(), "binding validation error");
                widget.set_error_text(message);
            }
        }
    }

    /// Binds submitted values and validation errors, then renders the form.
    ///
    /// Missing sources are skipped. The output starts with the opening
    /// `form` tag at `indent_level` and has no trailing newline.
    pub fn render(&mut self, bindings: &Bindings<'_>, indent_level: usize) -> String {
        if let Some(values) = bindings.value_source() {
            self.bind_values(values);
        }
        if let Some(errors) = bindings.error_source() {
            self.bind_errors(errors);
        }
        self.to_html(indent_level)
    }

    /// Renders the form with the values the widgets currently hold.
    pub fn to_html(&self, indent_level: usize) -> String {
        let html = &self.renderer;
        let level = indent_level;

        let form_attrs = Attrs::new()
            .with("action", &self.action)
            .with("name", &self.name)
            .with("id", format!("form-{}", self.name))
            .with("method", "post")
            .with("enctype", "multipart/form-data");
        let mut lines = vec![html.render_tag("form", &form_attrs, false, true, level)];

        lines.extend(self.render_widget_list("", level + 1));

        for group in self.groups() {
            let attrs = Attrs::new().with("id", format!("fieldset-{}", group_slug(group)));
            lines.push(html.render_tag("fieldset", &attrs, false, false, level + 1));
            lines.push(html.indent(&format!("<legend>{}</legend>", group_title(group)), level + 2));
            lines.extend(self.render_widget_list(group, level + 2));
            lines.push(html.close_tag("fieldset", level + 1));
        }

        let controls = Attrs::new().with("class", "form-controls");
        lines.push(html.render_tag("div", &controls, false, false, level + 1));
        for widget in &self.hidden {
            trace!(name = widget.name(), "rendering hidden widget");
            lines.push(html.indent(&widget.render(html), level + 2));
        }
        let submitted = Attrs::new()
            .with("type", "hidden")
            .with("name", "submitted")
            .with("value", "ok");
        lines.push(html.render_tag("input", &submitted, true, false, level + 2));
        for button in &self.buttons {
            let attrs = Attrs::new()
                .with("type", "submit")
                .with("value", &button.label)
                .with("name", &button.name)
                .with("id", &button.name)
                .with("class", button.css_class());
            lines.push(html.render_tag("input", &attrs, true, false, level + 2));
        }
        lines.push(html.close_tag("div", level + 1));

        lines.push(html.close_tag("form", level));
        lines.join("\n")
    }

    fn render_widget_list(&self, group: &str, level: usize) -> Vec<String> {
        let html = &self.renderer;
        let mut items = Vec::new();
        for entry in self.schema.iter().filter(|e| e.group == group) {
            trace!(name = entry.widget.name(), group, "rendering widget");
            items.push(html.indent("<li>", level + 1));
            items.push(html.indent(&entry.widget.render(html), level + 2));
            items.push(html.close_tag("li", level + 1));
        }
        if items.is_empty() {
            return items;
        }

        let list = Attrs::new().with("class", "field-list");
        let mut lines = vec![html.render_tag("ol", &list, false, false, level)];
        lines.extend(items);
        lines.push(html.close_tag("ol", level));
        lines
    }
}

fn bind_composite(widget: &mut dyn Widget, source: &dyn SafeValueSource) {
    let fields = widget.composite_fields();
    let mut submitted = Vec::with_capacity(fields.len());
    for field in fields {
        let key = field.key(widget.name());
        match source.get(&key) {
            Some(SafeValue::One(raw)) if !raw.trim().is_empty() => submitted.push((field, raw.as_str())),
            _ => {
                debug!(name = widget.name(), key = %key, "incomplete date/time submission, not binding");
                return;
            }
        }
    }
    if submitted.is_empty() {
        return;
    }
    debug!(name = widget.name(), "binding submitted date/time");
    widget.set_value(Value::DateTime(DateTimeParts::from_fields(submitted)));
}

/// `Contact_info` becomes `contact-info`.
fn group_slug(group: &str) -> String {
    group.trim().to_lowercase().replace(['_', ' '], "-")
}

/// `contact_info` becomes `Contact Info`.
fn group_title(group: &str) -> String {
    group
        .trim()
        .replace(['_', '-'], " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
