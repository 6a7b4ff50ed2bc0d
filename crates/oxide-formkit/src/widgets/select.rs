//! Selection widgets: drop-down lists, radio buttons, and checkboxes.

use serde::Deserialize;
use tracing::{debug, warn};

use super::{render_field, FieldLayout, Widget, WidgetBase, WidgetKind, INNER_LEVEL};
use crate::html::{Attrs, HtmlRenderer};
use crate::value::Value;

/// Above this many choices a flexible selection is shown as a list.
const FLEX_LIST_THRESHOLD: usize = 5;

/// Upper bound of the `size` attribute of a multi-select list.
const MAX_LIST_SIZE: usize = 10;

/// One selectable value and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    /// Creates a choice.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl<V: Into<String>, L: Into<String>> From<(V, L)> for Choice {
    fn from((value, label): (V, L)) -> Self {
        Self::new(value, label)
    }
}

/// How the choices of a selection are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionFormat {
    /// A list when there are more than five choices, individual controls
    /// otherwise.
    #[default]
    Flex,
    /// A single `select` element.
    List,
    /// One radio button or checkbox per choice.
    Individual,
}

impl SelectionFormat {
    /// Parses a format name, case-insensitively.
    ///
    /// Unknown names fall back to [`SelectionFormat::Flex`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "flex" => Self::Flex,
            "list" => Self::List,
            "individual" => Self::Individual,
            other => {
                warn!(format = other, "unknown selection format, using flex");
                Self::Flex
            }
        }
    }

    /// Resolves [`SelectionFormat::Flex`] against a number of choices.
    pub const fn resolve(self, choice_count: usize) -> Self {
        match self {
            Self::Flex if choice_count > FLEX_LIST_THRESHOLD => Self::List,
            Self::Flex => Self::Individual,
            other => other,
        }
    }
}

/// Lets the user pick one or several values from a fixed set of choices.
///
/// The format is resolved once, when the widget is created or when
/// [`SelectionWidget::set_format`] is called. Adding choices later does not
/// change it. Choices are matched against the selected values by string
/// comparison, in single and multiple mode alike.
#[derive(Debug, Clone)]
pub struct SelectionWidget {
    base: WidgetBase,
    choices: Vec<Choice>,
    format: SelectionFormat,
    multiple: bool,
    default_value: String,
    default_label: String,
    selected: Vec<String>,
}

impl SelectionWidget {
    /// Label of the default option of a single-select list.
    pub const DEFAULT_LABEL: &'static str = "--";

    /// Creates a single-select widget.
    pub fn new<I, C>(
        name: impl Into<String>,
        label: impl Into<String>,
        choices: I,
        format: SelectionFormat,
    ) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        let choices: Vec<Choice> = choices.into_iter().map(Into::into).collect();
        Self {
            base: WidgetBase::new(name, label),
            format: format.resolve(choices.len()),
            choices,
            multiple: false,
            default_value: String::new(),
            default_label: Self::DEFAULT_LABEL.to_string(),
            selected: Vec::new(),
        }
    }

    /// Allows several choices to be selected.
    #[must_use]
    pub const fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Leaves out the default option of a single-select list.
    #[must_use]
    pub fn no_default(mut self) -> Self {
        self.default_label.clear();
        self
    }

    /// Sets the value and label of the default option of a single-select
    /// list. An empty label leaves the option out.
    #[must_use]
    pub fn default_option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.default_value = value.into();
        self.default_label = label.into();
        self
    }

    /// Changes the format, resolving it against the current choices.
    pub fn set_format(&mut self, format: SelectionFormat) {
        self.format = format.resolve(self.choices.len());
    }

    /// Returns the resolved format, never [`SelectionFormat::Flex`].
    pub const fn format(&self) -> SelectionFormat {
        self.format
    }

    /// Appends a choice. The format is not re-resolved.
    pub fn push_choice(&mut self, choice: impl Into<Choice>) {
        self.choices.push(choice.into());
    }

    /// Returns the choices.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Returns whether several choices may be selected.
    pub const fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Returns the selected values.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|s| s == value)
    }

    fn input_name(&self) -> String {
        if self.multiple {
            format!("{}[]", self.base.name)
        } else {
            self.base.name.clone()
        }
    }

    fn render_list(&self, html: &HtmlRenderer) -> Vec<String> {
        let mut attrs = self.base.input_state(
            Attrs::new()
                .with("name", self.input_name())
                .with("id", &self.base.name),
        );
        if self.multiple {
            attrs.set("multiple", "multiple");
            attrs.set("size", self.choices.len().min(MAX_LIST_SIZE).to_string());
        }

        let mut lines = vec![html.render_tag("select", &attrs, false, true, INNER_LEVEL)];
        if !self.multiple && !self.default_label.is_empty() {
            let any_selected = self.choices.iter().any(|c| self.is_selected(&c.value));
            let attrs = Attrs::new()
                .with("value", &self.default_value)
                .with_if(!any_selected, "selected", "selected");
            lines.push(format!(
                "{}{}</option>",
                html.render_tag("option", &attrs, false, false, INNER_LEVEL + 1),
                self.default_label
            ));
        }
        for choice in &self.choices {
            let attrs = Attrs::new()
                .with("value", &choice.value)
                .with_if(self.is_selected(&choice.value), "selected", "selected");
            lines.push(format!(
                "{}{}</option>",
                html.render_tag("option", &attrs, false, false, INNER_LEVEL + 1),
                choice.label
            ));
        }
        lines.push(html.close_tag("select", INNER_LEVEL));
        lines
    }

    fn render_individual(&self, html: &HtmlRenderer) -> Vec<String> {
        let input_type = if self.multiple { "checkbox" } else { "radio" };
        let input_name = self.input_name();

        let mut lines = vec![html.render_tag("ol", &Attrs::new(), false, false, INNER_LEVEL)];
        for choice in &self.choices {
            let id = format!("{}-{}", self.base.name, choice.value);
            lines.push(html.render_tag(
                "li",
                &Attrs::new().with("class", "select-field"),
                false,
                false,
                INNER_LEVEL + 1,
            ));

            let attrs = Attrs::new()
                .with("type", input_type)
                .with("name", &input_name)
                .with("id", &id)
                .with("value", &choice.value)
                .with_if(self.base.disabled, "disabled", "disabled")
                .with_if(self.is_selected(&choice.value), "checked", "checked");
            lines.push(html.render_tag("input", &attrs, true, true, INNER_LEVEL + 2));
            lines.push(format!(
                "{}{}</label>",
                html.render_tag("label", &Attrs::new().with("for", &id), false, false, INNER_LEVEL + 2),
                choice.label
            ));

            lines.push(html.close_tag("li", INNER_LEVEL + 1));
        }
        lines.push(html.close_tag("ol", INNER_LEVEL));
        lines
    }

    /// Renders the widget under the given kind.
    fn render_as(&self, html: &HtmlRenderer, kind: WidgetKind) -> String {
        let (mut lines, layout) = match self.format {
            SelectionFormat::Individual | SelectionFormat::Flex => {
                (self.render_individual(html), FieldLayout::Fieldset)
            }
            SelectionFormat::List => (self.render_list(html), FieldLayout::Block),
        };

        if self.base.disabled {
            let input_name = self.input_name();
            if self.multiple {
                for value in &self.selected {
                    lines.push(self.base.hidden_copy(html, &input_name, value));
                }
            } else {
                let value = self.selected.first().map_or("", String::as_str);
                lines.push(self.base.hidden_copy(html, &input_name, value));
            }
        }

        render_field(html, &self.base, kind, layout, &lines.join("\n"))
    }
}

impl Widget for SelectionWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        if self.multiple {
            WidgetKind::MultiSelection
        } else {
            WidgetKind::Selection
        }
    }

    fn render(&self, html: &HtmlRenderer) -> String {
        self.render_as(html, self.kind())
    }

    fn value(&self) -> Value {
        if self.multiple {
            Value::List(self.selected.clone())
        } else {
            self.selected
                .first()
                .map_or(Value::Empty, |v| Value::Text(v.clone()))
        }
    }

    fn set_value(&mut self, value: Value) {
        if self.multiple {
            self.selected = value.into_list();
        } else {
            let value = value.into_text();
            self.selected = if value.is_empty() {
                Vec::new()
            } else {
                vec![value]
            };
        }
    }
}

/// A yes/no question answered with a pair of radio buttons.
///
/// Submits `Y` or `N`; the value is a [`Value::Bool`] once answered.
#[derive(Debug, Clone)]
pub struct YesNoWidget {
    inner: SelectionWidget,
}

impl YesNoWidget {
    /// Creates a yes/no widget.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            inner: SelectionWidget::new(
                name,
                label,
                [("Y", "Yes"), ("N", "No")],
                SelectionFormat::Individual,
            ),
        }
    }
}

impl Widget for YesNoWidget {
    fn base(&self) -> &WidgetBase {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.inner.base_mut()
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::YesNo
    }

    fn render(&self, html: &HtmlRenderer) -> String {
        self.inner.render_as(html, WidgetKind::YesNo)
    }

    fn value(&self) -> Value {
        match self.inner.selected.first().map(String::as_str) {
            Some("Y") => Value::Bool(true),
            Some("N") => Value::Bool(false),
            _ => Value::Empty,
        }
    }

    /// Accepts a boolean or `y`/`n` in any case. Anything else is ignored.
    fn set_value(&mut self, value: Value) {
        let answer = match &value {
            Value::Bool(true) => "Y".to_string(),
            Value::Bool(false) => "N".to_string(),
            Value::Text(text) => text.trim().to_uppercase(),
            _ => String::new(),
        };
        if answer == "Y" || answer == "N" {
            self.inner.set_value(Value::Text(answer));
        } else {
            debug!(name = %self.inner.base.name, value = ?value, "ignoring yes/no value");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Vec<Choice> {
        (1..=count)
            .map(|i| Choice::new(i.to_string(), format!("Choice {i}")))
            .collect()
    }

    #[test]
    fn test_flex_resolution() {
        let widget = SelectionWidget::new("n", "N", numbered(6), SelectionFormat::Flex);
        assert_eq!(widget.format(), SelectionFormat::List);
        let widget = SelectionWidget::new("n", "N", numbered(5), SelectionFormat::Flex);
        assert_eq!(widget.format(), SelectionFormat::Individual);
    }

    #[test]
    fn test_format_not_re_resolved_on_push() {
        let mut widget = SelectionWidget::new("n", "N", numbered(5), SelectionFormat::Flex);
        widget.push_choice(("6", "Six"));
        assert_eq!(widget.choices().len(), 6);
        assert_eq!(widget.format(), SelectionFormat::Individual);
        widget.set_format(SelectionFormat::Flex);
        assert_eq!(widget.format(), SelectionFormat::List);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(SelectionFormat::parse("LIST"), SelectionFormat::List);
        assert_eq!(
            SelectionFormat::parse("individual"),
            SelectionFormat::Individual
        );
        assert_eq!(SelectionFormat::parse("dropdown"), SelectionFormat::Flex);
    }

    #[test]
    fn test_single_select_list_without_default() {
        let widget = SelectionWidget::new(
            "n",
            "Number",
            [("1", "One"), ("2", "Two")],
            SelectionFormat::List,
        )
        .no_default()
        .initial("2");
        let out = widget.render(&HtmlRenderer::default());
        assert_eq!(out.matches(r#"selected="selected""#).count(), 1);
        assert!(out.contains(r#"<option value="2" selected="selected">Two</option>"#));
        assert!(out.contains(r#"<option value="1">One</option>"#));
        assert!(!out.contains("--"));
    }

    #[test]
    fn test_default_option_selected_when_nothing_matches() {
        let widget = SelectionWidget::new("n", "N", [("1", "One")], SelectionFormat::List)
            .default_option("0", "Pick one")
            .initial("7");
        let out = widget.render(&HtmlRenderer::default());
        let expected = [
            r#"  <select name="n""#,
            r#"          id="n">"#,
            r#"    <option value="0" selected="selected">Pick one</option>"#,
            r#"    <option value="1">One</option>"#,
            "  </select>",
        ]
        .join("\n");
        assert!(out.contains(&expected));
    }

    #[test]
    fn test_multi_select_list() {
        let widget = SelectionWidget::new("tags", "Tags", numbered(12), SelectionFormat::List)
            .multiple()
            .initial(vec!["3", "11"]);
        assert_eq!(widget.kind(), WidgetKind::MultiSelection);
        let out = widget.render(&HtmlRenderer::default());
        assert!(out.contains(r#"<select name="tags[]""#));
        assert!(out.contains(r#"multiple="multiple""#));
        assert!(out.contains(r#"size="10">"#));
        assert_eq!(out.matches(r#"selected="selected""#).count(), 2);
        assert!(!out.contains(r#"value="">"#));
        assert_eq!(widget.value(), Value::from(vec!["3", "11"]));
    }

    #[test]
    fn test_individual_radio_markup() {
        let widget = SelectionWidget::new(
            "size",
            "Size",
            [("s", "Small"), ("l", "Large")],
            SelectionFormat::Individual,
        )
        .initial("l");
        let out = widget.render(&HtmlRenderer::default());
        assert!(out.starts_with("<fieldset"));
        let expected = [
            "  <ol>",
            r#"    <li class="select-field">"#,
            r#"      <input type="radio""#,
            r#"             name="size""#,
            r#"             id="size-s""#,
            r#"             value="s" />"#,
            r#"      <label for="size-s">Small</label>"#,
            "    </li>",
        ]
        .join("\n");
        assert!(out.contains(&expected));
        assert!(out.contains(
            "             value=\"l\"\n             checked=\"checked\" />"
        ));
    }

    #[test]
    fn test_individual_checkboxes() {
        let widget = SelectionWidget::new("opt", "Opt", numbered(3), SelectionFormat::Individual)
            .multiple()
            .initial(vec!["1", "3"]);
        let out = widget.render(&HtmlRenderer::default());
        assert_eq!(out.matches(r#"type="checkbox""#).count(), 3);
        assert_eq!(out.matches(r#"checked="checked""#).count(), 2);
        assert!(out.contains(r#"name="opt[]""#));
    }

    #[test]
    fn test_disabled_reemits_selection() {
        let widget = SelectionWidget::new("opt", "Opt", numbered(3), SelectionFormat::List)
            .multiple()
            .initial(vec!["1", "2"])
            .disabled();
        let out = widget.render(&HtmlRenderer::default());
        assert!(out.contains(r#"<input type="hidden" name="opt[]" value="1" />"#));
        assert!(out.contains(r#"<input type="hidden" name="opt[]" value="2" />"#));

        let widget = SelectionWidget::new("one", "One", numbered(2), SelectionFormat::List)
            .initial("2")
            .disabled();
        let out = widget.render(&HtmlRenderer::default());
        assert_eq!(out.matches(r#"type="hidden""#).count(), 1);
        assert!(out.contains(r#"<input type="hidden" name="one" value="2" />"#));
    }

    #[test]
    fn test_single_value_round_trip() {
        let mut widget = SelectionWidget::new("n", "N", numbered(2), SelectionFormat::List);
        assert_eq!(widget.value(), Value::Empty);
        widget.set_value(Value::from("1"));
        assert_eq!(widget.value(), Value::from("1"));
        widget.set_value(Value::from(""));
        assert!(widget.selected().is_empty());
    }

    #[test]
    fn test_yes_no_values() {
        let mut widget = YesNoWidget::new("agree", "Agree?");
        assert_eq!(widget.value(), Value::Empty);
        widget.set_value(Value::Bool(true));
        assert_eq!(widget.value(), Value::Bool(true));
        widget.set_value(Value::from("n"));
        assert_eq!(widget.value(), Value::Bool(false));
        widget.set_value(Value::from("maybe"));
        assert_eq!(widget.value(), Value::Bool(false));
    }

    #[test]
    fn test_yes_no_render() {
        let widget = YesNoWidget::new("agree", "Agree?").initial(true);
        let out = widget.render(&HtmlRenderer::default());
        assert!(out.starts_with(r#"<fieldset class="field yes-no-widget" id="field-agree">"#));
        assert!(out.contains(r#"id="agree-Y""#));
        assert!(out.contains(r#"<label for="agree-N">No</label>"#));
        assert_eq!(out.matches(r#"checked="checked""#).count(), 1);
    }
}
