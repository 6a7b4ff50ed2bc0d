//! Color picker widget.

use serde::Deserialize;

use super::{render_field, FieldLayout, Widget, WidgetBase, WidgetKind, INNER_LEVEL};
use crate::html::{Attrs, HtmlRenderer};
use crate::value::Value;

/// A selectable color pair, given as hex codes without the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColorChoice {
    pub id: String,
    pub background: String,
    pub foreground: String,
}

impl ColorChoice {
    /// Creates a color choice.
    pub fn new(
        id: impl Into<String>,
        background: impl Into<String>,
        foreground: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            background: background.into(),
            foreground: foreground.into(),
        }
    }

    fn style(&self) -> String {
        format!(
            "background-color: #{}; color: #{};",
            self.background, self.foreground
        )
    }
}

/// A drop-down of colors, each option painted in its own colors.
#[derive(Debug, Clone)]
pub struct ColorSelectionWidget {
    base: WidgetBase,
    colors: Vec<ColorChoice>,
    value: String,
}

impl ColorSelectionWidget {
    /// Creates a color selection.
    pub fn new(name: impl Into<String>, label: impl Into<String>, colors: Vec<ColorChoice>) -> Self {
        Self {
            base: WidgetBase::new(name, label),
            colors,
            value: String::new(),
        }
    }

    /// Returns the available colors.
    pub fn colors(&self) -> &[ColorChoice] {
        &self.colors
    }
}

impl Widget for ColorSelectionWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::ColorSelection
    }

    fn render(&self, html: &HtmlRenderer) -> String {
        let option_level = INNER_LEVEL + 2;
        let mut attrs = Attrs::new()
            .with("name", &self.base.name)
            .with("id", &self.base.name);
        if let Some(index) = self.base.tab_index {
            attrs.set("tabindex", index.to_string());
        }

        let mut lines = vec![
            html.indent("<div>", INNER_LEVEL),
            html.render_tag("select", &attrs, false, true, INNER_LEVEL + 1),
        ];

        let any_selected = self.colors.iter().any(|c| c.id == self.value);
        let blank = Attrs::new()
            .with("value", "")
            .with_if(!any_selected, "selected", "selected");
        lines.push(format!(
            "{}--</option>",
            html.render_tag("option", &blank, false, false, option_level)
        ));
        for color in &self.colors {
            let attrs = Attrs::new()
                .with("value", &color.id)
                .with("style", color.style())
                .with_if(self.base.disabled, "disabled", "disabled")
                .with_if(color.id == self.value, "selected", "selected");
            lines.push(format!(
                "{}Text</option>",
                html.render_tag("option", &attrs, false, false, option_level)
            ));
        }

        lines.push(html.close_tag("select", INNER_LEVEL + 1));
        lines.push(html.close_tag("div", INNER_LEVEL));
        if self.base.disabled {
            lines.push(self.base.hidden_copy(html, &self.base.name, &self.value));
        }

        render_field(
            html,
            &self.base,
            WidgetKind::ColorSelection,
            FieldLayout::Block,
            &lines.join("\n"),
        )
    }

    fn value(&self) -> Value {
        Value::Text(self.value.clone())
    }

    fn set_value(&mut self, value: Value) {
        self.value = value.into_text();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<ColorChoice> {
        vec![
            ColorChoice::new("1", "000000", "FFFFFF"),
            ColorChoice::new("2", "FFCC00", "333333"),
        ]
    }

    #[test]
    fn test_color_options() {
        let widget = ColorSelectionWidget::new("theme", "Theme", palette()).initial("2");
        let out = widget.render(&HtmlRenderer::default());
        assert!(out.contains(
            r#"      <option value="1" style="background-color: #000000; color: #FFFFFF;">Text</option>"#
        ));
        assert!(out.contains(
            r#"<option value="2" style="background-color: #FFCC00; color: #333333;" selected="selected">Text</option>"#
        ));
        assert!(out.contains(r#"<option value="">--</option>"#));
        assert!(out.contains("  <div>\n    <select name=\"theme\""));
    }

    #[test]
    fn test_blank_option_selected_by_default() {
        let widget = ColorSelectionWidget::new("theme", "Theme", palette());
        let out = widget.render(&HtmlRenderer::default());
        assert!(out.contains(r#"<option value="" selected="selected">--</option>"#));
    }

    #[test]
    fn test_disabled_colors() {
        let widget = ColorSelectionWidget::new("theme", "Theme", palette())
            .initial("1")
            .disabled();
        let out = widget.render(&HtmlRenderer::default());
        assert_eq!(out.matches(r#"disabled="disabled""#).count(), 2);
        assert!(out.contains(r#"<input type="hidden" name="theme" value="1" />"#));
    }
}
