//! Widgets that display markup instead of collecting input.

use super::{
    container_attrs, render_description, render_div_label, render_error_text, Widget, WidgetBase,
    WidgetKind, INNER_LEVEL,
};
use crate::html::{html_escape, HtmlRenderer};
use crate::value::Value;

/// Displays arbitrary HTML, or a paragraph of text, as part of a form.
///
/// The label is rendered as a `div` and, together with the description, only
/// when it is not empty.
#[derive(Debug, Clone)]
pub struct HtmlWidget {
    base: WidgetBase,
    kind: WidgetKind,
    id: Option<String>,
    content: String,
}

impl HtmlWidget {
    /// Creates a widget showing `content` verbatim.
    pub fn new(name: impl Into<String>, label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(name, label),
            kind: WidgetKind::Html,
            id: None,
            content: content.into(),
        }
    }

    /// Creates a widget showing plain text as paragraphs.
    ///
    /// Each line of `text` becomes its own `<p>`.
    pub fn paragraph(name: impl Into<String>, label: impl Into<String>, text: &str) -> Self {
        let content = if text.is_empty() {
            String::new()
        } else {
            format!("<p>{}</p>", html_escape(text).replace('\n', "</p><p>"))
        };
        Self {
            kind: WidgetKind::Paragraph,
            ..Self::new(name, label, content)
        }
    }

    /// Sets the id used for the container instead of the name.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.id = (!id.is_empty()).then_some(id);
        self
    }
}

impl Widget for HtmlWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        self.kind
    }

    fn render(&self, html: &HtmlRenderer) -> String {
        let mut container = self.base.clone();
        // Markup widgets cannot be disabled.
        container.disabled = false;
        if let Some(id) = &self.id {
            container.name.clone_from(id);
        }

        let mut lines = vec![html.render_tag(
            "div",
            &container_attrs(&container, self.kind),
            false,
            false,
            0,
        )];
        if !self.base.label.is_empty() {
            lines.push(render_div_label(html, &self.base));
            lines.push(render_description(html, &self.base));
        }
        lines.push(render_error_text(html, &self.base));
        if !self.content.is_empty() {
            lines.push(html.indent(&self.content, INNER_LEVEL));
        }
        lines.push("</div>".to_string());
        lines.join("\n")
    }

    fn value(&self) -> Value {
        Value::Text(self.content.clone())
    }

    fn set_value(&mut self, value: Value) {
        self.content = value.into_text();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_widget_without_label() {
        let widget = HtmlWidget::new("notice", "", "<hr />");
        let out = widget.render(&HtmlRenderer::default());
        let expected = [
            r#"<div class="field html-widget" id="field-notice">"#,
            r#"  <div class="field-error"></div>"#,
            "  <hr />",
            "</div>",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_html_widget_with_label_and_id() {
        let widget = HtmlWidget::new("notice", "Notice", "<em>x</em>")
            .description("Read this")
            .id("terms");
        let out = widget.render(&HtmlRenderer::default());
        assert!(out.contains(r#"id="field-terms""#));
        assert!(out.contains(r#"<div class="field-label">Notice</div>"#));
        assert!(out.contains(">Read this</div>"));
    }

    #[test]
    fn test_paragraph_splits_lines_and_escapes() {
        let widget = HtmlWidget::paragraph("intro", "", "First <line>\nSecond");
        assert_eq!(widget.kind(), WidgetKind::Paragraph);
        assert_eq!(
            widget.value(),
            Value::from("<p>First &lt;line&gt;</p><p>Second</p>")
        );
        let out = widget.render(&HtmlRenderer::default());
        assert!(out.starts_with(r#"<div class="field paragraph-widget""#));
    }
}
