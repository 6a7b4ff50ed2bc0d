//! Challenge-question widget.

use super::{render_field, FieldLayout, Widget, WidgetBase, WidgetKind, INNER_LEVEL};
use crate::challenge::Challenge;
use crate::html::{Attrs, HtmlRenderer};
use crate::value::Value;

/// Asks a [`Challenge`] question and collects the answer.
///
/// Only the question is kept; checking the answer is up to the caller that
/// generated the challenge.
#[derive(Debug, Clone)]
pub struct CaptchaWidget {
    base: WidgetBase,
    question: String,
    answer: String,
}

impl CaptchaWidget {
    const INPUT_SIZE: u32 = 10;

    /// Creates a widget asking the question of `challenge`.
    pub fn new(name: impl Into<String>, label: impl Into<String>, challenge: &Challenge) -> Self {
        Self::with_question(name, label, challenge.question())
    }

    /// Creates a widget asking a fixed question.
    pub fn with_question(
        name: impl Into<String>,
        label: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            base: WidgetBase::new(name, label),
            question: question.into(),
            answer: String::new(),
        }
    }

    /// Returns the question being asked.
    pub fn question(&self) -> &str {
        &self.question
    }
}

impl Widget for CaptchaWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Captcha
    }

    fn render(&self, html: &HtmlRenderer) -> String {
        let question = format!(
            "{}What is {}?</div>",
            html.render_tag(
                "div",
                &Attrs::new().with("class", "challenge-question"),
                false,
                false,
                INNER_LEVEL
            ),
            self.question
        );

        let attrs = Attrs::new()
            .with("type", "text")
            .with("name", &self.base.name)
            .with("id", &self.base.name)
            .with("value", &self.answer)
            .with("size", Self::INPUT_SIZE.to_string())
            .with("maxlength", Self::INPUT_SIZE.to_string());
        let input = html.render_tag("input", &self.base.input_state(attrs), true, true, INNER_LEVEL);

        render_field(
            html,
            &self.base,
            WidgetKind::Captcha,
            FieldLayout::Block,
            &format!("{question}\n{input}"),
        )
    }

    fn value(&self) -> Value {
        Value::Text(self.answer.clone())
    }

    fn set_value(&mut self, value: Value) {
        self.answer = value.into_text();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captcha_render() {
        let challenge = Challenge::new("3 plus 4", 7);
        let widget = CaptchaWidget::new("human", "Are you human?", &challenge).required();
        let out = widget.render(&HtmlRenderer::default());
        assert!(out.starts_with(r#"<div class="field captcha-widget" id="field-human">"#));
        assert!(out.contains(r#"  <div class="challenge-question">What is 3 plus 4?</div>"#));
        assert!(out.contains(r#"size="10""#));
        assert!(out.contains(r#"maxlength="10" />"#));
        assert!(out.contains("(Required)"));
    }

    #[test]
    fn test_captcha_keeps_answer() {
        let challenge = Challenge::new("9 minus 2", 7);
        let mut widget = CaptchaWidget::new("human", "Check", &challenge);
        widget.set_value(Value::from("7"));
        assert!(challenge.check(widget.value().as_text().unwrap_or_default()));
        assert!(widget
            .render(&HtmlRenderer::default())
            .contains(r#"value="7""#));
    }
}
