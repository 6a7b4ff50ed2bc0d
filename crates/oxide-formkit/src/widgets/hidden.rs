//! Hidden input widget.

use super::{Widget, WidgetBase, WidgetKind};
use crate::html::{Attrs, HtmlRenderer};
use crate::value::Value;

/// A hidden input carried along with the form.
///
/// Hidden widgets have no label, description, or container. A form keeps
/// them apart from its grouped widgets and renders them next to the buttons.
#[derive(Debug, Clone, Default)]
pub struct HiddenWidget {
    base: WidgetBase,
    id: Option<String>,
    value: String,
}

impl HiddenWidget {
    /// Creates a hidden widget.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(name, ""),
            id: None,
            value: value.into(),
        }
    }

    /// Sets an explicit `id` attribute.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.id = (!id.is_empty()).then_some(id);
        self
    }

    fn element_id(&self) -> String {
        self.id
            .as_deref()
            .unwrap_or(&self.base.name)
            .replace(['[', ']'], "")
    }
}

impl Widget for HiddenWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Hidden
    }

    fn render(&self, html: &HtmlRenderer) -> String {
        let attrs = Attrs::new()
            .with("type", "hidden")
            .with("name", &self.base.name)
            .with("id", self.element_id())
            .with("value", &self.value);
        html.render_tag("input", &attrs, true, false, 0)
    }

    fn value(&self) -> Value {
        Value::Text(self.value.clone())
    }

    fn set_value(&mut self, value: Value) {
        self.value = value.into_text();
    }
}
