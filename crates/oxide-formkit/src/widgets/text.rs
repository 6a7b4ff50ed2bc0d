//! Single-line and multi-line text widgets.

use super::{render_field, FieldLayout, Widget, WidgetBase, WidgetKind, INNER_LEVEL};
use crate::html::{Attrs, HtmlRenderer};
use crate::value::Value;

/// A fixed-length text input, or a password input.
#[derive(Debug, Clone)]
pub struct StringWidget {
    base: WidgetBase,
    kind: WidgetKind,
    size: u32,
    max_length: u32,
    value: String,
}

impl StringWidget {
    /// Default visible width.
    pub const DEFAULT_SIZE: u32 = 30;
    /// Default maximum length.
    pub const DEFAULT_MAX_LENGTH: u32 = 255;

    /// Creates a text input.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(name, label),
            kind: WidgetKind::String,
            size: Self::DEFAULT_SIZE,
            max_length: Self::DEFAULT_MAX_LENGTH,
            value: String::new(),
        }
    }

    /// Creates a password input.
    pub fn password(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: WidgetKind::Password,
            ..Self::new(name, label)
        }
    }

    /// Sets the visible width. Zero is ignored.
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        if size > 0 {
            self.size = size;
        }
        self
    }

    /// Sets the maximum length. Zero is ignored.
    #[must_use]
    pub fn max_length(mut self, max_length: u32) -> Self {
        if max_length > 0 {
            self.max_length = max_length;
        }
        self
    }

    const fn input_type(&self) -> &'static str {
        match self.kind {
            WidgetKind::Password => "password",
            _ => "text",
        }
    }
}

impl Widget for StringWidget {
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
        let attrs = Attrs::new()
            .with("type", self.input_type())
            .with("name", &self.base.name)
            .with("id", &self.base.name)
            .with("value", &self.value)
            .with("size", self.size.to_string())
            .with("maxlength", self.max_length.to_string());
        let attrs = self.base.input_state(attrs);

        let mut inner = html.render_tag("input", &attrs, true, true, INNER_LEVEL);
        if self.base.disabled {
            inner.push('\n');
            inner.push_str(&self.base.hidden_copy(html, &self.base.name, &self.value));
        }
        render_field(html, &self.base, self.kind, FieldLayout::Block, &inner)
    }

    fn value(&self) -> Value {
        Value::Text(self.value.clone())
    }

    fn set_value(&mut self, value: Value) {
        self.value = value.into_text();
    }
}

/// A multi-line text input.
#[derive(Debug, Clone)]
pub struct TextAreaWidget {
    base: WidgetBase,
    rows: u32,
    cols: u32,
    value: String,
}

impl TextAreaWidget {
    /// Default number of rows.
    pub const DEFAULT_ROWS: u32 = 5;
    /// Default number of columns.
    pub const DEFAULT_COLS: u32 = 40;

    /// Creates a textarea.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(name, label),
            rows: Self::DEFAULT_ROWS,
            cols: Self::DEFAULT_COLS,
            value: String::new(),
        }
    }

    /// Sets the number of rows. Zero is ignored.
    #[must_use]
    pub fn rows(mut self, rows: u32) -> Self {
        if rows > 0 {
            self.rows = rows;
        }
        self
    }

    /// Sets the number of columns. Zero is ignored.
    #[must_use]
    pub fn cols(mut self, cols: u32) -> Self {
        if cols > 0 {
            self.cols = cols;
        }
        self
    }
}

impl Widget for TextAreaWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::TextArea
    }

    fn render(&self, html: &HtmlRenderer) -> String {
        let attrs = Attrs::new()
            .with("name", &self.base.name)
            .with("id", &self.base.name)
            .with("rows", self.rows.to_string())
            .with("cols", self.cols.to_string());
        let attrs = self.base.input_state(attrs);

        let mut inner = html.render_tag("textarea", &attrs, false, true, INNER_LEVEL);
        inner.push_str(&self.value);
        inner.push_str("</textarea>");
        if self.base.disabled {
            inner.push('\n');
            inner.push_str(&self.base.hidden_copy(html, &self.base.name, &self.value));
        }
        render_field(html, &self.base, WidgetKind::TextArea, FieldLayout::Block, &inner)
    }

    fn value(&self) -> Value {
        Value::Text(self.value.clone())
    }

    fn set_value(&mut self, value: Value) {
        self.value = value.into_text();
    }
}
