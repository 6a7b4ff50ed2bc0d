//! Tag rendering and indentation.
//!
//! Every widget builds its markup through an [`HtmlRenderer`], which knows
//! how many spaces make up one indent level. Tags can be rendered on a single
//! line or spread over several lines with one attribute per line:
//!
//! ```text
//! <input type="text"
//!        name="title"
//!        id="title" />
//! ```

use serde::Deserialize;
use tracing::warn;

/// Default number of spaces per indent level.
pub const DEFAULT_INDENT_SPACES: usize = 2;

/// Rendering configuration, usually loaded once at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Spaces per indent level. Non-positive values are ignored.
    pub indent_spaces: i64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_spaces: DEFAULT_INDENT_SPACES as i64,
        }
    }
}

/// An ordered list of HTML attributes.
///
/// Attributes are rendered in insertion order. Setting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    attrs: Vec<(String, String)>,
}

impl Attrs {
    /// Creates an empty attribute list.
    pub fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets an attribute only when `condition` holds.
    #[must_use]
    pub fn with_if(self, condition: bool, key: &str, value: impl Into<String>) -> Self {
        if condition {
            self.with(key, value)
        } else {
            self
        }
    }

    /// Returns whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Iterates over the attributes in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders attributes as `key="value"` pairs separated by spaces.
    pub fn to_html(&self) -> String {
        self.iter()
            .map(|(k, v)| format!(r#"{k}="{}""#, escape_attr(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Renders element tags and indents blocks of markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlRenderer {
    indent_spaces: usize,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            indent_spaces: DEFAULT_INDENT_SPACES,
        }
    }
}

impl HtmlRenderer {
    /// Creates a renderer with the given indent width.
    ///
    /// A width of zero is ignored and the default is used.
    pub fn new(indent_spaces: usize) -> Self {
        let mut renderer = Self::default();
        renderer.set_indent_spaces(i64::try_from(indent_spaces).unwrap_or(i64::MAX));
        renderer
    }

    /// Creates a renderer from a [`RenderConfig`].
    pub fn from_config(config: &RenderConfig) -> Self {
        let mut renderer = Self::default();
        renderer.set_indent_spaces(config.indent_spaces);
        renderer
    }

    /// Returns the number of spaces per indent level.
    pub const fn indent_spaces(&self) -> usize {
        self.indent_spaces
    }

    /// Sets the number of spaces per indent level.
    ///
    /// Non-positive values leave the current setting unchanged.
    pub fn set_indent_spaces(&mut self, spaces: i64) {
        match usize::try_from(spaces) {
            Ok(spaces) if spaces > 0 => self.indent_spaces = spaces,
            _ => warn!(
                spaces,
                current = self.indent_spaces,
                "ignoring non-positive indent width"
            ),
        }
    }

    /// Renders a single element tag with its attributes.
    ///
    /// In multi-line mode the first attribute shares the line with the tag
    /// name and every following attribute is aligned one column past the
    /// tag name. No trailing newline is added.
    pub fn render_tag(
        &self,
        tag: &str,
        attrs: &Attrs,
        self_closing: bool,
        multi_line: bool,
        indent_level: usize,
    ) -> String {
        let close = if self_closing { " />" } else { ">" };
        let main_indent = indent_level * self.indent_spaces;

        if multi_line && !attrs.is_empty() {
            let sub_indent = main_indent + tag.len() + 2;
            let mut lines: Vec<String> = attrs
                .iter()
                .enumerate()
                .map(|(i, (key, value))| {
                    let attr = format!(r#"{key}="{}""#, escape_attr(value));
                    if i == 0 {
                        pad(&format!("<{tag} {attr}"), main_indent)
                    } else {
                        pad(&attr, sub_indent)
                    }
                })
                .collect();
            if let Some(last) = lines.last_mut() {
                last.push_str(close);
            }
            return lines.join("\n");
        }

        let mut html = format!("<{tag}");
        if !attrs.is_empty() {
            html.push(' ');
            html.push_str(&attrs.to_html());
        }
        html.push_str(close);
        pad(&html, main_indent)
    }

    /// Renders a closing tag at the given indent level.
    pub fn close_tag(&self, tag: &str, indent_level: usize) -> String {
        self.indent(&format!("</{tag}>"), indent_level)
    }

    /// Indents every line of `text` by `indent_level` levels.
    pub fn indent(&self, text: &str, indent_level: usize) -> String {
        let spaces = indent_level * self.indent_spaces;
        if !text.contains('\n') {
            return pad(text, spaces);
        }
        text.split('\n')
            .map(|line| pad(line, spaces))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn pad(text: &str, spaces: usize) -> String {
    format!("{}{text}", " ".repeat(spaces))
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escapes an attribute value for use inside double quotes.
///
/// `&` is left alone so values that were already sanitized keep their
/// entities intact.
pub fn escape_attr(s: &str) -> String {
    s.replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
