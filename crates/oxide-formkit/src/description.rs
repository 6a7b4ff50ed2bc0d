//! Building forms from a JSON description.
//!
//! ```json
//! {
//!   "name": "contact",
//!   "action": "/contact",
//!   "render": { "indent_spaces": 2 },
//!   "widgets": [
//!     { "kind": "string", "name": "email", "label": "Email", "required": true },
//!     { "kind": "selection", "name": "topic", "label": "Topic", "group": "details",
//!       "choices": [{ "value": "q", "label": "Question" }] },
//!     { "kind": "hidden", "name": "token", "value": "abc" }
//!   ],
//!   "buttons": [{ "label": "Send", "primary": true }]
//! }
//! ```

use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use crate::challenge::MathChallenge;
use crate::error::{FormError, Result};
use crate::form::Form;
use crate::html::{HtmlRenderer, RenderConfig};
use crate::value::{DateTimeParts, Value};
use crate::widgets::{
    CaptchaWidget, Choice, ColorChoice, ColorSelectionWidget, DateTimeWidget, HiddenWidget,
    HtmlWidget, SelectionFormat, SelectionWidget, StringWidget, TextAreaWidget, Widget,
    YesNoWidget,
};

/// A whole form.
#[derive(Debug, Clone, Deserialize)]
pub struct FormDescription {
    pub name: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub widgets: Vec<WidgetSpec>,
    #[serde(default)]
    pub buttons: Vec<ButtonSpec>,
}

/// A submit button.
#[derive(Debug, Clone, Deserialize)]
pub struct ButtonSpec {
    pub label: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub primary: bool,
}

/// Settings every widget shares.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommonSpec {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub tab_index: Option<u32>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub group: String,
    /// Initial value.
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// One widget: shared settings plus the kind-specific ones.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetSpec {
    #[serde(flatten)]
    pub common: CommonSpec,
    #[serde(flatten)]
    pub kind: KindSpec,
}

/// Kind-specific widget settings, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KindSpec {
    Hidden {
        #[serde(default)]
        id: Option<String>,
    },
    Html {
        #[serde(default)]
        content: String,
        #[serde(default)]
        id: Option<String>,
    },
    Paragraph {
        #[serde(default)]
        text: String,
    },
    String {
        #[serde(default)]
        size: Option<u32>,
        #[serde(default)]
        max_length: Option<u32>,
    },
    Password {
        #[serde(default)]
        size: Option<u32>,
        #[serde(default)]
        max_length: Option<u32>,
    },
    TextArea {
        #[serde(default)]
        rows: Option<u32>,
        #[serde(default)]
        cols: Option<u32>,
    },
    DateTime {
        #[serde(default)]
        min_year: Option<i32>,
        #[serde(default)]
        max_year: Option<i32>,
        #[serde(default)]
        twenty_four_hour: bool,
    },
    Date {
        #[serde(default)]
        min_year: Option<i32>,
        #[serde(default)]
        max_year: Option<i32>,
    },
    Time {
        #[serde(default)]
        twenty_four_hour: bool,
    },
    Selection {
        #[serde(default)]
        choices: Vec<Choice>,
        /// `flex`, `list`, or `individual`; anything else means `flex`.
        #[serde(default)]
        format: Option<String>,
        #[serde(default)]
        multiple: bool,
        #[serde(default)]
        default_value: Option<String>,
        #[serde(default)]
        default_label: Option<String>,
    },
    YesNo,
    ColorSelection {
        #[serde(default)]
        colors: Vec<ColorChoice>,
    },
    Captcha {
        /// Question to ask. A random arithmetic question is used when absent.
        #[serde(default)]
        question: Option<String>,
    },
}

fn year_range(widget: DateTimeWidget, min_year: Option<i32>, max_year: Option<i32>) -> DateTimeWidget {
    widget.years(
        min_year.unwrap_or(DateTimeWidget::DEFAULT_MIN_YEAR),
        max_year.unwrap_or(DateTimeWidget::DEFAULT_MAX_YEAR),
    )
}

impl FormDescription {
    /// Parses a description from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the form.
    ///
    /// Fails when a widget has no name, two widgets share a name, or an
    /// initial value does not fit its widget.
    pub fn into_form(self) -> Result<Form> {
        let mut form =
            Form::new(self.name, self.action).with_renderer(HtmlRenderer::from_config(&self.render));

        let mut seen = HashSet::new();
        for spec in self.widgets {
            let name = spec.common.name.trim().to_string();
            if name.is_empty() {
                return Err(FormError::InvalidWidget {
                    field: spec.common.label,
                    message: "widget has no name".to_string(),
                });
            }
            if !seen.insert(name.clone()) {
                return Err(FormError::DuplicateName(name));
            }

            let group = spec.common.group.clone();
            let widget = spec.build()?;
            debug!(name = %name, kind = widget.widget_name(), group = %group, "adding widget");
            form.add_boxed_widget(widget, &group);
        }

        for button in self.buttons {
            form.add_button(button.label, &button.name, button.primary);
        }
        Ok(form)
    }
}

impl WidgetSpec {
    fn build(self) -> Result<Box<dyn Widget>> {
        let Self { common, kind } = self;
        let name = common.name.trim().to_string();
        let label = common.label.clone();

        let mut widget: Box<dyn Widget> = match kind {
            KindSpec::Hidden { id } => {
                let mut widget = HiddenWidget::new(&name, "");
                if let Some(id) = id {
                    widget = widget.id(id);
                }
                Box::new(widget)
            }
            KindSpec::Html { content, id } => {
                let mut widget = HtmlWidget::new(&name, label, content);
                if let Some(id) = id {
                    widget = widget.id(id);
                }
                common.apply(widget)
            }
            KindSpec::Paragraph { text } => common.apply(HtmlWidget::paragraph(&name, label, &text)),
            KindSpec::String { size, max_length } => common.apply(
                StringWidget::new(&name, label)
                    .size(size.unwrap_or(0))
                    .max_length(max_length.unwrap_or(0)),
            ),
            KindSpec::Password { size, max_length } => common.apply(
                StringWidget::password(&name, label)
                    .size(size.unwrap_or(0))
                    .max_length(max_length.unwrap_or(0)),
            ),
            KindSpec::TextArea { rows, cols } => common.apply(
                TextAreaWidget::new(&name, label)
                    .rows(rows.unwrap_or(0))
                    .cols(cols.unwrap_or(0)),
            ),
            KindSpec::DateTime {
                min_year,
                max_year,
                twenty_four_hour,
            } => common.apply(
                year_range(DateTimeWidget::new(&name, label), min_year, max_year)
                    .twenty_four_hour(twenty_four_hour),
            ),
            KindSpec::Date { min_year, max_year } => common.apply(year_range(
                DateTimeWidget::date(&name, label),
                min_year,
                max_year,
            )),
            KindSpec::Time { twenty_four_hour } => common.apply(
                DateTimeWidget::time(&name, label).twenty_four_hour(twenty_four_hour),
            ),
            KindSpec::Selection {
                choices,
                format,
                multiple,
                default_value,
                default_label,
            } => {
                let format = format
                    .as_deref()
                    .map_or(SelectionFormat::Flex, SelectionFormat::parse);
                let mut widget = SelectionWidget::new(&name, label, choices, format);
                if multiple {
                    widget = widget.multiple();
                }
                if default_value.is_some() || default_label.is_some() {
                    widget = widget.default_option(
                        default_value.unwrap_or_default(),
                        default_label.unwrap_or_else(|| SelectionWidget::DEFAULT_LABEL.to_string()),
                    );
                }
                common.apply(widget)
            }
            KindSpec::YesNo => common.apply(YesNoWidget::new(&name, label)),
            KindSpec::ColorSelection { colors } => {
                common.apply(ColorSelectionWidget::new(&name, label, colors))
            }
            KindSpec::Captcha { question } => {
                let widget = match question {
                    Some(question) => CaptchaWidget::with_question(&name, label, question),
                    None => CaptchaWidget::new(&name, label, &MathChallenge::new().generate()),
                };
                common.apply(widget)
            }
        };

        if let Some(json) = common.value {
            let value = initial_value(&name, widget.kind().is_composite(), json)?;
            widget.set_value(value);
        }
        Ok(widget)
    }
}

impl CommonSpec {
    fn apply<W: Widget + 'static>(&self, widget: W) -> Box<dyn Widget> {
        let mut widget = widget.description(self.description.clone());
        if self.required {
            widget = widget.required();
        }
        if let Some(index) = self.tab_index {
            widget = widget.tab_index(index);
        }
        if self.disabled {
            widget = widget.disabled();
        }
        Box::new(widget)
    }
}

/// Converts a JSON initial value into a widget value.
///
/// Numbers are timestamps for date/time widgets and text otherwise; objects
/// are only accepted by date/time widgets, as a [`DateTimeParts`] record.
fn initial_value(name: &str, composite: bool, json: serde_json::Value) -> Result<Value> {
    let invalid = |message: &str| FormError::InvalidWidget {
        field: name.to_string(),
        message: message.to_string(),
    };

    match json {
        serde_json::Value::Null => Ok(Value::Empty),
        serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_json::Value::String(s) => Ok(Value::Text(s)),
        serde_json::Value::Number(n) if composite => n
            .as_i64()
            .map(Value::Timestamp)
            .ok_or_else(|| invalid("timestamp must be an integer")),
        serde_json::Value::Number(n) => Ok(Value::Text(n.to_string())),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => Ok(s),
                serde_json::Value::Number(n) => Ok(n.to_string()),
                _ => Err(invalid("list values must be strings or numbers")),
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        object @ serde_json::Value::Object(_) if composite => {
            let parts: DateTimeParts = serde_json::from_value(object)?;
            Ok(Value::DateTime(parts))
        }
        serde_json::Value::Object(_) => Err(invalid("only date/time widgets accept an object value")),
    }
}
