//! # oxide-formkit
//!
//! Declarative form widgets with data binding and indentation-aware HTML
//! rendering.
//!
//! This crate provides:
//! - Widgets for text, passwords, text areas, dates and times, selections,
//!   colors, challenge questions, and raw markup
//! - A [`Form`] that groups widgets into fieldsets and renders them as one
//!   HTML form
//! - Binding of submitted values and validation errors at render time,
//!   through read-only [`SafeValueSource`] and [`ErrorSource`] collaborators
//! - [`validation`] of raw [`SubmittedValues`] into [`ValidationErrors`]
//! - Building forms from a JSON [`FormDescription`]
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_formkit::{Bindings, Form, SafeValues, ValidationErrors};
//! use oxide_formkit::widgets::{
//!     Choice, SelectionFormat, SelectionWidget, StringWidget, Widget,
//! };
//!
//! let mut form = Form::new("profile", "/profile");
//! form.add_widget(
//!     StringWidget::new("username", "Username")
//!         .required()
//!         .description("Choose a unique username"),
//!     "",
//! );
//! form.add_widget(
//!     SelectionWidget::new(
//!         "role",
//!         "Role",
//!         [Choice::new("user", "User"), Choice::new("admin", "Administrator")],
//!         SelectionFormat::List,
//!     ),
//!     "access",
//! );
//! form.add_button("Save", "", true);
//!
//! // Values and errors normally come from the request being answered.
//! let values = SafeValues::new().with("username", "jane");
//! let errors = ValidationErrors::new().with("username", "Already taken.");
//!
//! let html = form.render(&Bindings::none().values(&values).errors(&errors), 0);
//! assert!(html.contains(r#"value="jane""#));
//! assert!(html.contains("Already taken."));
//! assert!(html.contains(r#"<fieldset id="fieldset-access">"#));
//! ```
//!
//! ## Indentation
//!
//! Markup is indented with an injected [`HtmlRenderer`]. The width of one
//! level defaults to 2 spaces; non-positive widths are ignored.
//!
//! ```rust
//! use oxide_formkit::{Form, HtmlRenderer};
//!
//! let mut renderer = HtmlRenderer::new(4);
//! renderer.set_indent_spaces(0);
//! assert_eq!(renderer.indent_spaces(), 4);
//!
//! let form = Form::new("search", "/search").with_renderer(renderer);
//! assert!(form.to_html(0).contains("\n    <div class=\"form-controls\">"));
//! ```
//!
//! ## Date and time
//!
//! A [`DateTimeWidget`](widgets::DateTimeWidget) renders one drop-down per
//! part and binds only once every part was submitted:
//!
//! ```rust
//! use oxide_formkit::{Bindings, Form, SafeValues, Value};
//! use oxide_formkit::widgets::{DateTimeWidget, Widget};
//!
//! let mut form = Form::new("event", "/event");
//! form.add_widget(DateTimeWidget::date("starts", "Starts"), "");
//!
//! let values = SafeValues::new()
//!     .with("starts-year", "2025")
//!     .with("starts-month", "4")
//!     .with("starts-day", "12");
//! form.render(&Bindings::none().values(&values), 0);
//!
//! let starts = form.widget("starts").unwrap().value();
//! assert_eq!(starts.to_string(), "2025-4-12");
//! ```

pub mod challenge;
pub mod description;
mod error;
mod form;
pub mod html;
pub mod source;
pub mod validation;
pub mod value;
pub mod widgets;

pub use description::FormDescription;
pub use error::{FormError, Result};
pub use form::{Button, Form};
pub use html::{HtmlRenderer, RenderConfig};
pub use source::{
    Bindings, ErrorSource, MessageCategory, RawValue, SafeValue, SafeValueSource, SafeValues,
    SubmittedValues, ValidationErrors,
};
pub use validation::{FieldRules, ValidationFailure, Validator};
pub use value::{DateTimeField, DateTimeParts, Meridiem, Value};
