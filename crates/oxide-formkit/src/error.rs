//! Error types for form descriptions.
//!
//! Rendering itself never fails: bad configuration is ignored and missing
//! bindings are skipped. Errors only arise when a form is built from a
//! declarative description.

use thiserror::Error;

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// The description is not valid JSON or does not match the schema.
    #[error("failed to parse form description: {0}")]
    Description(#[from] serde_json::Error),

    /// A widget in the description cannot be built.
    #[error("invalid widget {field}: {message}")]
    InvalidWidget { field: String, message: String },

    /// Two widgets in the description share a name.
    #[error("duplicate widget name: {0}")]
    DuplicateName(String),
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
