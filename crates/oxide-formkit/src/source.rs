//! Read-only sources the form binds from at render time.
//!
//! A [`Form`](crate::Form) never reaches into request state on its own. The
//! caller hands it a [`Bindings`] holding an optional [`SafeValueSource`]
//! (sanitized submitted values) and an optional [`ErrorSource`] (validation
//! messages keyed by widget name). A missing source means "nothing to bind".

use indexmap::IndexMap;
use serde::Deserialize;

use crate::html::html_escape;

/// A sanitized submitted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafeValue {
    /// A single value.
    One(String),
    /// Several values submitted under one key.
    Many(Vec<String>),
}

impl SafeValue {
    /// Returns the single value, if this is not a list.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::One(s) => Some(s),
            Self::Many(_) => None,
        }
    }

    /// Returns whether the value is blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::One(s) => s.trim().is_empty(),
            Self::Many(items) => items.is_empty(),
        }
    }
}

/// Source of sanitized, already HTML-escaped submitted values.
pub trait SafeValueSource {
    /// Returns every submitted value keyed by input name, in submission
    /// order.
    fn get_all(&self) -> &IndexMap<String, SafeValue>;

    /// Returns the value submitted under `key`.
    fn get(&self, key: &str) -> Option<&SafeValue> {
        self.get_all().get(key)
    }
}

/// An in-memory [`SafeValueSource`].
///
/// There is no way to deserialize one directly: values read from outside
/// arrive as [`SubmittedValues`] and go through [`SubmittedValues::sanitize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafeValues {
    values: IndexMap<String, SafeValue>,
}

impl SafeValues {
    /// Creates an empty set of values.
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Inserts a value that is already safe to embed in HTML.
    pub fn insert(&mut self, key: impl Into<String>, value: SafeValue) {
        self.values.insert(key.into(), value);
    }

    /// Builder method to insert a single already-safe value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, SafeValue::One(value.into()));
        self
    }

    /// Builder method to insert an already-safe list of values.
    #[must_use]
    pub fn with_list<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(
            key,
            SafeValue::Many(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Builds safe values from raw submitted `(key, value)` pairs.
    ///
    /// Every value is HTML-escaped. Keys ending in `[]` collect into a list
    /// stored under the bare key.
    pub fn sanitize<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut values = Self::new();
        for (key, value) in pairs {
            let value = sanitize_value(value.as_ref());
            match key.as_ref().strip_suffix("[]") {
                Some(bare) => match values
                    .values
                    .entry(bare.to_string())
                    .or_insert_with(|| SafeValue::Many(Vec::new()))
                {
                    SafeValue::Many(items) => items.push(value),
                    one @ SafeValue::One(_) => *one = SafeValue::Many(vec![value]),
                },
                None => values.insert(key.as_ref(), SafeValue::One(value)),
            }
        }
        values
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether there are no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SafeValueSource for SafeValues {
    fn get_all(&self) -> &IndexMap<String, SafeValue> {
        &self.values
    }
}

fn sanitize_value(raw: &str) -> String {
    // Word pastes curly single quotes.
    let straightened = raw.replace(['\u{2018}', '\u{2019}'], "'");
    html_escape(&straightened)
}

/// A submitted value as received, not yet escaped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A single value.
    One(String),
    /// Several values submitted under one key.
    Many(Vec<String>),
}

/// Submitted values as received from a client, in submission order.
///
/// Nothing here is safe to embed in HTML. Validate these, then hand the
/// result of [`SubmittedValues::sanitize`] to a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SubmittedValues {
    values: IndexMap<String, RawValue>,
}

impl SubmittedValues {
    /// Creates an empty set of values.
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Builder method to add a single value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), RawValue::One(value.into()));
        self
    }

    /// Builder method to add a list of values.
    #[must_use]
    pub fn with_list<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values.insert(
            key.into(),
            RawValue::Many(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Returns the value submitted under `key`.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }

    /// Returns the single value submitted under `key`, if it is not a list.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(RawValue::One(s)) => Some(s),
            _ => None,
        }
    }

    /// Iterates over the values in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether there are no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Escapes every value, keeping the submission order.
    pub fn sanitize(&self) -> SafeValues {
        let mut safe = SafeValues::new();
        for (key, value) in &self.values {
            let value = match value {
                RawValue::One(s) => SafeValue::One(sanitize_value(s)),
                RawValue::Many(items) => {
                    SafeValue::Many(items.iter().map(|s| sanitize_value(s)).collect())
                }
            };
            safe.insert(key.as_str(), value);
        }
        safe
    }
}

/// Category of a message held by an [`ErrorSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCategory {
    /// Field validation failures, keyed by widget name.
    Validation,
    /// General errors.
    Error,
    /// Informational notices.
    Info,
}

/// Source of messages keyed by widget name.
pub trait ErrorSource {
    /// Returns the messages of one category, keyed by widget name.
    fn get(&self, category: MessageCategory) -> IndexMap<String, String>;
}

/// Collection of validation errors by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates a new empty `ValidationErrors`.
    pub fn new() -> Self {
        Self {
            errors: IndexMap::new(),
        }
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Builder method to add an error for a field.
    #[must_use]
    pub fn with(mut self, field: &str, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns errors for a specific field.
    pub fn field(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }
}

impl ErrorSource for ValidationErrors {
    /// Several messages for one field are joined with a line break.
    fn get(&self, category: MessageCategory) -> IndexMap<String, String> {
        if category != MessageCategory::Validation {
            return IndexMap::new();
        }
        self.errors
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(field, messages)| (field.clone(), messages.join("<br />")))
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// The sources a form binds from during one render pass.
#[derive(Clone, Copy, Default)]
pub struct Bindings<'a> {
    values: Option<&'a dyn SafeValueSource>,
    errors: Option<&'a dyn ErrorSource>,
}

impl<'a> Bindings<'a> {
    /// Creates bindings with no sources.
    pub fn none() -> Self {
        Self::default()
    }

    /// Builder method to set the submitted value source.
    #[must_use]
    pub fn values(mut self, values: &'a dyn SafeValueSource) -> Self {
        self.values = Some(values);
        self
    }

    /// Builder method to set the validation error source.
    #[must_use]
    pub fn errors(mut self, errors: &'a dyn ErrorSource) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Returns the submitted value source, if any.
    pub fn value_source(&self) -> Option<&'a dyn SafeValueSource> {
        self.values
    }

    /// Returns the validation error source, if any.
    pub fn error_source(&self) -> Option<&'a dyn ErrorSource> {
        self.errors
    }
}

impl std::fmt::Debug for Bindings<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bindings")
            .field("values", &self.values.is_some())
            .field("errors", &self.errors.is_some())
            .finish()
    }
}
