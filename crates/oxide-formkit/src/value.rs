//! Widget values.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::source::SafeValue;

/// The value held by a widget.
///
/// Which shape a widget accepts depends on the variant: text widgets hold
/// [`Value::Text`], multi-selections hold [`Value::List`], date/time widgets
/// accept timestamps, strings, and [`DateTimeParts`] records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    /// No value.
    #[default]
    Empty,
    /// A single string.
    Text(String),
    /// An ordered list of strings.
    List(Vec<String>),
    /// Seconds since the Unix epoch.
    Timestamp(i64),
    /// A boolean.
    Bool(bool),
    /// A decomposed date/time record.
    DateTime(DateTimeParts),
}

impl Value {
    /// Returns whether the value is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Timestamp(_) | Self::Bool(_) => false,
            Self::DateTime(parts) => parts.is_empty(),
        }
    }

    /// Returns the text if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts the value into a single string.
    ///
    /// Lists are joined with `", "`.
    pub fn into_text(self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s,
            Self::List(items) => items.join(", "),
            other => other.to_string(),
        }
    }

    /// Converts the value into a list of strings.
    ///
    /// An empty string becomes an empty list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::Empty => Vec::new(),
            Self::List(items) => items,
            Self::Text(s) if s.is_empty() => Vec::new(),
            other => vec![other.into_text()],
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(", ")),
            Self::Timestamp(ts) => write!(f, "{ts}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::DateTime(parts) => write!(f, "{parts}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(String::from).collect())
    }
}

impl From<i64> for Value {
    fn from(ts: i64) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<DateTimeParts> for Value {
    fn from(parts: DateTimeParts) -> Self {
        Self::DateTime(parts)
    }
}

impl From<&SafeValue> for Value {
    fn from(value: &SafeValue) -> Self {
        match value {
            SafeValue::One(s) => Self::Text(s.clone()),
            SafeValue::Many(items) => Self::List(items.clone()),
        }
    }
}

/// Morning or afternoon marker for 12-hour time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Returns the submitted form (`am` / `pm`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Am => "am",
            Self::Pm => "pm",
        }
    }

    /// Returns the display label (`AM` / `PM`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }

    /// Parses `am` or `pm` in any case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "am" => Some(Self::Am),
            "pm" => Some(Self::Pm),
            _ => None,
        }
    }
}

/// One of the independently submitted parts of a date/time widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Meridiem,
}

impl DateTimeField {
    /// Every field, date half first.
    pub const ALL: [Self; 6] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Meridiem,
    ];

    /// The suffix appended to the widget name to form the input name.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Meridiem => "ampm",
        }
    }

    /// The submitted key for this field of the widget named `name`.
    pub fn key(self, name: &str) -> String {
        format!("{name}-{}", self.suffix())
    }
}

/// A date/time decomposed into the parts a date/time widget renders.
///
/// `None` marks a part that has not been set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateTimeParts {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub meridiem: Option<Meridiem>,
}

impl DateTimeParts {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether no part is set.
    pub const fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.month.is_none()
            && self.day.is_none()
            && self.hour.is_none()
            && self.minute.is_none()
            && self.meridiem.is_none()
    }

    /// Builder method to set the date half.
    #[must_use]
    pub const fn date(mut self, year: i32, month: u32, day: u32) -> Self {
        self.year = Some(year);
        self.month = Some(month);
        self.day = Some(day);
        self
    }

    /// Builder method to set the time half.
    #[must_use]
    pub const fn time(mut self, hour: u32, minute: u32, meridiem: Option<Meridiem>) -> Self {
        self.hour = Some(hour);
        self.minute = Some(minute);
        self.meridiem = meridiem;
        self
    }

    /// Returns the submitted string form of one part, empty when unset.
    pub fn field_value(&self, field: DateTimeField) -> String {
        match field {
            DateTimeField::Year => self.year.map(|v| v.to_string()),
            DateTimeField::Month => self.month.map(|v| v.to_string()),
            DateTimeField::Day => self.day.map(|v| v.to_string()),
            DateTimeField::Hour => self.hour.map(|v| v.to_string()),
            DateTimeField::Minute => self.minute.map(|v| v.to_string()),
            DateTimeField::Meridiem => self.meridiem.map(|m| m.as_str().to_string()),
        }
        .unwrap_or_default()
    }

    /// Parses and stores one part from its submitted string form.
    ///
    /// Unparseable input leaves the part unset.
    pub fn set_field(&mut self, field: DateTimeField, raw: &str) {
        let raw = raw.trim();
        match field {
            DateTimeField::Year => self.year = raw.parse().ok(),
            DateTimeField::Month => self.month = raw.parse().ok(),
            DateTimeField::Day => self.day = raw.parse().ok(),
            DateTimeField::Hour => self.hour = raw.parse().ok(),
            DateTimeField::Minute => self.minute = raw.parse().ok(),
            DateTimeField::Meridiem => self.meridiem = Meridiem::parse(raw),
        }
    }

    /// Builds a record from `(field, submitted value)` pairs.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (DateTimeField, &'a str)>) -> Self {
        let mut parts = Self::new();
        for (field, raw) in fields {
            parts.set_field(field, raw);
        }
        parts
    }

    /// Copies every part that is set in `other` onto `self`.
    pub fn merge(&mut self, other: &Self) {
        if other.year.is_some() {
            self.year = other.year;
        }
        if other.month.is_some() {
            self.month = other.month;
        }
        if other.day.is_some() {
            self.day = other.day;
        }
        if other.hour.is_some() {
            self.hour = other.hour;
        }
        if other.minute.is_some() {
            self.minute = other.minute;
        }
        if other.meridiem.is_some() {
            self.meridiem = other.meridiem;
        }
    }

    /// Converts a fully populated record into a [`NaiveDateTime`].
    ///
    /// A 12-hour time (meridiem set) is converted to 24-hour form. Missing
    /// time parts default to midnight.
    pub fn to_naive_date_time(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)?;
        let hour = match (self.hour, self.meridiem) {
            (Some(12), Some(Meridiem::Am)) => 0,
            (Some(h), Some(Meridiem::Pm)) if h < 12 => h + 12,
            (Some(h), _) => h,
            (None, _) => 0,
        };
        let time = NaiveTime::from_hms_opt(hour, self.minute.unwrap_or(0), 0)?;
        Some(date.and_time(time))
    }
}

impl fmt::Display for DateTimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = [DateTimeField::Year, DateTimeField::Month, DateTimeField::Day]
            .map(|field| self.field_value(field));
        let mut time = format!(
            "{}:{}",
            self.field_value(DateTimeField::Hour),
            self.minute.map(|m| format!("{m:02}")).unwrap_or_default()
        );
        if let Some(meridiem) = self.meridiem {
            time.push(' ');
            time.push_str(meridiem.as_str());
        }
        let has_date = self.year.is_some() || self.month.is_some() || self.day.is_some();
        let has_time = self.hour.is_some() || self.minute.is_some() || self.meridiem.is_some();
        match (has_date, has_time) {
            (true, false) => write!(f, "{}", date.join("-")),
            (false, true) => f.write_str(&time),
            (false, false) => Ok(()),
            (true, true) => write!(f, "{} {time}", date.join("-")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_into_list() {
        assert_eq!(Value::from("a").into_list(), vec!["a".to_string()]);
        assert!(Value::from("").into_list().is_empty());
        assert!(Value::Empty.into_list().is_empty());
        assert_eq!(Value::from(vec!["a", "b"]).into_list().len(), 2);
    }

    #[test]
    fn test_value_into_text() {
        assert_eq!(Value::from(vec!["a", "b"]).into_text(), "a, b");
        assert_eq!(Value::from(42_i64).into_text(), "42");
        assert_eq!(Value::Empty.into_text(), "");
    }

    #[test]
    fn test_meridiem_parse() {
        assert_eq!(Meridiem::parse("PM"), Some(Meridiem::Pm));
        assert_eq!(Meridiem::parse(" am "), Some(Meridiem::Am));
        assert_eq!(Meridiem::parse("noon"), None);
    }

    #[test]
    fn test_parts_from_fields() {
        let parts = DateTimeParts::from_fields([
            (DateTimeField::Year, "2024"),
            (DateTimeField::Month, "3"),
            (DateTimeField::Minute, "oops"),
            (DateTimeField::Meridiem, "pm"),
        ]);
        assert_eq!(parts.year, Some(2024));
        assert_eq!(parts.month, Some(3));
        assert_eq!(parts.minute, None);
        assert_eq!(parts.meridiem, Some(Meridiem::Pm));
        assert_eq!(parts.field_value(DateTimeField::Day), "");
    }

    #[test]
    fn test_parts_merge_keeps_unset() {
        let mut parts = DateTimeParts::new().date(2020, 1, 2);
        parts.merge(&DateTimeParts {
            day: Some(9),
            ..DateTimeParts::default()
        });
        assert_eq!(parts.year, Some(2020));
        assert_eq!(parts.day, Some(9));
    }

    #[test]
    fn test_to_naive_date_time() {
        let parts = DateTimeParts::new()
            .date(2024, 3, 7)
            .time(12, 5, Some(Meridiem::Am));
        let dt = parts.to_naive_date_time().unwrap();
        assert_eq!(dt.to_string(), "2024-03-07 00:05:00");

        let parts = DateTimeParts::new()
            .date(2024, 3, 7)
            .time(3, 30, Some(Meridiem::Pm));
        assert_eq!(
            parts.to_naive_date_time().unwrap().to_string(),
            "2024-03-07 15:30:00"
        );

        assert!(DateTimeParts::new().to_naive_date_time().is_none());
    }

    #[test]
    fn test_parts_display() {
        let parts = DateTimeParts::new()
            .date(2024, 3, 7)
            .time(3, 5, Some(Meridiem::Pm));
        assert_eq!(parts.to_string(), "2024-3-7 3:05 pm");
    }
}
