//! Date and time drop-down widgets.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use tracing::debug;

use super::{render_field, FieldLayout, Widget, WidgetBase, WidgetKind, INNER_LEVEL};
use crate::html::{Attrs, HtmlRenderer};
use crate::value::{DateTimeField, DateTimeParts, Meridiem, Value};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%d %I:%M%p",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M%p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

const TIME_FORMATS: &[&str] = &["%I:%M %p", "%I:%M%p", "%H:%M:%S", "%H:%M"];

/// Collects a date, a time, or both through a row of drop-downs.
///
/// The value is held decomposed into year, month, day, hour, minute, and
/// meridiem. Minutes are offered in 5-minute steps, so any minute derived
/// from a continuous time is rounded down to a multiple of 5.
#[derive(Debug, Clone)]
pub struct DateTimeWidget {
    base: WidgetBase,
    kind: WidgetKind,
    parts: DateTimeParts,
    min_year: i32,
    max_year: i32,
    twenty_four_hour: bool,
}

impl DateTimeWidget {
    /// Oldest year offered by default.
    pub const DEFAULT_MIN_YEAR: i32 = 2000;
    /// Newest year offered by default.
    pub const DEFAULT_MAX_YEAR: i32 = 2100;

    /// Creates a widget collecting both a date and a time.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(name, label, WidgetKind::DateTime)
    }

    /// Creates a widget collecting only a date.
    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(name, label, WidgetKind::Date)
    }

    /// Creates a widget collecting only a time.
    pub fn time(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(name, label, WidgetKind::Time)
    }

    fn with_kind(name: impl Into<String>, label: impl Into<String>, kind: WidgetKind) -> Self {
        Self {
            base: WidgetBase::new(name, label),
            kind,
            parts: DateTimeParts::default(),
            min_year: Self::DEFAULT_MIN_YEAR,
            max_year: Self::DEFAULT_MAX_YEAR,
            twenty_four_hour: false,
        }
    }

    /// Sets the range of years offered.
    ///
    /// Non-positive years or an inverted range are ignored.
    #[must_use]
    pub fn years(mut self, min_year: i32, max_year: i32) -> Self {
        if min_year > 0 && max_year >= min_year {
            self.min_year = min_year;
            self.max_year = max_year;
        }
        self
    }

    /// Uses a 0-23 hour selector without a meridiem.
    #[must_use]
    pub const fn twenty_four_hour(mut self, enabled: bool) -> Self {
        self.twenty_four_hour = enabled;
        self
    }

    /// Returns the decomposed value.
    pub const fn parts(&self) -> &DateTimeParts {
        &self.parts
    }

    const fn includes_date(&self) -> bool {
        matches!(self.kind, WidgetKind::DateTime | WidgetKind::Date)
    }

    const fn includes_time(&self) -> bool {
        matches!(self.kind, WidgetKind::DateTime | WidgetKind::Time)
    }

    fn apply(&mut self, moment: NaiveDateTime) {
        self.parts.year = Some(moment.year());
        self.parts.month = Some(moment.month());
        self.parts.day = Some(moment.day());
        self.parts.minute = Some(round_to_five_minutes(moment.minute()));
        if self.twenty_four_hour {
            self.parts.hour = Some(moment.hour());
            self.parts.meridiem = None;
        } else {
            let (is_pm, hour) = moment.hour12();
            self.parts.hour = Some(hour);
            self.parts.meridiem = Some(if is_pm { Meridiem::Pm } else { Meridiem::Am });
        }
    }

    fn apply_timestamp(&mut self, timestamp: i64) {
        if timestamp <= 0 {
            debug!(name = %self.base.name, timestamp, "ignoring non-positive timestamp");
            return;
        }
        match DateTime::from_timestamp(timestamp, 0) {
            Some(moment) => self.apply(moment.naive_utc()),
            None => debug!(name = %self.base.name, timestamp, "timestamp out of range"),
        }
    }

    fn date_selectors(&self) -> Vec<DropDown> {
        let years = (self.min_year..=self.max_year)
            .map(|y| (y.to_string(), y.to_string()))
            .collect();
        let months = MONTH_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| ((i + 1).to_string(), (*name).to_string()))
            .collect();
        let days = (1..=31).map(|d: u32| (d.to_string(), d.to_string())).collect();

        vec![
            self.drop_down(DateTimeField::Year, years, "/"),
            self.drop_down(DateTimeField::Month, months, "/"),
            self.drop_down(DateTimeField::Day, days, ""),
        ]
    }

    fn time_selectors(&self) -> Vec<DropDown> {
        let hours = if self.twenty_four_hour {
            (0..24).map(|h: u32| (h.to_string(), h.to_string())).collect()
        } else {
            std::iter::once(12)
                .chain(1..12)
                .map(|h: u32| (h.to_string(), h.to_string()))
                .collect()
        };
        let minutes = (0..60)
            .step_by(5)
            .map(|m: u32| (m.to_string(), format!("{m:02}")))
            .collect();

        let mut selectors = vec![
            self.drop_down(DateTimeField::Hour, hours, ":"),
            self.drop_down(DateTimeField::Minute, minutes, ""),
        ];
        if !self.twenty_four_hour {
            let meridiems = [Meridiem::Am, Meridiem::Pm]
                .iter()
                .map(|m| (m.as_str().to_string(), m.label().to_string()))
                .collect();
            selectors.push(self.drop_down(DateTimeField::Meridiem, meridiems, ""));
        }
        selectors
    }

    fn drop_down(
        &self,
        field: DateTimeField,
        options: Vec<(String, String)>,
        separator: &'static str,
    ) -> DropDown {
        DropDown {
            name: field.key(&self.base.name),
            options,
            selected: self.parts.field_value(field),
            separator,
        }
    }

    fn render_drop_downs(&self, html: &HtmlRenderer, drop_downs: &[DropDown], level: usize) -> Vec<String> {
        let mut lines = Vec::new();
        for drop_down in drop_downs {
            lines.push(html.indent("<span>", level));

            let attrs = Attrs::new()
                .with("name", &drop_down.name)
                .with("id", &drop_down.name)
                .with("size", "1")
                .with_if(self.base.disabled, "disabled", "disabled");
            lines.push(html.render_tag("select", &attrs, false, true, level + 1));

            let any_selected = drop_down
                .options
                .iter()
                .any(|(value, _)| *value == drop_down.selected);
            let blank = Attrs::new()
                .with("value", "")
                .with_if(!any_selected, "selected", "selected");
            lines.push(format!(
                "{}--</option>",
                html.render_tag("option", &blank, false, false, level + 2)
            ));
            for (value, label) in &drop_down.options {
                let attrs = Attrs::new()
                    .with("value", value)
                    .with_if(*value == drop_down.selected, "selected", "selected");
                lines.push(format!(
                    "{}{label}</option>",
                    html.render_tag("option", &attrs, false, false, level + 2)
                ));
            }

            lines.push(html.close_tag("select", level + 1));
            lines.push(html.close_tag("span", level));
            if !drop_down.separator.is_empty() {
                lines.push(html.indent(&format!("<span>{}</span>", drop_down.separator), level));
            }
        }
        lines
    }
}

struct DropDown {
    name: String,
    options: Vec<(String, String)>,
    selected: String,
    separator: &'static str,
}

impl Widget for DateTimeWidget {
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
        let selectors_level = INNER_LEVEL + 1;
        let wrapper = Attrs::new().with("class", "datetime-selectors");
        let mut lines = vec![html.render_tag("div", &wrapper, false, false, INNER_LEVEL)];

        if self.includes_date() {
            lines.extend(self.render_drop_downs(html, &self.date_selectors(), selectors_level));
        }
        if self.includes_date() && self.includes_time() {
            lines.push(html.indent(
                r#"<span class="datetime-spacer">&nbsp;</span>"#,
                selectors_level,
            ));
        }
        if self.includes_time() {
            lines.extend(self.render_drop_downs(html, &self.time_selectors(), selectors_level));
        }
        lines.push(html.close_tag("div", INNER_LEVEL));

        if self.base.disabled {
            for field in self.composite_fields() {
                lines.push(self.base.hidden_copy(
                    html,
                    &field.key(&self.base.name),
                    &self.parts.field_value(field),
                ));
            }
        }

        render_field(html, &self.base, self.kind, FieldLayout::Block, &lines.join("\n"))
    }

    fn value(&self) -> Value {
        Value::DateTime(self.parts)
    }

    /// Accepts a [`DateTimeParts`] record (only its set parts are copied), a
    /// timestamp, or a date/time string.
    fn set_value(&mut self, value: Value) {
        match value {
            Value::DateTime(parts) => self.parts.merge(&parts),
            Value::Timestamp(timestamp) => self.apply_timestamp(timestamp),
            Value::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return;
                }
                if let Ok(timestamp) = text.parse::<i64>() {
                    self.apply_timestamp(timestamp);
                } else if let Some(moment) = parse_date_time(text) {
                    self.apply(moment);
                } else {
                    debug!(name = %self.base.name, value = text, "unparseable date/time");
                }
            }
            other => debug!(name = %self.base.name, value = ?other, "ignoring date/time value"),
        }
    }

    fn composite_fields(&self) -> Vec<DateTimeField> {
        let mut fields = Vec::new();
        if self.includes_date() {
            fields.extend([DateTimeField::Year, DateTimeField::Month, DateTimeField::Day]);
        }
        if self.includes_time() {
            fields.extend([DateTimeField::Hour, DateTimeField::Minute]);
            if !self.twenty_four_hour {
                fields.push(DateTimeField::Meridiem);
            }
        }
        fields
    }
}

/// Rounds minutes down to a multiple of 5, never exceeding 59.
pub(crate) const fn round_to_five_minutes(minutes: u32) -> u32 {
    let rounded = (minutes / 5) * 5;
    if rounded > 59 {
        59
    } else {
        rounded
    }
}

/// Pads every single-digit field after a `:` to two digits, so `9:5:3 am`
/// becomes `9:05:03 am`.
fn pad_clock_fields(text: &str) -> String {
    let mut fields = text.split(':');
    let mut padded = fields.next().unwrap_or_default().to_string();
    for field in fields {
        padded.push(':');
        let digits = field.chars().take_while(char::is_ascii_digit).count();
        if digits == 1 {
            padded.push('0');
        }
        padded.push_str(field);
    }
    padded
}

/// Parses a date/time, date, or time string.
///
/// Strings carrying an offset (RFC 3339) denote an instant and are read as
/// UTC, the same as timestamps. Strings without an offset are wall-clock
/// values and are taken as written. Dates without a time are taken at
/// midnight and times without a date are taken on today's local date.
pub(crate) fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = pad_clock_fields(text.trim());
    let text = text.as_str();

    if let Ok(moment) = DateTime::parse_from_rfc3339(text) {
        return Some(moment.with_timezone(&Utc).naive_utc());
    }
    if let Some(moment) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(moment);
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    {
        return Some(date.and_time(NaiveTime::MIN));
    }
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
        .map(|time| Local::now().date_naive().and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamp(s: &str) -> i64 {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
            .timestamp()
    }

    #[test]
    fn test_round_to_five_minutes() {
        assert_eq!(round_to_five_minutes(0), 0);
        assert_eq!(round_to_five_minutes(4), 0);
        assert_eq!(round_to_five_minutes(37), 35);
        assert_eq!(round_to_five_minutes(59), 55);
        assert_eq!(round_to_five_minutes(60), 59);
    }

    #[test]
    fn test_set_value_from_timestamp_12_hour() {
        let mut widget = DateTimeWidget::new("start", "Start");
        widget.set_value(Value::Timestamp(timestamp("2024-03-07 15:38:12")));
        let parts = widget.parts();
        assert_eq!(parts.year, Some(2024));
        assert_eq!(parts.month, Some(3));
        assert_eq!(parts.day, Some(7));
        assert_eq!(parts.hour, Some(3));
        assert_eq!(parts.minute, Some(35));
        assert_eq!(parts.meridiem, Some(Meridiem::Pm));
    }

    #[test]
    fn test_set_value_from_timestamp_24_hour() {
        let mut widget = DateTimeWidget::new("start", "Start").twenty_four_hour(true);
        widget.set_value(Value::Timestamp(timestamp("2024-03-07 00:04:00")));
        assert_eq!(widget.parts().hour, Some(0));
        assert_eq!(widget.parts().minute, Some(0));
        assert_eq!(widget.parts().meridiem, None);
    }

    #[test]
    fn test_set_value_from_string() {
        let mut widget = DateTimeWidget::new("start", "Start");
        widget.set_value(Value::from("2023-12-31 11:0 pm"));
        let parts = widget.parts();
        assert_eq!(parts.year, Some(2023));
        assert_eq!(parts.month, Some(12));
        assert_eq!(parts.day, Some(31));
        assert_eq!(parts.hour, Some(11));
        assert_eq!(parts.minute, Some(0));
        assert_eq!(parts.meridiem, Some(Meridiem::Pm));
    }

    #[test]
    fn test_set_value_from_date_string() {
        let mut widget = DateTimeWidget::date("due", "Due");
        widget.set_value(Value::from("2022-07-04"));
        assert_eq!(widget.parts().year, Some(2022));
        assert_eq!(widget.parts().month, Some(7));
        assert_eq!(widget.parts().day, Some(4));
        assert_eq!(widget.parts().hour, Some(12));
        assert_eq!(widget.parts().meridiem, Some(Meridiem::Am));
    }

    #[test]
    fn test_set_value_from_time_string() {
        let mut widget = DateTimeWidget::time("at", "At").twenty_four_hour(true);
        widget.set_value(Value::from("17:42"));
        assert_eq!(widget.parts().hour, Some(17));
        assert_eq!(widget.parts().minute, Some(40));
    }

    #[test]
    fn test_set_value_from_partial_record() {
        let mut widget = DateTimeWidget::new("start", "Start");
        widget.set_value(Value::from("2024-01-02 10:15 am"));
        widget.set_value(Value::DateTime(DateTimeParts {
            day: Some(20),
            ..DateTimeParts::default()
        }));
        assert_eq!(widget.parts().day, Some(20));
        assert_eq!(widget.parts().month, Some(1));
        assert_eq!(widget.parts().minute, Some(15));
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let mut widget = DateTimeWidget::new("start", "Start");
        widget.set_value(Value::from("not a date"));
        widget.set_value(Value::Timestamp(-5));
        widget.set_value(Value::from(""));
        widget.set_value(Value::Bool(true));
        assert!(widget.parts().is_empty());
    }

    #[test]
    fn test_composite_fields() {
        let widget = DateTimeWidget::new("s", "S");
        assert_eq!(widget.composite_fields().len(), 6);
        let widget = DateTimeWidget::new("s", "S").twenty_four_hour(true);
        assert!(!widget.composite_fields().contains(&DateTimeField::Meridiem));
        let widget = DateTimeWidget::date("s", "S");
        assert_eq!(
            widget.composite_fields(),
            vec![DateTimeField::Year, DateTimeField::Month, DateTimeField::Day]
        );
        let widget = DateTimeWidget::time("s", "S");
        assert_eq!(widget.composite_fields().len(), 3);
    }

    #[test]
    fn test_render_selects_current_values() {
        let widget = DateTimeWidget::new("start", "Start")
            .years(2020, 2030)
            .initial(Value::DateTime(
                DateTimeParts::new()
                    .date(2024, 3, 7)
                    .time(3, 5, Some(Meridiem::Pm)),
            ));
        let out = widget.render(&HtmlRenderer::default());
        assert!(out.contains(r#"<option value="2024" selected="selected">2024</option>"#));
        assert!(out.contains(r#"<option value="3" selected="selected">March</option>"#));
        assert!(out.contains(r#"<option value="5" selected="selected">05</option>"#));
        assert!(out.contains(r#"<option value="pm" selected="selected">PM</option>"#));
        assert!(out.contains(r#"<span class="datetime-spacer">&nbsp;</span>"#));
        assert!(!out.contains(r#"<option value="2019""#));
        assert!(!out.contains(r#"type="hidden""#));
    }

    #[test]
    fn test_render_blank_option_selected_when_unset() {
        let widget = DateTimeWidget::time("at", "At");
        let out = widget.render(&HtmlRenderer::default());
        assert_eq!(
            out.matches(r#"<option value="" selected="selected">--</option>"#)
                .count(),
            3
        );
        assert!(!out.contains("datetime-spacer"));
        assert!(!out.contains("-year"));
    }

    #[test]
    fn test_render_drop_down_layout() {
        let widget = DateTimeWidget::date("d", "D").years(2020, 2021);
        let out = widget.render(&HtmlRenderer::default());
        let expected = [
            r#"  <div class="datetime-selectors">"#,
            "    <span>",
            r#"      <select name="d-year""#,
            r#"              id="d-year""#,
            r#"              size="1">"#,
            r#"        <option value="" selected="selected">--</option>"#,
            r#"        <option value="2020">2020</option>"#,
            r#"        <option value="2021">2021</option>"#,
            "      </select>",
            "    </span>",
            "    <span>/</span>",
        ]
        .join("\n");
        assert!(out.contains(&expected));
    }

    #[test]
    fn test_disabled_emits_hidden_sub_fields() {
        let widget = DateTimeWidget::date("d", "D")
            .initial(Value::DateTime(DateTimeParts::new().date(2024, 2, 29)))
            .disabled();
        let out = widget.render(&HtmlRenderer::default());
        assert!(out.contains(r#"<input type="hidden" name="d-year" value="2024" />"#));
        assert!(out.contains(r#"<input type="hidden" name="d-month" value="2" />"#));
        assert!(out.contains(r#"<input type="hidden" name="d-day" value="29" />"#));
        assert!(!out.contains("d-hour"));
    }

    #[test]
    fn test_parse_date_time_formats() {
        assert!(parse_date_time("2024-03-07T10:20:00+00:00").is_some());
        assert!(parse_date_time("03/07/2024 9:5am").is_some());
        assert!(parse_date_time("2024-03-07 14:30:59").is_some());
        assert!(parse_date_time("garbage").is_none());
    }

    #[test]
    fn test_pad_clock_fields() {
        assert_eq!(pad_clock_fields("1:2:3"), "1:02:03");
        assert_eq!(pad_clock_fields("9:5 am"), "9:05 am");
        assert_eq!(pad_clock_fields("10:30:45"), "10:30:45");
        assert_eq!(pad_clock_fields("2024-01-05"), "2024-01-05");
    }

    #[test]
    fn test_parse_single_digit_seconds() {
        let moment = parse_date_time("2024-03-07 1:2:3").unwrap();
        assert_eq!((moment.hour(), moment.minute(), moment.second()), (1, 2, 3));
    }

    #[test]
    fn test_offset_strings_are_read_as_utc() {
        let offset = parse_date_time("2024-03-07T10:20:00+02:00").unwrap();
        let utc = parse_date_time("2024-03-07T08:20:00Z").unwrap();
        assert_eq!(offset, utc);
        assert_eq!(offset.hour(), 8);

        let mut from_string = DateTimeWidget::new("d", "D").twenty_four_hour(true);
        from_string.set_value(Value::from("2024-03-07T10:20:00+02:00"));
        let mut from_timestamp = DateTimeWidget::new("d", "D").twenty_four_hour(true);
        from_timestamp.set_value(Value::Timestamp(timestamp("2024-03-07 08:20:00")));
        assert_eq!(from_string.parts(), from_timestamp.parts());
    }
}
