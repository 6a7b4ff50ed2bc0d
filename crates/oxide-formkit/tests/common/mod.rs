#![allow(dead_code)]

use oxide_formkit::challenge::Challenge;
use oxide_formkit::value::{DateTimeParts, Meridiem};
use oxide_formkit::widgets::{
    CaptchaWidget, Choice, ColorChoice, ColorSelectionWidget, DateTimeWidget, HiddenWidget,
    HtmlWidget, SelectionFormat, SelectionWidget, StringWidget, TextAreaWidget, Widget,
    YesNoWidget,
};
use regex::Regex;

/// A value that breaks markup if it is not escaped.
pub const HOSTILE: &str = r#""><script>alert(1)</script>"#;

const VOID_ELEMENTS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

/// Checks that every opened tag is closed in order.
pub fn check_well_formed(html: &str) -> Result<(), String> {
    let mut stack: Vec<String> = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let end = after
            .find('>')
            .ok_or_else(|| format!("unterminated tag near: {}", &rest[start..]))?;
        let tag = &after[..end];
        rest = &after[end + 1..];

        if tag.matches('"').count() % 2 != 0 {
            return Err(format!("unbalanced quotes in <{tag}>"));
        }
        if let Some(name) = tag.strip_prefix('/') {
            let name = name.trim();
            match stack.pop() {
                Some(open) if open == name => {}
                Some(open) => return Err(format!("</{name}> closes <{open}>")),
                None => return Err(format!("</{name}> without opening tag")),
            }
            continue;
        }

        let name: String = tag
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        if name.is_empty() {
            return Err(format!("malformed tag <{tag}>"));
        }
        if tag.ends_with('/') || VOID_ELEMENTS.contains(&name.as_str()) {
            continue;
        }
        stack.push(name);
    }

    match stack.pop() {
        Some(open) => Err(format!("<{open}> is never closed")),
        None => Ok(()),
    }
}

pub fn assert_well_formed(html: &str) {
    if let Err(e) = check_well_formed(html) {
        panic!("markup is not well-formed: {e}\n{html}");
    }
}

/// Returns the `(name, value)` pairs of every resubmission hidden input.
pub fn hidden_inputs(html: &str) -> Vec<(String, String)> {
    let re = Regex::new(r#"<input type="hidden" name="([^"]+)" value="([^"]*)" />"#).unwrap();
    re.captures_iter(html)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

pub fn numbered_choices(count: usize) -> Vec<Choice> {
    (1..=count)
        .map(|i| Choice::new(i.to_string(), format!("Option {i}")))
        .collect()
}

/// One widget of every kind, each holding a value.
pub fn every_widget() -> Vec<Box<dyn Widget>> {
    let challenge = Challenge::new("4 plus 5", 9);
    vec![
        Box::new(HiddenWidget::new("token", "abc")),
        Box::new(HtmlWidget::new("intro", "Intro", "<em>Welcome</em>").description("Read me")),
        Box::new(HtmlWidget::paragraph("terms", "", "Line one\nLine two")),
        Box::new(StringWidget::new("title", "Title").required().initial("Hello")),
        Box::new(StringWidget::password("secret", "Secret").tab_index(3)),
        Box::new(TextAreaWidget::new("bio", "Bio").initial("About me")),
        Box::new(
            DateTimeWidget::new("starts", "Starts").initial(
                DateTimeParts::new()
                    .date(2024, 2, 29)
                    .time(11, 45, Some(Meridiem::Am)),
            ),
        ),
        Box::new(DateTimeWidget::date("due", "Due")),
        Box::new(DateTimeWidget::time("at", "At").twenty_four_hour(true)),
        Box::new(
            SelectionWidget::new("size", "Size", numbered_choices(3), SelectionFormat::Flex)
                .initial("2"),
        ),
        Box::new(
            SelectionWidget::new("pick", "Pick", numbered_choices(8), SelectionFormat::Flex)
                .initial("8"),
        ),
        Box::new(
            SelectionWidget::new("tags", "Tags", numbered_choices(4), SelectionFormat::List)
                .multiple()
                .initial(vec!["1", "4"]),
        ),
        Box::new(YesNoWidget::new("agree", "Agree?").initial(true)),
        Box::new(
            ColorSelectionWidget::new(
                "theme",
                "Theme",
                vec![ColorChoice::new("dark", "000000", "FFFFFF")],
            )
            .initial("dark"),
        ),
        Box::new(CaptchaWidget::new("human", "Human?", &challenge)),
    ]
}
