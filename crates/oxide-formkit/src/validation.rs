//! Validators for submitted values.
//!
//! Each [`Validator`] checks one raw string and reports a
//! [`ValidationFailure`]. Failure messages name the value generically ("The
//! phone number ...") and [`ValidationFailure::message_for`] swaps in a field
//! label. [`FieldRules`] runs validators over [`SubmittedValues`] and
//! collects the messages into [`ValidationErrors`] a form can bind.

use std::fmt;

use regex::Regex;
use tracing::debug;

use crate::source::{RawValue, SubmittedValues, ValidationErrors};

/// What made a value invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Not exactly the required length.
    Length,
    /// Longer than the maximum.
    TooLong,
    /// Shorter than the minimum.
    TooShort,
    /// Contains characters or a layout the format does not allow.
    Pattern,
    /// Empty where a value is required.
    Blank,
    /// Larger than the maximum.
    TooBig,
    /// Smaller than the minimum.
    TooSmall,
    /// Not of the expected type.
    WrongType,
}

/// A validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    kind: FailureKind,
    message: String,
    subject: &'static str,
}

impl ValidationFailure {
    /// Creates a failure whose message refers to the value as `subject`.
    pub fn new(kind: FailureKind, message: impl Into<String>, subject: &'static str) -> Self {
        Self {
            kind,
            message: message.into(),
            subject,
        }
    }

    /// Returns what made the value invalid.
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Returns the message with the generic subject.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the message with every mention of the generic subject
    /// replaced by `label`. An empty label keeps the message as is.
    pub fn message_for(&self, label: &str) -> String {
        if label.is_empty() || self.subject.is_empty() {
            return self.message.clone();
        }
        self.message.replace(self.subject, label)
    }

    fn extend(mut self, text: &str) -> Self {
        self.message.push(' ');
        self.message.push_str(text);
        self
    }

    fn resubject(mut self, subject: &'static str) -> Self {
        self.message = self.message.replace(self.subject, subject);
        self.subject = subject;
        self
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationFailure {}

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a raw submitted value.
    fn validate(&self, value: &str) -> Result<(), ValidationFailure>;

    /// Returns whether a blank value is checked at all. Validators that
    /// return `false` accept blank values, leaving them to
    /// [`RequiredValidator`].
    fn checks_blank(&self) -> bool {
        false
    }
}

/// Which characters a value must start with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StartWith {
    /// No restriction.
    #[default]
    Any,
    /// A letter.
    Letter,
    /// A digit.
    Number,
    /// A letter or a digit.
    LetterOrNumber,
}

impl StartWith {
    fn allows(self, first: char) -> bool {
        match self {
            Self::Any => true,
            Self::Letter => first.is_ascii_alphabetic(),
            Self::Number => first.is_ascii_digit(),
            Self::LetterOrNumber => first.is_ascii_alphanumeric(),
        }
    }

    fn explanation(self) -> &'static str {
        match self {
            Self::Any => "The ",
            Self::Letter => "The string must start with a letter. The rest of the ",
            Self::Number => "The string must start with a number. The rest of the ",
            Self::LetterOrNumber => {
                "The string must start with a letter or a number. The rest of the "
            }
        }
    }
}

/// Symbols allowed in free text.
const TEXT_SYMBOLS: &str = "!@#~$%^&*-_+=()[]{}\\/:;'\",.?";
/// Symbols allowed in passwords.
const PASSWORD_SYMBOLS: &str = "!@#$%^&*-_+=:;'\",.?";
/// Symbols allowed in person names.
const NAME_SYMBOLS: &str = "-'.";
/// Symbols allowed in web addresses.
const URL_SYMBOLS: &str = "%&/-_+=:.#?";

/// Characters a string may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// Letters, digits, spaces and common symbols on a single line.
    Text,
    /// Like [`Charset::Text`] but any whitespace, including line breaks.
    Block,
    /// Letters and spaces.
    Alpha,
    /// Letters, digits and spaces.
    AlphaNumeric,
}

impl Charset {
    fn allows(self, c: char) -> bool {
        match self {
            Self::Text => c.is_ascii_alphanumeric() || c == ' ' || TEXT_SYMBOLS.contains(c),
            Self::Block => {
                c.is_ascii_alphanumeric() || c.is_ascii_whitespace() || TEXT_SYMBOLS.contains(c)
            }
            Self::Alpha => c.is_ascii_alphabetic() || c == ' ',
            Self::AlphaNumeric => c.is_ascii_alphanumeric() || c == ' ',
        }
    }

    fn label(self) -> String {
        match self {
            Self::Text | Self::Block => format!(
                "string can contain letters, numbers, spaces and the following symbols: {TEXT_SYMBOLS}"
            ),
            Self::Alpha => "string can contain only letters and spaces.".to_string(),
            Self::AlphaNumeric => "string can contain only letters, numbers and spaces.".to_string(),
        }
    }
}

/// Replaces typographic quotes, dashes and ellipses with plain ASCII.
pub fn straighten(text: &str) -> String {
    text.replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2013}', '\u{2014}'], "-")
        .replace('\u{2026}', "...")
}

/// Checks the length bounds of `text`, then its characters. Zero bounds
/// are unlimited.
fn check_string(
    text: &str,
    min_length: usize,
    max_length: usize,
    valid: impl Fn(&str) -> bool,
) -> Result<(), ValidationFailure> {
    let text = straighten(text);
    let length = text.chars().count();
    if max_length > 0 && length > max_length {
        return Err(ValidationFailure::new(
            FailureKind::TooLong,
            format!("The string is greater than the maximum length ({max_length}) specified."),
            "string",
        ));
    }
    if min_length > 0 && length < min_length {
        return Err(ValidationFailure::new(
            FailureKind::TooShort,
            format!("The string is not longer than the minimum length ({min_length}) specified."),
            "string",
        ));
    }
    if !valid(&text) {
        return Err(ValidationFailure::new(
            FailureKind::Pattern,
            "The string contains one or more invalid characters.",
            "string",
        ));
    }
    Ok(())
}

fn starts_and_contains(
    text: &str,
    start: StartWith,
    allows: impl Fn(char) -> bool,
) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => start.allows(first) && allows(first) && chars.all(allows),
        None => start == StartWith::Any,
    }
}

/// Validator that requires a non-blank value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new `RequiredValidator` with the default message.
    pub fn new() -> Self {
        Self {
            message: "The string is blank.".to_string(),
        }
    }

    /// Creates a new `RequiredValidator` with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        if value.trim().is_empty() {
            Err(ValidationFailure::new(
                FailureKind::Blank,
                self.message.clone(),
                "string",
            ))
        } else {
            Ok(())
        }
    }

    fn checks_blank(&self) -> bool {
        true
    }
}

/// Validator for strings drawn from a [`Charset`].
#[derive(Debug, Clone)]
pub struct StringValidator {
    charset: Charset,
    min_length: usize,
    max_length: usize,
    start: StartWith,
}

impl StringValidator {
    /// Creates a validator for single-line text.
    pub fn new() -> Self {
        Self::with_charset(Charset::Text)
    }

    /// Creates a validator for the given character set.
    pub fn with_charset(charset: Charset) -> Self {
        Self {
            charset,
            min_length: 0,
            max_length: 0,
            start: StartWith::Any,
        }
    }

    /// Sets the minimum length in characters. Zero means none.
    #[must_use]
    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = length;
        self
    }

    /// Sets the maximum length in characters. Zero means none.
    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self
    }

    /// Sets what the string must start with.
    ///
    /// Ignored for [`Charset::Alpha`], which can only start with a letter
    /// anyway.
    #[must_use]
    pub fn start_with(mut self, start: StartWith) -> Self {
        if self.charset != Charset::Alpha {
            self.start = start;
        }
        self
    }
}

impl Default for StringValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for StringValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        let charset = self.charset;
        check_string(value, self.min_length, self.max_length, |text| {
            starts_and_contains(text, self.start, |c| charset.allows(c))
        })
        .map_err(|failure| match failure.kind() {
            FailureKind::Pattern => {
                failure.extend(&format!("{}{}", self.start.explanation(), charset.label()))
            }
            _ => failure,
        })
    }
}

/// Validator for a person's name: a letter first, then letters, digits,
/// spaces and `-'.`.
#[derive(Debug, Clone, Default)]
pub struct PersonNameValidator {
    max_length: usize,
}

impl PersonNameValidator {
    /// Creates a new `PersonNameValidator` without a length limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum length in characters. Zero means none.
    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self
    }
}

impl Validator for PersonNameValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        let allows = |c: char| c.is_ascii_alphanumeric() || c == ' ' || NAME_SYMBOLS.contains(c);
        check_string(value, 0, self.max_length, |text| {
            starts_and_contains(text, StartWith::Letter, allows)
        })
        .map_err(|failure| match failure.kind() {
            FailureKind::Pattern => failure.extend(&format!(
                "{}string can contain letters, numbers, spaces and the following symbols: {NAME_SYMBOLS}",
                StartWith::Letter.explanation()
            )),
            _ => failure,
        })
    }
}

/// Validator for passwords. Blank passwords are rejected.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    max_length: usize,
    start: StartWith,
}

impl PasswordValidator {
    /// Creates a validator requiring at least `min_length` characters.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            max_length: 0,
            start: StartWith::Any,
        }
    }

    /// Sets the maximum length in characters. Zero means none.
    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self
    }

    /// Sets what the password must start with.
    #[must_use]
    pub fn start_with(mut self, start: StartWith) -> Self {
        self.start = start;
        self
    }

    fn explain(&self, failure: ValidationFailure) -> ValidationFailure {
        failure.extend(&format!(
            "{}string can contain letters, numbers and the following symbols: {PASSWORD_SYMBOLS}",
            self.start.explanation()
        ))
    }
}

impl Validator for PasswordValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        if value.is_empty() {
            let blank = ValidationFailure::new(FailureKind::Blank, "The string is blank.", "string");
            return Err(self.explain(blank));
        }
        let allows = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c);
        check_string(value, self.min_length, self.max_length, |text| {
            starts_and_contains(text, self.start, allows)
        })
        .map_err(|failure| match failure.kind() {
            FailureKind::Pattern => self.explain(failure),
            _ => failure,
        })
    }

    fn checks_blank(&self) -> bool {
        true
    }
}

/// Validator for a custom regular expression.
///
/// The pattern must match the whole value and is case-insensitive. Length
/// bounds are checked first.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Regex,
    min_length: usize,
    max_length: usize,
}

impl PatternValidator {
    /// Creates a new `PatternValidator`.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("(?i)^(?:{pattern})$"))?,
            min_length: 0,
            max_length: 0,
        })
    }

    /// Sets the minimum length in characters. Zero means none.
    #[must_use]
    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = length;
        self
    }

    /// Sets the maximum length in characters. Zero means none.
    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self
    }
}

impl Validator for PatternValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        check_string(value, self.min_length, self.max_length, |text| {
            self.pattern.is_match(text)
        })
    }
}

fn digits(text: &str, count: usize) -> bool {
    text.len() == count && text.bytes().all(|b| b.is_ascii_digit())
}

fn digits_between(text: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&text.len()) && text.bytes().all(|b| b.is_ascii_digit())
}

/// Validator for `###-###-####` phone numbers, optionally followed by an
/// extension such as ` x1234`.
#[derive(Debug, Clone, Default)]
pub struct PhoneValidator {
    extension: bool,
}

impl PhoneValidator {
    /// Creates a validator that rejects extensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to allow an extension of up to eight digits.
    #[must_use]
    pub fn allow_extension(mut self) -> Self {
        self.extension = true;
        self
    }

    fn is_valid(&self, value: &str) -> bool {
        let (number, extension) = match value.split_once(' ') {
            Some((number, extension)) => (number, Some(extension)),
            None => (value, None),
        };
        let groups: Vec<&str> = number.split('-').collect();
        let number_ok = matches!(groups.as_slice(), [a, b, c]
            if digits(a, 3) && digits(b, 3) && digits(c, 4));
        let extension_ok = match extension {
            None => true,
            Some(ext) => {
                self.extension
                    && ext
                        .strip_prefix(['x', 'X'])
                        .is_some_and(|n| digits_between(n, 1, 8))
            }
        };
        number_ok && extension_ok
    }
}

impl Validator for PhoneValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        if self.is_valid(value) {
            return Ok(());
        }
        let format = if self.extension {
            "###-###-####[ x#[#######]]. The square brackets [] indicate optional items in the format."
        } else {
            "###-###-####."
        };
        Err(ValidationFailure::new(
            FailureKind::Pattern,
            format!(
                "The phone number contains one or more invalid characters or is not in the correct format. The phone number should be in the format: {format}"
            ),
            "phone number",
        ))
    }
}

/// Validator for e-mail addresses of the form `user@domain.tld`.
#[derive(Debug, Clone, Default)]
pub struct EmailValidator;

impl EmailValidator {
    /// Creates a new `EmailValidator`.
    pub const fn new() -> Self {
        Self
    }

    fn is_valid(value: &str) -> bool {
        let Some((user, domain)) = value.split_once('@') else {
            return false;
        };
        let user_ok = !user.is_empty()
            && user
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
        let Some((host, tld)) = domain.rsplit_once('.') else {
            return false;
        };
        let host_ok = host.split('.').all(|label| {
            !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
        let tld_ok = (2..=4).contains(&tld.len()) && tld.chars().all(|c| c.is_ascii_alphabetic());
        user_ok && host_ok && tld_ok
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        if Self::is_valid(value) {
            Ok(())
        } else {
            Err(ValidationFailure::new(
                FailureKind::Pattern,
                "The e-mail address contains one or more invalid characters or is not in the correct format. The e-mail address should be in the format: username@domain.tld (example: jsmith@yahoo.com).",
                "e-mail address",
            ))
        }
    }
}

/// Validator for US postal codes: `#####` or `#####-####`.
#[derive(Debug, Clone, Default)]
pub struct PostalCodeValidator;

impl PostalCodeValidator {
    /// Creates a new `PostalCodeValidator`.
    pub const fn new() -> Self {
        Self
    }
}

impl Validator for PostalCodeValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        let valid = match value.split_once('-') {
            Some((zip, plus_four)) => digits(zip, 5) && digits(plus_four, 4),
            None => digits(value, 5),
        };
        if valid {
            return Ok(());
        }
        Err(ValidationFailure::new(
            FailureKind::Pattern,
            "The postal code contains one or more invalid characters or is not in the correct format. The postal code should be in the format: #####[-####]. The square brackets [] indicate optional items in the format.",
            "postal code",
        ))
    }
}

/// Validator for `m/d/yyyy` dates. Only the layout is checked.
#[derive(Debug, Clone, Default)]
pub struct DateValidator;

impl DateValidator {
    /// Creates a new `DateValidator`.
    pub const fn new() -> Self {
        Self
    }
}

impl Validator for DateValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        let parts: Vec<&str> = value.split('/').collect();
        let valid = matches!(parts.as_slice(), [m, d, y]
            if digits_between(m, 1, 2) && digits_between(d, 1, 2) && digits(y, 4));
        if valid {
            return Ok(());
        }
        Err(ValidationFailure::new(
            FailureKind::Pattern,
            "The date contains one or more invalid characters or is not in the correct format. The date should be in the format: m/d/yyyy.",
            "date",
        ))
    }
}

/// Validator for web addresses: letters, digits and `%&/-_+=:.#?`.
#[derive(Debug, Clone, Default)]
pub struct UrlValidator {
    max_length: usize,
}

impl UrlValidator {
    /// Creates a new `UrlValidator` without a length limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum length in characters. Zero means none.
    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self
    }
}

impl Validator for UrlValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        check_string(value, 0, self.max_length, |text| {
            text.chars()
                .all(|c| c.is_ascii_alphanumeric() || URL_SYMBOLS.contains(c))
        })
        .map_err(|failure| {
            let failure = match failure.kind() {
                FailureKind::Pattern => failure.extend(&format!(
                    "The string can contain letters, numbers and the following symbols: {URL_SYMBOLS}"
                )),
                _ => failure,
            };
            failure.resubject("url")
        })
    }
}

/// Validator for dotted IPv4 addresses.
#[derive(Debug, Clone, Default)]
pub struct IpAddressValidator;

impl IpAddressValidator {
    /// Creates a new `IpAddressValidator`.
    pub const fn new() -> Self {
        Self
    }
}

impl Validator for IpAddressValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        let octets: Vec<&str> = value.split('.').collect();
        let valid = octets.len() == 4
            && octets
                .iter()
                .all(|octet| digits_between(octet, 1, 3) && octet.parse::<u8>().is_ok());
        if valid {
            return Ok(());
        }
        Err(ValidationFailure::new(
            FailureKind::Pattern,
            "The IP address contains one or more invalid characters or is not in the correct format. The IP address should be in the format #.#.#.# where each # ranges from 0 to 255 (ex: 127.0.0.1).",
            "IP address",
        ))
    }
}

/// Validator for `RRGGBB` color codes, in either case.
#[derive(Debug, Clone, Default)]
pub struct ColorCodeValidator;

impl ColorCodeValidator {
    /// Creates a new `ColorCodeValidator`.
    pub const fn new() -> Self {
        Self
    }
}

impl Validator for ColorCodeValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        let (kind, problem) = if value.chars().count() != 6 {
            (FailureKind::Length, "The color code is not six characters in length.")
        } else if !value.chars().all(|c| c.is_ascii_hexdigit()) {
            (
                FailureKind::Pattern,
                "The color code contains one or more invalid characters or is not in the correct format.",
            )
        } else {
            return Ok(());
        };
        Err(ValidationFailure::new(
            kind,
            format!(
                "{problem} The color code should be in the format RRGGBB where each character is either 0-9 or A-F and RR = red color code, GG = green color code, and BB = blue color code. White is FFFFFF and Black is 000000."
            ),
            "color code",
        ))
    }
}

/// Validator for numbers within optional bounds.
#[derive(Debug, Clone, Default)]
pub struct NumberValidator {
    min: Option<f64>,
    max: Option<f64>,
}

impl NumberValidator {
    /// Creates a new `NumberValidator` with the given bounds.
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

impl Validator for NumberValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationFailure> {
        let number = match value.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => number,
            _ => {
                return Err(ValidationFailure::new(
                    FailureKind::WrongType,
                    "The number provided is not numeric.",
                    "number",
                ))
            }
        };
        if let Some(min) = self.min.filter(|min| number < *min) {
            return Err(ValidationFailure::new(
                FailureKind::TooSmall,
                format!("The number is smaller than the minimum allowed value ({min})."),
                "number",
            ));
        }
        if let Some(max) = self.max.filter(|max| number > *max) {
            return Err(ValidationFailure::new(
                FailureKind::TooBig,
                format!("The number is larger than the maximum allowed value ({max})."),
                "number",
            ));
        }
        Ok(())
    }
}

struct FieldRule {
    name: String,
    label: String,
    validator: Box<dyn Validator>,
}

/// Validators keyed by input name, run in the order they were added.
///
/// ```
/// use oxide_formkit::validation::{EmailValidator, FieldRules, RequiredValidator};
/// use oxide_formkit::SubmittedValues;
///
/// let rules = FieldRules::new()
///     .rule("email", "E-mail", RequiredValidator::new())
///     .rule("email", "E-mail", EmailValidator::new());
/// let submitted = SubmittedValues::new().with("email", "nobody");
/// let errors = rules.validate(&submitted);
/// assert_eq!(errors.field("email").map(Vec::len), Some(1));
/// ```
#[derive(Default)]
pub struct FieldRules {
    rules: Vec<FieldRule>,
}

impl FieldRules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a validator for the input `name`. Messages call the field
    /// `label`.
    #[must_use]
    pub fn rule(
        mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        validator: impl Validator + 'static,
    ) -> Self {
        self.rules.push(FieldRule {
            name: name.into(),
            label: label.into(),
            validator: Box::new(validator),
        });
        self
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule over `values`.
    ///
    /// A missing input counts as blank. Every item of a list is checked and
    /// the first failure is reported. Blank values are only checked by
    /// validators that ask for them.
    pub fn validate(&self, values: &SubmittedValues) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for rule in &self.rules {
            let items: Vec<&str> = match values.get(&rule.name) {
                Some(RawValue::One(value)) => vec![value.as_str()],
                Some(RawValue::Many(items)) if !items.is_empty() => {
                    items.iter().map(String::as_str).collect()
                }
                Some(RawValue::Many(_)) | None => vec![""],
            };
            let failure = items
                .into_iter()
                .filter(|item| rule.validator.checks_blank() || !item.trim().is_empty())
                .find_map(|item| rule.validator.validate(item).err());
            if let Some(failure) = failure {
                debug!(field = %rule.name, kind = ?failure.kind(), "validation failed");
                errors.add(&rule.name, failure.message_for(&rule.label));
            }
        }
        errors
    }
}

impl fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| &rule.name))
            .finish()
    }
}
