//! Phone number login
//!
//! This module owns the login screen's input rules: raw keystroke text is
//! reduced to digits, capped at eight, and shown grouped in pairs
//! (`12 34 56 78`). Continuing is only possible with exactly eight digits.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Number of digits in a Danish subscriber number
pub const PHONE_DIGITS: usize = 8;

/// Digits per display group
const GROUP_SIZE: usize = 2;

/// Login screen copy
pub mod text {
    /// Greeting heading
    pub const GREETING: &str = "Hello,";
    /// Prompt under the greeting
    pub const PROMPT: &str = "add your phone number\nto continue.";
    /// Empty field placeholder
    pub const PLACEHOLDER: &str = "Phone number";
    /// Continue button
    pub const CONTINUE: &str = "Continue";
    /// Terms notice before the link
    pub const TERMS: &str = "We'll send you a code to log in or sign up. See our";
    /// Terms link text
    pub const TERMS_LINK: &str = "Terms of Service";
}

/// Login error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// Not enough digits to continue
    #[error("Phone number must have {expected} digits, got {actual}")]
    IncompleteNumber {
        /// Required digit count
        expected: usize,
        /// Digits entered
        actual: usize,
    },
}

/// Result type for login operations
pub type Result<T> = std::result::Result<T, LoginError>;

/// Country calling code shown in front of the number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountryCode {
    /// Denmark (+45)
    Denmark,
}

impl CountryCode {
    /// Dialing prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            CountryCode::Denmark => "+45",
        }
    }

    /// Label for the country picker
    pub fn label(&self) -> String {
        match self {
            CountryCode::Denmark => format!("{} Denmark", self.prefix()),
        }
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        CountryCode::Denmark
    }
}

fn non_digit_regex() -> &'static Regex {
    static NON_DIGIT_REGEX: OnceLock<Regex> = OnceLock::new();
    NON_DIGIT_REGEX.get_or_init(|| Regex::new(r"[^0-9]").unwrap())
}

/// Strip everything but ASCII digits and keep at most [`PHONE_DIGITS`]
pub fn clean_digits(raw: &str) -> String {
    non_digit_regex()
        .replace_all(raw, "")
        .chars()
        .take(PHONE_DIGITS)
        .collect()
}

/// Group digits in pairs separated by single spaces
///
/// An odd trailing digit forms its own group: `12345` becomes `12 34 5`.
pub fn group_digits(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    chars
        .chunks(GROUP_SIZE)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clean raw input and format it for display
pub fn format_phone_input(raw: &str) -> String {
    group_digits(&clean_digits(raw))
}

/// A validated eight-digit phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber {
    digits: String,
    country: CountryCode,
}

impl PhoneNumber {
    /// Validate raw input into a phone number
    ///
    /// Non-digits are ignored; exactly [`PHONE_DIGITS`] digits are required.
    pub fn parse(raw: &str) -> Result<Self> {
        let digits: String = non_digit_regex().replace_all(raw, "").into_owned();
        if digits.len() != PHONE_DIGITS {
            return Err(LoginError::IncompleteNumber {
                expected: PHONE_DIGITS,
                actual: digits.len(),
            });
        }
        Ok(Self { digits, country: CountryCode::default() })
    }

    /// The bare digits (`12345678`)
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// The country code
    pub fn country(&self) -> CountryCode {
        self.country
    }

    /// Digits grouped for display (`12 34 56 78`)
    pub fn grouped(&self) -> String {
        group_digits(&self.digits)
    }

    /// International form (`+45 12 34 56 78`)
    pub fn international(&self) -> String {
        format!("{} {}", self.country.prefix(), self.grouped())
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.international())
    }
}

/// State of the phone number field
///
/// Feed every text change through [`PhoneInput::on_change_text`]; the field
/// keeps only the cleaned digits and renders them grouped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneInput {
    digits: String,
    country: CountryCode,
}

impl PhoneInput {
    /// Create an empty field
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a text change and return the new display text
    pub fn on_change_text(&mut self, raw: &str) -> String {
        self.digits = clean_digits(raw);
        self.display()
    }

    /// Text shown in the field
    pub fn display(&self) -> String {
        group_digits(&self.digits)
    }

    /// Digits entered so far
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Selected country
    pub fn country(&self) -> CountryCode {
        self.country
    }

    /// Whether the continue action is enabled
    pub fn is_valid(&self) -> bool {
        self.digits.len() == PHONE_DIGITS
    }

    /// Validate the current input for submission
    pub fn submit(&self) -> Result<PhoneNumber> {
        let number = PhoneNumber::parse(&self.digits)?;
        tracing::info!(digits = number.digits().len(), "Phone number submitted");
        Ok(number)
    }

    /// Clear the field
    pub fn clear(&mut self) {
        self.digits.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clean_digits() {
        assert_eq!(clean_digits("12 34-56"), "123456");
        assert_eq!(clean_digits("abc"), "");
        assert_eq!(clean_digits("+45 1234 5678"), "45123456");
        assert_eq!(clean_digits("1234567890"), "12345678");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(""), "");
        assert_eq!(group_digits("1"), "1");
        assert_eq!(group_digits("123"), "12 3");
        assert_eq!(group_digits("12345678"), "12 34 56 78");
    }

    #[test]
    fn test_format_phone_input() {
        assert_eq!(format_phone_input("12345678"), "12 34 56 78");
        assert_eq!(format_phone_input("12 34 56 789"), "12 34 56 78");
        assert_eq!(format_phone_input("1a2b3c"), "12 3");
    }

    fn assert_grouped(raw: &str, display: &str) {
        let digits: String = display.chars().filter(|c| *c != ' ').collect();

        assert!(digits.len() <= PHONE_DIGITS, "too many digits for {:?}", raw);
        assert!(digits.chars().all(|c| c.is_ascii_digit()), "non-digit in {:?}", display);
        assert!(!display.contains("  "));
        assert!(!display.starts_with(' ') && !display.ends_with(' '));
        for (i, group) in display.split(' ').filter(|g| !g.is_empty()).enumerate() {
            let is_last = (i + 1) * GROUP_SIZE >= digits.len();
            if !is_last {
                assert_eq!(group.len(), GROUP_SIZE);
            }
        }
    }

    #[test]
    fn test_display_invariants_for_tricky_input() {
        let inputs = [
            "",
            " ",
            "abc",
            "1",
            "12 34 56 78 90 12",
            "٣٤٥ 12",
            "+45 (12) 34-56.78",
            "🙂1🙂2🙂3🙂",
            "0000000000000000000",
        ];

        for raw in inputs {
            assert_grouped(raw, &format_phone_input(raw));
        }
    }

    proptest! {
        #[test]
        fn display_is_grouped_for_any_text(raw in any::<String>()) {
            assert_grouped(&raw, &format_phone_input(&raw));
        }

        #[test]
        fn display_keeps_leading_digits(raw in "[0-9 +()a-z-]{0,24}") {
            let display = format_phone_input(&raw);
            let expected: String = raw.chars().filter(|c| c.is_ascii_digit()).take(PHONE_DIGITS).collect();
            prop_assert_eq!(display.replace(' ', ""), expected.clone());

            let mut input = PhoneInput::new();
            input.on_change_text(&raw);
            prop_assert_eq!(input.is_valid(), expected.len() == PHONE_DIGITS);
        }
    }

    #[test]
    fn test_phone_input_typing() {
        let mut input = PhoneInput::new();
        let mut shown = String::new();

        for digit in "123456789".chars() {
            shown.push(digit);
            shown = input.on_change_text(&shown);
        }

        assert_eq!(shown, "12 34 56 78");
        assert_eq!(input.digits(), "12345678");
        assert!(input.is_valid());
    }

    #[test]
    fn test_continue_enabled_only_with_eight_digits() {
        let mut input = PhoneInput::new();

        input.on_change_text("1234567");
        assert!(!input.is_valid());
        assert_eq!(
            input.submit().unwrap_err(),
            LoginError::IncompleteNumber { expected: 8, actual: 7 }
        );

        input.on_change_text("12345678");
        assert!(input.is_valid());
        let number = input.submit().unwrap();
        assert_eq!(number.digits(), "12345678");
    }

    #[test]
    fn test_phone_number_forms() {
        let number = PhoneNumber::parse("12 34 56 78").unwrap();
        assert_eq!(number.digits(), "12345678");
        assert_eq!(number.grouped(), "12 34 56 78");
        assert_eq!(number.international(), "+45 12 34 56 78");
        assert_eq!(number.to_string(), "+45 12 34 56 78");
    }

    #[test]
    fn test_phone_number_rejects_wrong_length() {
        assert!(PhoneNumber::parse("123456789").is_err());
        assert!(PhoneNumber::parse("").is_err());
    }

    #[test]
    fn test_country_code() {
        assert_eq!(CountryCode::default().prefix(), "+45");
        assert_eq!(CountryCode::Denmark.label(), "+45 Denmark");
    }

    #[test]
    fn test_clear() {
        let mut input = PhoneInput::new();
        input.on_change_text("1234");
        input.clear();
        assert_eq!(input.display(), "");
        assert!(!input.is_valid());
    }
}
