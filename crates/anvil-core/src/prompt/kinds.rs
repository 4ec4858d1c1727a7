//! Concrete prompt kinds
//!
//! | kind | answer | empty input |
//! |------|--------|-------------|
//! | [`FreeText`] | line verbatim | accepted as `""` |
//! | [`RequiredText`] | trimmed line | retry |
//! | [`YesNo`] | `bool` | retry |
//! | [`Confirm`] | `bool` | default |
//! | [`IntRange`] | `i64` | default, or retry without one |
//! | [`Select`] | chosen option | default option |
//! | [`TextWithDefault`] | trimmed line | default |

use std::fmt;

use super::{Conversion, PromptKind};

/// Accepts any line exactly as typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FreeText;

impl PromptKind for FreeText {
    type Response = String;

    fn convert(&self, input: &str) -> Conversion<String> {
        Conversion::Accepted(input.to_string())
    }
}

/// Free text that must not be blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequiredText;

impl PromptKind for RequiredText {
    type Response = String;

    fn convert(&self, input: &str) -> Conversion<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Conversion::retry()
        } else {
            Conversion::Accepted(trimmed.to_string())
        }
    }
}

/// Strict yes/no question with no default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YesNo;

pub(crate) const YES_NO_RETRY: &str = "please answer y or n";

fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

impl PromptKind for YesNo {
    type Response = bool;

    fn convert(&self, input: &str) -> Conversion<bool> {
        match parse_yes_no(input) {
            Some(answer) => Conversion::Accepted(answer),
            None => Conversion::retry_with(YES_NO_RETRY),
        }
    }
}

/// Yes/no question where an empty answer picks the default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirm {
    pub default: bool,
}

impl Confirm {
    pub fn new(default: bool) -> Self {
        Self { default }
    }

    fn default_label(&self) -> &'static str {
        if self.default {
            "yes"
        } else {
            "no"
        }
    }
}

impl PromptKind for Confirm {
    type Response = bool;

    fn decorate(&self, question: &str) -> String {
        format!("{question} (default: {}) [yes, no] ", self.default_label())
    }

    fn convert(&self, input: &str) -> Conversion<bool> {
        if input.trim().is_empty() {
            return Conversion::Accepted(self.default);
        }
        match parse_yes_no(input) {
            Some(answer) => Conversion::Accepted(answer),
            None => Conversion::retry_with(format!(
                "Please enter 'yes' or 'no' (default: '{}'): ",
                self.default_label()
            )),
        }
    }
}

/// Integer answer within inclusive bounds
///
/// The default, when set, is returned for an empty answer without being
/// checked against the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub min: i64,
    pub max: Option<i64>,
    pub default: Option<i64>,
}

impl IntRange {
    pub fn at_least(min: i64) -> Self {
        Self {
            min,
            max: None,
            default: None,
        }
    }

    pub fn between(min: i64, max: i64) -> Self {
        Self {
            min,
            max: Some(max),
            default: None,
        }
    }

    pub fn with_default(mut self, default: i64) -> Self {
        self.default = Some(default);
        self
    }

    fn bounds(&self) -> String {
        let mut parts = vec![format!("min: {}", self.min)];
        if let Some(max) = self.max {
            parts.push(format!("max: {max}"));
        }
        if let Some(default) = self.default {
            parts.push(format!("default: {default}"));
        }
        parts.join(", ")
    }

    fn contains(&self, value: i64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

impl PromptKind for IntRange {
    type Response = i64;

    fn decorate(&self, question: &str) -> String {
        format!("{question} ({}): ", self.bounds())
    }

    fn convert(&self, input: &str) -> Conversion<i64> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            if let Some(default) = self.default {
                return Conversion::Accepted(default);
            }
        }
        match trimmed.parse::<i64>() {
            Ok(value) if self.contains(value) => Conversion::Accepted(value),
            _ => Conversion::retry_with(format!(
                "Please enter an integer value ({}): ",
                self.bounds()
            )),
        }
    }
}

/// Pick one of a numbered list of options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select<T = String> {
    options: Vec<T>,
    default: usize,
}

impl<T> Select<T>
where
    T: fmt::Display + fmt::Debug + Clone + Send + 'static,
{
    /// Returns `None` when there is nothing to choose from
    ///
    /// An out-of-range `default` index falls back to the last option.
    pub fn new(options: impl IntoIterator<Item = T>, default: usize) -> Option<Self> {
        let options: Vec<T> = options.into_iter().collect();
        if options.is_empty() {
            return None;
        }
        let default = default.min(options.len() - 1);
        Some(Self { options, default })
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn default_option(&self) -> &T {
        &self.options[self.default]
    }
}

impl<T> PromptKind for Select<T>
where
    T: fmt::Display + fmt::Debug + Clone + Send + 'static,
{
    type Response = T;

    fn decorate(&self, question: &str) -> String {
        let mut prompt = format!("{question}:");
        for (index, option) in self.options.iter().enumerate() {
            prompt.push_str(&format!("\n  {}: {option}", index + 1));
        }
        prompt.push_str(&format!(
            "\nEnter selection (default: {}) [1..{}] ",
            self.default_option(),
            self.options.len()
        ));
        prompt
    }

    fn convert(&self, input: &str) -> Conversion<T> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Conversion::Accepted(self.default_option().clone());
        }
        match trimmed.parse::<usize>() {
            Ok(choice) if (1..=self.options.len()).contains(&choice) => {
                Conversion::Accepted(self.options[choice - 1].clone())
            }
            _ => Conversion::retry_with(format!(
                "Please enter a value between 1 and {}: ",
                self.options.len()
            )),
        }
    }
}

/// Free text where an empty answer picks the default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWithDefault {
    pub default: String,
}

impl TextWithDefault {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
        }
    }
}

impl PromptKind for TextWithDefault {
    type Response = String;

    fn decorate(&self, question: &str) -> String {
        format!("{question} (default: {}): ", self.default)
    }

    fn convert(&self, input: &str) -> Conversion<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Conversion::Accepted(self.default.clone())
        } else {
            Conversion::Accepted(trimmed.to_string())
        }
    }
}
