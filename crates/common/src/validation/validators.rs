// Field Validators - Reusable validation components
use std::fmt::Display;

use regex::Regex;

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Inclusive numeric bound, open-ended when no maximum is set.
#[derive(Debug, Clone)]
pub struct RangeValidator<T> {
    min: T,
    max: Option<T>,
}

impl<T> RangeValidator<T>
where
    T: PartialOrd + Display,
{
    /// Accept `min..=max`
    pub fn between(min: T, max: T) -> Self {
        Self { min, max: Some(max) }
    }

    /// Accept anything `>= min`
    pub fn at_least(min: T) -> Self {
        Self { min, max: None }
    }
}

impl<T> FieldValidator<T> for RangeValidator<T>
where
    T: PartialOrd + Display,
{
    fn validate(&self, value: &T) -> Result<(), String> {
        match &self.max {
            Some(max) if *value < self.min || *value > *max => {
                Err(format!("must be between {} and {}", self.min, max))
            }
            None if *value < self.min => Err(format!("must be at least {}", self.min)),
            _ => Ok(()),
        }
    }
}

/// Minimum length check, counted in characters rather than bytes.
///
/// Values are not trimmed.
#[derive(Debug, Clone, Default)]
pub struct StringValidator {
    min_length: Option<usize>,
}

impl StringValidator {
    /// Create a new string validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum length
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }
}

impl FieldValidator<str> for StringValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        match self.min_length {
            Some(min) if value.chars().count() < min => {
                Err(format!("Length must be at least {} characters", min))
            }
            _ => Ok(()),
        }
    }
}

impl FieldValidator<String> for StringValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}

/// Pattern validator with a caller-supplied failure message
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Regex,
    message: String,
}

impl PatternValidator {
    /// Create from a compiled pattern and the message reported on mismatch
    pub fn new(pattern: Regex, message: impl Into<String>) -> Self {
        Self { pattern, message: message.into() }
    }
}

impl FieldValidator<str> for PatternValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.pattern.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}
