use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::form::{FieldKind, SectionDef};

/// Read access to the current value of a named field. Absent fields read as empty.
pub trait FieldSource {
    fn get(&self, name: &str) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    Missing,
    InvalidEmail,
    InvalidPhone,
    TooShort { min: usize },
}

/// First offending field of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub label: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: &str, label: &str, reason: ValidationReason) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            reason,
        }
    }

    /// User-visible text for the notifier.
    pub fn message(&self) -> String {
        match &self.reason {
            ValidationReason::Missing => format!("Please fill in: {}", self.label),
            ValidationReason::InvalidEmail => "Please enter a valid email address".to_string(),
            ValidationReason::InvalidPhone => {
                "Please enter a valid 10-digit Indian phone number".to_string()
            }
            ValidationReason::TooShort { min } => {
                format!("{} must be at least {min} characters long", self.label)
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationError {}

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern"));

static MOBILE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("phone pattern"));

/// Coarse `x@y.z` shape check.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

/// Ten digit mobile number starting with 6-9, ignoring spaces, hyphens and plus signs.
pub fn is_valid_phone(value: &str) -> bool {
    let digits: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '+')
        .collect();
    MOBILE_NUMBER.is_match(&digits)
}

/// Checks the required fields of one section in declared order and stops at the first failure.
pub fn validate_section(
    section: &SectionDef,
    source: &dyn FieldSource,
) -> Result<(), ValidationError> {
    for field in section.required_fields() {
        let value = source.get(field.name);
        if value.trim().is_empty() {
            return Err(ValidationError::new(
                field.name,
                field.label,
                ValidationReason::Missing,
            ));
        }

        if field.kind == FieldKind::Email && !is_valid_email(&value) {
            return Err(ValidationError::new(
                field.name,
                field.label,
                ValidationReason::InvalidEmail,
            ));
        }

        if field.name == "phone" && !is_valid_phone(&value) {
            return Err(ValidationError::new(
                field.name,
                field.label,
                ValidationReason::InvalidPhone,
            ));
        }
    }

    Ok(())
}
