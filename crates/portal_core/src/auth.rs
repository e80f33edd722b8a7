//! Sign-in and sign-up form checks, run before any auth call is made.
use crate::validate::{ValidationError, ValidationReason};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const SIGN_IN_FAILED: &str = "Login failed. Please try again.";
pub const SIGN_UP_FAILED: &str = "Registration failed. Please try again.";
pub const LOGOUT_MESSAGE: &str = "Logged out successfully!";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

impl SignInForm {
    /// Trims the username; passwords are taken verbatim.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthFormError> {
        if self.username.is_empty() {
            return Err(AuthFormError::new("Please enter your username"));
        }
        if self.password.is_empty() {
            return Err(AuthFormError::new("Please enter your password"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthFormError> {
        if self.username.is_empty() {
            return Err(AuthFormError::new("Please enter a username"));
        }
        if self.email.is_empty() {
            return Err(AuthFormError::new("Please enter an email"));
        }
        if self.password.is_empty() {
            return Err(AuthFormError::new("Please enter a password"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            let err = ValidationError::new(
                "password",
                "Password",
                ValidationReason::TooShort {
                    min: MIN_PASSWORD_LEN,
                },
            );
            return Err(AuthFormError::new(err.message()));
        }
        Ok(())
    }
}

/// User-visible reason an auth form was rejected locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthFormError {
    pub message: String,
}

impl AuthFormError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
