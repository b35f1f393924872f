//! Client-side validation for the entry screen forms
//!
//! Login and register forms are checked before any request leaves the client.
//! Failures are reported per field so the form can show them inline.
//!
//! # Rules
//!
//! - **Email**: `local@domain.tld`, no whitespace, exactly one `@`
//! - **Password**: at least 8 characters with at least one letter and one digit
//! - **Confirmation** (register only): must equal the password

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::types::Credentials;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub const INVALID_EMAIL: &str = "Invalid email";
pub const WEAK_PASSWORD: &str = "Min 8, letter+digit";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

const MIN_PASSWORD_LEN: usize = 8;

/// Inline error text per form field. `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.confirm.is_none()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.email, &self.password, &self.confirm]
            .into_iter()
            .filter_map(|e| e.as_deref())
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm: String,
}

pub fn validate_email(email: &str) -> Option<String> {
    (!EMAIL_RE.is_match(email)).then(|| INVALID_EMAIL.to_string())
}

pub fn validate_password(password: &str) -> Option<String> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LEN;
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    (!(long_enough && has_letter && has_digit)).then(|| WEAK_PASSWORD.to_string())
}

pub fn validate_confirm(password: &str, confirm: &str) -> Option<String> {
    (password != confirm).then(|| PASSWORD_MISMATCH.to_string())
}

impl LoginForm {
    /// Validate and turn the form into request credentials.
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let errors = FieldErrors {
            email: validate_email(&self.email),
            password: validate_password(&self.password),
            confirm: None,
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

impl RegisterForm {
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let errors = FieldErrors {
            email: validate_email(&self.email),
            password: validate_password(&self.password),
            confirm: validate_confirm(&self.password, &self.confirm),
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}
