//! Pure validation for account payloads
//!
//! Nothing in here touches the store or the backend. Callers decide what
//! to do with a failed report; `AccountStore::create` does not call this.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::NewUser;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{7,15}$").expect("phone regex must compile"));

/// Minimum trimmed length for first and last names
pub const MIN_NAME_LEN: usize = 2;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Field the rule applies to, e.g. `"email"`
    pub field: &'static str,
    pub message: String,
}

/// Outcome of validating a payload — all failed rules, not just the first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            field,
            message: message.into(),
        });
    }
}

/// Check an email address against the accepted shape
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check a phone number, ignoring spaces, dashes, and parentheses
pub fn valid_phone(phone: &str) -> bool {
    let stripped = phone.replace([' ', '-', '(', ')'], "");
    PHONE_RE.is_match(&stripped)
}

/// Check a first or last name: at least two characters after trimming
pub fn valid_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_NAME_LEN
}

/// Check a password: at least eight characters
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Validate a registration payload, collecting every failed rule
pub fn validate_new_user(user: &NewUser) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !valid_name(&user.first_name) {
        report.push("firstName", "First name must be at least 2 characters");
    }
    if !valid_name(&user.last_name) {
        report.push("lastName", "Last name must be at least 2 characters");
    }
    if !valid_email(&user.email) {
        report.push("email", "Invalid email address");
    }
    if !valid_phone(&user.phone) {
        report.push("phone", "Invalid phone number");
    }
    if !valid_password(&user.password) {
        report.push("password", "Password must be at least 8 characters");
    }

    report
}
