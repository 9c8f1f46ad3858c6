//! Input validation for API requests.
//!
//! Per-field predicate rules run against the registration body before any
//! handler logic. Failures are collected with `ValidationErrorBuilder` and
//! surfaced together as a 422; the route logic never partially applies.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{ApiError, ValidationErrorBuilder};
use crate::db::RegisterRequest;

lazy_static! {
    /// Regex for validating email addresses
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();
}

/// Validate a username (at least 5 characters, alphanumeric only)
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.chars().count() < 5 {
        return Err("Username is required and must be at least 5 characters".to_string());
    }

    if !username.chars().all(|c| c.is_alphanumeric()) {
        return Err("Username contains non alphanumeric characters - not allowed".to_string());
    }

    Ok(())
}

/// Validate a password (must not be empty)
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    Ok(())
}

/// Validate an email address format
pub fn validate_email(email: &str) -> Result<(), String> {
    if !EMAIL_REGEX.is_match(email) {
        return Err("Email does not appear to be valid".to_string());
    }

    Ok(())
}

/// Run every registration rule, collecting all failures
pub fn validate_registration(req: &RegisterRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_username(&req.username) {
        errors.add("Username", e);
    }

    if let Err(e) = validate_password(&req.password) {
        errors.add("Password", e);
    }

    if let Err(e) = validate_email(&req.email) {
        errors.add("Email", e);
    }

    errors.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("marguerite").is_ok());
        assert!(validate_username("chef42").is_ok());

        assert!(validate_username("").is_err());
        assert!(validate_username("abcd").is_err()); // too short
        assert!(validate_username("chef-42").is_err()); // dash
        assert!(validate_username("chef 42").is_err()); // space
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("any-password").is_ok());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("marguerite@example.com").is_ok());
        assert!(validate_email("chef.42+tag@kitchen.co.uk").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_registration_collects_every_failure() {
        let req = RegisterRequest {
            username: "ab!".to_string(),
            password: String::new(),
            email: "nope".to_string(),
            birthday: None,
        };

        let err = validate_registration(&req).unwrap_err();
        let body = format!("{:?}", err);
        assert!(body.contains("Username"));
        assert!(body.contains("Password"));
        assert!(body.contains("Email"));
    }

    #[test]
    fn test_registration_accepts_valid_body() {
        let req = RegisterRequest {
            username: "marguerite".to_string(),
            password: "s3cret-passphrase".to_string(),
            email: "marguerite@example.com".to_string(),
            birthday: None,
        };
        assert!(validate_registration(&req).is_ok());
    }
}
