//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, material, template, tariff plan, service, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions (tier izoh, product description)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, promo codes, option ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate a required entity name
pub fn validate_name(name: &str, field: &str) -> Result<(), AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "{} exceeds {} characters",
            field, MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Validate an optional note / description
pub fn validate_note(note: &str, field: &str) -> Result<(), AppError> {
    if note.len() > MAX_NOTE_LEN {
        return Err(AppError::Validation(format!(
            "{} exceeds {} characters",
            field, MAX_NOTE_LEN
        )));
    }
    Ok(())
}

/// Validate a strictly positive numeric value (breakpoints, quantities)
pub fn validate_positive(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Validation(format!(
            "{} must be a positive number",
            field
        )));
    }
    Ok(())
}

/// Validate a finite, non-negative numeric value (prices, costs)
pub fn validate_non_negative(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(format!(
            "{} must be a non-negative number",
            field
        )));
    }
    Ok(())
}

/// Validate a phone number: digits with optional leading `+`, 7-15 digits
pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.is_empty()
        || digits.len() < 7
        || digits.len() > 15
        || !digits.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AppError::Validation("Invalid phone number".to_string()));
    }
    Ok(())
}

/// Validate a password before hashing
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password exceeds {} characters",
            MAX_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Vizitka", "name").is_ok());
        assert!(validate_name("  ", "name").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN + 1), "name").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(1.5, "soni").is_ok());
        assert!(validate_positive(0.0, "soni").is_err());
        assert!(validate_positive(-1.0, "soni").is_err());
        assert!(validate_positive(f64::NAN, "soni").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+998901234567").is_ok());
        assert!(validate_phone("998901234567").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("+99890abc4567").is_err());
    }
}
