use regex::Regex;
use std::sync::OnceLock;

/// Validation error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Validation error for field '{}': {}",
            self.field, self.message
        )
    }
}

impl std::error::Error for ValidationError {}

pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Validate a username: letters, digits and @ . + - _ only, max 150 chars
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX.get_or_init(|| Regex::new(r"^[\w.@+-]+$").unwrap());

    if username.is_empty() {
        return Err(ValidationError::new("username", "Username cannot be empty"));
    }

    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(ValidationError::new(
            "username",
            format!(
                "Username length {} exceeds maximum of {} characters",
                username.chars().count(),
                USERNAME_MAX_LEN
            ),
        ));
    }

    if !regex.is_match(username) {
        return Err(ValidationError::new(
            "username",
            "Username may contain only letters, digits and @/./+/-/_",
        ));
    }

    Ok(())
}

/// Validate the rough shape of an email address (local@domain.tld)
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

    if regex.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "email",
            "Email must be in format name@domain.tld",
        ))
    }
}

/// Validate a new password and its confirmation
pub fn validate_password_pair(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ValidationError::new(
            "password",
            format!(
                "Password must be at least {} characters",
                PASSWORD_MIN_LEN
            ),
        ));
    }

    if password != confirm {
        return Err(ValidationError::new(
            "password_confirm",
            "Passwords do not match",
        ));
    }

    Ok(())
}

/// Validate that a required text input is not blank
pub fn validate_not_blank(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, "Value cannot be empty"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("ali").is_ok());
        assert!(validate_username("ali.hassan+farm@x").is_ok());
        assert!(validate_username("مزارع_1").is_ok()); // unicode word chars
        assert!(validate_username(&"a".repeat(150)).is_ok());

        assert!(validate_username("").is_err());
        assert!(validate_username(&"a".repeat(151)).is_err());
        assert!(validate_username("ali hassan").is_err());
        assert!(validate_username("ali#1").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ali@example.com").is_ok());
        assert!(validate_email("a.b+c@farm.co.sa").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("ali").is_err());
        assert!(validate_email("ali@example").is_err());
        assert!(validate_email("ali @example.com").is_err());
    }

    #[test]
    fn test_validate_password_pair() {
        assert!(validate_password_pair("secret123", "secret123").is_ok());

        let err = validate_password_pair("short", "short").unwrap_err();
        assert_eq!(err.field, "password");

        let err = validate_password_pair("secret123", "secret124").unwrap_err();
        assert_eq!(err.field, "password_confirm");
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("name", "North field").is_ok());
        assert!(validate_not_blank("name", "   ").is_err());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("email", "bad");
        assert_eq!(err.to_string(), "Validation error for field 'email': bad");
    }
}
