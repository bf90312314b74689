//! User account rules

use bestiary_types::{FieldSet, ValidationError};

use crate::formats::{validate_email, validate_password};
use crate::rules::Mode;

/// On create `email` and `password` are required; every supplied field is
/// format-checked in both modes. Callers default the two flags to `false`
/// before creating.
pub fn validate_user(fields: &FieldSet, mode: Mode) -> Result<(), ValidationError> {
    let creating = mode == Mode::Create;

    if creating && !(fields.is_filled("email") && fields.is_filled("password")) {
        return Err(ValidationError::missing("Email and password are required"));
    }

    if creating || fields.is_present("email") {
        if !fields.text("email").is_some_and(validate_email) {
            return Err(ValidationError::invalid_format("Invalid email format"));
        }
    }

    if creating || fields.is_present("password") {
        if !fields.text("password").is_some_and(validate_password) {
            return Err(ValidationError::invalid_format(
                "Password must be at least 8 characters long and include an uppercase letter, a number, and a special character",
            ));
        }
    }

    for flag in ["is_admin", "blacklisted"] {
        if (creating || fields.is_present(flag)) && fields.boolean(flag).is_none() {
            return Err(ValidationError::wrong_type(format!(
                "{} must be a boolean",
                flag
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bestiary_types::ErrorCode;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> FieldSet {
        FieldSet::from_value(value).unwrap()
    }

    #[test]
    fn test_create_requires_credentials() {
        let err = validate_user(&fields(json!({"email": "a@b.co"})), Mode::Create).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingRequiredField);
        assert_eq!(err.message(), "Email and password are required");
    }

    #[test]
    fn test_create_valid() {
        let f = fields(json!({
            "email": "ada@example.com", "password": "Secret1!",
            "is_admin": false, "blacklisted": false
        }));
        assert!(validate_user(&f, Mode::Create).is_ok());
    }

    #[test]
    fn test_flags_must_be_boolean() {
        let f = fields(json!({
            "email": "ada@example.com", "password": "Secret1!",
            "is_admin": "yes", "blacklisted": false
        }));
        let err = validate_user(&f, Mode::Create).unwrap_err();
        assert_eq!(err.message(), "is_admin must be a boolean");
    }

    #[test]
    fn test_update_checks_only_supplied() {
        assert!(validate_user(&fields(json!({"blacklisted": true})), Mode::Update).is_ok());
        let err = validate_user(&fields(json!({"email": "nope"})), Mode::Update).unwrap_err();
        assert_eq!(err.message(), "Invalid email format");
        let err = validate_user(&fields(json!({"password": "short"})), Mode::Update).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidFormat);
    }
}
