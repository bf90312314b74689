//! Error types for record validation
//!
//! Every rejection the service produces is a `ValidationError`. The `Display`
//! output is the exact message shown to API clients, while `code()` gives a
//! stable identifier callers and tests can match on without string comparison.

use serde::Serialize;
use thiserror::Error;

/// Rejection reasons for create and update payloads
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field, or a member of a partially supplied group, is absent
    #[error("{message}")]
    MissingRequiredField { message: String },

    /// A field holds a value of the wrong JSON type
    #[error("{message}")]
    WrongType { message: String },

    /// A numeric field lies outside its interval of validity
    #[error("{message}")]
    OutOfRange { message: String },

    /// A string field does not match its expected shape (image, sound, email, date...)
    #[error("{message}")]
    InvalidFormat { message: String },

    /// Another record already uses this name
    #[error("{message}")]
    DuplicateName { message: String },

    /// A referenced record does not exist
    #[error("{message}")]
    NotFound { message: String },

    /// An update would switch off the only active cloak trigger
    #[error("{message}")]
    InvalidCloakTransition { message: String },

    /// A cloak group is present but neither trigger is enabled
    #[error("{message}")]
    InactiveCloak { message: String },

    /// Free text failed the content filter
    #[error("{message}")]
    InappropriateContent { message: String },

    /// The write would break a one-to-one relation between records
    #[error("{message}")]
    Conflict { message: String },
}

/// Machine-readable discriminant of a `ValidationError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MissingRequiredField,
    WrongType,
    OutOfRange,
    InvalidFormat,
    DuplicateName,
    NotFound,
    InvalidCloakTransition,
    InactiveCloak,
    InappropriateContent,
    Conflict,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingRequiredField => "missing_required_field",
            ErrorCode::WrongType => "wrong_type",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidFormat => "invalid_format",
            ErrorCode::DuplicateName => "duplicate_name",
            ErrorCode::NotFound => "not_found",
            ErrorCode::InvalidCloakTransition => "invalid_cloak_transition",
            ErrorCode::InactiveCloak => "inactive_cloak",
            ErrorCode::InappropriateContent => "inappropriate_content",
            ErrorCode::Conflict => "conflict",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValidationError {
    pub fn missing(message: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            message: message.into(),
        }
    }

    pub fn wrong_type(message: impl Into<String>) -> Self {
        Self::WrongType {
            message: message.into(),
        }
    }

    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::OutOfRange {
            message: message.into(),
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    pub fn duplicate_name(message: impl Into<String>) -> Self {
        Self::DuplicateName {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_cloak_transition(message: impl Into<String>) -> Self {
        Self::InvalidCloakTransition {
            message: message.into(),
        }
    }

    pub fn inactive_cloak(message: impl Into<String>) -> Self {
        Self::InactiveCloak {
            message: message.into(),
        }
    }

    pub fn inappropriate(message: impl Into<String>) -> Self {
        Self::InappropriateContent {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingRequiredField { .. } => ErrorCode::MissingRequiredField,
            Self::WrongType { .. } => ErrorCode::WrongType,
            Self::OutOfRange { .. } => ErrorCode::OutOfRange,
            Self::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            Self::DuplicateName { .. } => ErrorCode::DuplicateName,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::InvalidCloakTransition { .. } => ErrorCode::InvalidCloakTransition,
            Self::InactiveCloak { .. } => ErrorCode::InactiveCloak,
            Self::InappropriateContent { .. } => ErrorCode::InappropriateContent,
            Self::Conflict { .. } => ErrorCode::Conflict,
        }
    }

    /// The user-facing rejection message
    pub fn message(&self) -> &str {
        match self {
            Self::MissingRequiredField { message }
            | Self::WrongType { message }
            | Self::OutOfRange { message }
            | Self::InvalidFormat { message }
            | Self::DuplicateName { message }
            | Self::NotFound { message }
            | Self::InvalidCloakTransition { message }
            | Self::InactiveCloak { message }
            | Self::InappropriateContent { message }
            | Self::Conflict { message } => message,
        }
    }
}
