use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Unsupported,
    Misrouted,
    Collaborator,
}

/// Wire form of a failed dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("payload must be an object")]
    NotAnObject,
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("unsupported {kind}: {value}")]
    UnsupportedDiscriminator { kind: &'static str, value: String },
    #[error("{strategy} does not support {kind}: {actual} (expected {expected})")]
    Misrouted {
        strategy: &'static str,
        kind: &'static str,
        expected: String,
        actual: String,
    },
    #[error("{message}")]
    Collaborator { message: String },
}

impl KitError {
    pub fn unsupported(kind: &'static str, value: impl ToString) -> Self {
        Self::UnsupportedDiscriminator {
            kind,
            value: value.to_string(),
        }
    }

    /// Builds a collaborator failure, substituting `fallback` when the
    /// collaborator gave no usable message.
    pub fn collaborator(message: Option<String>, fallback: &str) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Self::Collaborator { message }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::Validation,
            Self::UnsupportedDiscriminator { .. } => ErrorCode::Unsupported,
            Self::Misrouted { .. } => ErrorCode::Misrouted,
            Self::Collaborator { .. } => ErrorCode::Collaborator,
        }
    }
}

impl From<KitError> for ApiError {
    fn from(value: KitError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
