//! Error types for Casekit operations.
//!
//! The core functions are pure: signing cannot fail, and the validators
//! return their own structured rejection types. `CasekitError` is the
//! umbrella for callers that want a single error type at an API boundary.

use std::fmt;

use crate::session::SessionIdError;
use crate::third_id::ThirdIdError;

/// Umbrella error type for Casekit operations.
#[derive(Debug)]
pub enum CasekitError {
    /// A session ID failed format validation.
    SessionId(SessionIdError),

    /// A payment/order correlation token failed format validation.
    ThirdId(ThirdIdError),

    /// A field failed a local validity check.
    InvalidData {
        /// Field or parameter name.
        field: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// Serialization/deserialization error.
    Serialization(String),
}

impl CasekitError {
    /// Create an invalid data error.
    pub fn invalid_data(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CasekitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionId(err) => write!(f, "invalid session id: {}", err),
            Self::ThirdId(err) => write!(f, "invalid correlation token: {}", err),
            Self::InvalidData { field, reason } => write!(f, "invalid {}: {}", field, reason),
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for CasekitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SessionId(err) => Some(err),
            Self::ThirdId(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SessionIdError> for CasekitError {
    fn from(err: SessionIdError) -> Self {
        Self::SessionId(err)
    }
}

impl From<ThirdIdError> for CasekitError {
    fn from(err: ThirdIdError) -> Self {
        Self::ThirdId(err)
    }
}

impl From<serde_json::Error> for CasekitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
