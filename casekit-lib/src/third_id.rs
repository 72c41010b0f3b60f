//! Third-party payment and order correlation IDs.
//!
//! The manufacturer API requires the caller to mint its own correlation
//! token for every payment (`PYEN…`) and order (`OREN…`) it submits. The
//! token format is fixed:
//!
//! ```text
//! {prefix}{yyMMdd}{last 6 digits of epoch millis}
//! ```
//!
//! Both numeric parts are zero-padded: a naive formatter drops the leading
//! zero in January (`25106…` instead of `250106…`) and produces tokens the
//! vendor cannot parse. The suffix is likewise always padded to exactly
//! 6 digits even when the millisecond remainder is small.
//!
//! Uniqueness is probabilistic, not guaranteed: two tokens minted in the
//! same millisecond window collide. Generation stays collision-oblivious
//! here; stores that index by token surface duplicate inserts instead.
//!
//! # Examples
//!
//! ```
//! use casekit_lib::third_id::{IdPrefix, ThirdId};
//! use chrono::{TimeZone, Utc};
//!
//! let at = Utc.with_ymd_and_hms(2025, 1, 6, 9, 30, 0).unwrap();
//! let id = ThirdId::generate_at(IdPrefix::Payment, at);
//! assert!(id.as_str().starts_with("PYEN250106"));
//! assert_eq!(id.as_str().len(), 16);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Token namespace: payments and orders use distinct 4-letter prefixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPrefix {
    /// Payment request token (`third_id` on `order/payData`).
    Payment,
    /// Order token (`third_id` on `order/orderData`).
    Order,
}

impl IdPrefix {
    /// The literal prefix as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "PYEN",
            Self::Order => "OREN",
        }
    }

    /// Recognize a prefix from the first characters of a token.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.starts_with("PYEN") {
            Some(Self::Payment)
        } else if token.starts_with("OREN") {
            Some(Self::Order)
        } else {
            None
        }
    }
}

impl std::fmt::Display for IdPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured rejection for a malformed correlation token.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ThirdIdError {
    /// Token does not start with a known prefix.
    #[error("unknown prefix in {token:?}, expected PYEN or OREN")]
    UnknownPrefix {
        /// The rejected token.
        token: String,
    },

    /// Token body is not exactly 12 digits.
    #[error("token body after the prefix must be exactly 12 digits (yyMMdd + 6-digit suffix), got {body:?}")]
    MalformedBody {
        /// Everything after the 4-letter prefix.
        body: String,
    },
}

/// A caller-minted payment or order correlation token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThirdId(String);

impl ThirdId {
    /// Mint a token for the given instant.
    ///
    /// Deterministic for a fixed timestamp, which is what makes the padding
    /// rules testable; [`ThirdId::generate`] samples the clock for callers
    /// that just want a fresh token.
    pub fn generate_at(prefix: IdPrefix, at: DateTime<Utc>) -> Self {
        let date = at.format("%y%m%d");
        let suffix = at.timestamp_millis().rem_euclid(1_000_000);
        Self(format!("{}{}{:06}", prefix.as_str(), date, suffix))
    }

    /// Mint a token for the current instant.
    pub fn generate(prefix: IdPrefix) -> Self {
        Self::generate_at(prefix, Utc::now())
    }

    /// Validate a candidate token and wrap it.
    pub fn parse(candidate: &str) -> Result<Self, ThirdIdError> {
        let prefix = IdPrefix::from_token(candidate).ok_or_else(|| ThirdIdError::UnknownPrefix {
            token: candidate.to_string(),
        })?;

        let body = &candidate[prefix.as_str().len()..];
        if body.len() != 12 || !body.chars().all(|c| c.is_ascii_digit()) {
            return Err(ThirdIdError::MalformedBody {
                body: body.to_string(),
            });
        }

        Ok(Self(candidate.to_string()))
    }

    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Which namespace this token belongs to.
    pub fn prefix(&self) -> IdPrefix {
        // Constructors guarantee a known prefix.
        IdPrefix::from_token(&self.0).unwrap_or(IdPrefix::Payment)
    }

    /// The `yyMMdd` date component.
    pub fn date_part(&self) -> &str {
        &self.0[4..10]
    }

    /// The 6-digit millisecond-derived suffix.
    pub fn suffix(&self) -> &str {
        &self.0[10..16]
    }
}

impl FromStr for ThirdId {
    type Err = ThirdIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ThirdId {
    type Error = ThirdIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ThirdId> for String {
    fn from(id: ThirdId) -> Self {
        id.0
    }
}

impl AsRef<str> for ThirdId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ThirdId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
