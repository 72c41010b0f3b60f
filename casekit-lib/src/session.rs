//! Vending session identifiers.
//!
//! A session ID is the correlation token minted when a vending machine hands
//! a customer a QR code, and looked up again for every call the customer's
//! phone makes afterwards. Wire format:
//!
//! ```text
//! {machine_id}_{YYYYMMDD}_{HHMMSS}_{RANDOM}
//! ```
//!
//! - machine id: one or more alphanumeric/hyphen characters, no underscores
//! - date: exactly 8 digits, zero-padded
//! - time: exactly 6 digits, zero-padded
//! - random: 6–8 uppercase alphanumeric characters (newly minted IDs always
//!   carry 8; 6-character suffixes from older machines remain accepted)
//!
//! The production failures this format rule exists to catch are mundane:
//! a missing leading zero collapsing the date to 7 digits, `HHMM` instead of
//! `HHMMSS`, and whole query strings (`?qr=true`) glued onto the last segment
//! by careless URL handling. Each rejection therefore names the offending
//! segment and suggests the fix instead of returning a bare "invalid".
//!
//! # Examples
//!
//! ```
//! use casekit_lib::session::SessionId;
//!
//! let id: SessionId = "10HKNTDOH2BA_20250729_143022_A1B2C3D4".parse().unwrap();
//! assert_eq!(id.machine_id(), "10HKNTDOH2BA");
//! assert_eq!(id.date(), "20250729");
//!
//! // A 7-digit date segment is rejected with a hint, not silently fixed.
//! let err = "10HKNTDOH2BA_2025729_093542_A1B2C3".parse::<SessionId>().unwrap_err();
//! assert!(err.to_string().contains("leading zero"));
//! ```

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Characters allowed in the random suffix. Uppercase only; the backend
/// compares session IDs case-sensitively.
const RANDOM_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the random suffix on newly minted session IDs.
const RANDOM_LEN: usize = 8;

/// Structured rejection for a malformed session ID.
///
/// Validation is pure and never panics; downstream HTTP handling decides
/// which status code a given rejection maps to.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionIdError {
    /// Wrong number of underscore-separated segments.
    #[error("expected 4 underscore-separated segments, found {found}{}", segment_count_hint(.found))]
    SegmentCount {
        /// Number of segments the split produced.
        found: usize,
    },

    /// Machine ID segment is empty or contains a disallowed character.
    #[error("machine id segment {reason}")]
    MachineId {
        /// What was wrong with the segment.
        reason: String,
    },

    /// Date segment is not exactly 8 digits.
    #[error("date segment has {found} digits, expected 8{}", date_length_hint(.found))]
    DateLength {
        /// Digit count actually present.
        found: usize,
    },

    /// Date segment contains a non-digit character.
    #[error("date segment must be 8 digits (YYYYMMDD), got {segment:?}")]
    DateNotNumeric {
        /// The offending segment.
        segment: String,
    },

    /// Time segment is not exactly 6 digits.
    #[error("time segment has {found} digits, expected 6{}", time_length_hint(.found))]
    TimeLength {
        /// Digit count actually present.
        found: usize,
    },

    /// Time segment contains a non-digit character.
    #[error("time segment must be 6 digits (HHMMSS), got {segment:?}")]
    TimeNotNumeric {
        /// The offending segment.
        segment: String,
    },

    /// A query-string fragment is glued onto the ID.
    #[error("session id carries an embedded query fragment {fragment:?} — strip URL query parameters before lookup, never truncate")]
    EmbeddedQuery {
        /// Everything from the `?` onward.
        fragment: String,
    },

    /// Random suffix has the wrong length.
    #[error("random suffix has {found} characters, expected 6 to 8")]
    RandomLength {
        /// Character count actually present.
        found: usize,
    },

    /// Random suffix contains a character outside `[A-Z0-9]`.
    #[error("random suffix must be uppercase alphanumeric, got {segment:?}")]
    RandomCharset {
        /// The offending segment.
        segment: String,
    },
}

fn segment_count_hint(found: &usize) -> &'static str {
    if *found > 4 {
        " — machine ids must not contain underscores"
    } else {
        ""
    }
}

fn date_length_hint(found: &usize) -> &'static str {
    if *found == 7 {
        " — check for a missing leading zero on the month or day"
    } else {
        ""
    }
}

fn time_length_hint(found: &usize) -> &'static str {
    if *found == 4 {
        " — looks like HHMM, the format requires HHMMSS"
    } else {
        ""
    }
}

/// A validated vending session identifier.
///
/// Immutable once created; carries no state beyond the string itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh session ID for a machine at the given instant.
    ///
    /// The machine id is validated up front so a bad machine registry entry
    /// surfaces here rather than as a downstream parse failure.
    pub fn generate(machine_id: &str, at: DateTime<Utc>) -> Result<Self, SessionIdError> {
        validate_machine_id(machine_id)?;

        let mut rng = rand::thread_rng();
        let random: String = (0..RANDOM_LEN)
            .map(|_| RANDOM_CHARSET[rng.gen_range(0..RANDOM_CHARSET.len())] as char)
            .collect();

        Ok(Self(format!(
            "{}_{}_{}_{}",
            machine_id,
            at.format("%Y%m%d"),
            at.format("%H%M%S"),
            random
        )))
    }

    /// Validate a candidate string and wrap it.
    ///
    /// Equivalent to `candidate.parse::<SessionId>()`.
    #[cfg_attr(feature = "tracing", tracing::instrument)]
    pub fn parse(candidate: &str) -> Result<Self, SessionIdError> {
        let segments: Vec<&str> = candidate.split('_').collect();
        if segments.len() != 4 {
            return Err(SessionIdError::SegmentCount {
                found: segments.len(),
            });
        }

        validate_machine_id(segments[0])?;
        validate_date(segments[1])?;
        validate_time(segments[2])?;
        validate_random(segments[3])?;

        Ok(Self(candidate.to_string()))
    }

    /// Get the session ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The machine ID segment.
    pub fn machine_id(&self) -> &str {
        self.segment(0)
    }

    /// The date segment (`YYYYMMDD`).
    pub fn date(&self) -> &str {
        self.segment(1)
    }

    /// The time segment (`HHMMSS`).
    pub fn time(&self) -> &str {
        self.segment(2)
    }

    /// The random suffix.
    pub fn random(&self) -> &str {
        self.segment(3)
    }

    fn segment(&self, index: usize) -> &str {
        // Constructors guarantee the 4-way split.
        self.0.split('_').nth(index).unwrap_or("")
    }
}

impl FromStr for SessionId {
    type Err = SessionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SessionId {
    type Error = SessionIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_machine_id(segment: &str) -> Result<(), SessionIdError> {
    if segment.is_empty() {
        return Err(SessionIdError::MachineId {
            reason: "is empty".to_string(),
        });
    }
    if let Some(bad) = segment
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
    {
        return Err(SessionIdError::MachineId {
            reason: format!("contains {:?}, only alphanumerics and hyphens are allowed", bad),
        });
    }
    Ok(())
}

fn validate_date(segment: &str) -> Result<(), SessionIdError> {
    if !segment.chars().all(|c| c.is_ascii_digit()) {
        return Err(SessionIdError::DateNotNumeric {
            segment: segment.to_string(),
        });
    }
    if segment.len() != 8 {
        return Err(SessionIdError::DateLength {
            found: segment.len(),
        });
    }
    Ok(())
}

fn validate_time(segment: &str) -> Result<(), SessionIdError> {
    if !segment.chars().all(|c| c.is_ascii_digit()) {
        return Err(SessionIdError::TimeNotNumeric {
            segment: segment.to_string(),
        });
    }
    if segment.len() != 6 {
        return Err(SessionIdError::TimeLength {
            found: segment.len(),
        });
    }
    Ok(())
}

fn validate_random(segment: &str) -> Result<(), SessionIdError> {
    // Query fragments glued onto the last segment get their own rejection:
    // the fix (strip the URL query) differs from a plain charset violation.
    if let Some(pos) = segment.find('?') {
        return Err(SessionIdError::EmbeddedQuery {
            fragment: segment[pos..].to_string(),
        });
    }
    if let Some(bad) = segment
        .chars()
        .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit()))
    {
        return Err(SessionIdError::RandomCharset {
            segment: format!("{:?} in {:?}", bad, segment),
        });
    }
    if !(6..=8).contains(&segment.len()) {
        return Err(SessionIdError::RandomLength {
            found: segment.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_well_formed_id() {
        let id = SessionId::parse("10HKNTDOH2BA_20250729_143022_A1B2C3").unwrap();
        assert_eq!(id.machine_id(), "10HKNTDOH2BA");
        assert_eq!(id.date(), "20250729");
        assert_eq!(id.time(), "143022");
        assert_eq!(id.random(), "A1B2C3");
    }

    #[test]
    fn accepts_hyphenated_machine_id_and_full_random() {
        SessionId::parse("VM-BERLIN-07_20250101_000000_ZZZZ9999").unwrap();
    }

    #[test]
    fn rejects_seven_digit_date_with_leading_zero_hint() {
        let err = SessionId::parse("10HKNTDOH2BA_2025729_093542_A1B2C3").unwrap_err();
        assert_eq!(err, SessionIdError::DateLength { found: 7 });
        assert!(err.to_string().contains("missing leading zero"));
    }

    #[test]
    fn rejects_four_digit_time_with_hhmm_hint() {
        let err = SessionId::parse("VM001_20250123_1430_A1B2C3").unwrap_err();
        assert_eq!(err, SessionIdError::TimeLength { found: 4 });
        assert!(err.to_string().contains("HHMM"));
    }

    #[test]
    fn rejects_embedded_query_fragment() {
        let err = SessionId::parse("VM001_20250123_143022_A1B2C3?qr=true").unwrap_err();
        assert!(matches!(err, SessionIdError::EmbeddedQuery { .. }));
        assert!(err.to_string().contains("strip URL query parameters"));
    }

    #[test]
    fn rejects_wrong_segment_count() {
        let err = SessionId::parse("VM001_20250123_143022").unwrap_err();
        assert_eq!(err, SessionIdError::SegmentCount { found: 3 });
    }

    #[test]
    fn underscore_in_machine_id_breaks_the_split() {
        // An underscore in the machine id is indistinguishable from an extra
        // separator, so it surfaces as a 5-segment rejection.
        let err = SessionId::parse("VM_001_20250123_143022_A1B2C3").unwrap_err();
        assert_eq!(err, SessionIdError::SegmentCount { found: 5 });
        assert!(err.to_string().contains("must not contain underscores"));
    }

    #[test]
    fn rejects_lowercase_random_suffix() {
        let err = SessionId::parse("VM001_20250123_143022_a1b2c3").unwrap_err();
        assert!(matches!(err, SessionIdError::RandomCharset { .. }));
    }

    #[test]
    fn rejects_short_and_long_random_suffix() {
        let short = SessionId::parse("VM001_20250123_143022_A1B2C").unwrap_err();
        assert_eq!(short, SessionIdError::RandomLength { found: 5 });

        let long = SessionId::parse("VM001_20250123_143022_A1B2C3D4E").unwrap_err();
        assert_eq!(long, SessionIdError::RandomLength { found: 9 });
    }

    #[test]
    fn rejects_hyphen_separators() {
        // Hyphens land everything in the machine-id segment of a 1-way split.
        let err = SessionId::parse("VM001-20250123-143022-A1B2C3").unwrap_err();
        assert_eq!(err, SessionIdError::SegmentCount { found: 1 });
    }

    #[test]
    fn validation_is_idempotent() {
        let good = "10HKNTDOH2BA_20250729_143022_A1B2C3";
        assert_eq!(SessionId::parse(good), SessionId::parse(good));

        let bad = "10HKNTDOH2BA_2025729_093542_A1B2C3";
        assert_eq!(
            SessionId::parse(bad).unwrap_err(),
            SessionId::parse(bad).unwrap_err()
        );
    }

    #[test]
    fn generated_ids_validate_and_zero_pad() {
        // Jan 3, 09:05:02: every component needs its leading zero.
        let at = Utc.with_ymd_and_hms(2025, 1, 3, 9, 5, 2).unwrap();
        let id = SessionId::generate("VM001", at).unwrap();

        assert_eq!(id.date(), "20250103");
        assert_eq!(id.time(), "090502");
        assert_eq!(id.random().len(), 8);
        SessionId::parse(id.as_str()).unwrap();
    }

    #[test]
    fn generate_rejects_underscored_machine_id() {
        let at = Utc.with_ymd_and_hms(2025, 7, 29, 14, 30, 22).unwrap();
        let err = SessionId::generate("VM_001", at).unwrap_err();
        assert!(matches!(err, SessionIdError::MachineId { .. }));
    }

    #[test]
    fn serde_round_trip_validates() {
        let id: SessionId = serde_json::from_str("\"VM001_20250123_143022_A1B2C3D4\"").unwrap();
        assert_eq!(id.machine_id(), "VM001");

        let bad: Result<SessionId, _> = serde_json::from_str("\"VM001_2025123_143022_A1B2C3\"");
        assert!(bad.is_err());
    }
}
