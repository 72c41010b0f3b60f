//! QR URL round-trip for vending sessions.
//!
//! The machine screen shows a QR code pointing at the customer frontend with
//! the session ID as a query parameter. Extraction has to go through the
//! query parser: slicing the URL by hand is how session IDs ended up in
//! production with `?qr=true` glued onto their random suffix.

use casekit_lib::{SessionId, SessionIdError};

/// Error type for QR URL handling.
#[derive(Debug, thiserror::Error)]
pub enum QrUrlError {
    #[error("URL has no query string: {url}")]
    MissingQuery { url: String },
    #[error("URL query has no session_id parameter: {url}")]
    MissingParam { url: String },
    #[error("session_id parameter failed percent-decoding: {0}")]
    Decode(String),
    #[error(transparent)]
    InvalidSession(#[from] SessionIdError),
}

/// Build the customer-facing URL a machine encodes into its QR code.
///
/// # Examples
///
/// ```
/// use casekit_demo_core::session_qr_url;
/// use casekit_lib::SessionId;
///
/// let session: SessionId = "VM001_20250123_143022_A1B2C3D4".parse().unwrap();
/// let url = session_qr_url("https://shop.example", &session);
/// assert_eq!(
///     url,
///     "https://shop.example/?session_id=VM001_20250123_143022_A1B2C3D4&qr=true"
/// );
/// ```
pub fn session_qr_url(frontend_base: &str, session: &SessionId) -> String {
    format!(
        "{}/?session_id={}&qr=true",
        frontend_base.trim_end_matches('/'),
        urlencoding::encode(session.as_str())
    )
}

/// Extract and validate the session ID from a scanned QR URL.
pub fn session_from_qr_url(url: &str) -> Result<SessionId, QrUrlError> {
    let query = url
        .split_once('?')
        .map(|(_, q)| q)
        .ok_or_else(|| QrUrlError::MissingQuery {
            url: url.to_string(),
        })?;

    for param in query.split('&') {
        if let Some((key, value)) = param.split_once('=') {
            if key == "session_id" {
                let decoded = urlencoding::decode(value)
                    .map_err(|e| QrUrlError::Decode(e.to_string()))?;
                return Ok(SessionId::parse(&decoded)?);
            }
        }
    }

    Err(QrUrlError::MissingParam {
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: &str = "10HKNTDOH2BA_20250729_143022_A1B2C3D4";

    #[test]
    fn url_round_trip() {
        let session: SessionId = SESSION.parse().unwrap();
        let url = session_qr_url("https://shop.example/", &session);
        let recovered = session_from_qr_url(&url).unwrap();
        assert_eq!(recovered, session);
    }

    #[test]
    fn extraction_ignores_other_parameters() {
        let url = format!(
            "https://shop.example/?machine_id=VM001&session_id={}&qr=true",
            SESSION
        );
        let recovered = session_from_qr_url(&url).unwrap();
        assert_eq!(recovered.as_str(), SESSION);
    }

    #[test]
    fn naive_suffix_slicing_would_have_failed_validation() {
        // What the buggy scripts used to do: take everything after the last
        // '=' of the URL. The core validator catches the damage.
        let url = format!("https://shop.example/?session_id={}&qr=true", SESSION);
        let naive = url.rsplit_once('=').unwrap().1;
        assert!(SessionId::parse(naive).is_err());

        // Going through the query parser recovers the clean token.
        assert!(session_from_qr_url(&url).is_ok());
    }

    #[test]
    fn missing_query_is_rejected() {
        let err = session_from_qr_url("https://shop.example/").unwrap_err();
        assert!(matches!(err, QrUrlError::MissingQuery { .. }));
    }

    #[test]
    fn missing_parameter_is_rejected() {
        let err = session_from_qr_url("https://shop.example/?qr=true").unwrap_err();
        assert!(matches!(err, QrUrlError::MissingParam { .. }));
    }

    #[test]
    fn malformed_session_parameter_is_rejected() {
        let url = "https://shop.example/?session_id=VM001_2025123_143022_A1B2C3";
        let err = session_from_qr_url(url).unwrap_err();
        assert!(matches!(err, QrUrlError::InvalidSession(_)));
    }
}
