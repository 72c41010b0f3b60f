//! Signed header assembly.
//!
//! Produces the header values the manufacturer checks; transmitting them is
//! the caller's HTTP client's job.

use serde_json::Value;

use crate::config::VendorConfig;
use crate::sign::sign_payload;

/// Header carrying the request signature.
pub const SIGN_HEADER: &str = "sign";

/// Header identifying the calling channel.
pub const REQ_SOURCE_HEADER: &str = "req_source";

/// Standard bearer-token header.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Compute the full header set for a request payload.
///
/// Always emits `sign` and `req_source`; adds `Authorization` when the
/// config carries a token. The payload passed here must be the payload that
/// is transmitted: signing one body and sending another is the classic
/// failure mode, and it is invisible until the vendor rejects the call.
///
/// # Examples
///
/// ```
/// use casekit_lib::config::VendorConfig;
/// use casekit_lib::protocol::{signed_headers, SIGN_HEADER};
/// use serde_json::json;
///
/// let config = VendorConfig::new("https://vendor.example", "mobileShell", "secret");
/// let headers = signed_headers(&json!({"device_id": "VM001"}), &config);
/// assert_eq!(headers[0].0, SIGN_HEADER);
/// assert_eq!(headers[0].1.len(), 32);
/// ```
pub fn signed_headers(payload: &Value, config: &VendorConfig) -> Vec<(&'static str, String)> {
    let signature = sign_payload(payload, &config.system_name, &config.fixed_key);

    let mut headers = vec![
        (SIGN_HEADER, signature.0),
        (REQ_SOURCE_HEADER, config.req_source.clone()),
    ];

    if let Some(token) = &config.auth_token {
        headers.push((AUTHORIZATION_HEADER, format!("Bearer {}", token)));
    }

    headers
}
