//! Configuration for talking to the manufacturer API.

use serde::{Deserialize, Serialize};

/// Connection and signing configuration for the manufacturer API.
///
/// The two secrets (`system_name`, `fixed_key`) feed the request signature;
/// everything else rides along as plain headers. Keeping them in one struct
/// passed by reference is deliberate: the signing bugs this codebase exists
/// to kill were mostly scripts each carrying their own slightly-different
/// copy of these values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VendorConfig {
    /// API origin (e.g., "https://api.manufacturer.example").
    pub base_url: String,

    /// System identifier appended to every canonical sign string.
    pub system_name: String,

    /// Shared secret appended after the system name.
    pub fixed_key: String,

    /// Value of the `req_source` header.
    #[serde(default = "default_req_source")]
    pub req_source: String,

    /// Bearer token for endpoints that require a logged-in session.
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_req_source() -> String {
    "en".to_string()
}

impl VendorConfig {
    /// Create a new configuration with the required fields.
    pub fn new(
        base_url: impl Into<String>,
        system_name: impl Into<String>,
        fixed_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            system_name: system_name.into(),
            fixed_key: fixed_key.into(),
            req_source: default_req_source(),
            auth_token: None,
        }
    }

    /// Set the `req_source` header value.
    pub fn with_req_source(mut self, req_source: impl Into<String>) -> Self {
        self.req_source = req_source.into();
        self
    }

    /// Set the bearer token obtained from `user/login`.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_fields() {
        let config = VendorConfig::new("https://vendor.example", "mobileShell", "secret")
            .with_req_source("apk")
            .with_auth_token("tok-123");

        assert_eq!(config.req_source, "apk");
        assert_eq!(config.auth_token.as_deref(), Some("tok-123"));
    }

    #[test]
    fn deserializing_fills_defaults() {
        let config: VendorConfig = serde_json::from_str(
            r#"{"base_url": "https://vendor.example", "system_name": "mobileShell", "fixed_key": "secret"}"#,
        )
        .unwrap();

        assert_eq!(config.req_source, "en");
        assert!(config.auth_token.is_none());
    }
}
