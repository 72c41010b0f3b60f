//! Request signing for the manufacturer API.
//!
//! Every authenticated request carries a `sign` header: a lowercase-hex MD5
//! digest over a canonical string built from the request payload plus two
//! shared secrets (`system_name` and `fixed_key`). The manufacturer rejects
//! any request whose signature does not match byte-for-byte, with an opaque
//! authentication error, so the canonicalization rules below are the
//! interoperability contract, not an implementation detail.
//!
//! # Canonicalization rules
//!
//! - Object payloads: keys are visited in ascending lexicographic order.
//!   The string rendering of each primitive (string, number, boolean)
//!   non-null value is appended. Nulls, nested objects, and arrays
//!   contribute nothing.
//! - Array payloads: if the first element is an object, it is canonicalized
//!   by the object rule; anything else contributes nothing.
//! - `system_name` and then `fixed_key` are appended last.
//! - No separators anywhere.
//!
//! Sorted-key iteration is the load-bearing invariant: an implementation
//! that visits keys in insertion order produces a different signature and
//! every request fails upstream.
//!
//! # Examples
//!
//! ```
//! use casekit_lib::sign::{sign_payload, canonical_string};
//! use serde_json::json;
//!
//! let payload = json!({"account": "x@example.com", "password": "EN112233"});
//! let sig = sign_payload(&payload, "mobileShell", "shfoa3sfwoehnf3290rqefiz4efd");
//! assert_eq!(sig.as_str().len(), 32);
//!
//! // The canonical string is what actually gets hashed; diff it
//! // byte-for-byte when the vendor rejects a request.
//! let canonical = canonical_string(&payload, "mobileShell", "shfoa3sfwoehnf3290rqefiz4efd");
//! assert!(canonical.starts_with("x@example.com"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A computed request signature: 32 lowercase hex characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(pub String);

impl Signature {
    /// Get the signature as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build the canonical string that gets hashed for a payload.
///
/// Exposed separately from [`sign_payload`] because signature mismatches are
/// only diagnosable by comparing the signed string against what the other
/// side hashed.
pub fn canonical_string(payload: &Value, system_name: &str, fixed_key: &str) -> String {
    let mut out = String::new();

    match payload {
        Value::Object(map) => append_object_values(&mut out, map),
        Value::Array(items) => {
            // Only the first element participates, and only if it is an
            // object. The vendor's list endpoints sign this way.
            if let Some(Value::Object(first)) = items.first() {
                append_object_values(&mut out, first);
            }
        }
        _ => {}
    }

    out.push_str(system_name);
    out.push_str(fixed_key);
    out
}

/// Sign a request payload.
///
/// Pure and infallible: whatever payload is passed in gets signed. It is the
/// caller's job to make sure the signed payload is the transmitted payload;
/// a single field differing between the two is indistinguishable upstream
/// from a bad key.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(payload, fixed_key), fields(system = system_name))
)]
pub fn sign_payload(payload: &Value, system_name: &str, fixed_key: &str) -> Signature {
    let canonical = canonical_string(payload, system_name, fixed_key);
    Signature(format!("{:x}", md5::compute(canonical.as_bytes())))
}

fn append_object_values(out: &mut String, map: &serde_json::Map<String, Value>) {
    // Sort explicitly rather than relying on the map's iteration order, so
    // the contract holds even with serde_json's preserve_order feature on.
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    for key in keys {
        match &map[key.as_str()] {
            Value::String(s) => out.push_str(s),
            Value::Number(n) => out.push_str(&n.to_string()),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            // Nulls are skipped entirely, not rendered as "null"; nested
            // objects and arrays never participate.
            Value::Null | Value::Object(_) | Value::Array(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SYSTEM: &str = "mobileShell";
    const KEY: &str = "shfoa3sfwoehnf3290rqefiz4efd";

    #[test]
    fn login_payload_known_answer() {
        // Digest of "x@example.comEN112233mobileShellshfoa3sfwoehnf3290rqefiz4efd".
        let payload = json!({"account": "x@example.com", "password": "EN112233"});
        let sig = sign_payload(&payload, SYSTEM, KEY);
        assert_eq!(sig.as_str(), "00f715b04e45e210d58a8d6415bf7edf");
    }

    #[test]
    fn signing_is_deterministic() {
        let payload = json!({"device_id": "10HKNTDOH2BA", "page": 1});
        let a = sign_payload(&payload, SYSTEM, KEY);
        let b = sign_payload(&payload, SYSTEM, KEY);
        assert_eq!(a, b);
    }

    #[test]
    fn key_insertion_order_does_not_matter() {
        // serde_json::json! preserves the written order only when the
        // preserve_order feature is on; build the maps by hand so the test
        // actually exercises two insertion orders.
        let mut forward = serde_json::Map::new();
        forward.insert("a".into(), json!("1"));
        forward.insert("b".into(), json!("2"));

        let mut reverse = serde_json::Map::new();
        reverse.insert("b".into(), json!("2"));
        reverse.insert("a".into(), json!("1"));

        assert_eq!(
            sign_payload(&Value::Object(forward), SYSTEM, KEY),
            sign_payload(&Value::Object(reverse), SYSTEM, KEY),
        );
    }

    #[test]
    fn nulls_and_nested_values_contribute_nothing() {
        let sparse = json!({"a": 1});
        let noisy = json!({"a": 1, "b": null, "c": {"nested": true}, "d": [1, 2]});
        assert_eq!(
            sign_payload(&sparse, SYSTEM, KEY),
            sign_payload(&noisy, SYSTEM, KEY),
        );
    }

    #[test]
    fn list_payload_uses_first_object_only() {
        let list = json!([{"qty": 2, "sku": "case-01"}, {"qty": 9, "sku": "ignored"}]);
        let first_only = json!({"qty": 2, "sku": "case-01"});
        assert_eq!(
            sign_payload(&list, SYSTEM, KEY),
            sign_payload(&first_only, SYSTEM, KEY),
        );
    }

    #[test]
    fn list_of_non_objects_signs_like_empty_payload() {
        let list = json!(["a", "b"]);
        let empty = json!({});
        assert_eq!(
            sign_payload(&list, SYSTEM, KEY),
            sign_payload(&empty, SYSTEM, KEY),
        );
    }

    #[test]
    fn empty_payload_hashes_secrets_only() {
        let canonical = canonical_string(&json!({}), SYSTEM, KEY);
        assert_eq!(canonical, format!("{}{}", SYSTEM, KEY));
    }

    #[test]
    fn numbers_and_bools_render_in_json_notation() {
        let payload = json!({"a": 7, "b": true, "c": 1.5});
        let canonical = canonical_string(&payload, "", "");
        assert_eq!(canonical, "7true1.5");
    }

    #[test]
    fn signature_is_lowercase_hex() {
        let sig = sign_payload(&json!({"x": "Y"}), SYSTEM, KEY);
        assert_eq!(sig.as_str().len(), 32);
        assert!(sig
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
