//! Payload signing command

use anyhow::Result;
use casekit_lib::{canonical_string, sign_payload};
use serde_json::Value;

use crate::ui;

/// Sign a payload and show the result.
///
/// With `--verbose`, also prints the canonical string: the thing to diff
/// byte-for-byte against the other side when the vendor rejects a request.
#[tracing::instrument(skip(payload_arg, fixed_key))]
pub fn run(payload_arg: &str, system_name: &str, fixed_key: &str, verbose: bool) -> Result<()> {
    ui::header("Sign Payload");

    let payload = super::read_payload_arg(payload_arg)?;
    tracing::debug!("Parsed payload for signing");

    if let Value::Array(items) = &payload {
        if !matches!(items.first(), Some(Value::Object(_))) {
            ui::warning("List payload without a leading object: nothing but the secrets gets signed");
        } else if items.len() > 1 {
            ui::warning("List payload: only the first object element participates in signing");
        }
    }

    let signature = sign_payload(&payload, system_name, fixed_key);

    ui::key_value("System", system_name);
    ui::key_value("Signature", signature.as_str());

    if verbose {
        ui::separator();
        ui::info("Payload as parsed:");
        ui::json(&payload);
        ui::info("Canonical string (payload values + system name + fixed key):");
        println!("{}", canonical_string(&payload, system_name, fixed_key));
    }

    Ok(())
}
