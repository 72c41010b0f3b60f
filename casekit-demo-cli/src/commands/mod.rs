//! Command implementations for the Casekit demo CLI

pub mod endpoints;
pub mod qr;
pub mod rehearse;
pub mod session;
pub mod sign;
pub mod third_id;

use anyhow::{Context, Result};
use serde_json::Value;

/// Read a payload argument: inline JSON, or `@path` to load a file.
pub fn read_payload_arg(arg: &str) -> Result<Value> {
    let raw = if let Some(path) = arg.strip_prefix('@') {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
    } else {
        arg.to_string()
    };

    serde_json::from_str(&raw).context("Payload is not valid JSON")
}
