//! Vendor endpoint catalogue

use anyhow::Result;
use casekit_lib::protocol::{endpoint_url, Endpoint};

use crate::ui;

/// List the manufacturer endpoints this tooling signs requests for.
pub fn list(base_url: Option<&str>) -> Result<()> {
    ui::header("Manufacturer Endpoints");

    for endpoint in Endpoint::all() {
        let path = match base_url {
            Some(base) => endpoint_url(base, *endpoint),
            None => endpoint.full_path(),
        };
        let auth = if endpoint.requires_auth() {
            "sign + bearer"
        } else {
            "sign only"
        };
        ui::key_value(&path, auth);
    }

    ui::separator();
    ui::info("Call order matters upstream: payData must be processed before orderData references it");

    Ok(())
}
