//! Session ID commands

use anyhow::{bail, Result};
use casekit_lib::SessionId;
use chrono::Utc;

use crate::ui;

/// Mint a fresh session ID for a machine.
pub fn generate(machine_id: &str) -> Result<()> {
    ui::header("Generate Session ID");

    let session = match SessionId::generate(machine_id, Utc::now()) {
        Ok(session) => session,
        Err(err) => bail!("machine id rejected: {}", err),
    };

    ui::success(&format!("Minted {}", session));
    ui::key_value("Machine", session.machine_id());
    ui::key_value("Date", session.date());
    ui::key_value("Time", session.time());
    ui::key_value("Random", session.random());

    Ok(())
}

/// Validate a candidate session ID, showing the corrective hint on failure.
pub fn validate(candidate: &str) -> Result<()> {
    ui::header("Validate Session ID");
    ui::key_value("Candidate", candidate);

    match SessionId::parse(candidate) {
        Ok(_) => {
            ui::success("Valid session ID");
            Ok(())
        }
        Err(err) => bail!("rejected: {}", err),
    }
}

/// Decompose a session ID into its segments.
pub fn inspect(candidate: &str) -> Result<()> {
    ui::header("Inspect Session ID");

    let session = match SessionId::parse(candidate) {
        Ok(session) => session,
        Err(err) => bail!("rejected: {}", err),
    };

    ui::key_value("Machine", session.machine_id());
    ui::key_value("Date", session.date());
    ui::key_value("Time", session.time());
    ui::key_value("Random", session.random());

    Ok(())
}
