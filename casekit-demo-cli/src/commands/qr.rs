//! QR code display for vending sessions

use anyhow::{bail, Result};
use casekit_demo_core::session_qr_url;
use casekit_lib::SessionId;
use chrono::Utc;

use crate::ui;

/// Render the customer-facing QR code for a session.
///
/// Either wraps an existing session ID or mints a fresh one for
/// `--machine-id`.
pub fn session(
    session_id: Option<&str>,
    machine_id: Option<&str>,
    frontend_base: &str,
) -> Result<()> {
    ui::header("Session QR Code");

    let session = match (session_id, machine_id) {
        (Some(candidate), _) => match SessionId::parse(candidate) {
            Ok(session) => session,
            Err(err) => bail!("rejected: {}", err),
        },
        (None, Some(machine)) => match SessionId::generate(machine, Utc::now()) {
            Ok(session) => session,
            Err(err) => bail!("machine id rejected: {}", err),
        },
        (None, None) => bail!("Provide a session id or --machine-id to mint one"),
    };

    let url = session_qr_url(frontend_base, &session);

    ui::key_value("Session", session.as_str());
    ui::key_value("URL", &url);
    println!();
    ui::qr_code(&url)?;

    ui::separator();
    ui::info("Customers scan this to resume the session on their phone");

    Ok(())
}
