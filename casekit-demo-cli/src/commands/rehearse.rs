//! End-to-end vending flow rehearsal against the mock store

use anyhow::{Context, Result};
use casekit_demo_core::{
    session_qr_url, MockVendorStore, OrderRecord, PaymentRecord, PaymentStatus, SessionStatus,
    VendingSession,
};
use casekit_lib::{IdPrefix, SessionId, ThirdId};
use chrono::Utc;

use crate::ui;

/// Session TTL used for rehearsals, matching the backend's QR validity window.
const SESSION_TTL_SECS: i64 = 1800;

/// Walk a full vending interaction through the mock store:
/// session issue, payment, then the order referencing the payment.
pub fn run(machine_id: &str, amount: &str, frontend_base: &str) -> Result<()> {
    ui::header("Rehearse Vending Flow");

    let store = MockVendorStore::new();

    // 1. Machine issues a session and shows the QR.
    let session_id =
        SessionId::generate(machine_id, Utc::now()).context("machine id rejected")?;
    tracing::debug!("Issued session {}", session_id);
    store
        .insert_session(VendingSession::new(session_id.clone(), SESSION_TTL_SECS))
        .context("Failed to register session")?;
    ui::success(&format!("Session issued: {}", session_id));
    ui::key_value("QR URL", &session_qr_url(frontend_base, &session_id));

    // 2. Customer pays; we mint the PYEN token and submit the payment.
    let pay_token = ThirdId::generate(IdPrefix::Payment);
    store
        .insert_payment(
            PaymentRecord::new(pay_token.clone(), session_id.clone())
                .with_amount(amount.to_string(), "GBP".to_string()),
        )
        .context("Failed to record payment")?;
    store
        .set_session_status(&session_id, SessionStatus::PaymentPending)
        .context("Failed to advance session")?;
    ui::success(&format!("Payment submitted: {}", pay_token));

    // 3. Payment confirms; the order re-supplies the PYEN token as
    //    third_pay_id. The store enforces the same ordering the vendor does.
    store
        .set_payment_status(&pay_token, PaymentStatus::Paid)
        .context("Failed to confirm payment")?;
    let order_token = ThirdId::generate(IdPrefix::Order);
    store
        .insert_order(OrderRecord::new(order_token.clone(), pay_token.clone()))
        .context("Failed to record order")?;
    store
        .set_session_status(&session_id, SessionStatus::Completed)
        .context("Failed to complete session")?;
    ui::success(&format!(
        "Order created: {} (third_pay_id {})",
        order_token, pay_token
    ));

    let (sessions, payments, orders) = store.counts().context("Failed to read store counts")?;
    ui::separator();
    ui::key_value("Sessions", &sessions.to_string());
    ui::key_value("Payments", &payments.to_string());
    ui::key_value("Orders", &orders.to_string());

    Ok(())
}
