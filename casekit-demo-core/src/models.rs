//! Data models for Casekit demo applications
//!
//! Simplified records for rehearsing vending flows against the mock store:
//! a session per customer interaction, a payment record per `PYEN` token,
//! and an order record linking back to its payment via `third_pay_id`.
//!
//! # Examples
//!
//! ```
//! use casekit_demo_core::{PaymentRecord, VendingSession};
//! use casekit_lib::{IdPrefix, SessionId, ThirdId};
//! use chrono::Utc;
//!
//! let session_id = SessionId::generate("VM001", Utc::now()).unwrap();
//! let session = VendingSession::new(session_id.clone(), 1800);
//! assert_eq!(session.machine_id, "VM001");
//!
//! let payment = PaymentRecord::new(ThirdId::generate(IdPrefix::Payment), session_id)
//!     .with_amount("19.99".to_string(), "GBP".to_string());
//! assert_eq!(payment.currency.as_deref(), Some("GBP"));
//! ```

use casekit_lib::{SessionId, ThirdId};
use serde::{Deserialize, Serialize};

/// Lifecycle of a vending session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// QR issued, customer not yet paying.
    Active,
    /// Payment request submitted upstream.
    PaymentPending,
    /// Order created and handed to the print queue.
    Completed,
    /// TTL elapsed before completion.
    Expired,
}

/// Lifecycle of a payment record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Submitted, awaiting confirmation.
    Pending,
    /// Confirmed by the payment channel.
    Paid,
    /// Rejected or timed out.
    Failed,
}

/// One customer interaction at one machine
///
/// Created when the machine issues a QR code; immutable except for status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendingSession {
    /// The session token embedded in the QR code
    pub session_id: SessionId,
    /// Machine that issued the session (denormalized from the token)
    pub machine_id: String,
    /// Current lifecycle state
    pub status: SessionStatus,
    /// Timestamp when created
    pub created_at: i64,
    /// Timestamp after which the session is evictable
    pub expires_at: i64,
}

impl VendingSession {
    /// Create a session that expires `ttl_secs` from now.
    pub fn new(session_id: SessionId, ttl_secs: i64) -> Self {
        let now = current_timestamp();
        Self {
            machine_id: session_id.machine_id().to_string(),
            session_id,
            status: SessionStatus::Active,
            created_at: now,
            expires_at: now + ttl_secs,
        }
    }

    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the TTL has elapsed at the given instant.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// A payment submitted upstream, keyed by its `PYEN` token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Caller-minted correlation token (`PYEN…`)
    pub third_id: ThirdId,
    /// Session the payment belongs to
    pub session_id: SessionId,
    /// Amount (optional)
    pub amount: Option<String>,
    /// Currency (optional)
    pub currency: Option<String>,
    /// Current lifecycle state
    pub status: PaymentStatus,
    /// Timestamp when created
    pub created_at: i64,
    /// Additional metadata (design reference, print parameters, etc.)
    pub metadata: serde_json::Value,
}

impl PaymentRecord {
    pub fn new(third_id: ThirdId, session_id: SessionId) -> Self {
        Self {
            third_id,
            session_id,
            amount: None,
            currency: None,
            status: PaymentStatus::Pending,
            created_at: current_timestamp(),
            metadata: serde_json::json!({}),
        }
    }

    pub fn with_amount(mut self, amount: String, currency: String) -> Self {
        self.amount = Some(amount);
        self.currency = Some(currency);
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// An order submitted upstream, keyed by its `OREN` token.
///
/// `third_pay_id` is the payment's `PYEN` token re-supplied on the
/// order-creation call; it is how the vendor ties the two together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Caller-minted correlation token (`OREN…`)
    pub third_id: ThirdId,
    /// The originating payment's `PYEN` token
    pub third_pay_id: ThirdId,
    /// Print-queue number returned by the vendor, when known
    pub queue_number: Option<String>,
    /// Timestamp when created
    pub created_at: i64,
}

impl OrderRecord {
    pub fn new(third_id: ThirdId, third_pay_id: ThirdId) -> Self {
        Self {
            third_id,
            third_pay_id,
            queue_number: None,
            created_at: current_timestamp(),
        }
    }

    pub fn with_queue_number(mut self, queue_number: String) -> Self {
        self.queue_number = Some(queue_number);
        self
    }
}

/// Get current Unix timestamp
///
/// Returns the number of seconds since the Unix epoch, or 0 if the system
/// clock reads before the epoch.
pub fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use casekit_lib::IdPrefix;
    use chrono::Utc;

    #[test]
    fn session_denormalizes_machine_id() {
        let id = SessionId::generate("VM-07", Utc::now()).unwrap();
        let session = VendingSession::new(id, 60);
        assert_eq!(session.machine_id, "VM-07");
        assert_eq!(session.status, SessionStatus::Active);
    }

    #[test]
    fn session_expiry_is_ttl_based() {
        let id = SessionId::generate("VM001", Utc::now()).unwrap();
        let session = VendingSession::new(id, 60);
        assert!(!session.is_expired(session.created_at));
        assert!(session.is_expired(session.created_at + 61));
    }

    #[test]
    fn order_links_back_to_payment_token() {
        let pay = ThirdId::generate(IdPrefix::Payment);
        let order = OrderRecord::new(ThirdId::generate(IdPrefix::Order), pay.clone())
            .with_queue_number("Q12".to_string());
        assert_eq!(order.third_pay_id, pay);
        assert_eq!(order.queue_number.as_deref(), Some("Q12"));
    }
}
