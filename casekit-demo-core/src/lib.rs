//! Casekit Demo Core Library
//!
//! Shared business logic for the Casekit demo tooling: vending session and
//! payment models, the in-memory mock vendor store used when rehearsing
//! flows without the real manufacturer, and the QR URL round-trip.

pub mod models;
pub mod qr;
pub mod store;

pub use models::{
    current_timestamp, OrderRecord, PaymentRecord, PaymentStatus, SessionStatus, VendingSession,
};
pub use qr::{session_from_qr_url, session_qr_url, QrUrlError};
pub use store::{MockVendorStore, StoreError};

/// Result type for demo operations
pub type Result<T> = anyhow::Result<T>;
