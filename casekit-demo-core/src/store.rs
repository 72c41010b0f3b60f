//! In-memory mock of the vendor-facing state.
//!
//! The original debug tooling kept sessions and payments in module-level
//! dictionaries, which made behavior depend on import order and leaked state
//! between test runs. This store is the explicit replacement: one object,
//! passed by reference, process lifetime only, with a TTL sweep instead of
//! unbounded growth.
//!
//! Duplicate correlation-token inserts are reported as errors rather than
//! overwritten. Token uniqueness is only millisecond-probabilistic, and
//! whether the real vendor tolerates a duplicate is unknown; surfacing the
//! collision here keeps that question visible during rehearsals.

use std::collections::HashMap;
use std::sync::RwLock;

use casekit_lib::{SessionId, ThirdId};

use crate::models::{
    current_timestamp, OrderRecord, PaymentRecord, PaymentStatus, SessionStatus, VendingSession,
};

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate id: {id}")]
    Duplicate { id: String },
    #[error("not found: {id}")]
    NotFound { id: String },
    #[error("store lock poisoned: {0}")]
    Lock(String),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Process-lifetime store standing in for the vendor's session/payment state.
///
/// Thread-safe; may be shared by reference across request-handling contexts.
pub struct MockVendorStore {
    sessions: RwLock<HashMap<String, VendingSession>>,
    payments: RwLock<HashMap<String, PaymentRecord>>,
    orders: RwLock<HashMap<String, OrderRecord>>,
}

impl MockVendorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            payments: RwLock::new(HashMap::new()),
            orders: RwLock::new(HashMap::new()),
        }
    }

    /// Register a freshly issued session.
    pub fn insert_session(&self, session: VendingSession) -> StoreResult<()> {
        let mut sessions = self.sessions.write().map_err(lock_error)?;
        let key = session.session_id.as_str().to_string();
        if sessions.contains_key(&key) {
            return Err(StoreError::Duplicate { id: key });
        }
        sessions.insert(key, session);
        Ok(())
    }

    /// Look up a session by its ID.
    pub fn get_session(&self, id: &SessionId) -> StoreResult<Option<VendingSession>> {
        let sessions = self.sessions.read().map_err(lock_error)?;
        Ok(sessions.get(id.as_str()).cloned())
    }

    /// Advance a session's lifecycle state.
    pub fn set_session_status(&self, id: &SessionId, status: SessionStatus) -> StoreResult<()> {
        let mut sessions = self.sessions.write().map_err(lock_error)?;
        match sessions.get_mut(id.as_str()) {
            Some(session) => {
                session.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                id: id.as_str().to_string(),
            }),
        }
    }

    /// Record a submitted payment.
    ///
    /// A second insert under the same `PYEN` token is a collision, not an
    /// update; callers that mean to update use [`set_payment_status`].
    ///
    /// [`set_payment_status`]: MockVendorStore::set_payment_status
    pub fn insert_payment(&self, payment: PaymentRecord) -> StoreResult<()> {
        let mut payments = self.payments.write().map_err(lock_error)?;
        let key = payment.third_id.as_str().to_string();
        if payments.contains_key(&key) {
            return Err(StoreError::Duplicate { id: key });
        }
        payments.insert(key, payment);
        Ok(())
    }

    /// Look up a payment by its `PYEN` token.
    pub fn get_payment(&self, third_id: &ThirdId) -> StoreResult<Option<PaymentRecord>> {
        let payments = self.payments.read().map_err(lock_error)?;
        Ok(payments.get(third_id.as_str()).cloned())
    }

    /// Advance a payment's lifecycle state.
    pub fn set_payment_status(
        &self,
        third_id: &ThirdId,
        status: PaymentStatus,
    ) -> StoreResult<()> {
        let mut payments = self.payments.write().map_err(lock_error)?;
        match payments.get_mut(third_id.as_str()) {
            Some(payment) => {
                payment.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                id: third_id.as_str().to_string(),
            }),
        }
    }

    /// Record a submitted order.
    ///
    /// The order's `third_pay_id` must reference a known payment; the real
    /// vendor enforces the same ordering and rejects orders whose payment it
    /// has not yet processed.
    pub fn insert_order(&self, order: OrderRecord) -> StoreResult<()> {
        {
            let payments = self.payments.read().map_err(lock_error)?;
            if !payments.contains_key(order.third_pay_id.as_str()) {
                return Err(StoreError::NotFound {
                    id: order.third_pay_id.as_str().to_string(),
                });
            }
        }

        let mut orders = self.orders.write().map_err(lock_error)?;
        let key = order.third_id.as_str().to_string();
        if orders.contains_key(&key) {
            return Err(StoreError::Duplicate { id: key });
        }
        orders.insert(key, order);
        Ok(())
    }

    /// Look up an order by its `OREN` token.
    pub fn get_order(&self, third_id: &ThirdId) -> StoreResult<Option<OrderRecord>> {
        let orders = self.orders.read().map_err(lock_error)?;
        Ok(orders.get(third_id.as_str()).cloned())
    }

    /// Evict sessions whose TTL has elapsed.
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired(&self) -> StoreResult<usize> {
        self.cleanup_expired_at(current_timestamp())
    }

    /// TTL sweep against an explicit clock, for deterministic tests.
    pub fn cleanup_expired_at(&self, now: i64) -> StoreResult<usize> {
        let mut sessions = self.sessions.write().map_err(lock_error)?;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        Ok(before - sessions.len())
    }

    /// Counts of (sessions, payments, orders) currently held.
    pub fn counts(&self) -> StoreResult<(usize, usize, usize)> {
        Ok((
            self.sessions.read().map_err(lock_error)?.len(),
            self.payments.read().map_err(lock_error)?.len(),
            self.orders.read().map_err(lock_error)?.len(),
        ))
    }
}

impl Default for MockVendorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error<T>(err: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Lock(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use casekit_lib::IdPrefix;
    use chrono::Utc;

    fn session(machine: &str, ttl: i64) -> VendingSession {
        VendingSession::new(SessionId::generate(machine, Utc::now()).unwrap(), ttl)
    }

    #[test]
    fn session_round_trip() {
        let store = MockVendorStore::new();
        let s = session("VM001", 60);
        let id = s.session_id.clone();

        store.insert_session(s).unwrap();
        let loaded = store.get_session(&id).unwrap().unwrap();
        assert_eq!(loaded.session_id, id);

        store
            .set_session_status(&id, SessionStatus::PaymentPending)
            .unwrap();
        let loaded = store.get_session(&id).unwrap().unwrap();
        assert_eq!(loaded.status, SessionStatus::PaymentPending);
    }

    #[test]
    fn duplicate_payment_token_is_reported() {
        let store = MockVendorStore::new();
        let s = session("VM001", 60);
        let sid = s.session_id.clone();
        store.insert_session(s).unwrap();

        let token = ThirdId::generate(IdPrefix::Payment);
        store
            .insert_payment(PaymentRecord::new(token.clone(), sid.clone()))
            .unwrap();

        let err = store
            .insert_payment(PaymentRecord::new(token.clone(), sid))
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));

        // The original record survives the collision.
        assert!(store.get_payment(&token).unwrap().is_some());
    }

    #[test]
    fn order_requires_known_payment() {
        let store = MockVendorStore::new();
        let order = OrderRecord::new(
            ThirdId::generate(IdPrefix::Order),
            ThirdId::generate(IdPrefix::Payment),
        );

        let err = store.insert_order(order).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn order_links_after_payment_exists() {
        let store = MockVendorStore::new();
        let s = session("VM001", 60);
        let sid = s.session_id.clone();
        store.insert_session(s).unwrap();

        let pay_token = ThirdId::generate(IdPrefix::Payment);
        store
            .insert_payment(PaymentRecord::new(pay_token.clone(), sid))
            .unwrap();
        store
            .set_payment_status(&pay_token, PaymentStatus::Paid)
            .unwrap();

        let order_token = ThirdId::generate(IdPrefix::Order);
        store
            .insert_order(OrderRecord::new(order_token.clone(), pay_token.clone()))
            .unwrap();

        let loaded = store.get_order(&order_token).unwrap().unwrap();
        assert_eq!(loaded.third_pay_id, pay_token);
    }

    #[test]
    fn ttl_sweep_removes_only_expired_sessions() {
        let store = MockVendorStore::new();
        let fresh = session("VM001", 3600);
        let stale = session("VM002", 10);
        let stale_deadline = stale.expires_at;

        store.insert_session(fresh.clone()).unwrap();
        store.insert_session(stale).unwrap();

        let removed = store.cleanup_expired_at(stale_deadline).unwrap();
        assert_eq!(removed, 1);

        let (sessions, _, _) = store.counts().unwrap();
        assert_eq!(sessions, 1);
        assert!(store.get_session(&fresh.session_id).unwrap().is_some());
    }

    #[test]
    fn missing_ids_are_not_found() {
        let store = MockVendorStore::new();
        let token = ThirdId::generate(IdPrefix::Payment);

        assert!(store.get_payment(&token).unwrap().is_none());
        let err = store
            .set_payment_status(&token, PaymentStatus::Paid)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
