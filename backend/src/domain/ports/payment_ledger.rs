//! Driven port for the persistent payment ledger.
//!
//! The delinquency engine only ever reads the ledger: one presence lookup per
//! candidate period plus one all-time latest-payment lookup. Production backs
//! this port with a PostgreSQL adapter; tests use the deterministic in-memory
//! fixture or a mock.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::billing::{BillingPeriod, MemberId, Payment};

/// Persistence errors raised by payment ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentLedgerError {
    /// Ledger connection could not be established.
    #[error("payment ledger connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query failed during execution.
    #[error("payment ledger query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl PaymentLedgerError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Read-only access to recorded payments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Find a completed payment covering the given period, if one exists.
    ///
    /// Pending and failed payments are not returned; they do not satisfy a
    /// billing period.
    async fn find_completed_payment(
        &self,
        member: &MemberId,
        period: BillingPeriod,
    ) -> Result<Option<Payment>, PaymentLedgerError>;

    /// The member's most recent completed payment across all time.
    async fn latest_completed_payment(
        &self,
        member: &MemberId,
    ) -> Result<Option<Payment>, PaymentLedgerError>;
}

/// In-memory ledger for tests and database-less development servers.
#[derive(Debug, Default)]
pub struct FixturePaymentLedger {
    payments: Mutex<Vec<Payment>>,
}

impl FixturePaymentLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a payment event.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned, which only happens after a
    /// panic on another test thread.
    pub fn record(&self, payment: Payment) {
        self.payments.lock().expect("ledger lock").push(payment);
    }
}

#[async_trait]
impl PaymentLedger for FixturePaymentLedger {
    async fn find_completed_payment(
        &self,
        member: &MemberId,
        period: BillingPeriod,
    ) -> Result<Option<Payment>, PaymentLedgerError> {
        let payments = self
            .payments
            .lock()
            .map_err(|_| PaymentLedgerError::query("fixture ledger lock poisoned"))?;
        Ok(payments
            .iter()
            .find(|payment| payment.member_id == *member && payment.satisfies(period))
            .cloned())
    }

    async fn latest_completed_payment(
        &self,
        member: &MemberId,
    ) -> Result<Option<Payment>, PaymentLedgerError> {
        let payments = self
            .payments
            .lock()
            .map_err(|_| PaymentLedgerError::query("fixture ledger lock poisoned"))?;
        Ok(payments
            .iter()
            .filter(|payment| {
                payment.member_id == *member
                    && payment.status == crate::domain::billing::PaymentStatus::Completed
            })
            .max_by_key(|payment| payment.paid_at)
            .cloned())
    }
}
