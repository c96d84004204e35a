//! Payment events recorded against billing periods.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::member::MemberId;
use super::period::BillingPeriod;

/// Processing state of a recorded payment.
///
/// Only [`PaymentStatus::Completed`] payments satisfy a billing period;
/// pending and failed payments are treated as absent by the delinquency
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Funds settled; the covered period is satisfied.
    Completed,
    /// Submitted but not yet settled.
    Pending,
    /// Processing failed; the covered period remains owed.
    Failed,
}

impl PaymentStatus {
    /// Stable storage representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }

    /// Parse the storage representation; unknown values are conservative
    /// failures so they never satisfy a period by accident.
    #[must_use]
    pub fn from_storage(raw: &str) -> Self {
        match raw {
            "completed" => Self::Completed,
            "pending" => Self::Pending,
            _ => Self::Failed,
        }
    }
}

/// A single payment event, immutable once completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique payment identifier.
    pub id: Uuid,
    /// Member the payment belongs to.
    pub member_id: MemberId,
    /// Settled amount.
    pub amount: Decimal,
    /// Processing state.
    pub status: PaymentStatus,
    /// The calendar month this payment covers.
    pub period: BillingPeriod,
    /// When the payment was recorded.
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    /// Whether this payment satisfies the given billing period.
    #[must_use]
    pub fn satisfies(&self, period: BillingPeriod) -> bool {
        self.status == PaymentStatus::Completed && self.period == period
    }
}
