//! Driving port for delinquency queries.
//!
//! Inbound adapters (HTTP handlers) use this port so they never see the
//! payment ledger or the member directory directly. The reference date is an
//! explicit parameter: verdicts are pure functions of it, which keeps the
//! policy deterministic and the handlers trivially testable.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::Error;
use crate::domain::billing::{MemberDelinquency, MemberId, ReminderStatus};

/// Domain use-case port for delinquency evaluation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DelinquencyQuery: Send + Sync {
    /// Self-service reminder status for one member.
    ///
    /// Unknown member ids are a not-found error, never an empty verdict.
    async fn reminder_status(
        &self,
        member: &MemberId,
        today: NaiveDate,
    ) -> Result<ReminderStatus, Error>;

    /// Delinquency report covering every active member, in roster order.
    ///
    /// Only members with at least one missed period appear in the result.
    /// A ledger or directory failure aborts the whole report; partial
    /// results would undercount delinquency.
    async fn delinquency_report(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<MemberDelinquency>, Error>;
}
