//! Delinquency evaluation service.
//!
//! This module implements the driving [`DelinquencyQuery`] port by combining
//! the trailing-period calculator, the grace-period gate, and the payment
//! ledger into per-member verdicts. The computation is read-only and
//! request-scoped: nothing is cached, and recomputing with unchanged inputs
//! yields an identical verdict.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::domain::Error;
use crate::domain::billing::{
    BillingPeriod, DelinquencyVerdict, GracePolicy, Member, MemberDelinquency, MemberId,
    ReminderStatus,
};
use crate::domain::ports::{
    DelinquencyQuery, MemberDirectory, MemberDirectoryError, PaymentLedger, PaymentLedgerError,
};

/// Number of candidate periods checked when no deployment override is
/// configured: the current month plus the two preceding.
pub const DEFAULT_LOOKBACK_MONTHS: usize = 3;

/// Deployment-level delinquency policy knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPolicy {
    /// How many trailing periods are candidates for delinquency checking.
    pub lookback_months: usize,
    /// Grace window applied to the current period only.
    pub grace: GracePolicy,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
            grace: GracePolicy::default(),
        }
    }
}

/// Delinquency service implementing the driving port.
#[derive(Clone)]
pub struct DelinquencyService<L, M> {
    ledger: Arc<L>,
    directory: Arc<M>,
    policy: BillingPolicy,
}

impl<L, M> DelinquencyService<L, M> {
    /// Create a service over the given ledger and directory adapters.
    pub fn new(ledger: Arc<L>, directory: Arc<M>, policy: BillingPolicy) -> Self {
        Self {
            ledger,
            directory,
            policy,
        }
    }
}

fn map_ledger_error(error: PaymentLedgerError) -> Error {
    match error {
        PaymentLedgerError::Connection { message } => {
            Error::service_unavailable(format!("payment ledger unavailable: {message}"))
        }
        PaymentLedgerError::Query { message } => {
            Error::internal(format!("payment ledger error: {message}"))
        }
    }
}

fn map_directory_error(error: MemberDirectoryError) -> Error {
    match error {
        MemberDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("member directory unavailable: {message}"))
        }
        MemberDirectoryError::Query { message } => {
            Error::internal(format!("member directory error: {message}"))
        }
    }
}

impl<L, M> DelinquencyService<L, M>
where
    L: PaymentLedger,
    M: MemberDirectory,
{
    /// Evaluate one member's verdict for the given reference date.
    ///
    /// Candidate periods run from the current month backwards. The current
    /// period is treated as satisfied while the grace gate covers `today`;
    /// this is a policy exception, not a lookup bypass, so the same missing
    /// payment becomes delinquent the day the grace window elapses. Periods
    /// preceding the member's account-creation month are excluded. Every
    /// other candidate without a completed payment is missed.
    pub async fn evaluate(
        &self,
        member: &Member,
        today: NaiveDate,
    ) -> Result<DelinquencyVerdict, Error> {
        let candidates = BillingPeriod::trailing(today, self.policy.lookback_months);
        let current = BillingPeriod::containing(today);
        let created = member.created_period();

        let mut missed = Vec::new();
        for period in candidates {
            if period < created {
                continue;
            }
            if period == current && self.policy.grace.covers(today) {
                continue;
            }
            let payment = self
                .ledger
                .find_completed_payment(&member.id, period)
                .await
                .map_err(map_ledger_error)?;
            if payment.is_none() {
                missed.push(period);
            }
        }

        let last_payment = self
            .ledger
            .latest_completed_payment(&member.id)
            .await
            .map_err(map_ledger_error)?;

        debug!(
            member = %member.id,
            missed = missed.len(),
            "delinquency evaluated"
        );

        Ok(DelinquencyVerdict::from_missed_periods(
            missed,
            member.pricing_tier,
            last_payment.map(|payment| payment.paid_at),
        ))
    }

    async fn require_member(&self, id: &MemberId) -> Result<Member, Error> {
        self.directory
            .find_by_id(id)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| Error::not_found("member not found"))
    }
}

#[async_trait]
impl<L, M> DelinquencyQuery for DelinquencyService<L, M>
where
    L: PaymentLedger,
    M: MemberDirectory,
{
    async fn reminder_status(
        &self,
        member: &MemberId,
        today: NaiveDate,
    ) -> Result<ReminderStatus, Error> {
        let record = self.require_member(member).await?;
        let verdict = self.evaluate(&record, today).await?;
        let current = BillingPeriod::containing(today);
        Ok(ReminderStatus {
            verdict,
            next_billing_date: current.next().first_day(),
            grace_period_ends: self.policy.grace.ends_on(current),
        })
    }

    async fn delinquency_report(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<MemberDelinquency>, Error> {
        let roster = self
            .directory
            .list_active()
            .await
            .map_err(map_directory_error)?;

        let mut report = Vec::new();
        for member in roster {
            let verdict = self.evaluate(&member, today).await?;
            if verdict.is_delinquent {
                report.push(MemberDelinquency { member, verdict });
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod service_tests;
