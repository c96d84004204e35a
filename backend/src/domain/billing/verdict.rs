//! Computed delinquency outcomes.
//!
//! Verdicts are pure functions of the reference date, the member record, and
//! the payment ledger. They are recomputed on every query and never persisted
//! or cached.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::member::Member;
use super::period::BillingPeriod;

/// Per-member delinquency verdict for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelinquencyVerdict {
    /// True when at least one candidate period lacks a completed payment.
    pub is_delinquent: bool,
    /// Unpaid periods within the lookback window, most recent first.
    pub missed_periods: Vec<BillingPeriod>,
    /// Flat per-period dues multiplied by the number of missed periods.
    pub amount_owed: Decimal,
    /// Timestamp of the most recent completed payment across all time.
    pub last_payment_at: Option<DateTime<Utc>>,
}

impl DelinquencyVerdict {
    /// Assemble a verdict from the missed periods and the member's tier.
    ///
    /// `amount_owed` is derived here so the two fields can never drift apart.
    #[must_use]
    pub fn from_missed_periods(
        missed_periods: Vec<BillingPeriod>,
        pricing_tier: Decimal,
        last_payment_at: Option<DateTime<Utc>>,
    ) -> Self {
        let owed_periods = Decimal::from(missed_periods.len());
        Self {
            is_delinquent: !missed_periods.is_empty(),
            amount_owed: owed_periods * pricing_tier,
            missed_periods,
            last_payment_at,
        }
    }
}

/// Self-service reminder status for the authenticated member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderStatus {
    /// The underlying verdict.
    pub verdict: DelinquencyVerdict,
    /// First day of the next billing period after the current one.
    pub next_billing_date: NaiveDate,
    /// Last in-grace day of the current period, when grace is configured.
    pub grace_period_ends: Option<NaiveDate>,
}

/// One row of the admin delinquency report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDelinquency {
    /// The evaluated member.
    pub member: Member,
    /// The member's verdict for this evaluation.
    pub verdict: DelinquencyVerdict,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "20.00", "0.00", false)]
    #[case(1, "20.00", "20.00", true)]
    #[case(2, "25.00", "50.00", true)]
    #[case(3, "19.99", "59.97", true)]
    fn amount_owed_is_missed_count_times_tier(
        #[case] missed: usize,
        #[case] tier: &str,
        #[case] expected: &str,
        #[case] delinquent: bool,
    ) {
        let mut periods = Vec::new();
        let mut current: BillingPeriod = "2025-03".parse().expect("valid key");
        for _ in 0..missed {
            periods.push(current);
            current = current.previous();
        }

        let verdict = DelinquencyVerdict::from_missed_periods(
            periods,
            tier.parse().expect("valid decimal"),
            None,
        );

        assert_eq!(verdict.is_delinquent, delinquent);
        assert_eq!(verdict.amount_owed, expected.parse().expect("valid decimal"));
    }
}
