//! Grace-period gate for the current billing month.
//!
//! A missing payment for the month in progress is not flagged delinquent
//! while the reference date is still inside the grace window at the start of
//! that month. The gate applies only to the current period; past months are
//! never grace-exempt.

use chrono::{Datelike, NaiveDate};

use super::period::BillingPeriod;

/// Number of grace days applied when no deployment override is configured.
pub const DEFAULT_GRACE_DAYS: u32 = 5;

/// Configured grace window at the start of each month.
///
/// # Examples
/// ```
/// use backend::domain::billing::GracePolicy;
/// use chrono::NaiveDate;
///
/// let policy = GracePolicy::default();
/// let day_three = NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date");
/// let day_six = NaiveDate::from_ymd_opt(2025, 3, 6).expect("valid date");
/// assert!(policy.covers(day_three));
/// assert!(!policy.covers(day_six));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GracePolicy {
    days: u32,
}

impl Default for GracePolicy {
    fn default() -> Self {
        Self {
            days: DEFAULT_GRACE_DAYS,
        }
    }
}

impl GracePolicy {
    /// Create a policy with an explicit grace length in days.
    ///
    /// A length of zero disables the grace window entirely.
    #[must_use]
    pub fn new(days: u32) -> Self {
        Self { days }
    }

    /// Configured grace length in days.
    #[must_use]
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Whether the given date falls inside the grace window of its month.
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        date.day() <= self.days
    }

    /// The last in-grace calendar day of the given period, if the policy
    /// grants any grace at all.
    ///
    /// The day is clamped to the month length so a long grace window on a
    /// short month still yields a real date.
    #[must_use]
    pub fn ends_on(&self, period: BillingPeriod) -> Option<NaiveDate> {
        if self.days == 0 {
            return None;
        }
        let last = period.last_day();
        NaiveDate::from_ymd_opt(period.year(), period.month(), self.days).or(Some(last))
    }
}
