//! Billing period value type and the trailing-period calculator.
//!
//! A [`BillingPeriod`] identifies exactly one calendar month. It is the unit
//! of billing-cycle granularity: payments are recorded against a period, and
//! delinquency is evaluated per period. The lexical `YYYY-MM` key only exists
//! at serialisation boundaries; inside the domain the year and month are
//! separate fields so no string parsing can fail mid-computation.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Validation errors for [`BillingPeriod`] construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodKeyError {
    /// The key is not of the form `YYYY-MM`.
    #[error("period key must be formatted as YYYY-MM")]
    Malformed,
    /// The month component is outside `01..=12`.
    #[error("period month must be between 01 and 12")]
    MonthOutOfRange,
    /// The year component is outside the four-digit range.
    #[error("period year must be a four-digit year")]
    YearOutOfRange,
}

/// A single calendar month used as the billing-cycle unit.
///
/// Ordering is calendar ordering: `2024-12 < 2025-01`. The serialised form is
/// the fixed lexical key `YYYY-MM`, which round-trips exactly.
///
/// # Examples
/// ```
/// use backend::domain::billing::BillingPeriod;
///
/// let period: BillingPeriod = "2025-01".parse().expect("valid key");
/// assert_eq!(period.to_string(), "2025-01");
/// assert_eq!(period.display_name(), "January 2025");
/// assert_eq!(period.previous().to_string(), "2024-12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BillingPeriod {
    year: i32,
    month: u32,
}

impl BillingPeriod {
    /// Construct a period from explicit year and month components.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodKeyError::MonthOutOfRange`] when `month` is not in
    /// `1..=12`, or [`PeriodKeyError::YearOutOfRange`] when `year` does not
    /// fit the four-digit `YYYY` key format.
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodKeyError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodKeyError::MonthOutOfRange);
        }
        if !(1000..=9999).contains(&year) {
            return Err(PeriodKeyError::YearOutOfRange);
        }
        Ok(Self { year, month })
    }

    /// The period containing the given calendar date.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        // chrono guarantees month in 1..=12 for any valid date.
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The ordered list of the last `lookback` periods, most recent first.
    ///
    /// The first entry is the period containing `reference`; each subsequent
    /// entry is exactly one calendar month earlier, rolling the year over at
    /// January. These are the candidate periods for delinquency checking.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::billing::BillingPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let reference = NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date");
    /// let keys: Vec<String> = BillingPeriod::trailing(reference, 3)
    ///     .iter()
    ///     .map(ToString::to_string)
    ///     .collect();
    /// assert_eq!(keys, ["2025-01", "2024-12", "2024-11"]);
    /// ```
    #[must_use]
    pub fn trailing(reference: NaiveDate, lookback: usize) -> Vec<Self> {
        let mut periods = Vec::with_capacity(lookback);
        let mut current = Self::containing(reference);
        for _ in 0..lookback {
            periods.push(current);
            current = current.previous();
        }
        periods
    }

    /// The period one calendar month earlier.
    #[must_use]
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The period one calendar month later.
    #[must_use]
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Four-digit year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month component in `1..=12`.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the period.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        // Day 1 of a validated (year, month) pair always exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last calendar day of the period.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day().pred_opt().unwrap_or(NaiveDate::MIN)
    }

    /// Human-readable month name with year, e.g. `"January 2025"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = match self.month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            _ => "December",
        };
        format!("{name} {}", self.year)
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for BillingPeriod {
    type Err = PeriodKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year_part, month_part) = s.split_once('-').ok_or(PeriodKeyError::Malformed)?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(PeriodKeyError::Malformed);
        }
        let year: i32 = year_part.parse().map_err(|_| PeriodKeyError::Malformed)?;
        let month: u32 = month_part.parse().map_err(|_| PeriodKeyError::Malformed)?;
        Self::new(year, month)
    }
}

impl From<BillingPeriod> for String {
    fn from(value: BillingPeriod) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for BillingPeriod {
    type Error = PeriodKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
