//! Billing domain: periods, grace policy, members, payments, and the
//! delinquency evaluation service.

mod grace;
mod member;
mod payment;
mod period;
mod service;
mod verdict;

pub use grace::{DEFAULT_GRACE_DAYS, GracePolicy};
pub use member::{Member, MemberId, MemberIdError, MemberRole, MembershipStatus};
pub use payment::{Payment, PaymentStatus};
pub use period::{BillingPeriod, PeriodKeyError};
pub use service::{BillingPolicy, DEFAULT_LOOKBACK_MONTHS, DelinquencyService};
pub use verdict::{DelinquencyVerdict, MemberDelinquency, ReminderStatus};
