//! Domain ports and supporting types for the hexagonal boundary.

mod delinquency_query;
mod member_directory;
mod payment_ledger;

pub use delinquency_query::DelinquencyQuery;
#[cfg(test)]
pub use delinquency_query::MockDelinquencyQuery;
pub use member_directory::{FixtureMemberDirectory, MemberDirectory, MemberDirectoryError};
#[cfg(test)]
pub use member_directory::MockMemberDirectory;
pub use payment_ledger::{FixturePaymentLedger, PaymentLedger, PaymentLedgerError};
#[cfg(test)]
pub use payment_ledger::MockPaymentLedger;
