//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's driven ports backed by
//! PostgreSQL through `diesel-async` with `bb8` pooling. Adapters are thin
//! translators: row structs and schema definitions stay internal, database
//! errors are mapped onto the port error types, and no billing policy lives
//! here.

mod diesel_error_mapping;
mod diesel_member_directory;
mod diesel_payment_ledger;
mod models;
mod pool;
mod schema;

pub use diesel_member_directory::DieselMemberDirectory;
pub use diesel_payment_ledger::DieselPaymentLedger;
pub use pool::{DbPool, PoolConfig, PoolError};
