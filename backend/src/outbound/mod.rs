//! Outbound adapters implementing domain ports against infrastructure.
//!
//! Adapters translate between domain types and infrastructure
//! representations; none of them carry billing policy.

pub mod persistence;
