//! Domain primitives, billing policy, and ports.
//!
//! Purpose: define strongly typed domain entities and the delinquency policy
//! engine used by the inbound and outbound adapters. Types are immutable;
//! invariants and serde contracts are documented on each type.

pub mod billing;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
