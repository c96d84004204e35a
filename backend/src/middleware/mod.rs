//! Actix middleware shared by all inbound HTTP routes.

pub mod trace;

pub use trace::Trace;
