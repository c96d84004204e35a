//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DelinquencyQuery, MemberDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Delinquency evaluation use-case.
    pub delinquency: Arc<dyn DelinquencyQuery>,
    /// Member lookup, used by login and the admin gate.
    pub members: Arc<dyn MemberDirectory>,
}

impl HttpState {
    /// Construct state from its port implementations.
    #[must_use]
    pub fn new(delinquency: Arc<dyn DelinquencyQuery>, members: Arc<dyn MemberDirectory>) -> Self {
        Self {
            delinquency,
            members,
        }
    }
}
