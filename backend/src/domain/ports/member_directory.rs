//! Driven port for member records.
//!
//! The delinquency engine needs two reads: a single member by id (for the
//! self-service reminder) and the active roster (for the admin report).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::billing::{Member, MemberId, MembershipStatus};

/// Persistence errors raised by member directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemberDirectoryError {
    /// Directory connection could not be established.
    #[error("member directory connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query failed during execution.
    #[error("member directory query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl MemberDirectoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Read-only access to member records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Fetch a member by identifier.
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, MemberDirectoryError>;

    /// All members with an active subscription, in insertion order.
    async fn list_active(&self) -> Result<Vec<Member>, MemberDirectoryError>;
}

/// In-memory directory for tests and database-less development servers.
#[derive(Debug, Default)]
pub struct FixtureMemberDirectory {
    members: Mutex<Vec<Member>>,
}

impl FixtureMemberDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member record.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned, which only happens after a
    /// panic on another test thread.
    pub fn register(&self, member: Member) {
        self.members.lock().expect("directory lock").push(member);
    }
}

#[async_trait]
impl MemberDirectory for FixtureMemberDirectory {
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, MemberDirectoryError> {
        let members = self
            .members
            .lock()
            .map_err(|_| MemberDirectoryError::query("fixture directory lock poisoned"))?;
        Ok(members.iter().find(|member| member.id == *id).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Member>, MemberDirectoryError> {
        let members = self
            .members
            .lock()
            .map_err(|_| MemberDirectoryError::query("fixture directory lock poisoned"))?;
        Ok(members
            .iter()
            .filter(|member| member.status == MembershipStatus::Active)
            .cloned()
            .collect())
    }
}
