//! Member identity and billing attributes.
//!
//! Members are owned by the identity and billing substrate; the delinquency
//! engine reads them but never mutates them.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::BillingPeriod;

/// Validation errors for [`MemberId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemberIdError {
    /// The identifier string was empty.
    #[error("member id must not be empty")]
    Empty,
    /// The identifier string was not a valid UUID.
    #[error("member id must be a valid UUID")]
    Invalid,
}

/// Unique member identifier (UUID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberId(Uuid);

impl MemberId {
    /// Validate and construct a [`MemberId`] from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`MemberIdError::Empty`] for an empty input and
    /// [`MemberIdError::Invalid`] when the input is not a valid UUID.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, MemberIdError> {
        let raw = raw.as_ref();
        if raw.is_empty() {
            return Err(MemberIdError::Empty);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| MemberIdError::Invalid)
    }

    /// Construct from an already-validated UUID (e.g. a database column).
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a random identifier. Primarily useful for tests.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MemberId> for String {
    fn from(value: MemberId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for MemberId {
    type Error = MemberIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Subscription lifecycle state maintained by the billing substrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Member in good standing; included in delinquency reports.
    Active,
    /// Member flagged with outstanding dues.
    Overdue,
    /// Lapsed or cancelled membership.
    Inactive,
}

impl MembershipStatus {
    /// Stable storage representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Overdue => "overdue",
            Self::Inactive => "inactive",
        }
    }

    /// Parse the storage representation, defaulting unknown values to
    /// [`MembershipStatus::Inactive`] so stale rows never widen report scope.
    #[must_use]
    pub fn from_storage(raw: &str) -> Self {
        match raw {
            "active" => Self::Active,
            "overdue" => Self::Overdue,
            _ => Self::Inactive,
        }
    }
}

/// Authorisation role within the membership portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Regular member: may view their own reminder status.
    Member,
    /// Administrator: may additionally run the delinquency report.
    Admin,
}

impl MemberRole {
    /// Stable storage representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }

    /// Parse the storage representation; unknown values are regular members.
    #[must_use]
    pub fn from_storage(raw: &str) -> Self {
        match raw {
            "admin" => Self::Admin,
            _ => Self::Member,
        }
    }
}

/// A member record as read from the identity and billing substrate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique identifier.
    pub id: MemberId,
    /// Human-readable display name.
    pub display_name: String,
    /// Subscription lifecycle state.
    pub status: MembershipStatus,
    /// Authorisation role.
    pub role: MemberRole,
    /// Flat monthly dues amount for this member's tier.
    pub pricing_tier: Decimal,
    /// Account creation timestamp; periods before this month are never owed.
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// The billing period containing the member's account-creation date.
    #[must_use]
    pub fn created_period(&self) -> BillingPeriod {
        BillingPeriod::containing(self.created_at.date_naive())
    }
}
