//! Internal Diesel row structs and their domain conversions.
//!
//! Row types are implementation details of this module and never cross into
//! the domain. Conversions validate on the way out: a row holding an
//! impossible billing period is reported as a query error instead of
//! producing a nonsense verdict.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::billing::{
    BillingPeriod, Member, MemberId, MemberRole, MembershipStatus, Payment, PaymentStatus,
};

use super::schema::{members, payments};

/// Row struct for reading from the members table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MemberRow {
    pub id: Uuid,
    pub display_name: String,
    pub status: String,
    pub role: String,
    pub pricing_tier: Decimal,
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "audit column read by roster tooling, not here")]
    pub updated_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            id: MemberId::from_uuid(row.id),
            display_name: row.display_name,
            status: MembershipStatus::from_storage(&row.status),
            role: MemberRole::from_storage(&row.role),
            pricing_tier: row.pricing_tier,
            created_at: row.created_at,
        }
    }
}

/// Row struct for reading from the payments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PaymentRow {
    pub id: Uuid,
    pub member_id: Uuid,
    pub amount: Decimal,
    pub status: String,
    pub period_year: i32,
    pub period_month: i32,
    pub paid_at: DateTime<Utc>,
}

/// Errors converting a payment row into the domain type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("payment {id} covers invalid period {year}-{month}")]
pub(crate) struct InvalidPaymentRow {
    pub id: Uuid,
    pub year: i32,
    pub month: i32,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = InvalidPaymentRow;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let invalid = InvalidPaymentRow {
            id: row.id,
            year: row.period_year,
            month: row.period_month,
        };
        let month = u32::try_from(row.period_month).map_err(|_| invalid.clone())?;
        let period = BillingPeriod::new(row.period_year, month).map_err(|_| invalid)?;

        Ok(Self {
            id: row.id,
            member_id: MemberId::from_uuid(row.member_id),
            amount: row.amount,
            status: PaymentStatus::from_storage(&row.status),
            period,
            paid_at: row.paid_at,
        })
    }
}
