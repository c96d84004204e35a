//! PostgreSQL-backed `PaymentLedger` implementation using Diesel ORM.
//!
//! Both lookups filter on `status = 'completed'` in SQL, so pending and
//! failed payment rows never reach the evaluation logic.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::billing::{BillingPeriod, MemberId, Payment, PaymentStatus};
use crate::domain::ports::{PaymentLedger, PaymentLedgerError};

use super::diesel_error_mapping;
use super::models::PaymentRow;
use super::pool::{DbPool, PoolError};
use super::schema::payments;

/// Diesel-backed implementation of the payment ledger port.
#[derive(Clone)]
pub struct DieselPaymentLedger {
    pool: DbPool,
}

impl DieselPaymentLedger {
    /// Create a new ledger with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PaymentLedgerError {
    diesel_error_mapping::map_pool_error(error, PaymentLedgerError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PaymentLedgerError {
    diesel_error_mapping::map_diesel_error(
        error,
        PaymentLedgerError::query,
        PaymentLedgerError::connection,
    )
}

fn row_to_payment(row: PaymentRow) -> Result<Payment, PaymentLedgerError> {
    Payment::try_from(row).map_err(|err| PaymentLedgerError::query(err.to_string()))
}

#[async_trait]
impl PaymentLedger for DieselPaymentLedger {
    async fn find_completed_payment(
        &self,
        member: &MemberId,
        period: BillingPeriod,
    ) -> Result<Option<Payment>, PaymentLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let month = i32::try_from(period.month())
            .map_err(|_| PaymentLedgerError::query("billing period month out of range"))?;
        let row = payments::table
            .filter(
                payments::member_id
                    .eq(member.as_uuid())
                    .and(payments::status.eq(PaymentStatus::Completed.as_str()))
                    .and(payments::period_year.eq(period.year()))
                    .and(payments::period_month.eq(month)),
            )
            .select(PaymentRow::as_select())
            .first::<PaymentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_payment).transpose()
    }

    async fn latest_completed_payment(
        &self,
        member: &MemberId,
    ) -> Result<Option<Payment>, PaymentLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = payments::table
            .filter(
                payments::member_id
                    .eq(member.as_uuid())
                    .and(payments::status.eq(PaymentStatus::Completed.as_str())),
            )
            .order((payments::paid_at.desc(), payments::id.desc()))
            .select(PaymentRow::as_select())
            .first::<PaymentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_payment).transpose()
    }
}
