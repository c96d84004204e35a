//! PostgreSQL-backed `MemberDirectory` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::billing::{Member, MemberId, MembershipStatus};
use crate::domain::ports::{MemberDirectory, MemberDirectoryError};

use super::diesel_error_mapping;
use super::models::MemberRow;
use super::pool::{DbPool, PoolError};
use super::schema::members;

/// Diesel-backed implementation of the member directory port.
#[derive(Clone)]
pub struct DieselMemberDirectory {
    pool: DbPool,
}

impl DieselMemberDirectory {
    /// Create a new directory with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MemberDirectoryError {
    diesel_error_mapping::map_pool_error(error, MemberDirectoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MemberDirectoryError {
    diesel_error_mapping::map_diesel_error(
        error,
        MemberDirectoryError::query,
        MemberDirectoryError::connection,
    )
}

#[async_trait]
impl MemberDirectory for DieselMemberDirectory {
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, MemberDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = members::table
            .filter(members::id.eq(id.as_uuid()))
            .select(MemberRow::as_select())
            .first::<MemberRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Member::from))
    }

    async fn list_active(&self) -> Result<Vec<Member>, MemberDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Roster order: the sequence members joined in.
        let rows: Vec<MemberRow> = members::table
            .filter(members::status.eq(MembershipStatus::Active.as_str()))
            .order((members::created_at.asc(), members::id.asc()))
            .select(MemberRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Member::from).collect())
    }
}
