//! Construction helpers for shared application state.

use std::sync::Arc;

use actix_web::web;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::domain::billing::{DelinquencyService, Member, MemberId, MemberRole, MembershipStatus};
use crate::domain::ports::{FixtureMemberDirectory, FixturePaymentLedger};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{DieselMemberDirectory, DieselPaymentLedger};

use super::config::ServerConfig;

/// Build the HTTP handler state from server configuration.
///
/// With a database pool the Diesel adapters back both ports. Without one the
/// server runs on in-memory fixtures seeded with a demo roster so the API is
/// exercisable out of the box.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    match &config.db_pool {
        Some(pool) => {
            let ledger = Arc::new(DieselPaymentLedger::new(pool.clone()));
            let directory = Arc::new(DieselMemberDirectory::new(pool.clone()));
            let service = DelinquencyService::new(ledger, directory.clone(), config.policy);
            web::Data::new(HttpState::new(Arc::new(service), directory))
        }
        None => {
            let ledger = Arc::new(FixturePaymentLedger::new());
            let directory = Arc::new(seeded_fixture_directory());
            let service = DelinquencyService::new(ledger, directory.clone(), config.policy);
            web::Data::new(HttpState::new(Arc::new(service), directory))
        }
    }
}

fn demo_member(name: &str, role: MemberRole) -> Member {
    Member {
        id: MemberId::random(),
        display_name: name.to_owned(),
        status: MembershipStatus::Active,
        role,
        pricing_tier: Decimal::new(2000, 2),
        created_at: Utc::now(),
    }
}

/// Seed a fixture directory with one admin and one regular member, logging
/// their ids so a developer can log in against the running server.
fn seeded_fixture_directory() -> FixtureMemberDirectory {
    let directory = FixtureMemberDirectory::new();
    let admin = demo_member("Demo Admin", MemberRole::Admin);
    let member = demo_member("Demo Member", MemberRole::Member);
    info!(admin = %admin.id, member = %member.id, "seeded demo roster (no database configured)");
    directory.register(admin);
    directory.register(member);
    directory
}
