//! Billing delinquency endpoints.
//!
//! Two read-only views over the same evaluation use-case:
//!
//! - `GET /api/v1/billing/reminders/me` lets an authenticated member see
//!   their own payment standing, including the next billing date and when
//!   the current grace window closes.
//! - `GET /api/v1/admin/billing/delinquent` gives administrators a report of
//!   every active member currently behind on payments.
//!
//! Both endpoints evaluate on demand; nothing here is cached, so a payment
//! recorded a moment ago is reflected in the very next request.

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::Error;
use crate::domain::billing::{DelinquencyVerdict, MemberDelinquency, MemberRole, ReminderStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::members::require_member;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Self-service reminder payload for `GET /api/v1/billing/reminders/me`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    /// Whether the member currently owes for one or more billing periods.
    pub is_delinquent: bool,
    /// Unpaid periods as `YYYY-MM` keys, most recent first.
    #[schema(example = json!(["2025-03", "2025-01"]))]
    pub missed_months: Vec<String>,
    /// Total owed across the missed periods, in the member's tier currency.
    #[schema(value_type = String, example = "40.00")]
    pub amount_owed: Decimal,
    /// First day of the next billing period.
    pub next_billing_date: chrono::NaiveDate,
    /// Last day of the current grace window, absent when no grace applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_period_ends: Option<chrono::NaiveDate>,
}

impl From<ReminderStatus> for ReminderResponse {
    fn from(status: ReminderStatus) -> Self {
        Self {
            is_delinquent: status.verdict.is_delinquent,
            missed_months: period_keys(&status.verdict),
            amount_owed: status.verdict.amount_owed,
            next_billing_date: status.next_billing_date,
            grace_period_ends: status.grace_period_ends,
        }
    }
}

/// Member details embedded in the admin delinquency report.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    /// Member identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: String,
    /// Display name shown in the admin dashboard.
    pub display_name: String,
    /// Monthly price for the member's tier.
    #[schema(value_type = String, example = "20.00")]
    pub pricing_tier: Decimal,
}

/// One row of the admin delinquency report.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DelinquentMemberResponse {
    /// The member behind on payments.
    pub member: MemberSummary,
    /// Unpaid periods as `YYYY-MM` keys, most recent first.
    pub missed_months: Vec<String>,
    /// Total owed across the missed periods.
    #[schema(value_type = String, example = "60.00")]
    pub amount_owed: Decimal,
    /// Timestamp of the most recent completed payment, if any.
    pub last_payment_date: Option<DateTime<Utc>>,
}

impl From<MemberDelinquency> for DelinquentMemberResponse {
    fn from(row: MemberDelinquency) -> Self {
        Self {
            missed_months: period_keys(&row.verdict),
            amount_owed: row.verdict.amount_owed,
            last_payment_date: row.verdict.last_payment_at,
            member: MemberSummary {
                id: row.member.id.to_string(),
                display_name: row.member.display_name,
                pricing_tier: row.member.pricing_tier,
            },
        }
    }
}

fn period_keys(verdict: &DelinquencyVerdict) -> Vec<String> {
    verdict
        .missed_periods
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Return the authenticated member's payment reminder status.
#[utoipa::path(
    get,
    path = "/api/v1/billing/reminders/me",
    responses(
        (status = 200, description = "Current payment standing", body = ReminderResponse),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Member no longer exists", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Payment records unavailable", body = Error)
    ),
    tags = ["billing"],
    operation_id = "reminder_status"
)]
#[get("/billing/reminders/me")]
pub async fn reminder_status(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ReminderResponse>> {
    let member_id = session.require_member_id()?;
    let today = Utc::now().date_naive();
    let status = state.delinquency.reminder_status(&member_id, today).await?;
    Ok(web::Json(status.into()))
}

/// Return the delinquency report for all active members. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/admin/billing/delinquent",
    responses(
        (status = 200, description = "Members currently behind on payments", body = [DelinquentMemberResponse]),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Caller is not an administrator", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Payment records unavailable", body = Error)
    ),
    tags = ["billing"],
    operation_id = "delinquency_report"
)]
#[get("/admin/billing/delinquent")]
pub async fn delinquency_report(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<DelinquentMemberResponse>>> {
    let member_id = session.require_member_id()?;
    let caller = require_member(&state, &member_id).await?;
    if caller.role != MemberRole::Admin {
        return Err(Error::forbidden("administrator role required"));
    }

    let today = Utc::now().date_naive();
    let rows = state.delinquency.delinquency_report(today).await?;
    Ok(web::Json(
        rows.into_iter().map(DelinquentMemberResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use uuid::Uuid;

    use crate::domain::billing::{BillingPeriod, Member, MemberId, MembershipStatus};

    fn period(year: i32, month: u32) -> BillingPeriod {
        BillingPeriod::new(year, month).expect("valid period")
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn fixture_member(name: &str, role: MemberRole) -> Member {
        Member {
            id: MemberId::from_uuid(Uuid::new_v4()),
            display_name: name.to_owned(),
            status: MembershipStatus::Active,
            role,
            pricing_tier: Decimal::new(2000, 2),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().expect("timestamp"),
        }
    }

    #[test]
    fn reminder_response_flattens_verdict_and_dates() {
        let verdict = DelinquencyVerdict::from_missed_periods(
            vec![period(2025, 3), period(2025, 1)],
            Decimal::new(2000, 2),
            None,
        );
        let status = ReminderStatus {
            verdict,
            next_billing_date: date(2025, 4, 1),
            grace_period_ends: Some(date(2025, 3, 5)),
        };

        let response = ReminderResponse::from(status);
        assert!(response.is_delinquent);
        assert_eq!(response.missed_months, vec!["2025-03", "2025-01"]);
        assert_eq!(response.amount_owed, Decimal::new(4000, 2));
        assert_eq!(response.next_billing_date, date(2025, 4, 1));
        assert_eq!(response.grace_period_ends, Some(date(2025, 3, 5)));
    }

    #[test]
    fn reminder_response_serialises_camel_case() {
        let status = ReminderStatus {
            verdict: DelinquencyVerdict::from_missed_periods(vec![], Decimal::new(2000, 2), None),
            next_billing_date: date(2025, 4, 1),
            grace_period_ends: None,
        };
        let json = serde_json::to_value(ReminderResponse::from(status)).expect("serialise");

        assert_eq!(json["isDelinquent"], serde_json::json!(false));
        assert_eq!(json["missedMonths"], serde_json::json!([]));
        assert_eq!(json["nextBillingDate"], serde_json::json!("2025-04-01"));
        assert!(json.get("gracePeriodEnds").is_none());
    }

    #[test]
    fn report_row_carries_member_summary_and_last_payment() {
        let member = fixture_member("Ada Lovelace", MemberRole::Member);
        let paid_at = Utc.with_ymd_and_hms(2025, 2, 3, 9, 30, 0).single().expect("timestamp");
        let row = MemberDelinquency {
            member: member.clone(),
            verdict: DelinquencyVerdict::from_missed_periods(
                vec![period(2025, 3)],
                Decimal::new(2000, 2),
                Some(paid_at),
            ),
        };

        let response = DelinquentMemberResponse::from(row);
        assert_eq!(response.member.id, member.id.to_string());
        assert_eq!(response.member.display_name, "Ada Lovelace");
        assert_eq!(response.amount_owed, Decimal::new(2000, 2));
        assert_eq!(response.missed_months, vec!["2025-03"]);
        assert_eq!(response.last_payment_date, Some(paid_at));
    }
}
