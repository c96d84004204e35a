//! Behaviour coverage for the delinquency service.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rstest::rstest;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{BillingPolicy, DelinquencyService};
use crate::domain::ErrorCode;
use crate::domain::billing::{
    GracePolicy, Member, MemberId, MemberRole, MembershipStatus, Payment, PaymentStatus,
};
use crate::domain::ports::{
    DelinquencyQuery, FixtureMemberDirectory, FixturePaymentLedger, MockMemberDirectory,
    MockPaymentLedger, MemberDirectoryError, PaymentLedgerError,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("valid timestamp")
}

fn decimal(raw: &str) -> Decimal {
    raw.parse().expect("valid decimal")
}

fn member(created_at: &str, tier: &str) -> Member {
    Member {
        id: MemberId::random(),
        display_name: "Ada Lovelace".to_owned(),
        status: MembershipStatus::Active,
        role: MemberRole::Member,
        pricing_tier: decimal(tier),
        created_at: timestamp(created_at),
    }
}

fn completed_payment(member_id: MemberId, period: &str, paid_at: &str) -> Payment {
    Payment {
        id: Uuid::new_v4(),
        member_id,
        amount: decimal("20.00"),
        status: PaymentStatus::Completed,
        period: period.parse().expect("valid key"),
        paid_at: timestamp(paid_at),
    }
}

fn fixture_service(
    ledger: FixturePaymentLedger,
    directory: FixtureMemberDirectory,
    policy: BillingPolicy,
) -> DelinquencyService<FixturePaymentLedger, FixtureMemberDirectory> {
    DelinquencyService::new(Arc::new(ledger), Arc::new(directory), policy)
}

fn missed_keys(verdict: &crate::domain::billing::DelinquencyVerdict) -> Vec<String> {
    verdict
        .missed_periods
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[tokio::test]
async fn single_paid_period_leaves_the_gaps_delinquent() {
    // Reference date 2025-03-10, member since June 2024, only February paid:
    // March (outside grace) and January are owed, February is satisfied.
    let subject = member("2024-06-01T00:00:00Z", "20.00");
    let ledger = FixturePaymentLedger::new();
    ledger.record(completed_payment(
        subject.id,
        "2025-02",
        "2025-02-03T10:00:00Z",
    ));
    let service = fixture_service(ledger, FixtureMemberDirectory::new(), BillingPolicy::default());

    let verdict = service
        .evaluate(&subject, date(2025, 3, 10))
        .await
        .expect("evaluation succeeds");

    assert!(verdict.is_delinquent);
    assert_eq!(missed_keys(&verdict), ["2025-03", "2025-01"]);
    assert_eq!(verdict.amount_owed, decimal("40.00"));
    assert_eq!(
        verdict.last_payment_at,
        Some(timestamp("2025-02-03T10:00:00Z"))
    );
}

#[tokio::test]
async fn grace_window_suppresses_only_the_current_month() {
    // Day 2 of March with a 5-day grace window and zero payments: March is
    // suppressed, February and January are owed regardless of the gate.
    let subject = member("2024-06-01T00:00:00Z", "20.00");
    let service = fixture_service(
        FixturePaymentLedger::new(),
        FixtureMemberDirectory::new(),
        BillingPolicy::default(),
    );

    let verdict = service
        .evaluate(&subject, date(2025, 3, 2))
        .await
        .expect("evaluation succeeds");

    assert_eq!(missed_keys(&verdict), ["2025-02", "2025-01"]);
    assert_eq!(verdict.amount_owed, decimal("40.00"));
}

#[rstest]
#[case(3, false)]
#[case(5, false)]
#[case(6, true)]
#[tokio::test]
async fn current_month_becomes_owed_once_grace_elapses(
    #[case] day: u32,
    #[case] march_owed: bool,
) {
    let subject = member("2024-06-01T00:00:00Z", "20.00");
    let service = fixture_service(
        FixturePaymentLedger::new(),
        FixtureMemberDirectory::new(),
        BillingPolicy::default(),
    );

    let verdict = service
        .evaluate(&subject, date(2025, 3, day))
        .await
        .expect("evaluation succeeds");

    assert_eq!(
        verdict
            .missed_periods
            .iter()
            .any(|period| period.to_string() == "2025-03"),
        march_owed
    );
}

#[tokio::test]
async fn fully_paid_window_is_not_delinquent() {
    let subject = member("2024-06-01T00:00:00Z", "20.00");
    let ledger = FixturePaymentLedger::new();
    ledger.record(completed_payment(subject.id, "2025-03", "2025-03-02T10:00:00Z"));
    ledger.record(completed_payment(subject.id, "2025-02", "2025-02-02T10:00:00Z"));
    ledger.record(completed_payment(subject.id, "2025-01", "2025-01-02T10:00:00Z"));
    let service = fixture_service(ledger, FixtureMemberDirectory::new(), BillingPolicy::default());

    let verdict = service
        .evaluate(&subject, date(2025, 3, 10))
        .await
        .expect("evaluation succeeds");

    assert!(!verdict.is_delinquent);
    assert!(verdict.missed_periods.is_empty());
    assert_eq!(verdict.amount_owed, Decimal::ZERO);
}

#[tokio::test]
async fn pending_and_failed_payments_do_not_satisfy_periods() {
    let subject = member("2024-06-01T00:00:00Z", "25.00");
    let ledger = FixturePaymentLedger::new();
    let mut pending = completed_payment(subject.id, "2025-02", "2025-02-03T10:00:00Z");
    pending.status = PaymentStatus::Pending;
    let mut failed = completed_payment(subject.id, "2025-01", "2025-01-03T10:00:00Z");
    failed.status = PaymentStatus::Failed;
    ledger.record(pending);
    ledger.record(failed);
    let service = fixture_service(ledger, FixtureMemberDirectory::new(), BillingPolicy::default());

    let verdict = service
        .evaluate(&subject, date(2025, 3, 10))
        .await
        .expect("evaluation succeeds");

    assert_eq!(missed_keys(&verdict), ["2025-03", "2025-02", "2025-01"]);
    assert_eq!(verdict.amount_owed, decimal("75.00"));
    assert_eq!(verdict.last_payment_at, None);
}

#[tokio::test]
async fn periods_before_account_creation_are_never_owed() {
    // Member created mid-February: January precedes the account and is
    // excluded even though it sits inside the lookback window.
    let subject = member("2025-02-14T00:00:00Z", "20.00");
    let service = fixture_service(
        FixturePaymentLedger::new(),
        FixtureMemberDirectory::new(),
        BillingPolicy::default(),
    );

    let verdict = service
        .evaluate(&subject, date(2025, 3, 10))
        .await
        .expect("evaluation succeeds");

    assert_eq!(missed_keys(&verdict), ["2025-03", "2025-02"]);
}

#[tokio::test]
async fn evaluation_is_idempotent_for_identical_inputs() {
    let subject = member("2024-06-01T00:00:00Z", "20.00");
    let ledger = FixturePaymentLedger::new();
    ledger.record(completed_payment(subject.id, "2025-02", "2025-02-03T10:00:00Z"));
    let service = fixture_service(ledger, FixtureMemberDirectory::new(), BillingPolicy::default());

    let first = service
        .evaluate(&subject, date(2025, 3, 10))
        .await
        .expect("first evaluation");
    let second = service
        .evaluate(&subject, date(2025, 3, 10))
        .await
        .expect("second evaluation");

    assert_eq!(first, second);
}

#[tokio::test]
async fn custom_lookback_widens_the_candidate_window() {
    let subject = member("2024-06-01T00:00:00Z", "10.00");
    let policy = BillingPolicy {
        lookback_months: 5,
        grace: GracePolicy::default(),
    };
    let service = fixture_service(
        FixturePaymentLedger::new(),
        FixtureMemberDirectory::new(),
        policy,
    );

    let verdict = service
        .evaluate(&subject, date(2025, 3, 10))
        .await
        .expect("evaluation succeeds");

    assert_eq!(
        missed_keys(&verdict),
        ["2025-03", "2025-02", "2025-01", "2024-12", "2024-11"]
    );
    assert_eq!(verdict.amount_owed, decimal("50.00"));
}

#[rstest]
#[case(PaymentLedgerError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(PaymentLedgerError::query("bad plan"), ErrorCode::InternalError)]
#[tokio::test]
async fn ledger_failures_surface_instead_of_reporting_clean(
    #[case] failure: PaymentLedgerError,
    #[case] expected: ErrorCode,
) {
    let subject = member("2024-06-01T00:00:00Z", "20.00");
    let mut ledger = MockPaymentLedger::new();
    let returned = failure.clone();
    ledger
        .expect_find_completed_payment()
        .returning(move |_, _| Err(returned.clone()));
    ledger.expect_latest_completed_payment().never();
    let service = DelinquencyService::new(
        Arc::new(ledger),
        Arc::new(FixtureMemberDirectory::new()),
        BillingPolicy::default(),
    );

    let err = service
        .evaluate(&subject, date(2025, 3, 10))
        .await
        .expect_err("failure must propagate");
    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn reminder_status_reports_dates_alongside_the_verdict() {
    let subject = member("2024-06-01T00:00:00Z", "20.00");
    let directory = FixtureMemberDirectory::new();
    directory.register(subject.clone());
    let service = fixture_service(FixturePaymentLedger::new(), directory, BillingPolicy::default());

    let status = service
        .reminder_status(&subject.id, date(2025, 3, 10))
        .await
        .expect("status succeeds");

    assert_eq!(status.next_billing_date, date(2025, 4, 1));
    assert_eq!(status.grace_period_ends, Some(date(2025, 3, 5)));
    assert!(status.verdict.is_delinquent);
}

#[tokio::test]
async fn reminder_status_for_unknown_member_is_not_found() {
    let service = fixture_service(
        FixturePaymentLedger::new(),
        FixtureMemberDirectory::new(),
        BillingPolicy::default(),
    );

    let err = service
        .reminder_status(&MemberId::random(), date(2025, 3, 10))
        .await
        .expect_err("unknown member must fail");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn report_contains_only_delinquent_members_in_roster_order() {
    let behind = member("2024-06-01T00:00:00Z", "20.00");
    let current = member("2024-06-01T00:00:00Z", "20.00");
    let also_behind = member("2024-06-01T00:00:00Z", "25.00");

    let directory = FixtureMemberDirectory::new();
    directory.register(behind.clone());
    directory.register(current.clone());
    directory.register(also_behind.clone());

    let ledger = FixturePaymentLedger::new();
    ledger.record(completed_payment(current.id, "2025-03", "2025-03-02T10:00:00Z"));
    ledger.record(completed_payment(current.id, "2025-02", "2025-02-02T10:00:00Z"));
    ledger.record(completed_payment(current.id, "2025-01", "2025-01-02T10:00:00Z"));

    let service = fixture_service(ledger, directory, BillingPolicy::default());

    let report = service
        .delinquency_report(date(2025, 3, 10))
        .await
        .expect("report succeeds");

    let ids: Vec<_> = report.iter().map(|row| row.member.id).collect();
    assert_eq!(ids, [behind.id, also_behind.id]);
    assert_eq!(report.first().map(|row| row.verdict.amount_owed), Some(decimal("60.00")));
}

#[tokio::test]
async fn report_aborts_when_the_directory_is_unavailable() {
    let mut directory = MockMemberDirectory::new();
    directory
        .expect_list_active()
        .returning(|| Err(MemberDirectoryError::connection("refused")));
    let service = DelinquencyService::new(
        Arc::new(FixturePaymentLedger::new()),
        Arc::new(directory),
        BillingPolicy::default(),
    );

    let err = service
        .delinquency_report(date(2025, 3, 10))
        .await
        .expect_err("directory failure must propagate");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
