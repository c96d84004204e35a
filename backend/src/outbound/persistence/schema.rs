//! Diesel table definitions for the billing schema.
//!
//! These must match the database migrations exactly; regenerate with
//! `diesel print-schema` after a migration changes either table.

diesel::table! {
    /// Membership roster maintained by the identity substrate.
    members (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-readable display name.
        display_name -> Varchar,
        /// Lifecycle state: `active`, `overdue` or `inactive`.
        status -> Varchar,
        /// Authorisation role: `member` or `admin`.
        role -> Varchar,
        /// Flat monthly dues amount for the member's tier.
        pricing_tier -> Numeric,
        /// Account creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only ledger of payment events.
    payments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Member the payment belongs to.
        member_id -> Uuid,
        /// Settled amount.
        amount -> Numeric,
        /// Processing state: `completed`, `pending` or `failed`.
        status -> Varchar,
        /// Calendar year of the covered billing period.
        period_year -> Integer,
        /// Calendar month (1-12) of the covered billing period.
        period_month -> Integer,
        /// When the payment was recorded.
        paid_at -> Timestamptz,
    }
}

diesel::joinable!(payments -> members (member_id));
diesel::allow_tables_to_appear_in_same_query!(members, payments);
