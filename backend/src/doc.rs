//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: the
//! login, billing, and health paths, their request and response schemas, and
//! the session cookie security scheme. Swagger UI serves the document in
//! debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::billing::{DelinquentMemberResponse, MemberSummary, ReminderResponse};
use crate::inbound::http::members::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Membership billing API",
        description = "Session-authenticated payment reminder and delinquency reporting."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::members::login,
        crate::inbound::http::billing::reminder_status,
        crate::inbound::http::billing::delinquency_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        ReminderResponse,
        MemberSummary,
        DelinquentMemberResponse,
    )),
    tags(
        (name = "members", description = "Session management"),
        (name = "billing", description = "Payment reminders and delinquency reporting"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
