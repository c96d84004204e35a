//! Member session handlers.
//!
//! ```text
//! POST /api/v1/login {"memberId":"3fa85f64-..."}
//! ```
//!
//! Login here is the development bootstrap: it establishes a session cookie
//! for a known member id. Production deployments front this with an external
//! identity provider and only the session contract matters to the rest of
//! the adapter layer.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::Error;
use crate::domain::billing::{Member, MemberId};
use crate::domain::ports::MemberDirectoryError;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Member identifier to authenticate as.
    pub member_id: String,
}

/// Map directory failures onto transport-agnostic domain errors.
pub(crate) fn map_directory_error(error: MemberDirectoryError) -> Error {
    match error {
        MemberDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("member directory unavailable: {message}"))
        }
        MemberDirectoryError::Query { message } => {
            Error::internal(format!("member directory error: {message}"))
        }
    }
}

/// Look up the member behind an authenticated session.
pub(crate) async fn require_member(state: &HttpState, id: &MemberId) -> Result<Member, Error> {
    state
        .members
        .find_by_id(id)
        .await
        .map_err(map_directory_error)?
        .ok_or_else(|| Error::not_found("member not found"))
}

/// Authenticate a member and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown member", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["members"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let member_id = MemberId::new(&payload.member_id).map_err(|err| {
        Error::invalid_request("member id must be a valid UUID").with_details(json!({
            "field": "memberId",
            "code": "invalid_member_id",
            "reason": err.to_string(),
        }))
    })?;

    let member = state
        .members
        .find_by_id(&member_id)
        .await
        .map_err(map_directory_error)?;
    let Some(member) = member else {
        return Err(Error::unauthorized("unknown member"));
    };

    session.persist_member(&member.id)?;
    Ok(HttpResponse::Ok().finish())
}
