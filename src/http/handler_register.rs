//! Handles POST /register - issues a relay token for a pair of Naver credentials

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};

use super::{
    context::AppState,
    utils_request::{parse_json_body, request_base},
};
use crate::{
    errors::Result,
    registration::{RegisterRequest, RegisterResponse, build_mcp_url, redact},
};

pub async fn handle_register(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RegisterResponse>> {
    let request: RegisterRequest = parse_json_body(&body)?;
    let registration = request.into_registration()?;

    state
        .registration_store
        .insert_registration(&registration)
        .await?;

    tracing::info!(
        token = %redact(&registration.token),
        display_name = ?registration.display_name,
        "registration created"
    );

    let base = request_base(state.config.external_base.as_ref().as_deref(), &headers);
    let mcp_url = build_mcp_url(&base, &registration.token);

    Ok(Json(RegisterResponse {
        mcp_url,
        token: registration.token,
    }))
}
