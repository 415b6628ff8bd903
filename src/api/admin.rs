use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::auth::credential_from_headers;

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub authorized: bool,
}

/// Report whether the presented credential would be accepted for mutations.
pub async fn verify(State(state): State<AppState>, headers: HeaderMap) -> Json<VerifyResponse> {
    let authorized = state.gate.may_mutate(credential_from_headers(&headers)).await;
    Json(VerifyResponse { authorized })
}
