use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::extract::{ApiJson, ApiPath, OptionalJson};
use crate::api::{AppState, SuccessResponse};
use crate::auth::Admin;
use crate::domain::{DailyPots, PlayerId, PotAdded, PotEntryId, PotSession};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct AddPotRequest {
    pub session_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditPotRequest {
    pub pot_count: i64,
}

#[derive(Debug, Serialize)]
pub struct PotCountResponse {
    pub player_id: PlayerId,
    pub pot_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ResetPotsResponse {
    pub success: bool,
    pub removed: u64,
}

pub async fn add_pot(
    _admin: Admin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    OptionalJson(body): OptionalJson<AddPotRequest>,
) -> Result<(StatusCode, Json<PotAdded>), AppError> {
    let body = body.unwrap_or_default();
    let added = state
        .ledger
        .add_pot(PlayerId::new(id), body.session_name.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(added)))
}

pub async fn remove_pot(
    _admin: Admin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PotCountResponse>, AppError> {
    let player_id = PlayerId::new(id);
    let pot_count = state.ledger.remove_pot(player_id).await?;
    Ok(Json(PotCountResponse {
        player_id,
        pot_count,
    }))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<DailyPots>, AppError> {
    Ok(Json(state.ledger.pots_today().await?))
}

pub async fn reset_today(
    _admin: Admin,
    State(state): State<AppState>,
) -> Result<Json<ResetPotsResponse>, AppError> {
    let removed = state.ledger.reset_today().await?;
    Ok(Json(ResetPotsResponse {
        success: true,
        removed,
    }))
}

pub async fn get_pot_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<PotSession>>, AppError> {
    Ok(Json(state.ledger.pot_history().await?))
}

pub async fn edit_pot_history(
    _admin: Admin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<EditPotRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .ledger
        .edit_pot_history(PotEntryId::new(id), body.pot_count)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn delete_pot_history(
    _admin: Admin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .ledger
        .delete_pot_history(PotEntryId::new(id))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
