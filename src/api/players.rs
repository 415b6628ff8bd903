use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::extract::{ApiJson, ApiPath};
use crate::api::{AppState, SuccessResponse};
use crate::auth::Admin;
use crate::domain::{points_to_dollars, Decimal, EntryId, PlayerId, Timestamp};
use crate::engine::{PlayerDetails, PlayerSummary};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct NewPlayerRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddPointsRequest {
    #[serde(default)]
    pub points: i64,
}

#[derive(Debug, Serialize)]
pub struct AddPointsResponse {
    pub entry_id: EntryId,
    pub points_added: i64,
    pub new_total: i64,
    pub dollar_amount: Decimal,
    pub timestamp: Timestamp,
}

pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerSummary>>, AppError> {
    let players = state.ledger.players().await?;
    Ok(Json(players.iter().map(PlayerSummary::from).collect()))
}

pub async fn create_player(
    _admin: Admin,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewPlayerRequest>,
) -> Result<(StatusCode, Json<PlayerSummary>), AppError> {
    let player = state.ledger.register(&body.name).await?;
    Ok((StatusCode::CREATED, Json(PlayerSummary::from(&player))))
}

pub async fn get_player(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PlayerSummary>, AppError> {
    let player = state.ledger.player(PlayerId::new(id)).await?;
    Ok(Json(PlayerSummary::from(&player)))
}

pub async fn delete_player(
    _admin: Admin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.ledger.delete_player(PlayerId::new(id)).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn get_player_details(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PlayerDetails>, AppError> {
    Ok(Json(state.ledger.player_details(PlayerId::new(id)).await?))
}

pub async fn add_points(
    _admin: Admin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<AddPointsRequest>,
) -> Result<(StatusCode, Json<AddPointsResponse>), AppError> {
    let entry = state
        .ledger
        .add_points(PlayerId::new(id), body.points)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddPointsResponse {
            entry_id: entry.id,
            points_added: entry.points_added,
            new_total: entry.total_after,
            dollar_amount: points_to_dollars(entry.total_after),
            timestamp: entry.timestamp,
        }),
    ))
}
