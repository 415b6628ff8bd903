use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::extract::ApiPath;
use crate::api::AppState;
use crate::auth::Admin;
use crate::domain::{points_to_dollars, Decimal, EntryId, HistoryRecord, PlayerId, Timestamp};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub player_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryRecordDto {
    pub id: EntryId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub points_added: i64,
    pub total_after: i64,
    pub dollar_after: Decimal,
    pub timestamp: Timestamp,
}

impl From<HistoryRecord> for HistoryRecordDto {
    fn from(record: HistoryRecord) -> Self {
        HistoryRecordDto {
            id: record.id,
            player_id: record.player_id,
            player_name: record.player_name,
            points_added: record.points_added,
            total_after: record.total_after,
            dollar_after: points_to_dollars(record.total_after),
            timestamp: record.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
    pub removed: u64,
}

#[derive(Debug, Serialize)]
pub struct ReverseEntryResponse {
    pub success: bool,
    pub entry_id: EntryId,
    pub player_id: PlayerId,
    pub points_removed: i64,
    pub new_total: i64,
    pub dollar_amount: Decimal,
}

pub async fn get_history(
    Query(params): Query<HistoryQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryRecordDto>>, AppError> {
    let player_name = params
        .player_name
        .as_deref()
        .filter(|s| !s.is_empty());

    let records = state.ledger.history(player_name).await?;
    Ok(Json(records.into_iter().map(HistoryRecordDto::from).collect()))
}

pub async fn clear_history(
    _admin: Admin,
    State(state): State<AppState>,
) -> Result<Json<ClearHistoryResponse>, AppError> {
    let removed = state.ledger.clear_history().await?;
    Ok(Json(ClearHistoryResponse {
        success: true,
        removed,
    }))
}

pub async fn reverse_entry(
    _admin: Admin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ReverseEntryResponse>, AppError> {
    let reversal = state.ledger.reverse_entry(EntryId::new(id)).await?;
    Ok(Json(ReverseEntryResponse {
        success: true,
        entry_id: reversal.entry_id,
        player_id: reversal.player_id,
        points_removed: reversal.points_removed,
        new_total: reversal.new_total,
        dollar_amount: points_to_dollars(reversal.new_total),
    }))
}
