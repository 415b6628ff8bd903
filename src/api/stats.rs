use axum::extract::State;
use axum::Json;

use crate::api::AppState;
use crate::domain::GlobalStats;
use crate::error::AppError;

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<GlobalStats>, AppError> {
    Ok(Json(state.ledger.global_stats().await?))
}
