pub mod admin;
pub mod extract;
pub mod health;
pub mod history;
pub mod players;
pub mod pots;
pub mod stats;

use crate::auth::AccessGate;
use crate::engine::Ledger;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub gate: Arc<dyn AccessGate>,
}

impl AppState {
    pub fn new(ledger: Arc<Ledger>, gate: Arc<dyn AccessGate>) -> Self {
        Self { ledger, gate }
    }
}

/// Acknowledgement body for mutations that return nothing else.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route(
            "/api/players",
            get(players::list_players).post(players::create_player),
        )
        .route(
            "/api/players/:id",
            get(players::get_player).delete(players::delete_player),
        )
        .route("/api/players/:id/details", get(players::get_player_details))
        .route("/api/players/:id/points", post(players::add_points))
        .route(
            "/api/players/:id/pots",
            post(pots::add_pot).delete(pots::remove_pot),
        )
        .route("/api/history", get(history::get_history))
        .route("/api/history/clear", delete(history::clear_history))
        .route("/api/history/:id", delete(history::reverse_entry))
        .route("/api/stats", get(stats::get_stats))
        .route(
            "/api/pots/today",
            get(pots::get_today).delete(pots::reset_today),
        )
        .route("/api/pots/history", get(pots::get_pot_history))
        .route(
            "/api/pots/history/:id",
            put(pots::edit_pot_history).delete(pots::delete_pot_history),
        )
        .route("/api/admin/verify", post(admin::verify))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
