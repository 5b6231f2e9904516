use crate::app::AppState;
use axum::Json;
use axum::extract::State;
use beacon_core::{ApiMessage, LobbyCode};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

pub async fn status_handler() -> Json<ApiMessage> {
    Json(ApiMessage::new("Server is running"))
}

/// Client count per lobby code.
pub async fn lobbies_handler(State(state): State<Arc<AppState>>) -> Json<BTreeMap<LobbyCode, usize>> {
    Json(state.registry.snapshot())
}

pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<ApiMessage> {
    info!("Reset requested through operator API");
    state.registry.reset();
    Json(ApiMessage::new("Reset server"))
}
