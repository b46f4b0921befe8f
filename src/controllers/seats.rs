use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::seating::inventory::demo_seat_map;
use crate::seating::SeatSelectionSnapshot;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events/{id}/seat-selection", post(open_selection))
        .route("/seat-selection/{view}", get(get_selection).delete(leave_selection))
        .route("/seat-selection/{view}/toggle", post(toggle_seat))
}

pub(crate) fn view_not_found() -> AppError {
    AppError::NotFound("Seat selection not found".to_string())
}

// POST /api/events/{id}/seat-selection
// Каждый заход на схему зала получает свой снимок и пустой выбор
async fn open_selection(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let event = state.backend.get_event(event_id).await?;
    let snapshot = state.views.open(event.id, demo_seat_map()).await;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

// GET /api/seat-selection/{view}
async fn get_selection(
    State(state): State<Arc<AppState>>,
    Path(view_id): Path<Uuid>,
) -> AppResult<Json<SeatSelectionSnapshot>> {
    state.views.snapshot(view_id).await.map(Json).ok_or_else(view_not_found)
}

#[derive(Debug, Deserialize)]
struct ToggleRequest {
    seat_id: String,
}

// POST /api/seat-selection/{view}/toggle
// Занятое или неизвестное место ничего не меняет
async fn toggle_seat(
    State(state): State<Arc<AppState>>,
    Path(view_id): Path<Uuid>,
    Json(req): Json<ToggleRequest>,
) -> AppResult<Json<SeatSelectionSnapshot>> {
    state
        .views
        .toggle(view_id, req.seat_id.trim())
        .await
        .map(Json)
        .ok_or_else(view_not_found)
}

// DELETE /api/seat-selection/{view}
async fn leave_selection(State(state): State<Arc<AppState>>, Path(view_id): Path<Uuid>) -> StatusCode {
    state.views.close(view_id).await;
    StatusCode::NO_CONTENT
}
