use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::seats::view_not_found;
use crate::error::AppResult;
use crate::services::checkout::{BookingConfirmation, CheckoutForm};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/seat-selection/{view}/checkout", post(checkout))
}

// POST /api/seat-selection/{view}/checkout
// Представление забирается до имитации оплаты: повторный checkout и
// переключение мест во время обработки получают 404
async fn checkout(
    State(state): State<Arc<AppState>>,
    Path(view_id): Path<Uuid>,
    Json(form): Json<CheckoutForm>,
) -> AppResult<Json<BookingConfirmation>> {
    let view = state
        .views
        .take_if(view_id, |view| state.checkout.check(&view.summary(), &form))
        .await
        .ok_or_else(view_not_found)??;

    let confirmation = state.checkout.process(view.event_id, &view.summary(), &form).await;

    info!(
        "✅ Booking {} confirmed: {} seats, {}",
        confirmation.confirmation_id,
        confirmation.seats.len(),
        confirmation.total_display
    );
    Ok(Json(confirmation))
}
