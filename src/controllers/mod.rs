pub mod account;
pub mod auth;
pub mod bookings;
pub mod events;
pub mod seats;
pub mod uploads;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(events::routes())
        .merge(seats::routes())
        .merge(bookings::routes())
        .merge(account::routes())
        .merge(auth::routes())
        .merge(uploads::routes())
}
