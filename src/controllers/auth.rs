use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::models::Session;
use crate::services::auth::Credentials;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

// POST /api/auth/login
async fn login(State(state): State<Arc<AppState>>, Json(credentials): Json<Credentials>) -> AppResult<Json<Session>> {
    Ok(Json(state.backend.sign_in_with_password(&credentials).await?))
}

// POST /api/auth/logout
async fn logout(State(state): State<Arc<AppState>>, user: AuthUser) -> AppResult<StatusCode> {
    state.backend.sign_out(&user.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
struct Me {
    id: Uuid,
    email: Option<String>,
    display_name: String,
}

// GET /api/auth/me
// Имя для шапки: full_name/name из метаданных, иначе email
async fn me(user: AuthUser) -> Json<Me> {
    let display_name = user.user().display_name();
    Json(Me {
        id: user.user_id,
        email: user.email,
        display_name,
    })
}
