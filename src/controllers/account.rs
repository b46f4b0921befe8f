use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::models::user::ProfileForm;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/account/profile", get(get_profile).put(update_profile))
}

#[derive(Debug, Serialize)]
struct ProfileResponse {
    email: Option<String>,
    profile: ProfileForm,
}

#[derive(Debug, Serialize)]
struct ProfileSaved {
    message: &'static str,
    profile: ProfileForm,
}

// GET /api/account/profile
// Профиля ещё нет - отдаём форму по умолчанию
async fn get_profile(State(state): State<Arc<AppState>>, user: AuthUser) -> AppResult<Json<ProfileResponse>> {
    let profile = state.backend.get_profile(&user.token, user.user_id).await?;
    Ok(Json(ProfileResponse {
        email: user.email,
        profile: ProfileForm::from(profile),
    }))
}

// PUT /api/account/profile
async fn update_profile(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(form): Json<ProfileForm>,
) -> AppResult<Json<ProfileSaved>> {
    form.validate()?;

    let saved = state
        .backend
        .upsert_profile(&user.token, user.user_id, &form)
        .await
        .map_err(|e| e.context("Error updating profile"))?;

    info!("Profile of {} updated", user.user_id);
    Ok(Json(ProfileSaved {
        message: "Profile updated successfully!",
        profile: ProfileForm::from(Some(saved)),
    }))
}
