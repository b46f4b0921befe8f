use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::{Event, EventForm};
use crate::services::events::{EventFilter, EventOrder};
use crate::services::search::{category_route, featured_filter, suggest_filter, SearchCriteria, CATEGORIES};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/events", get(search_events).post(create_event))
        .route("/events/featured", get(featured_events))
        .route("/events/suggest", get(suggest_events))
        .route("/events/{id}", get(get_event).put(update_event).delete(delete_event))
        .route("/dashboard/events", get(my_events))
}

/* ---------- CATALOGUE ---------- */

#[derive(Debug, Serialize)]
struct CategoryLink {
    name: &'static str,
    route: String,
}

// GET /api/categories
async fn list_categories() -> impl IntoResponse {
    let categories: Vec<CategoryLink> = CATEGORIES
        .iter()
        .copied()
        .map(|name| CategoryLink {
            name,
            route: category_route(name),
        })
        .collect();
    Json(categories)
}

// GET /api/events/featured
// Главная страница не должна падать из-за сервиса: при ошибке пустой список
async fn featured_events(State(state): State<Arc<AppState>>) -> Json<Vec<Event>> {
    let filter = featured_filter(state.config.search.featured_limit);
    match state.backend.list_events(&filter).await {
        Ok(events) => Json(events),
        Err(e) => {
            error!("Error fetching featured events: {}", e);
            Json(Vec::new())
        }
    }
}

#[derive(Debug, Deserialize)]
struct SuggestQuery {
    #[serde(default)]
    q: String,
}

// GET /api/events/suggest?q=
async fn suggest_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestQuery>,
) -> AppResult<Json<Vec<Event>>> {
    if params.q.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }
    let filter = suggest_filter(&params.q, state.config.search.suggest_limit);
    Ok(Json(state.backend.list_events(&filter).await?))
}

#[derive(Debug, Serialize)]
struct SearchPage {
    title: String,
    description: String,
    events: Vec<Event>,
}

// GET /api/events?q=&category=
async fn search_events(
    State(state): State<Arc<AppState>>,
    Query(criteria): Query<SearchCriteria>,
) -> AppResult<Json<SearchPage>> {
    let events = state.backend.list_events(&criteria.filter()).await?;
    Ok(Json(SearchPage {
        title: criteria.title(),
        description: criteria.description(events.len()),
        events,
    }))
}

// GET /api/events/{id}
async fn get_event(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> AppResult<Json<Event>> {
    Ok(Json(state.backend.get_event(id).await?))
}

/* ---------- ORGANIZER ---------- */

// POST /api/events
async fn create_event(
    State(state): State<Arc<AppState>>,
    user: Result<AuthUser, AppError>,
    Json(form): Json<EventForm>,
) -> AppResult<impl IntoResponse> {
    let user = user.map_err(|_| AppError::Unauthorized("You must be logged in to create events".to_string()))?;
    let draft = form.into_draft()?;

    let event = state
        .backend
        .create_event(&user.token, user.user_id, &draft)
        .await
        .map_err(|e| e.context("Error creating event"))?;

    info!("Event {} created by {}", event.id, user.user_id);
    Ok((StatusCode::CREATED, Json(event)))
}

// PUT /api/events/{id}
async fn update_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(form): Json<EventForm>,
) -> AppResult<Json<Event>> {
    let draft = form.into_draft()?;
    let event = state
        .backend
        .update_event(&user.token, user.user_id, id, &draft)
        .await
        .map_err(|e| e.context("Error updating event"))?;
    Ok(Json(event))
}

// DELETE /api/events/{id}
async fn delete_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    state
        .backend
        .delete_event(&user.token, user.user_id, id)
        .await
        .map_err(|e| e.context("Error deleting event"))?;

    info!("Event {} deleted by {}", id, user.user_id);
    Ok(Json(json!({ "message": "Event deleted" })))
}

// GET /api/dashboard/events
async fn my_events(State(state): State<Arc<AppState>>, user: AuthUser) -> AppResult<Json<Vec<Event>>> {
    let filter = EventFilter {
        created_by: Some(user.user_id),
        order: Some(EventOrder::CreatedAtDesc),
        ..EventFilter::default()
    };
    Ok(Json(state.backend.list_events_as(Some(&user.token), &filter).await?))
}
