pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod seating;
pub mod services;
pub mod ui;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::error::AppResult;
use crate::seating::SelectionViews;
use crate::services::backend::BackendClient;
use crate::services::checkout::MockCheckout;

// Shared state для всего приложения
pub struct AppState {
    pub config: config::Config,
    pub backend: BackendClient,
    pub views: SelectionViews,
    pub checkout: MockCheckout,
}

impl AppState {
    pub fn new(config: config::Config) -> AppResult<Arc<Self>> {
        let backend = BackendClient::from_config(&config.backend)?;
        let checkout = MockCheckout::from_config(&config.checkout);

        Ok(Arc::new(Self {
            config,
            backend,
            views: SelectionViews::new(),
            checkout,
        }))
    }

    /// Home page search box wired to the data service.
    pub fn search_box(&self) -> ui::search_box::SearchBox {
        ui::search_box::SearchBox::for_backend(self.backend.clone(), &self.config.search)
    }
}

/// Router without transport layers; the binary adds tracing and CORS.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Evently API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
}
