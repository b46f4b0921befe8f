//! Home page search box: debounced quick search with a results popover.

use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::config::SearchConfig;
use crate::error::AppResult;
use crate::models::Event;
use crate::services::backend::BackendClient;
use crate::services::search::{search_route, suggest_filter};

/// Runs only the last scheduled job once `quiet` has passed without another one.
pub struct Debouncer {
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    pub fn schedule<F>(&mut self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            job.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Event>,
    pub is_searching: bool,
    pub show_results: bool,
    pub error: Option<String>,
}

pub type Lookup = Arc<dyn Fn(String) -> BoxFuture<'static, AppResult<Vec<Event>>> + Send + Sync>;

pub struct SearchBox {
    lookup: Lookup,
    debouncer: Debouncer,
    state: Arc<watch::Sender<SearchState>>,
}

impl SearchBox {
    pub fn new(lookup: Lookup, quiet: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            lookup,
            debouncer: Debouncer::new(quiet),
            state: Arc::new(state),
        }
    }

    /// Quick search against active events with the configured limit and quiet period.
    pub fn for_backend(backend: BackendClient, config: &SearchConfig) -> Self {
        let limit = config.suggest_limit;
        let lookup: Lookup = Arc::new(move |query: String| {
            let backend = backend.clone();
            async move { backend.list_events(&suggest_filter(&query, limit)).await }.boxed()
        });
        Self::new(lookup, Duration::from_millis(config.debounce_ms))
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Каждый ввод отменяет предыдущий запрос; пустая строка очищает сразу.
    pub fn on_input(&mut self, query: &str) {
        let query = query.to_string();
        let trimmed = query.trim().to_string();

        if trimmed.is_empty() {
            self.debouncer.cancel();
            self.state.send_replace(SearchState {
                query,
                ..SearchState::default()
            });
            return;
        }

        self.state.send_modify(|s| {
            s.query = query;
            s.is_searching = true;
        });

        let lookup = self.lookup.clone();
        let state = self.state.clone();
        self.debouncer.schedule(async move {
            let outcome = lookup(trimmed).await;
            state.send_modify(|s| {
                s.is_searching = false;
                s.show_results = true;
                match outcome {
                    Ok(events) => {
                        s.results = events;
                        s.error = None;
                    }
                    Err(e) => {
                        warn!("Quick search failed: {}", e);
                        s.results.clear();
                        s.error = Some(e.to_string());
                    }
                }
            });
        });
    }

    pub fn hide_results(&self) {
        self.state.send_modify(|s| s.show_results = false);
    }

    /// Route of the full results page; `None` keeps the box as is.
    pub fn submit(&mut self) -> Option<String> {
        let route = search_route(&self.state.borrow().query)?;
        self.debouncer.cancel();
        self.state.send_modify(|s| {
            s.is_searching = false;
            s.show_results = false;
        });
        Some(route)
    }
}
