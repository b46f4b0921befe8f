use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::AppState;

/// Drops seat selection views nobody has touched for a while.
pub struct CleanupService {
    state: Arc<AppState>,
}

impl CleanupService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.state.config.seating.view_ttl_seconds)
    }

    fn interval(&self) -> Duration {
        Duration::from_secs(self.state.config.seating.sweep_interval_seconds.max(1))
    }

    /// Один проход очистки, возвращает число удалённых представлений
    pub async fn sweep_once(&self) -> usize {
        let removed = self.state.views.sweep_idle(self.ttl()).await;
        if removed == 0 {
            debug!("🪑 No idle seat selections to cleanup");
        } else {
            info!("🧹 Removed {} idle seat selections", removed);
        }
        removed
    }

    /// Бесконечный цикл для фоновой задачи
    pub async fn run(self) {
        info!("🧹 Seat selection cleanup every {:?}, idle limit {:?}", self.interval(), self.ttl());
        loop {
            tokio::time::sleep(self.interval()).await;
            self.sweep_once().await;
        }
    }
}
