use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use super::{SeatSelectionSnapshot, SelectionView};
use crate::models::SeatMap;

struct Tracked {
    view: SelectionView,
    touched: Instant,
}

/// Open seat selection views of the front end, keyed by view id.
///
/// Each view belongs to the single shopper who opened it; the lock only guards
/// the map itself.
#[derive(Clone, Default)]
pub struct SelectionViews {
    inner: Arc<RwLock<HashMap<Uuid, Tracked>>>,
}

impl SelectionViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self, event_id: Uuid, seat_map: SeatMap) -> SeatSelectionSnapshot {
        let view = SelectionView::open(event_id, seat_map);
        let snapshot = view.snapshot();
        debug!("Opened seat selection {} for event {}", view.id, event_id);

        self.inner.write().await.insert(
            view.id,
            Tracked {
                view,
                touched: Instant::now(),
            },
        );
        snapshot
    }

    pub async fn snapshot(&self, view_id: Uuid) -> Option<SeatSelectionSnapshot> {
        let mut views = self.inner.write().await;
        let tracked = views.get_mut(&view_id)?;
        tracked.touched = Instant::now();
        Some(tracked.view.snapshot())
    }

    pub async fn toggle(&self, view_id: Uuid, seat_id: &str) -> Option<SeatSelectionSnapshot> {
        let mut views = self.inner.write().await;
        let tracked = views.get_mut(&view_id)?;
        tracked.touched = Instant::now();
        tracked.view.toggle(seat_id);
        Some(tracked.view.snapshot())
    }

    /// Removes the view only when `check` accepts it, under one write lock.
    /// After a successful take no other caller can toggle or take it again.
    pub async fn take_if<E, F>(&self, view_id: Uuid, check: F) -> Option<Result<SelectionView, E>>
    where
        F: FnOnce(&SelectionView) -> Result<(), E>,
    {
        let mut views = self.inner.write().await;
        let tracked = views.get_mut(&view_id)?;
        tracked.touched = Instant::now();
        if let Err(e) = check(&tracked.view) {
            return Some(Err(e));
        }
        views.remove(&view_id).map(|t| Ok(t.view))
    }

    pub async fn close(&self, view_id: Uuid) -> Option<SelectionView> {
        self.inner.write().await.remove(&view_id).map(|t| t.view)
    }

    /// Drops views untouched for longer than `ttl`; returns how many went away.
    pub async fn sweep_idle(&self, ttl: Duration) -> usize {
        let mut views = self.inner.write().await;
        let before = views.len();
        views.retain(|_, tracked| tracked.touched.elapsed() <= ttl);
        before - views.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
