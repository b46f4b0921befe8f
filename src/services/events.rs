use chrono::Utc;
use reqwest::Method;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Event, EventDraft};
use crate::services::backend::BackendClient;

const EVENTS: &str = "events";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOrder {
    CreatedAtDesc,
    DateAsc,
}

impl EventOrder {
    fn as_param(self) -> &'static str {
        match self {
            EventOrder::CreatedAtDesc => "created_at.desc",
            EventOrder::DateAsc => "date.asc",
        }
    }
}

/// Read side of the `events` table. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub created_by: Option<Uuid>,
    /// Case-insensitive match against title, description, venue or category.
    pub text: Option<String>,
    pub order: Option<EventOrder>,
    pub limit: Option<usize>,
}

/// Strips characters with meaning in filter expressions (`,()*:"\`), collapses whitespace.
fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '*' | ':' | '"' | '\\' | '%'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl EventFilter {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];

        if let Some(status) = &self.status {
            pairs.push(("status".into(), format!("eq.{}", status)));
        }
        if let Some(category) = &self.category {
            pairs.push(("category".into(), format!("eq.{}", category)));
        }
        if let Some(owner) = self.created_by {
            pairs.push(("created_by".into(), format!("eq.{}", owner)));
        }
        if let Some(text) = self.text.as_deref().map(sanitize_text).filter(|t| !t.is_empty()) {
            let clause = ["title", "description", "venue", "category"]
                .iter()
                .map(|column| format!("{}.ilike.*{}*", column, text))
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("or".into(), format!("({})", clause)));
        }
        if let Some(order) = self.order {
            pairs.push(("order".into(), order.as_param().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".into(), limit.to_string()));
        }
        pairs
    }
}

#[derive(Serialize)]
struct NewEventRow<'a> {
    #[serde(flatten)]
    draft: &'a EventDraft,
    created_by: Uuid,
}

#[derive(Serialize)]
struct EventUpdateRow<'a> {
    #[serde(flatten)]
    draft: &'a EventDraft,
    updated_at: chrono::DateTime<Utc>,
}

fn first_row(mut rows: Vec<Event>) -> AppResult<Event> {
    if rows.is_empty() {
        return Err(AppError::NotFound("Event not found".to_string()));
    }
    Ok(rows.swap_remove(0))
}

impl BackendClient {
    pub async fn list_events(&self, filter: &EventFilter) -> AppResult<Vec<Event>> {
        self.list_events_as(None, filter).await
    }

    /// Same as [`list_events`](Self::list_events) with the caller's token, for row-level policies.
    pub async fn list_events_as(&self, token: Option<&str>, filter: &EventFilter) -> AppResult<Vec<Event>> {
        let request = self
            .request(Method::GET, &self.rest_url(EVENTS), token)
            .query(&filter.query_pairs());
        Self::send_json(request).await
    }

    pub async fn get_event(&self, id: Uuid) -> AppResult<Event> {
        let request = self
            .request(Method::GET, &self.rest_url(EVENTS), None)
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]);
        first_row(Self::send_json(request).await?)
    }

    pub async fn create_event(&self, token: &str, owner: Uuid, draft: &EventDraft) -> AppResult<Event> {
        let request = self
            .request(Method::POST, &self.rest_url(EVENTS), Some(token))
            .header("Prefer", "return=representation")
            .json(&[NewEventRow { draft, created_by: owner }]);
        first_row(Self::send_json(request).await?)
    }

    /// Only rows owned by `owner` are touched; anything else reads as not found.
    pub async fn update_event(&self, token: &str, owner: Uuid, id: Uuid, draft: &EventDraft) -> AppResult<Event> {
        let request = self
            .request(Method::PATCH, &self.rest_url(EVENTS), Some(token))
            .query(&[("id", format!("eq.{}", id)), ("created_by", format!("eq.{}", owner))])
            .header("Prefer", "return=representation")
            .json(&EventUpdateRow {
                draft,
                updated_at: Utc::now(),
            });
        first_row(Self::send_json(request).await?)
    }

    pub async fn delete_event(&self, token: &str, owner: Uuid, id: Uuid) -> AppResult<()> {
        let request = self
            .request(Method::DELETE, &self.rest_url(EVENTS), Some(token))
            .query(&[("id", format!("eq.{}", id)), ("created_by", format!("eq.{}", owner))])
            .header("Prefer", "return=representation");
        first_row(Self::send_json(request).await?).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_filter_spans_four_columns() {
        let filter = EventFilter {
            status: Some("active".into()),
            text: Some("  rock, (live)*  ".into()),
            limit: Some(10),
            ..EventFilter::default()
        };
        let pairs = filter.query_pairs();
        assert!(pairs.contains(&("status".into(), "eq.active".into())));
        assert!(pairs.contains(&(
            "or".into(),
            "(title.ilike.*rock live*,description.ilike.*rock live*,venue.ilike.*rock live*,category.ilike.*rock live*)"
                .into()
        )));
        assert!(pairs.contains(&("limit".into(), "10".into())));
        assert!(!pairs.iter().any(|(k, _)| k == "order"));
    }

    #[test]
    fn blank_text_adds_no_clause() {
        let filter = EventFilter {
            text: Some(" ,() ".into()),
            order: Some(EventOrder::CreatedAtDesc),
            ..EventFilter::default()
        };
        let pairs = filter.query_pairs();
        assert!(!pairs.iter().any(|(k, _)| k == "or"));
        assert!(pairs.contains(&("order".into(), "created_at.desc".into())));
    }
}
