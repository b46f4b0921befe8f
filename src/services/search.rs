use serde::{Deserialize, Serialize};

use crate::models::event::ACTIVE_STATUS;
use crate::services::events::{EventFilter, EventOrder};

/// Category tiles on the home page, in display order.
pub const CATEGORIES: &[&str] = &[
    "Concerts",
    "Festivals",
    "Nightlife",
    "Arts & Culture",
    "Sports",
    "Comedy",
];

/// Query string of the search results page (`/search?q=..&category=..`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl SearchCriteria {
    fn query(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// Active events, soonest first.
    pub fn filter(&self) -> EventFilter {
        EventFilter {
            status: Some(ACTIVE_STATUS.to_string()),
            category: self.category().map(str::to_string),
            text: self.query().map(str::to_string),
            order: Some(EventOrder::DateAsc),
            ..EventFilter::default()
        }
    }

    pub fn title(&self) -> String {
        if let Some(category) = self.category() {
            return format!("Events in {}", category);
        }
        if let Some(q) = self.query() {
            return format!("Search results for \"{}\"", q);
        }
        "All Events".to_string()
    }

    pub fn description(&self, found: usize) -> String {
        if let Some(category) = self.category() {
            return format!("Discover amazing {} events", category.to_lowercase());
        }
        if self.query().is_some() {
            return format!("Found {} events matching your search", found);
        }
        "Browse all available events".to_string()
    }
}

/// Quick search behind the home page search box.
pub fn suggest_filter(query: &str, limit: usize) -> EventFilter {
    EventFilter {
        status: Some(ACTIVE_STATUS.to_string()),
        text: Some(query.trim().to_string()),
        limit: Some(limit),
        ..EventFilter::default()
    }
}

/// Newest active events for the home page.
pub fn featured_filter(limit: usize) -> EventFilter {
    EventFilter {
        status: Some(ACTIVE_STATUS.to_string()),
        order: Some(EventOrder::CreatedAtDesc),
        limit: Some(limit),
        ..EventFilter::default()
    }
}

fn route_with(key: &str, value: &str) -> String {
    let qs = serde_urlencoded::to_string(vec![(key, value)]).unwrap_or_default();
    format!("/search?{}", qs)
}

/// Route for a submitted search, `None` for a blank query.
pub fn search_route(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Some(route_with("q", query))
}

pub fn category_route(category: &str) -> String {
    route_with("category", category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_prefer_category_over_query() {
        let both = SearchCriteria {
            q: Some("rock".into()),
            category: Some("Concerts".into()),
        };
        assert_eq!(both.title(), "Events in Concerts");
        assert_eq!(both.description(3), "Discover amazing concerts events");

        let query = SearchCriteria {
            q: Some("rock".into()),
            category: None,
        };
        assert_eq!(query.title(), "Search results for \"rock\"");
        assert_eq!(query.description(2), "Found 2 events matching your search");

        let none = SearchCriteria::default();
        assert_eq!(none.title(), "All Events");
        assert_eq!(none.description(0), "Browse all available events");
    }

    #[test]
    fn criteria_filter_orders_by_date() {
        let criteria = SearchCriteria {
            q: Some("  jazz ".into()),
            category: Some("".into()),
        };
        let filter = criteria.filter();
        assert_eq!(filter.text.as_deref(), Some("jazz"));
        assert_eq!(filter.category, None);
        assert_eq!(filter.order, Some(EventOrder::DateAsc));
        assert_eq!(filter.status.as_deref(), Some("active"));
    }

    #[test]
    fn routes_are_url_encoded() {
        assert_eq!(search_route("   "), None);
        assert_eq!(search_route(" rock & roll ").unwrap(), "/search?q=rock+%26+roll");
        assert_eq!(category_route("Arts & Culture"), "/search?category=Arts+%26+Culture");
    }
}
