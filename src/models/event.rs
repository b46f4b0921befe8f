use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::AppResult;

pub const DEFAULT_CATEGORY: &str = "General";
pub const ACTIVE_STATUS: &str = "active";

/// Row of the `events` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<String>,
    pub venue: String,
    pub price: f64,
    #[serde(default)]
    pub max_capacity: Option<i32>,
    #[serde(default)]
    pub current_bookings: i32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub created_by: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_status() -> String {
    ACTIVE_STATUS.to_string()
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn calendar_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("date").with_message(Cow::Borrowed("Date must be YYYY-MM-DD"))
        })
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

fn clock_time(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || parse_time(value).is_some() {
        return Ok(());
    }
    Err(ValidationError::new("time").with_message(Cow::Borrowed("Time must be HH:MM")))
}

/// Create/edit form as submitted by an organizer.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct EventForm {
    #[validate(custom(function = "non_blank", message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "calendar_date"))]
    pub date: String,
    #[serde(default)]
    #[validate(custom(function = "clock_time"))]
    pub time: Option<String>,
    #[validate(custom(function = "non_blank", message = "Venue is required"))]
    pub venue: String,
    #[validate(
        required(message = "Price is required"),
        range(min = 0.0, message = "Price must not be negative")
    )]
    pub price: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Capacity must not be negative"))]
    pub max_capacity: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
    /// Existing image, kept on edit unless a new one is uploaded.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Validated event fields, ready to be written to the `events` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub venue: String,
    pub price: f64,
    pub max_capacity: Option<i32>,
    pub category: String,
    pub image_url: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl EventForm {
    pub fn into_draft(self) -> AppResult<EventDraft> {
        self.validate()?;

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| crate::error::AppError::Validation("Date must be YYYY-MM-DD".into()))?;
        let time = trimmed(self.time)
            .and_then(|t| parse_time(&t))
            .map(|t| t.format("%H:%M").to_string());

        Ok(EventDraft {
            title: self.title.trim().to_string(),
            description: trimmed(self.description),
            date,
            time,
            venue: self.venue.trim().to_string(),
            price: self.price.unwrap_or_default(),
            max_capacity: self.max_capacity,
            category: trimmed(self.category).unwrap_or_else(default_category),
            image_url: trimmed(self.image_url),
        })
    }
}
