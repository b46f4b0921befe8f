//! Mock payment step. Nothing is charged, stored or locked: the confirmation
//! only echoes the selection it was given.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::config::CheckoutConfig;
use crate::error::{AppError, AppResult};
use crate::seating::{BookingSummary, SummaryLine};

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn card_number(value: &str) -> Result<(), ValidationError> {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if (12..=19).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
        return Ok(());
    }
    Err(ValidationError::new("card_number").with_message(Cow::Borrowed("Enter a valid card number")))
}

fn expiry_date(value: &str) -> Result<(), ValidationError> {
    let ok = value
        .trim()
        .split_once('/')
        .filter(|(mm, yy)| mm.len() == 2 && yy.len() == 2 && yy.chars().all(|c| c.is_ascii_digit()))
        .and_then(|(mm, _)| mm.parse::<u8>().ok())
        .is_some_and(|month| (1..=12).contains(&month));
    if ok {
        return Ok(());
    }
    Err(ValidationError::new("expiry_date").with_message(Cow::Borrowed("Expiry date must be MM/YY")))
}

fn cvv(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if (3..=4).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit()) {
        return Ok(());
    }
    Err(ValidationError::new("cvv").with_message(Cow::Borrowed("CVV must be 3 or 4 digits")))
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CheckoutForm {
    #[validate(custom(function = "required", message = "First name is required"))]
    pub first_name: String,
    #[validate(custom(function = "required", message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "required", message = "Phone number is required"))]
    pub phone: String,
    #[validate(custom(function = "card_number"))]
    pub card_number: String,
    #[validate(custom(function = "expiry_date"))]
    pub expiry_date: String,
    #[validate(custom(function = "cvv"))]
    pub cvv: String,
    #[validate(custom(function = "required", message = "Billing address is required"))]
    pub billing_address: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub confirmation_id: Uuid,
    pub event_id: Uuid,
    pub seats: Vec<SummaryLine>,
    pub total: f64,
    pub total_display: String,
    pub email: String,
    pub confirmed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct MockCheckout {
    processing_delay: Duration,
}

impl MockCheckout {
    pub fn new(processing_delay: Duration) -> Self {
        Self { processing_delay }
    }

    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self::new(Duration::from_millis(config.processing_delay_ms))
    }

    /// Everything that can reject a checkout, without waiting.
    pub fn check(&self, summary: &BookingSummary, form: &CheckoutForm) -> AppResult<()> {
        if summary.is_empty() {
            return Err(AppError::Validation("Select seats to continue".to_string()));
        }
        form.validate()?;
        Ok(())
    }

    /// Simulated payment for an already checked selection.
    pub async fn process(&self, event_id: Uuid, summary: &BookingSummary, form: &CheckoutForm) -> BookingConfirmation {
        info!(
            "Processing mock payment for event {}: {} seats, {}",
            event_id, summary.count, summary.total_display
        );
        tokio::time::sleep(self.processing_delay).await;

        BookingConfirmation {
            confirmation_id: Uuid::new_v4(),
            event_id,
            seats: summary.seats.clone(),
            total: summary.total,
            total_display: summary.total_display.clone(),
            email: form.email.trim().to_string(),
            confirmed_at: Utc::now(),
        }
    }

    pub async fn complete(
        &self,
        event_id: Uuid,
        summary: &BookingSummary,
        form: &CheckoutForm,
    ) -> AppResult<BookingConfirmation> {
        self.check(summary, form)?;
        Ok(self.process(event_id, summary, form).await)
    }
}
