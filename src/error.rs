use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

/// Every failure is "an operation failed with a message"; the variant only
/// picks the HTTP status the message is delivered with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Message reported by the hosted data service.
    #[error("{0}")]
    Backend(String),

    #[error("data service is unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Backend(_) | AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Prefix the message, keeping the variant ("Error updating profile: ...").
    pub fn context(self, prefix: &str) -> Self {
        match self {
            AppError::Validation(m) => AppError::Validation(format!("{prefix}: {m}")),
            AppError::Unauthorized(m) => AppError::Unauthorized(format!("{prefix}: {m}")),
            AppError::NotFound(m) => AppError::NotFound(format!("{prefix}: {m}")),
            AppError::Backend(m) => AppError::Backend(format!("{prefix}: {m}")),
            other => AppError::Backend(format!("{prefix}: {other}")),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(first_message(&errors))
    }
}

/// Forms report one problem at a time, the first field in name order.
fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    let mut names: Vec<_> = fields.keys().collect();
    names.sort();

    names
        .first()
        .and_then(|name| {
            fields.get(*name).and_then(|list| list.first()).map(|err| {
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", name))
            })
        })
        .unwrap_or_else(|| "Invalid input".to_string())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
        #[validate(length(min = 1, message = "Venue is required"))]
        venue: String,
    }

    #[test]
    fn validation_reports_first_field_message() {
        let form = Form {
            title: String::new(),
            venue: String::new(),
        };
        let err: AppError = form.validate().unwrap_err().into();
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn context_keeps_variant() {
        let err = AppError::Backend("permission denied".into()).context("Error updating profile");
        assert_eq!(err.to_string(), "Error updating profile: permission denied");
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
