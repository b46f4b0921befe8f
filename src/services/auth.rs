use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Session, User};
use crate::services::backend::BackendClient;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl BackendClient {
    /// Password grant. Rejected credentials come back as `Unauthorized`.
    pub async fn sign_in_with_password(&self, credentials: &Credentials) -> AppResult<Session> {
        credentials.validate()?;

        let request = self
            .request(Method::POST, &self.auth_url("token"), None)
            .query(&[("grant_type", "password")])
            .json(credentials);

        let session: Session = Self::send_json(request).await.map_err(|e| match e {
            AppError::Backend(message) | AppError::Validation(message) => AppError::Unauthorized(message),
            other => other,
        })?;
        info!("User {} signed in", session.user.id);
        Ok(session)
    }

    pub async fn get_user(&self, token: &str) -> AppResult<User> {
        let request = self.request(Method::GET, &self.auth_url("user"), Some(token));
        Self::send_json(request).await
    }

    pub async fn sign_out(&self, token: &str) -> AppResult<()> {
        let request = self.request(Method::POST, &self.auth_url("logout"), Some(token));
        Self::send_empty(request).await
    }
}
