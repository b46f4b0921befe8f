use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;

const DEFAULT_AUDIENCE: &str = "authenticated";

/// Signed-in caller, resolved from `Authorization: Bearer <access token>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    /// Sign-up metadata (`full_name`, ...), empty when the token has none.
    pub user_metadata: serde_json::Value,
    /// Forwarded to the data service so its row policies see the same user.
    pub token: String,
}

impl AuthUser {
    pub fn user(&self) -> User {
        User {
            id: self.user_id,
            email: self.email.clone(),
            user_metadata: self.user_metadata.clone(),
        }
    }
}

// Поля access-токена, которые нам нужны
#[derive(Debug, Deserialize)]
struct Claims {
    sub: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Local HS256 check with the service's signing secret.
fn verify_locally(token: &str, secret: &str, audience: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            debug!("Rejected access token: {}", e);
            AppError::Unauthorized("Invalid or expired session".to_string())
        })
}

impl FromRequestParts<Arc<crate::AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Please sign in to continue".to_string()))?
            .to_string();

        let auth = &state.config.auth;
        if let Some(secret) = auth.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            let audience = auth.audience.as_deref().unwrap_or(DEFAULT_AUDIENCE);
            let claims = verify_locally(&token, secret, audience)?;
            return Ok(AuthUser {
                user_id: claims.sub,
                email: claims.email,
                user_metadata: claims.user_metadata,
                token,
            });
        }

        // Секрета нет - спрашиваем сервис
        let user = state.backend.get_user(&token).await.map_err(|e| match e {
            AppError::Unauthorized(_) => AppError::Unauthorized("Invalid or expired session".to_string()),
            other => other,
        })?;
        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
            user_metadata: user.user_metadata,
            token,
        })
    }
}
