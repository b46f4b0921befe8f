//! Клиент внешнего сервиса данных (REST-таблицы, авторизация, файловое хранилище).
//!
//! Every request carries the project's anon key in `apikey`; the bearer is the
//! shopper's access token when one is known, the anon key otherwise. Calls are
//! made once: no retries, no backoff. A failed call becomes
//! [`AppError`] with the service's own message.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    anon_key: String,
    http: reqwest::Client,
}

/// Error bodies differ between the REST, auth and storage endpoints.
#[derive(Debug, Default, Deserialize)]
struct ServiceErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ServiceErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
    }
}

impl BackendClient {
    pub fn from_config(config: &BackendConfig) -> AppResult<Self> {
        if config.is_placeholder() {
            warn!("Data service credentials are missing. Set SUPABASE_URL and SUPABASE_ANON_KEY");
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    pub(crate) fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token.unwrap_or(&self.anon_key))
    }

    /// Passes 2xx through; anything else becomes an error carrying the service message.
    pub(crate) async fn check(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ServiceErrorBody>(&body)
            .ok()
            .and_then(ServiceErrorBody::into_message)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("request failed with status {}", status.as_u16())
                } else {
                    body.trim().to_string()
                }
            });
        warn!("Data service returned {}: {}", status, message);

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized(message),
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            _ => AppError::Backend(message),
        })
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> AppResult<T> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn send_empty(request: RequestBuilder) -> AppResult<()> {
        Self::check(request.send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_prefers_message_fields_in_order() {
        let body: ServiceErrorBody =
            serde_json::from_str(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
                .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid login credentials"));

        let body: ServiceErrorBody = serde_json::from_str(r#"{"code":"42501","message":"permission denied"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("permission denied"));
    }

    #[test]
    fn urls_drop_trailing_slash() {
        let client = BackendClient::from_config(&BackendConfig {
            url: "https://demo.supabase.co/".into(),
            anon_key: "anon".into(),
            timeout_seconds: 5,
        })
        .unwrap();
        assert_eq!(client.rest_url("events"), "https://demo.supabase.co/rest/v1/events");
        assert_eq!(client.auth_url("user"), "https://demo.supabase.co/auth/v1/user");
        assert_eq!(
            client.storage_url("object/event-images/a.png"),
            "https://demo.supabase.co/storage/v1/object/event-images/a.png"
        );
    }
}
