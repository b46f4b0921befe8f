use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub auth: AuthConfig,
    pub seating: SeatingConfig,
    pub checkout: CheckoutConfig,
    pub search: SearchConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    /// `text` or `json`.
    pub log_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            environment: "development".to_string(),
            rust_log: "evently=debug,tower_http=debug".to_string(),
            log_format: "text".to_string(),
        }
    }
}

/// Hosted data service (REST, auth and storage share one base URL).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "https://placeholder.supabase.co".to_string(),
            anon_key: "placeholder-key".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl BackendConfig {
    pub fn is_placeholder(&self) -> bool {
        self.url.is_empty()
            || self.anon_key.is_empty()
            || self.url.contains("placeholder")
            || self.anon_key == "placeholder-key"
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

// Настройки проверки токенов
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret of the data service. Without it every bearer token is
    /// resolved through the service's user endpoint.
    pub jwt_secret: Option<String>,
    pub audience: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatingConfig {
    pub view_ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

impl Default for SeatingConfig {
    fn default() -> Self {
        Self {
            view_ttl_seconds: 1800,
            sweep_interval_seconds: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    pub processing_delay_ms: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self { processing_delay_ms: 2000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub suggest_limit: usize,
    pub featured_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            suggest_limit: 10,
            featured_limit: 4,
        }
    }
}

/// First variable in `names` that is set and non-empty.
fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

impl Config {
    /// Defaults, overridden by environment variables (`.env` is loaded by the binary).
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Config::default())?;

        config::Config::builder()
            .add_source(defaults)
            .set_override_option("app.host", first_var(&["HOST"]))?
            .set_override_option("app.port", first_var(&["PORT"]))?
            .set_override_option("app.environment", first_var(&["ENVIRONMENT"]))?
            .set_override_option("app.rust_log", first_var(&["RUST_LOG"]))?
            .set_override_option("app.log_format", first_var(&["LOG_FORMAT"]))?
            .set_override_option(
                "backend.url",
                first_var(&["SUPABASE_URL", "REACT_APP_SUPABASE_URL"]),
            )?
            .set_override_option(
                "backend.anon_key",
                first_var(&["SUPABASE_ANON_KEY", "REACT_APP_SUPABASE_ANON_KEY"]),
            )?
            .set_override_option("backend.timeout_seconds", first_var(&["BACKEND_TIMEOUT_SECONDS"]))?
            .set_override_option("auth.jwt_secret", first_var(&["SUPABASE_JWT_SECRET"]))?
            .set_override_option("auth.audience", first_var(&["SUPABASE_JWT_AUDIENCE"]))?
            .set_override_option(
                "seating.view_ttl_seconds",
                first_var(&["SELECTION_VIEW_TTL_SECONDS"]),
            )?
            .set_override_option(
                "seating.sweep_interval_seconds",
                first_var(&["SELECTION_SWEEP_INTERVAL_SECONDS"]),
            )?
            .set_override_option("checkout.processing_delay_ms", first_var(&["CHECKOUT_DELAY_MS"]))?
            .set_override_option("search.debounce_ms", first_var(&["SEARCH_DEBOUNCE_MS"]))?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_placeholder_backend() {
        let config = Config::default();
        assert!(config.backend.is_placeholder());
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.checkout.processing_delay_ms, 2000);
    }

    #[test]
    fn real_credentials_are_not_placeholder() {
        let backend = BackendConfig {
            url: "https://abcd.supabase.co".to_string(),
            anon_key: "eyJhbGciOi".to_string(),
            timeout_seconds: 5,
        };
        assert!(!backend.is_placeholder());
        assert_eq!(backend.timeout(), Duration::from_secs(5));
    }
}
