use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_COUNTRY: &str = "Philippines";

/// Identity as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

impl User {
    /// `full_name`/`name` from the sign-up metadata, falling back to the email.
    pub fn display_name(&self) -> String {
        ["full_name", "name"]
            .iter()
            .find_map(|key| self.user_metadata.get(key).and_then(|v| v.as_str()))
            .map(str::to_string)
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Guest".to_string())
    }
}

/// Password-grant response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

/// Row of the `user_profiles` table, keyed by user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Account settings form. Missing fields come back as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[serde(default)]
    #[validate(length(max = 100, message = "First name is too long"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Last name is too long"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            country: default_country(),
        }
    }
}

impl From<Option<UserProfile>> for ProfileForm {
    fn from(profile: Option<UserProfile>) -> Self {
        let Some(p) = profile else {
            return ProfileForm::default();
        };
        ProfileForm {
            first_name: p.first_name.unwrap_or_default(),
            last_name: p.last_name.unwrap_or_default(),
            phone: p.phone.unwrap_or_default(),
            address: p.address.unwrap_or_default(),
            city: p.city.unwrap_or_default(),
            country: p
                .country
                .filter(|c| !c.is_empty())
                .unwrap_or_else(default_country),
        }
    }
}
