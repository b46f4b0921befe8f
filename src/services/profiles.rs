use chrono::Utc;
use reqwest::Method;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::user::ProfileForm;
use crate::models::UserProfile;
use crate::services::backend::BackendClient;

const PROFILES: &str = "user_profiles";

#[derive(Serialize)]
struct ProfileRow<'a> {
    id: Uuid,
    #[serde(flatten)]
    form: &'a ProfileForm,
    updated_at: chrono::DateTime<Utc>,
}

impl BackendClient {
    /// `None` when the user never saved a profile.
    pub async fn get_profile(&self, token: &str, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let request = self
            .request(Method::GET, &self.rest_url(PROFILES), Some(token))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", user_id))]);
        let rows: Vec<UserProfile> = Self::send_json(request).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn upsert_profile(&self, token: &str, user_id: Uuid, form: &ProfileForm) -> AppResult<UserProfile> {
        let request = self
            .request(Method::POST, &self.rest_url(PROFILES), Some(token))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&[ProfileRow {
                id: user_id,
                form,
                updated_at: Utc::now(),
            }]);
        let rows: Vec<UserProfile> = Self::send_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Backend("profile was not saved".to_string()))
    }
}
