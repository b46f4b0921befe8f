use chrono::Utc;
use reqwest::Method;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::backend::BackendClient;

pub const EVENT_IMAGES_BUCKET: &str = "event-images";
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Image picked in the event form.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn validate(&self) -> AppResult<()> {
        if !self.content_type.starts_with("image/") {
            return Err(AppError::Validation("Please select a valid image file".to_string()));
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::Validation("Image size must be less than 5MB".to_string()));
        }
        Ok(())
    }
}

/// `<unix millis>-<random>.<ext>`; the extension is whatever follows the last dot.
pub fn unique_object_name(file_name: &str, now_millis: i64) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or(file_name);
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}.{}", now_millis, &random[..11], ext)
}

impl BackendClient {
    pub fn public_url(&self, bucket: &str, object: &str) -> String {
        self.storage_url(&format!("object/public/{}/{}", bucket, object))
    }

    /// Uploads to the event images bucket and returns the public URL.
    pub async fn upload_image(&self, token: &str, image: ImageFile) -> AppResult<String> {
        image.validate()?;

        let object = unique_object_name(&image.file_name, Utc::now().timestamp_millis());
        let url = self.storage_url(&format!("object/{}/{}", EVENT_IMAGES_BUCKET, object));
        let size = image.bytes.len();

        let request = self
            .request(Method::POST, &url, Some(token))
            .header(reqwest::header::CONTENT_TYPE, image.content_type)
            .body(image.bytes);
        Self::send_empty(request)
            .await
            .map_err(|e| e.context("Failed to upload image"))?;

        info!("Uploaded image {} ({} bytes)", object, size);
        Ok(self.public_url(EVENT_IMAGES_BUCKET, &object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(content_type: &str, size: usize) -> ImageFile {
        ImageFile {
            file_name: "poster.png".into(),
            content_type: content_type.into(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn rejects_non_images_and_large_files() {
        assert_eq!(
            image("application/pdf", 10).validate().unwrap_err().to_string(),
            "Please select a valid image file"
        );
        assert_eq!(
            image("image/png", MAX_IMAGE_BYTES + 1).validate().unwrap_err().to_string(),
            "Image size must be less than 5MB"
        );
        assert!(image("image/jpeg", MAX_IMAGE_BYTES).validate().is_ok());
    }

    #[test]
    fn object_name_keeps_extension() {
        let name = unique_object_name("summer.fest.JPG", 1_700_000_000_000);
        assert!(name.starts_with("1700000000000-"));
        assert!(name.ends_with(".JPG"));
        assert_eq!(name.len(), "1700000000000-".len() + 11 + ".JPG".len());

        let bare = unique_object_name("poster", 1);
        assert!(bare.ends_with(".poster"));
    }
}
