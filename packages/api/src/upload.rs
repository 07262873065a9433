//! # Media uploads
//!
//! Files (avatars, shared documents) are not sent to the backend. They go to
//! an external media host with an unsigned upload preset, and only the public
//! URL that comes back is stored on the record.
//!
//! | Kind | Route | Extra fields |
//! |------|-------|--------------|
//! | image | `POST {upload_url}/{cloud_name}/image/upload` | none |
//! | document | `POST {upload_url}/{cloud_name}/raw/upload` | `resource_type=auto` |
//!
//! The uploader has its own HTTP client, with the same request timeout as the
//! REST client, and never sees the credential token.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use store::ClientConfig;

use crate::client::http_client;
use crate::error::ApiError;
use crate::models::ResourceType;

const UPLOAD_FAILED: &str = "Upload failed";

/// What the media host returns for a stored file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UploadedMedia {
    #[serde(rename = "secure_url")]
    pub url: String,
    pub public_id: String,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Document,
}

impl MediaKind {
    pub fn for_file_name(name: &str) -> Self {
        if ResourceType::from_file_name(name).is_image() {
            MediaKind::Image
        } else {
            MediaKind::Document
        }
    }

    fn route(self) -> &'static str {
        match self {
            MediaKind::Image => "image/upload",
            MediaKind::Document => "raw/upload",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MediaUploader {
    http: reqwest::Client,
    endpoint: String,
    preset: String,
}

impl MediaUploader {
    /// Build an uploader from the `[upload]` section. Fails when the account
    /// or the preset is missing.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let upload = &config.upload;
        if upload.cloud_name.trim().is_empty() || upload.upload_preset.trim().is_empty() {
            return Err(ApiError::Upload("Media uploads are not configured".into()));
        }
        Ok(Self {
            http: http_client(config)?,
            endpoint: format!(
                "{}/{}",
                upload.upload_url.trim_end_matches('/'),
                upload.cloud_name.trim()
            ),
            preset: upload.upload_preset.trim().to_string(),
        })
    }

    /// Upload with the kind picked from the file extension.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedMedia, ApiError> {
        self.upload_as(MediaKind::for_file_name(file_name), file_name, bytes)
            .await
    }

    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedMedia, ApiError> {
        self.upload_as(MediaKind::Image, file_name, bytes).await
    }

    pub async fn upload_document(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedMedia, ApiError> {
        self.upload_as(MediaKind::Document, file_name, bytes).await
    }

    async fn upload_as(
        &self,
        kind: MediaKind,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedMedia, ApiError> {
        let size = bytes.len();
        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("upload_preset", self.preset.clone());
        if kind == MediaKind::Document {
            form = form.text("resource_type", "auto");
        }

        tracing::debug!(?kind, file_name, size, "uploading media");
        let response = self
            .http
            .post(format!("{}/{}", self.endpoint, kind.route()))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("media upload did not complete: {e}");
                ApiError::Upload(UPLOAD_FAILED.into())
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), file_name, "media host rejected upload");
            return Err(ApiError::Upload(
                host_message(&body).unwrap_or_else(|| UPLOAD_FAILED.into()),
            ));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// The media host reports failures as `{"error": {"message": "..."}}`.
fn host_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
