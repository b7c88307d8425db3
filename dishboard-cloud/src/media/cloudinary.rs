//! Cloudinary unsigned uploads via REST API (no SDK dependency)
//!
//! POST https://api.cloudinary.com/v1_1/{cloud}/upload — multipart `file` + `upload_preset`
//! Returns: `secure_url` stored as the dish `imageUrl`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

const CLOUDINARY_API: &str = "https://api.cloudinary.com/v1_1";

/// Uploads can be large; allow more time than store calls
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest slice of a non-JSON error body kept in the message
const ERROR_SNIPPET_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("upload response has no secure_url")]
    MissingUrl,
}

/// Public image hosting
#[async_trait]
pub trait ImageHost: Send + Sync + 'static {
    /// Store `bytes` and return the public HTTPS URL
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, UploadError>;
}

#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    http: reqwest::Client,
    cloud_name: String,
    upload_preset: String,
}

impl CloudinaryClient {
    pub fn new(
        cloud_name: impl Into<String>,
        upload_preset: impl Into<String>,
    ) -> Result<Self, UploadError> {
        let http = reqwest::Client::builder().timeout(UPLOAD_TIMEOUT).build()?;
        Ok(Self {
            http,
            cloud_name: cloud_name.into(),
            upload_preset: upload_preset.into(),
        })
    }

    fn upload_url(&self) -> String {
        format!("{CLOUDINARY_API}/{}/upload", self.cloud_name)
    }
}

#[async_trait]
impl ImageHost for CloudinaryClient {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, UploadError> {
        let size = bytes.len();
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self.http.post(self.upload_url()).multipart(form).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let url = parse_upload_response(status, &text)?;
        tracing::info!(file_name = %file_name, size, url = %url, "Image uploaded to Cloudinary");
        Ok(url)
    }
}

/// Interpret an upload reply. Error pages from proxies need not be JSON.
fn parse_upload_response(status: StatusCode, text: &str) -> Result<String, UploadError> {
    let body = serde_json::from_str::<Value>(text).ok();

    if !status.is_success() {
        let message = body
            .as_ref()
            .and_then(|b| b["error"]["message"].as_str())
            .map(String::from)
            .unwrap_or_else(|| error_snippet(text));
        return Err(UploadError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    body.as_ref().map_or(Err(UploadError::MissingUrl), secure_url)
}

fn error_snippet(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return "unknown error".to_string();
    }
    text.chars().take(ERROR_SNIPPET_LEN).collect()
}

fn secure_url(body: &Value) -> Result<String, UploadError> {
    body["secure_url"]
        .as_str()
        .filter(|u| !u.is_empty())
        .map(String::from)
        .ok_or(UploadError::MissingUrl)
}
