//! Image function client.
//!
//! News images are stored by a remote, bearer-token authenticated function:
//! `POST upload-image` takes the file as multipart and answers `{ "url" }`,
//! `DELETE delete-image` takes the URL as JSON. Uploads happen BEFORE the
//! database write so a failed upload never leaves a post pointing nowhere.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ImageServiceConfig;

/// Errors that can occur when talking to the image function.
#[derive(Debug, Error)]
pub enum ImageError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Client for the image function.
#[derive(Clone)]
pub struct ImageClient {
    client: reqwest::Client,
    base_url: String,
}

impl ImageClient {
    /// Create a new image client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ImageServiceConfig) -> Result<Self, ImageError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_token.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| ImageError::Parse(format!("Invalid token format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Upload an image, returning its public URL.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the function rejects the file.
    pub async fn upload(
        &self,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    ) -> Result<String, ImageError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&content_type)
            .map_err(|e| ImageError::Parse(format!("Invalid content type: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!("{}/upload-image", self.base_url);
        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ImageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ImageError::Parse(e.to_string()))?;
        Ok(body.url)
    }

    /// Delete a previously uploaded image by URL.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the function answers an error.
    pub async fn delete(&self, image_url: &str) -> Result<(), ImageError> {
        let url = format!("{}/delete-image", self.base_url);
        let body = serde_json::json!({ "url": image_url });

        let response = self.client.delete(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ImageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
