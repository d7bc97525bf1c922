//! HTTP client for the remote video-generation service.
//!
//! One POST per call, multipart body, no retry and no client-side timeout.

use async_trait::async_trait;
use reqwest::{header, multipart, Client};

use super::types::{
    GenerateResponse, PhotoFile, Result, SubmitError, VideoReference, VideoRequest,
};

/// Hosted generation endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://rapidshortsfeb1-h67lx7up6a-uc.a.run.app/generate_video/";

#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Submit one request and wait for the generated video's location.
    async fn generate(&self, request: &VideoRequest) -> Result<VideoReference>;
}

pub struct HttpVideoGenerator {
    client: Client,
    endpoint: String,
}

impl HttpVideoGenerator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpVideoGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// Build the multipart body. Every field is present, blank or not; the
/// bundled photo stands in when the request carries none.
pub fn build_form(request: &VideoRequest) -> Result<multipart::Form> {
    let names = request.variant.field_names();

    let mut form = multipart::Form::new()
        .text(names.display_name, request.display_name.clone())
        .text(names.handle, request.handle.clone());

    if let Some((color, bgcolor, font)) = names.styling {
        form = form
            .text(color, request.styling.font_color.clone())
            .text(bgcolor, request.styling.background_color.clone())
            .text(
                font,
                request.styling.font.map(|f| f.id()).unwrap_or_default().to_string(),
            );
    }

    form = form.text(
        names.voice,
        request.voice.map(|v| v.id()).unwrap_or_default().to_string(),
    );

    if let Some(temp) = names.template {
        form = form.text(temp, request.template.unwrap_or(0).to_string());
    }

    form = form.text(names.text, request.text.clone());

    let photo = request.photo.clone().unwrap_or_else(PhotoFile::default_photo);
    let part = multipart::Part::bytes(photo.bytes)
        .file_name(photo.file_name)
        .mime_str(&photo.mime)
        .map_err(|e| SubmitError::Multipart(e.to_string()))?;

    Ok(form.part(names.photo, part))
}

#[async_trait]
impl VideoGenerator for HttpVideoGenerator {
    async fn generate(&self, request: &VideoRequest) -> Result<VideoReference> {
        let form = build_form(request)?;

        log::info!(
            "Submitting video request to {} (variant={:?}, text_len={}, custom_photo={})",
            self.endpoint,
            request.variant,
            request.text.chars().count(),
            request.photo.is_some()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: GenerateResponse = serde_json::from_slice(&bytes)?;
        let reference = parsed.into_reference();
        log::info!("Video service returned reference {:?}", reference.as_str());
        Ok(reference)
    }
}
