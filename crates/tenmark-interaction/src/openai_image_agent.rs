//! OpenAiImageAgent - Direct REST API implementation for OpenAI image models.
//!
//! Calls the Images Generations endpoint. The response carries either a
//! hosted URL or a base64 payload; both are normalized into one
//! [`ImageSource`] so downstream code never branches on delivery format.

use crate::agent::{AgentError, ImageAgent, ImageRequest};
use crate::openai_chat_agent::{map_http_error, parse_retry_after};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use tenmark_core::ImageSource;
use tenmark_core::secret::load_secret_config;

const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";
const BASE_URL: &str = "https://api.openai.com/v1/images/generations";

/// Agent implementation that talks to the OpenAI image HTTP API.
#[derive(Clone)]
pub struct OpenAiImageAgent {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiImageAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Loads configuration from ~/.config/tenmark/secret.json or environment
    /// variables (`OPENAI_API_KEY`, `OPENAI_IMAGE_MODEL_NAME`).
    pub fn try_from_env() -> Result<Self, AgentError> {
        if let Ok(secret_config) = load_secret_config() {
            if let Some(openai_config) = secret_config.openai {
                let model = openai_config
                    .image_model_name
                    .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.into());
                return Ok(Self::new(openai_config.api_key, model));
            }
        }

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            AgentError::ExecutionFailed(
                "OPENAI_API_KEY not found in ~/.config/tenmark/secret.json or environment variables"
                    .into(),
            )
        })?;

        let model =
            env::var("OPENAI_IMAGE_MODEL_NAME").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    async fn send_request(&self, body: &ImageGenerationRequest) -> Result<ImageSource, AgentError> {
        let response = self
            .client
            .post(BASE_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| AgentError::ProcessError {
                status_code: None,
                message: format!("OpenAI image request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: ImageGenerationResponse = response.json().await.map_err(|err| {
            AgentError::Other(format!("Failed to parse OpenAI image response: {err}"))
        })?;

        extract_image_source(parsed)
    }
}

#[async_trait]
impl ImageAgent for OpenAiImageAgent {
    async fn generate(&self, request: ImageRequest) -> Result<ImageSource, AgentError> {
        let body = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: request.prompt,
            n: 1,
            size: request.size,
            quality: request.quality,
        };

        self.send_request(&body).await
    }
}

#[derive(Serialize)]
struct ImageGenerationRequest {
    model: String,
    prompt: String,
    n: u8,
    size: String,
    quality: String,
}

#[derive(Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    b64_json: Option<String>,
}

/// Normalizes the provider payload. Base64 payloads are validated before
/// being wrapped: a corrupt payload counts as a failed generation, not an
/// image the mockup will choke on later.
fn extract_image_source(response: ImageGenerationResponse) -> Result<ImageSource, AgentError> {
    let Some(image) = response.data.into_iter().next() else {
        return Err(AgentError::ExecutionFailed(
            "OpenAI API returned no image data in the response".into(),
        ));
    };

    if let Some(b64) = image.b64_json {
        BASE64_STANDARD.decode(&b64).map_err(|err| {
            AgentError::ExecutionFailed(format!("OpenAI image payload is not valid base64: {err}"))
        })?;
        return Ok(ImageSource::DataUri(format!("data:image/png;base64,{b64}")));
    }

    if let Some(url) = image.url {
        return Ok(ImageSource::Url(url));
    }

    Err(AgentError::ExecutionFailed(
        "OpenAI image response contained neither url nor b64_json".into(),
    ))
}
