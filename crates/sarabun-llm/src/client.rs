//! Chat-completions transport for the extraction oracle.
//!
//! One request shape covers both pipelines: an instruction prompt, plus an
//! optional image attachment carried as a base64 `data:` URL in the
//! multimodal content array. The call blocks the caller until the remote
//! reply or a network-level failure; there is no streaming and no retry.

use crate::config::OracleConfig;
use crate::OracleError;
use async_trait::async_trait;
use base64::Engine as _;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// An image upload, sniffed and ready to embed in a request.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

impl ImageAttachment {
    /// Sniff the image format from the bytes. Only the formats the upload
    /// form accepts (JPEG, PNG) are allowed through.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, OracleError> {
        let format = image::guess_format(&bytes)
            .map_err(|e| OracleError::Payload(format!("unrecognized image: {e}")))?;
        let mime_type = match format {
            image::ImageFormat::Jpeg => "image/jpeg",
            image::ImageFormat::Png => "image/png",
            other => {
                return Err(OracleError::Payload(format!(
                    "unsupported image format: {other:?}"
                )))
            }
        };
        Ok(Self { bytes, mime_type })
    }

    fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// One extraction request: the rendered instruction prompt, plus the image
/// for the receipt pipeline. The budget pipeline interpolates its
/// page-bounded document text into the prompt instead.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    pub prompt: String,
    pub image: Option<ImageAttachment>,
}

impl OracleRequest {
    pub fn text(prompt: String) -> Self {
        Self {
            prompt,
            image: None,
        }
    }

    pub fn with_image(prompt: String, image: ImageAttachment) -> Self {
        Self {
            prompt,
            image: Some(image),
        }
    }
}

/// The oracle seam: anything that maps a request to raw reply text.
///
/// Production uses [`GroqClient`]; tests substitute a scripted oracle.
#[async_trait]
pub trait ExtractionOracle: Send + Sync {
    async fn complete(&self, request: OracleRequest) -> Result<String, OracleError>;
}

/// Chat-completions client for Groq's OpenAI-compatible endpoint.
pub struct GroqClient {
    client: reqwest::Client,
    config: OracleConfig,
}

impl GroqClient {
    pub fn new(config: OracleConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");
        Self { client, config }
    }
}

#[async_trait]
impl ExtractionOracle for GroqClient {
    async fn complete(&self, request: OracleRequest) -> Result<String, OracleError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let content = match &request.image {
            Some(attachment) => json!([
                {"type": "text", "text": request.prompt},
                {"type": "image_url", "image_url": {"url": attachment.to_data_url()}}
            ]),
            None => json!(request.prompt),
        };

        // Temperature 0: extraction wants the most literal reading.
        let body = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": content}],
            "temperature": 0,
        });

        debug!("querying oracle model {}", self.config.model);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Transport(format!("status {status}: {body}")));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        let reply = data["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();
        debug!("oracle replied with {} chars", reply.len());
        Ok(reply)
    }
}
