use anyhow::anyhow;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{DetectionFuture, Detector};
use crate::detection::TextAnnotation;

const ERROR_DOCS_URL: &str = "https://cloud.google.com/apis/design/errors";

/// Google Cloud Vision client. One handle is built at startup and
/// cloned into every request.
#[derive(Debug, Clone)]
pub struct VisionClient {
    key: String,
    endpoint: String,
}

impl VisionClient {
    pub fn new(key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            endpoint: endpoint.into(),
        }
    }
}

impl Detector for VisionClient {
    fn detect_document_text(&self, image: Vec<u8>) -> DetectionFuture {
        let key = self.key.clone();
        let endpoint = self.endpoint.clone();
        Box::pin(async move {
            let client = reqwest::Client::new();
            let url = format!("{}/images:annotate?key={}", endpoint, key);
            // DOCUMENT_TEXT_DETECTION suits dense text; TEXT_DETECTION
            // would be the sparse-text alternative.
            let body = json!({
                "requests": [{
                    "image": { "content": BASE64.encode(&image) },
                    "features": [{ "type": "DOCUMENT_TEXT_DETECTION" }]
                }]
            });

            let response = client.post(&url).json(&body).send().await?;
            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(anyhow!("vision API error ({}): {}", status, text));
            }

            let parsed: AnnotateImagesResponse = response.json().await?;
            let result = parsed
                .responses
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("vision API returned no responses"))?;
            if let Some(error) = result.error {
                debug!(code = error.code, "vision API reported an error");
                return Err(anyhow!(
                    "{}\nFor more info on error messages, check: {}",
                    error.message,
                    ERROR_DOCS_URL
                ));
            }
            Ok(result.full_text_annotation.unwrap_or_default())
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnnotateImagesResponse {
    responses: Vec<AnnotateImageResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AnnotateImageResult {
    full_text_annotation: Option<TextAnnotation>,
    error: Option<Status>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Status {
    code: i32,
    message: String,
}
