//! Seams for the two external services. The concrete clients talk to
//! Google Cloud; tests substitute fakes through the same traits.

use anyhow::{Result, anyhow};
use std::future::Future;
use std::pin::Pin;

use crate::detection::TextAnnotation;

mod translate;
mod vision;

pub use translate::TranslateClient;
pub use vision::VisionClient;

pub type DetectionFuture = Pin<Box<dyn Future<Output = Result<TextAnnotation>> + Send>>;
pub type TranslationFuture = Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send>>;

/// Text detection backend: raw image bytes in, document hierarchy out.
pub trait Detector: Send + Sync {
    fn detect_document_text(&self, image: Vec<u8>) -> DetectionFuture;
}

/// Translation backend: a batch of source strings in, the translated
/// strings out in the same order.
pub trait TranslationBackend: Send + Sync {
    fn translate(&self, texts: Vec<String>, target_lang: String) -> TranslationFuture;
}

/// Resolves the Google Cloud API key: an explicit override wins over
/// the environment.
pub fn resolve_key(override_key: Option<&str>) -> Result<String> {
    if let Some(key) = override_key {
        return Ok(key.to_string());
    }
    std::env::var("GOOGLE_API_KEY")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| anyhow!("API key not found (set GOOGLE_API_KEY or pass --key)"))
}
