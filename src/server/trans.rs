use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;

use super::models::{TranslateImageRequest, TranslateImageResponse};
use super::state::ServerState;
use crate::languages;
use crate::pipeline::detect_and_translate;

#[derive(Debug)]
pub(crate) struct ServerError {
    pub(crate) status: axum::http::StatusCode,
    pub(crate) message: String,
}

impl ServerError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: axum::http::StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            status: axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

pub(crate) async fn translate_image(
    state: &ServerState,
    request: TranslateImageRequest,
) -> Result<TranslateImageResponse, ServerError> {
    let target_lang = request.target_lang.trim();
    if !languages::is_iso_639_code(target_lang) {
        return Err(ServerError::bad_request(format!(
            "target_lang must be an ISO 639-1 code, got '{}'",
            request.target_lang
        )));
    }

    let image = decode_image(&request.str_base64_img)?;
    debug!(bytes = image.len(), target_lang, "decoded inbound image");

    let outcome = detect_and_translate(&state.vision, &state.translate, &image, target_lang)
        .await
        .map_err(ServerError::from)?;

    Ok(TranslateImageResponse {
        detected_text: outcome.detected_text,
        translation: outcome.translation,
        translation_bounds: outcome.translation_bounds,
        detected_languages: outcome.detected_languages,
    })
}

/// Strips the data-URL header (everything through the first comma) and
/// decodes the remainder. Rejected before any backend is contacted.
fn decode_image(payload: &str) -> Result<Vec<u8>, ServerError> {
    let (_, encoded) = payload.split_once(',').ok_or_else(|| {
        ServerError::bad_request("str_base64_img must carry a comma-delimited data-URL prefix")
    })?;
    BASE64
        .decode(encoded)
        .map_err(|err| ServerError::bad_request(format!("invalid base64 image data: {}", err)))
}
