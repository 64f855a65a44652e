use serde::{Deserialize, Serialize};

/// Wire field names are kept compatible with the existing overlay
/// client: a data-URL-style base64 image plus a target language.
#[derive(Debug, Deserialize)]
pub(crate) struct TranslateImageRequest {
    pub(crate) target_lang: String,
    pub(crate) str_base64_img: String,
}

/// Four parallel arrays, one entry per retained paragraph.
#[derive(Debug, Serialize)]
pub(crate) struct TranslateImageResponse {
    pub(crate) detected_text: Vec<String>,
    pub(crate) translation: Vec<String>,
    pub(crate) translation_bounds: Vec<Vec<(i32, i32)>>,
    pub(crate) detected_languages: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: String,
}
