//! Cleanup of raw detected text and raw translated text.

use crate::languages::length_ratio;
use crate::reflow;

/// Normalises raw paragraph text reconstructed from OCR symbols:
/// newlines become spaces, double spaces collapse (single pass), and
/// the final character is dropped. The truncation strips the trailing
/// break artifact the symbol walk always leaves behind; callers must
/// only pass text produced by that reconstruction.
pub fn clean_text(text: &str) -> String {
    let mut text = text.replace('\n', " ").replace("  ", " ");
    text.pop();
    text
}

/// Decodes the quote entities the translation backend escapes and,
/// when the source block spans multiple lines, reflows the translation
/// over the source's line shape.
pub fn clean_translation(
    translation: &str,
    source: &str,
    target_lang: &str,
    source_langs: &[String],
) -> String {
    let translation = translation.replace("&quot;", "\"").replace("&#39;", "'");
    let source = source.trim();
    if !source.contains('\n') {
        return translation;
    }
    let source_lang = source_langs.first().map(String::as_str).unwrap_or_default();
    let factor = length_ratio(source_lang) / length_ratio(target_lang);
    reflow::reallocate(&translation, source, factor, reflow::DEFAULT_TOLERANCE)
}
