/// Average word/sentence length relative to English, per
/// https://www.quora.com/What-are-the-longest-and-shortest-languages-in-terms-of-average-length-of-words
///
/// Used only as a heuristic multiplier when reflowing translated text
/// over the source block's line shape. Unknown codes are neutral (1.0).
pub fn length_ratio(code: &str) -> f64 {
    match normalize_code(code).as_str() {
        "en" | "es" | "ar" => 1.0,
        "fr" => 1.07,
        "it" | "de" => 1.12,
        "el" => 0.88,
        "ru" => 0.93,
        "zh" => 0.29,
        _ => 1.0,
    }
}

/// Shape check for an ISO 639-1 code: exactly two ASCII letters.
pub fn is_iso_639_code(code: &str) -> bool {
    let code = code.trim();
    code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic())
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}
