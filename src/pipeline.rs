//! Per-request orchestration: detect, filter, translate, reflow,
//! assemble. No state survives a request.

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::backends::{Detector, TranslationBackend};
use crate::detection::{extract_bounds, extract_paragraphs};
use crate::normalize::{clean_text, clean_translation};

/// Four parallel vectors, indexed identically: one entry per paragraph
/// retained after language filtering.
#[derive(Debug, Default)]
pub struct TranslationOutcome {
    pub detected_text: Vec<String>,
    pub translation: Vec<String>,
    pub translation_bounds: Vec<Vec<(i32, i32)>>,
    pub detected_languages: Vec<Vec<String>>,
}

/// Runs the full detect-then-translate flow for one image.
///
/// Zero qualifying paragraphs is a valid empty result and makes no
/// translation call. A translation batch whose length differs from the
/// number of detected regions means the backend broke its ordering
/// contract and fails the request.
pub async fn detect_and_translate<D, T>(
    detector: &D,
    backend: &T,
    image: &[u8],
    target_lang: &str,
) -> Result<TranslationOutcome>
where
    D: Detector,
    T: TranslationBackend,
{
    let annotation = detector.detect_document_text(image.to_vec()).await?;
    let blocks = extract_paragraphs(&annotation, target_lang);
    if blocks.is_empty() {
        info!("no detected text to translate");
        return Ok(TranslationOutcome::default());
    }

    // The raw reconstructed text is what gets translated and returned;
    // the normalised form is only logged.
    for block in &blocks {
        debug!(
            text = %clean_text(&block.text),
            languages = ?block.detected_languages,
            confidence = block.confidence,
            "detected paragraph",
        );
    }

    let texts = blocks
        .iter()
        .map(|block| block.text.clone())
        .collect::<Vec<_>>();
    let translated = backend.translate(texts, target_lang.to_string()).await?;
    if translated.len() != blocks.len() {
        bail!(
            "inconsistency between number of texts ({}) and translations ({})",
            blocks.len(),
            translated.len()
        );
    }

    let translation = translated
        .iter()
        .zip(&blocks)
        .map(|(text, block)| {
            clean_translation(text, &block.text, target_lang, &block.detected_languages)
        })
        .collect();

    Ok(TranslationOutcome {
        detected_text: blocks.iter().map(|block| block.text.clone()).collect(),
        translation,
        translation_bounds: extract_bounds(blocks.iter().map(|block| &block.bounds)),
        detected_languages: blocks
            .into_iter()
            .map(|block| block.detected_languages)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{DetectionFuture, TranslationFuture};
    use crate::detection::fixtures::{annotation, paragraph, word};
    use crate::detection::{BreakType, TextAnnotation};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeDetector {
        annotation: TextAnnotation,
        calls: Arc<AtomicUsize>,
    }

    impl Detector for FakeDetector {
        fn detect_document_text(&self, _image: Vec<u8>) -> DetectionFuture {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let annotation = self.annotation.clone();
            Box::pin(async move { Ok(annotation) })
        }
    }

    struct FakeTranslator {
        replies: Vec<String>,
        calls: Arc<AtomicUsize>,
    }

    impl TranslationBackend for FakeTranslator {
        fn translate(&self, _texts: Vec<String>, _target_lang: String) -> TranslationFuture {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let replies = self.replies.clone();
            Box::pin(async move { Ok(replies) })
        }
    }

    fn counters() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (Arc::new(AtomicUsize::new(0)), Arc::new(AtomicUsize::new(0)))
    }

    #[tokio::test]
    async fn single_paragraph_end_to_end() {
        let (detect_calls, translate_calls) = counters();
        let detector = FakeDetector {
            annotation: annotation(vec![paragraph(
                vec![
                    word("Hola", BreakType::EolSureSpace),
                    word("Mundo", BreakType::LineBreak),
                ],
                &["es"],
                &[(1, 2), (3, 2), (3, 4), (1, 4)],
            )]),
            calls: detect_calls.clone(),
        };
        let backend = FakeTranslator {
            replies: vec!["Hello World".to_string()],
            calls: translate_calls.clone(),
        };

        let outcome = detect_and_translate(&detector, &backend, b"img", "en")
            .await
            .unwrap();

        assert_eq!(outcome.detected_text, vec!["Hola \nMundo\n"]);
        assert_eq!(outcome.translation, vec!["Hello\nWorld"]);
        assert_eq!(
            outcome.translation_bounds,
            vec![vec![(1, 2), (3, 2), (3, 4), (1, 4)]]
        );
        assert_eq!(outcome.detected_languages, vec![vec!["es".to_string()]]);
        assert_eq!(detect_calls.load(Ordering::SeqCst), 1);
        assert_eq!(translate_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_paragraphs_short_circuits_translation() {
        let (detect_calls, translate_calls) = counters();
        let detector = FakeDetector {
            annotation: annotation(vec![paragraph(
                vec![word("Hello", BreakType::LineBreak)],
                &["en"],
                &[(0, 0), (5, 0), (5, 5), (0, 5)],
            )]),
            calls: detect_calls.clone(),
        };
        let backend = FakeTranslator {
            replies: Vec::new(),
            calls: translate_calls.clone(),
        };

        let outcome = detect_and_translate(&detector, &backend, b"img", "en")
            .await
            .unwrap();

        assert!(outcome.detected_text.is_empty());
        assert!(outcome.translation.is_empty());
        assert!(outcome.translation_bounds.is_empty());
        assert!(outcome.detected_languages.is_empty());
        assert_eq!(translate_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn short_translation_batch_is_a_fatal_inconsistency() {
        let (detect_calls, translate_calls) = counters();
        let detector = FakeDetector {
            annotation: annotation(vec![
                paragraph(vec![word("Uno", BreakType::LineBreak)], &["es"], &[(0, 0)]),
                paragraph(vec![word("Dos", BreakType::LineBreak)], &["es"], &[(1, 1)]),
            ]),
            calls: detect_calls.clone(),
        };
        let backend = FakeTranslator {
            replies: vec!["One".to_string()],
            calls: translate_calls.clone(),
        };

        let err = detect_and_translate(&detector, &backend, b"img", "en")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("inconsistency"));
    }

    #[tokio::test]
    async fn detection_failure_propagates() {
        struct FailingDetector;
        impl Detector for FailingDetector {
            fn detect_document_text(&self, _image: Vec<u8>) -> DetectionFuture {
                Box::pin(async { Err(anyhow::anyhow!("backend says no")) })
            }
        }
        let (_, translate_calls) = counters();
        let backend = FakeTranslator {
            replies: Vec::new(),
            calls: translate_calls.clone(),
        };

        let err = detect_and_translate(&FailingDetector, &backend, b"img", "en")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("backend says no"));
        assert_eq!(translate_calls.load(Ordering::SeqCst), 0);
    }
}
