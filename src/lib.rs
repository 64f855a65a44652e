pub mod backends;
pub mod detection;
pub mod languages;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod reflow;
pub mod server;
pub mod settings;

pub use backends::{Detector, TranslationBackend};
pub use detection::{BreakType, DetectedBlock, TextAnnotation, extract_bounds};
pub use pipeline::{TranslationOutcome, detect_and_translate};
