//! Wire model for the detection backend's document hierarchy and the
//! paragraph extraction walk that turns it into translatable blocks.

use serde::Deserialize;

/// Break marker attached to a recognised symbol. Anything the backend
/// reports beyond the three meaningful markers (sure spaces, hyphens,
/// unknown) collapses to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakType {
    Space,
    EolSureSpace,
    LineBreak,
    #[default]
    #[serde(other)]
    None,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextAnnotation {
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Page {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Block {
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paragraph {
    pub property: TextProperty,
    pub bounding_box: BoundingPoly,
    pub words: Vec<Word>,
    pub confidence: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProperty {
    pub detected_languages: Vec<DetectedLanguage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectedLanguage {
    pub language_code: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BoundingPoly {
    pub vertices: Vec<Vertex>,
}

// The backend omits zero-valued coordinates on the wire.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Word {
    pub symbols: Vec<Symbol>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Symbol {
    pub text: String,
    pub property: SymbolProperty,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SymbolProperty {
    pub detected_break: DetectedBreak,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectedBreak {
    #[serde(rename = "type")]
    pub break_type: BreakType,
}

/// One paragraph-level unit of detected text, retained for translation.
#[derive(Debug, Clone)]
pub struct DetectedBlock {
    pub text: String,
    pub bounds: BoundingPoly,
    pub detected_languages: Vec<String>,
    pub confidence: f32,
}

/// Walks the document hierarchy and collects the paragraphs worth
/// translating, in document order.
///
/// A paragraph is dropped when no language was detected, or when its
/// single detected language already is the target language. Dropped
/// paragraphs never reach the translation backend or the response.
pub fn extract_paragraphs(annotation: &TextAnnotation, target_lang: &str) -> Vec<DetectedBlock> {
    let mut blocks = Vec::new();
    for page in &annotation.pages {
        for block in &page.blocks {
            for paragraph in &block.paragraphs {
                let langs = &paragraph.property.detected_languages;
                if langs.is_empty() {
                    continue;
                }
                if langs.len() == 1 && langs[0].language_code == target_lang {
                    continue;
                }
                blocks.push(DetectedBlock {
                    text: paragraph_text(paragraph),
                    bounds: paragraph.bounding_box.clone(),
                    detected_languages: langs
                        .iter()
                        .map(|lang| lang.language_code.clone())
                        .collect(),
                    confidence: paragraph.confidence,
                });
            }
        }
    }
    blocks
}

/// Rebuilds a paragraph's text from its symbols and their break
/// markers: a space after `Space`, a space plus line close after
/// `EolSureSpace`, a bare line close after `LineBreak`.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut para = String::new();
    let mut line = String::new();
    for word in &paragraph.words {
        for symbol in &word.symbols {
            line.push_str(&symbol.text);
            match symbol.property.detected_break.break_type {
                BreakType::Space => line.push(' '),
                BreakType::EolSureSpace => {
                    line.push(' ');
                    para.push_str(&line);
                    para.push('\n');
                    line.clear();
                }
                BreakType::LineBreak => {
                    para.push_str(&line);
                    para.push('\n');
                    line.clear();
                }
                BreakType::None => {}
            }
        }
    }
    para
}

/// Flattens bounding polygons into ordered coordinate pairs. Block
/// order and per-block vertex order are preserved; the geometry is
/// passed through unvalidated.
pub fn extract_bounds<'a, I>(bounds: I) -> Vec<Vec<(i32, i32)>>
where
    I: IntoIterator<Item = &'a BoundingPoly>,
{
    bounds
        .into_iter()
        .map(|poly| {
            poly.vertices
                .iter()
                .map(|vertex| (vertex.x, vertex.y))
                .collect()
        })
        .collect()
}
