use anyhow::anyhow;
use serde::Deserialize;
use serde_json::json;

use super::{TranslationBackend, TranslationFuture};

/// Google Translate v2 client. The default html format is deliberate:
/// its entity-escaped quotes are what the normaliser decodes.
#[derive(Debug, Clone)]
pub struct TranslateClient {
    key: String,
    endpoint: String,
}

impl TranslateClient {
    pub fn new(key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            endpoint: endpoint.into(),
        }
    }
}

impl TranslationBackend for TranslateClient {
    fn translate(&self, texts: Vec<String>, target_lang: String) -> TranslationFuture {
        let key = self.key.clone();
        let endpoint = self.endpoint.clone();
        Box::pin(async move {
            let client = reqwest::Client::new();
            let url = format!("{}?key={}", endpoint, key);
            let body = json!({
                "q": texts,
                "target": target_lang,
            });

            let response = client.post(&url).json(&body).send().await?;
            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(anyhow!("translate API error ({}): {}", status, text));
            }

            let parsed: TranslateResponse = response.json().await?;
            Ok(parsed
                .data
                .translations
                .into_iter()
                .map(|item| item.translated_text)
                .collect())
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TranslateResponse {
    data: TranslationsList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TranslationsList {
    translations: Vec<TranslationItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TranslationItem {
    translated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_batch_in_order() {
        let raw = r#"{
            "data": {
                "translations": [
                    {"translatedText": "Hello World", "detectedSourceLanguage": "es"},
                    {"translatedText": "He said &quot;hi&quot;"}
                ]
            }
        }"#;
        let parsed: TranslateResponse = serde_json::from_str(raw).unwrap();
        let texts = parsed
            .data
            .translations
            .iter()
            .map(|item| item.translated_text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["Hello World", "He said &quot;hi&quot;"]);
    }
}
