use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_SETTINGS_TOML: &str = include_str!("../settings.toml");

#[derive(Debug, Clone)]
pub struct Settings {
    pub listen: String,
    pub vision_endpoint: String,
    pub translate_endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8090".to_string(),
            vision_endpoint: "https://vision.googleapis.com/v1".to_string(),
            translate_endpoint: "https://translation.googleapis.com/language/translate/v2"
                .to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    server: Option<ServerSettings>,
    vision: Option<BackendSettings>,
    translate: Option<BackendSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSettings {
    listen: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BackendSettings {
    endpoint: Option<String>,
}

impl Settings {
    fn merge(&mut self, file: SettingsFile) {
        if let Some(server) = file.server {
            if let Some(listen) = server.listen {
                self.listen = listen;
            }
        }
        if let Some(vision) = file.vision {
            if let Some(endpoint) = vision.endpoint {
                self.vision_endpoint = endpoint;
            }
        }
        if let Some(translate) = file.translate {
            if let Some(endpoint) = translate.endpoint {
                self.translate_endpoint = endpoint;
            }
        }
    }
}

/// Loads settings by layering, in order: the embedded defaults,
/// `settings.toml` and `settings.local.toml` from the working
/// directory, then an explicitly requested file (which must exist).
pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();
    let embedded: SettingsFile = toml::from_str(DEFAULT_SETTINGS_TOML)
        .with_context(|| "failed to parse embedded settings")?;
    settings.merge(embedded);

    let mut ordered_paths = Vec::new();
    ordered_paths.push(PathBuf::from("settings.toml"));
    ordered_paths.push(PathBuf::from("settings.local.toml"));
    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }

    for path in ordered_paths {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            let parsed: SettingsFile = toml::from_str(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
            settings.merge(parsed);
        }
    }
    Ok(settings)
}
