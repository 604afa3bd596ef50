use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use shared::domain::Edge;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "codemorph.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub engine_url: String,
    pub preferred_source: String,
    pub preferred_target: String,
    pub export_dir: PathBuf,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        let (source, target) = client_core::DEFAULT_PREFERRED_PAIR;
        Self {
            engine_url: "http://127.0.0.1:8000".into(),
            preferred_source: source.into(),
            preferred_target: target.into(),
            export_dir: PathBuf::from("."),
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn preferred_edge(&self) -> Option<Edge> {
        if self.preferred_source.trim().is_empty() || self.preferred_target.trim().is_empty() {
            return None;
        }
        Some(Edge::new(
            self.preferred_source.as_str(),
            self.preferred_target.as_str(),
        ))
    }
}

/// Defaults, then the settings file, then environment variables.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => apply_file_settings(&mut settings, &file_cfg),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring unreadable settings file")
            }
        }
    }

    if let Ok(v) = std::env::var("CODEMORPH_ENGINE_URL") {
        settings.engine_url = v;
    }
    if let Ok(v) = std::env::var("APP__ENGINE_URL") {
        settings.engine_url = v;
    }

    if let Ok(v) = std::env::var("APP__PREFERRED_SOURCE") {
        settings.preferred_source = v;
    }
    if let Ok(v) = std::env::var("APP__PREFERRED_TARGET") {
        settings.preferred_target = v;
    }

    if let Ok(v) = std::env::var("APP__EXPORT_DIR") {
        settings.export_dir = PathBuf::from(v);
    }

    if let Ok(v) = std::env::var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}

fn apply_file_settings(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("engine_url") {
        settings.engine_url = v.clone();
    }
    if let Some(v) = file_cfg.get("preferred_source") {
        settings.preferred_source = v.clone();
    }
    if let Some(v) = file_cfg.get("preferred_target") {
        settings.preferred_target = v.clone();
    }
    if let Some(v) = file_cfg.get("export_dir") {
        settings.export_dir = PathBuf::from(v);
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
}

/// Validates the engine base URL and strips trailing slashes so endpoint
/// paths can be appended directly.
pub fn normalize_engine_url(raw_engine_url: &str) -> anyhow::Result<String> {
    let raw_engine_url = raw_engine_url.trim();
    let raw_engine_url = if raw_engine_url.is_empty() {
        Settings::default().engine_url
    } else if raw_engine_url.contains("://") {
        raw_engine_url.to_string()
    } else {
        format!("http://{raw_engine_url}")
    };

    let url = Url::parse(&raw_engine_url)
        .with_context(|| format!("invalid translation engine url '{raw_engine_url}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!(
            "unsupported scheme '{}' for translation engine url '{raw_engine_url}'",
            url.scheme()
        );
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
