use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;
use url::Url;

pub const SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub session_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:5000".into(),
            session_file: default_session_file(),
        }
    }
}

impl Settings {
    pub fn api_base_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(self.api_url.trim())
            .with_context(|| format!("invalid api url '{}'", self.api_url))?;
        if url.cannot_be_a_base() {
            anyhow::bail!("api url '{}' cannot be used as a base url", self.api_url);
        }
        Ok(url)
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_overrides(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("API_URL") {
        settings.api_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_URL") {
        settings.api_url = v;
    }

    if let Ok(v) = std::env::var("APP__SESSION_FILE") {
        settings.session_file = PathBuf::from(v);
    }

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("api_url") {
            settings.api_url = v.clone();
        }
        if let Some(v) = file_cfg.get("session_file") {
            settings.session_file = PathBuf::from(v);
        }
    }
}

fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("freela"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("session.json")
}
