use std::{fs, io, num::NonZeroUsize, path::Path, time::Duration};

use anyhow::Context;
use client_core::{debounce::DEFAULT_SEARCH_QUIET_PERIOD, projection::DEFAULT_PAGE_SIZE};
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "bookshelf.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub page_size: NonZeroUsize,
    pub search_debounce: Duration,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000/api/books".into(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_SEARCH_QUIET_PERIOD,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_base_url: Option<String>,
    page_size: Option<usize>,
    search_debounce_ms: Option<u64>,
    log_filter: Option<String>,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file if present, then environment overrides.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
            settings.apply_file(file_cfg);
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()));
        }
    }

    settings.apply_env(env);
    Ok(settings)
}

impl Settings {
    fn apply_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file_cfg.page_size.and_then(NonZeroUsize::new) {
            self.page_size = v;
        }
        if let Some(v) = file_cfg.search_debounce_ms {
            self.search_debounce = Duration::from_millis(v);
        }
        if let Some(v) = file_cfg.log_filter {
            self.log_filter = v;
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("BOOKSHELF_API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = env("APP__API_BASE_URL") {
            self.api_base_url = v;
        }

        if let Some(v) = env("APP__PAGE_SIZE") {
            if let Some(parsed) = v.trim().parse::<usize>().ok().and_then(NonZeroUsize::new) {
                self.page_size = parsed;
            }
        }

        if let Some(v) = env("APP__SEARCH_DEBOUNCE_MS") {
            if let Ok(parsed) = v.trim().parse::<u64>() {
                self.search_debounce = Duration::from_millis(parsed);
            }
        }

        if let Some(v) = env("APP__LOG_FILTER") {
            self.log_filter = v;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
