//! Application configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/pantry/config.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Non-secret settings can then be overridden from the environment:
//! - `EDAMAM_BASE_URL`: Recipe search API base URL
//! - `AI_BACKEND`: Completion backend (openrouter, mock)
//! - `OPENROUTER_BASE_URL`: Completion API base URL
//! - `OPENROUTER_MODEL`: Completion model
//!
//! Credentials never live here. `EDAMAM_APP_ID` / `EDAMAM_APP_KEY` are read by
//! the search client and `OPENROUTER_API_KEY` only by the completion backend.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/pantry.toml");

/// Recipe search API settings
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub base_url: String,
}

/// Completion API settings
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    /// Backend name (openrouter, mock)
    pub backend: String,
    pub base_url: String,
    pub model: String,
}

/// Full application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub completion: CompletionConfig,
    /// Ingredient chips offered to the user
    pub suggested_ingredients: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                base_url: "https://api.edamam.com".to_string(),
            },
            completion: CompletionConfig {
                backend: "openrouter".to_string(),
                base_url: "https://openrouter.ai/api/v1".to_string(),
                model: "mistralai/mistral-7b-instruct:free".to_string(),
            },
            suggested_ingredients: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load config from the default override location (or embedded defaults),
    /// then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(default_config_path().as_deref())?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load the embedded defaults, then lay a specific override file on top
    /// when it exists
    ///
    /// Keys the override leaves out keep their embedded values.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();
        merge_config(&mut config, DEFAULT_CONFIG)?;

        if let Some(path) = path.filter(|p| p.exists()) {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
            merge_config(&mut config, &content)?;
            tracing::debug!(path = %path.display(), "Loaded config override");
        }

        Ok(config)
    }

    /// Apply overrides from a key lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup("EDAMAM_BASE_URL") {
            self.search.base_url = url;
        }
        if let Some(backend) = lookup("AI_BACKEND") {
            self.completion.backend = backend;
        }
        if let Some(url) = lookup("OPENROUTER_BASE_URL") {
            self.completion.base_url = url;
        }
        if let Some(model) = lookup("OPENROUTER_MODEL") {
            self.completion.model = model;
        }
    }
}

/// Default override location for the config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pantry").join("config.toml"))
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    search: Option<RawSearch>,
    completion: Option<RawCompletion>,
    ui: Option<RawUi>,
}

#[derive(Debug, Deserialize)]
struct RawSearch {
    base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCompletion {
    backend: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawUi {
    suggested_ingredients: Option<Vec<String>>,
}

/// Parse TOML config content and apply the keys it sets to `config`
fn merge_config(config: &mut AppConfig, content: &str) -> Result<()> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    if let Some(search) = raw.search {
        if let Some(url) = search.base_url {
            config.search.base_url = url;
        }
    }

    if let Some(completion) = raw.completion {
        if let Some(backend) = completion.backend {
            config.completion.backend = backend;
        }
        if let Some(url) = completion.base_url {
            config.completion.base_url = url;
        }
        if let Some(model) = completion.model {
            config.completion.model = model;
        }
    }

    if let Some(ui) = raw.ui {
        if let Some(items) = ui.suggested_ingredients {
            config.suggested_ingredients = items;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_embedded_defaults() {
        let config = AppConfig::load_from(None).unwrap();
        assert_eq!(config.search.base_url, "https://api.edamam.com");
        assert_eq!(config.completion.backend, "openrouter");
        assert_eq!(config.completion.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.completion.model, "mistralai/mistral-7b-instruct:free");
        assert_eq!(config.suggested_ingredients.len(), 10);
        assert_eq!(config.suggested_ingredients[0], "Tomato");
    }

    #[test]
    fn test_missing_override_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.toml");
        let config = AppConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config, AppConfig::load_from(None).unwrap());
    }

    #[test]
    fn test_partial_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[completion]
model = "meta-llama/llama-3.1-8b-instruct"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.completion.model, "meta-llama/llama-3.1-8b-instruct");
        // Untouched keys and sections keep the embedded values
        assert_eq!(config.completion.backend, "openrouter");
        assert_eq!(config.completion.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.search.base_url, "https://api.edamam.com");
        assert_eq!(config.suggested_ingredients.len(), 10);
        assert_eq!(config.suggested_ingredients[9], "Butter");
    }

    #[test]
    fn test_override_replaces_suggestions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\nsuggested_ingredients = [\"Leek\"]\n").unwrap();

        let config = AppConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.suggested_ingredients, vec!["Leek"]);
        assert_eq!(config.completion.model, "mistralai/mistral-7b-instruct:free");
    }

    #[test]
    fn test_max_tokens_key_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[completion]\nmodel = \"x\"\nmax_tokens = 256\n").unwrap();

        let config = AppConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.completion.model, "x");
    }

    #[test]
    fn test_invalid_toml() {
        let mut config = AppConfig::default();
        let result = merge_config(&mut config, "[completion\nmodel = ");
        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_override_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\nbase_url = 3\n").unwrap();

        assert!(matches!(
            AppConfig::load_from(Some(&path)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_apply_overrides() {
        let env: HashMap<&str, &str> = [
            ("EDAMAM_BASE_URL", "http://127.0.0.1:9000"),
            ("AI_BACKEND", "mock"),
            ("OPENROUTER_MODEL", "test-model"),
            ("OPENROUTER_BASE_URL", "   "),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::load_from(None).unwrap();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.search.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.completion.backend, "mock");
        assert_eq!(config.completion.model, "test-model");
        // Blank values are ignored
        assert_eq!(config.completion.base_url, "https://openrouter.ai/api/v1");
    }
}
