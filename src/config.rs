use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::Lexicon;
use crate::loader::{
    BuiltinLexicon, FileLexicon, DEFAULT_INTENSITY_MODIFIERS, DEFAULT_NEGATIONS,
    DEFAULT_NORMALISATION,
};

/// Environment variable overriding `log_level`.
pub const LOG_ENV: &str = "EMPATHYSCOPE_LOG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoticons_path: Option<PathBuf>,
    #[serde(default = "default_normalisation")]
    pub normalisation: f64,
    #[serde(default = "default_negations")]
    pub negations: Vec<String>,
    #[serde(default = "default_intensity_modifiers")]
    pub intensity_modifiers: Vec<String>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            words_path: None,
            emoticons_path: None,
            normalisation: default_normalisation(),
            negations: default_negations(),
            intensity_modifiers: default_intensity_modifiers(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_normalisation() -> f64 {
    DEFAULT_NORMALISATION
}

fn default_negations() -> Vec<String> {
    DEFAULT_NEGATIONS.iter().map(|w| w.to_string()).collect()
}

fn default_intensity_modifiers() -> Vec<String> {
    DEFAULT_INTENSITY_MODIFIERS.iter().map(|w| w.to_string()).collect()
}

impl Config {
    /// Load `config.json` from `data_dir`, creating it with defaults on
    /// first use.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(Self::default_data_dir);

        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        let config_path = data_dir.join("config.json");

        if config_path.exists() {
            let config_str =
                std::fs::read_to_string(&config_path).context("Failed to read config.json")?;

            if config_str.trim().is_empty() {
                tracing::warn!(path = %config_path.display(), "Config file is empty, recreating defaults");
            } else {
                let mut config: Config = serde_json::from_str(&config_str)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;
                config.data_dir = data_dir;
                return Ok(config);
            }
        }

        let config = Self::default_config(data_dir);
        config.save()?;
        Ok(config)
    }

    pub fn default_data_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("empathyscope")
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn save(&self) -> Result<()> {
        let json_str =
            serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(self.config_file(), json_str).context("Failed to write config.json")?;
        Ok(())
    }

    fn default_config(data_dir: PathBuf) -> Self {
        Config {
            data_dir,
            lexicon: LexiconConfig::default(),
            log_level: default_log_level(),
        }
    }

    /// Filter directive for the log subscriber; the environment wins.
    pub fn log_filter(&self) -> String {
        std::env::var(LOG_ENV).unwrap_or_else(|_| self.log_level.clone())
    }

    /// Build the configured lexicon. Without file paths the built-in
    /// sample lexicon is shared.
    pub fn load_lexicon(&self) -> Result<Arc<Lexicon>> {
        let lexicon = &self.lexicon;
        match (&lexicon.words_path, &lexicon.emoticons_path) {
            (None, None) => {
                BuiltinLexicon::shared().context("Failed to load the built-in lexicon")
            }
            (Some(words_path), Some(emoticons_path)) => {
                let provider = FileLexicon {
                    words_path: self.resolve(words_path),
                    emoticons_path: self.resolve(emoticons_path),
                    normalisation: lexicon.normalisation,
                    negations: lexicon.negations.clone(),
                    intensity_modifiers: lexicon.intensity_modifiers.clone(),
                };
                let loaded = Lexicon::from_provider(&provider).with_context(|| {
                    format!("Failed to load lexicon from {}", provider.words_path.display())
                })?;
                Ok(Arc::new(loaded))
            }
            _ => anyhow::bail!("lexicon.words_path and lexicon.emoticons_path must be set together"),
        }
    }

    /// Relative lexicon paths are taken from the data directory.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}
