//! Configuration management
//!
//! TOML-based configuration with defaults and validation.
//! Location: ~/.farmacia/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::embedding::EmbeddingConfig;
use crate::engine::EngineConfig;
use crate::errors::{RagError, Result};
use crate::extraction::ExtractionConfig;
use crate::fallback::FallbackConfig;

const VERBOSITY_LEVELS: [&str; 4] = ["quiet", "normal", "verbose", "very_verbose"];

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub knowledge_base: KnowledgeBaseConfig,
    pub embedding: EmbeddingConfig,
    pub extraction: ExtractionConfig,
    pub fallback: FallbackConfig,
    pub logging: LoggingConfig,
}

/// Corpus location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    pub dir: String,
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub default_verbosity: String,
    pub json: bool,
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            dir: "knowledge_base".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RagError::Config(format!("Failed to read config {}: {}", path.display(), e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| RagError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location if present, otherwise built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// `~/.farmacia/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".farmacia").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.knowledge_base.dir.trim().is_empty() {
            return Err(RagError::Config("knowledge_base.dir must not be empty".to_string()));
        }

        self.embedding.validate()?;
        self.extraction.validate()?;

        if !VERBOSITY_LEVELS.contains(&self.logging.default_verbosity.as_str()) {
            return Err(RagError::Config(format!(
                "Invalid verbosity level: {}",
                self.logging.default_verbosity
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| RagError::Config(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RagError::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RagError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    pub fn knowledge_base_dir(&self) -> PathBuf {
        Self::expand_path(&self.knowledge_base.dir)
    }

    /// Settings handed to the retrieval engine
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            knowledge_base_dir: self.knowledge_base_dir(),
            embedding: self.embedding.clone(),
            extraction: self.extraction.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.knowledge_base.dir, "knowledge_base");
        assert_eq!(config.embedding.batch_size, 5);
        assert_eq!(config.logging.default_verbosity, "normal");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [knowledge_base]
            dir = "/srv/kb"

            [embedding]
            batch_size = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.knowledge_base.dir, "/srv/kb");
        assert_eq!(config.embedding.batch_size, 2);
        assert_eq!(config.embedding.max_sequence_length, 128);
        assert!(!config.extraction.keywords.is_empty());
        assert!(!config.fallback.entries.is_empty());
    }

    #[test]
    fn test_config_validation_batch_size() {
        let mut config = Config::default();
        config.embedding.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_verbosity() {
        let mut config = Config::default();
        config.logging.default_verbosity = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.knowledge_base.dir = "docs".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(Some(path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[embedding]\nbatch_size = \"five\"\n").unwrap();

        assert!(matches!(Config::load_from_file(&path), Err(RagError::Config(_))));
    }

    #[test]
    fn test_engine_config_carries_sections() {
        let mut config = Config::default();
        config.knowledge_base.dir = "/data/kb".to_string();
        config.embedding.batch_size = 3;

        let engine = config.engine_config();
        assert_eq!(engine.knowledge_base_dir, PathBuf::from("/data/kb"));
        assert_eq!(engine.embedding.batch_size, 3);
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let expanded = Config::expand_path("/absolute/path");
        assert_eq!(expanded, PathBuf::from("/absolute/path"));
    }
}
