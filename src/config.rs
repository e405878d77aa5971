use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
#[cfg(feature = "cli")]
use std::path::PathBuf;

use crate::defaults;
use crate::error::{Result, SubfixError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub refine: RefineConfig,
    pub llm: LlmConfig,
}

/// Chunking and alignment configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RefineConfig {
    /// Segments per LLM request. Also drives reassembly chunk recovery,
    /// so planner and reassembler always share this value.
    pub max_segments_per_chunk: usize,
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: String,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            max_segments_per_chunk: defaults::MAX_SEGMENTS_PER_CHUNK,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            base_url: defaults::OPENROUTER_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing or contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SubfixError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                SubfixError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing; invalid TOML is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(SubfixError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SUBFIX_MODEL → llm.model
    /// - SUBFIX_BASE_URL → llm.base_url
    /// - SUBFIX_CHUNK_SIZE → refine.max_segments_per_chunk
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("SUBFIX_MODEL")
            && !model.is_empty()
        {
            self.llm.model = model;
        }
        if let Ok(base_url) = std::env::var("SUBFIX_BASE_URL")
            && !base_url.is_empty()
        {
            self.llm.base_url = base_url;
        }
        if let Ok(chunk_size) = std::env::var("SUBFIX_CHUNK_SIZE")
            && let Ok(value) = chunk_size.parse::<usize>()
            && value > 0
        {
            self.refine.max_segments_per_chunk = value;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.refine.max_segments_per_chunk == 0 {
            return Err(SubfixError::ConfigInvalidValue {
                key: "refine.max_segments_per_chunk".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.llm.model.trim().is_empty() {
            return Err(SubfixError::ConfigInvalidValue {
                key: "llm.model".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Default configuration file path: `$XDG_CONFIG_HOME/subfix/config.toml`.
#[cfg(feature = "cli")]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("subfix").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.refine.max_segments_per_chunk,
            defaults::MAX_SEGMENTS_PER_CHUNK
        );
        assert_eq!(config.llm.model, defaults::DEFAULT_MODEL);
    }

    #[test]
    fn load_parses_partial_toml_with_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[refine]\nmax_segments_per_chunk = 25").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.refine.max_segments_per_chunk, 25);
        assert_eq!(config.llm.model, defaults::DEFAULT_MODEL);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let result = Config::load(Path::new("/nonexistent/subfix.toml"));
        assert!(matches!(
            result,
            Err(SubfixError::ConfigFileNotFound { .. })
        ));
    }

    #[test]
    fn load_or_default_falls_back_only_on_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/subfix.toml")).unwrap();
        assert_eq!(config, Config::default());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not [valid toml").unwrap();
        assert!(Config::load_or_default(file.path()).is_err());
    }

    #[test]
    fn load_rejects_zero_chunk_size() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[refine]\nmax_segments_per_chunk = 0").unwrap();
        let result = Config::load(file.path());
        assert!(matches!(
            result,
            Err(SubfixError::ConfigInvalidValue { .. })
        ));
    }

    #[test]
    fn load_rejects_empty_model() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[llm]\nmodel = \"  \"").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }
}
