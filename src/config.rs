use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub detect: DetectConfig,
    pub normalize: NormalizeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub bullet_symbol: String,
    pub rule_text: String,
    pub indent_step: f32,
    pub heading_sizes: [f32; 6],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bullet_symbol: "•".to_string(),
            rule_text: "───".to_string(),
            indent_step: 20.0,
            heading_sizes: [28.0, 24.0, 20.0, 18.0, 16.0, 14.0],
        }
    }
}

impl RenderConfig {
    /// Font size for a heading level, clamped to 1..=6.
    pub fn heading_size(&self, level: u8) -> f32 {
        let index = usize::from(level.clamp(1, 6)) - 1;
        self.heading_sizes[index]
    }

    /// Paragraph indent for a nesting level.
    pub fn indent(&self, level: usize) -> f32 {
        level as f32 * self.indent_step
    }
}

/// Thresholds used when reading paragraphs without an explicit role.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    pub quote_min_indent: f32,
    pub list_min_head_indent: f32,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            quote_min_indent: 20.0,
            list_min_head_indent: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub collapse_emphasis: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            collapse_emphasis: true,
        }
    }
}

impl Config {
    /// The configuration shipped in `default_config.toml`.
    ///
    /// The file is validated by the build script, so decoding only falls back
    /// to the built-in defaults if the two drift apart.
    pub fn compiled_default() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            tracing::warn!("embedded default config rejected: {e}");
            Self::default()
        })
    }

    /// Decode a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and decode a config file.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{e}; using default config");
                Self::compiled_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_matches_builtin_defaults() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = Config::from_toml_str("[render]\nbullet_symbol = \"-\"\n").unwrap();
        assert_eq!(config.render.bullet_symbol, "-");
        assert_eq!(config.render.rule_text, "───");
        assert_eq!(config.detect, DetectConfig::default());
        assert!(config.normalize.collapse_emphasis);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::from_toml_str("[render\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("/nonexistent/tmarkup.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn heading_size_clamps_level() {
        let render = RenderConfig::default();
        assert_eq!(render.heading_size(1), 28.0);
        assert_eq!(render.heading_size(6), 14.0);
        assert_eq!(render.heading_size(0), 28.0);
        assert_eq!(render.heading_size(9), 14.0);
    }
}
