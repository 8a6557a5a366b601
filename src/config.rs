//! Configuration management for the skill gap analyzer

use crate::error::{Result, SkillGapError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Optional TOML lexicon replacing the built-in one
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
    pub extraction: ExtractionConfig,
    pub scoring: ScoringConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub section_headers: Vec<String>,
    pub section_window: usize,
    pub min_substring_len: usize,
    pub min_uncategorized_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub medium_threshold: usize,
    pub high_threshold: usize,
    pub related_skill_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub min_text_chars: usize,
    pub enable_caching: bool,
    /// External OCR command and arguments; the document path is appended last
    #[serde(default)]
    pub ocr_command: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            section_headers: vec![
                "skills".to_string(),
                "technologies".to_string(),
                "tools".to_string(),
                "expertise".to_string(),
                "technical skills".to_string(),
            ],
            section_window: 300,
            min_substring_len: 3,
            min_uncategorized_len: 2,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            medium_threshold: 2,
            high_threshold: 4,
            related_skill_threshold: 0.85,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min_text_chars: 100,
            enable_caching: true,
            ocr_command: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lexicon_path: None,
            extraction: ExtractionConfig::default(),
            scoring: ScoringConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-gap")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.scoring.medium_threshold > self.scoring.high_threshold {
            return Err(SkillGapError::Configuration(format!(
                "scoring.medium_threshold ({}) must not exceed scoring.high_threshold ({})",
                self.scoring.medium_threshold, self.scoring.high_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.scoring.related_skill_threshold) {
            return Err(SkillGapError::Configuration(
                "scoring.related_skill_threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_thresholds() {
        let config = Config::default();
        assert_eq!(config.scoring.medium_threshold, 2);
        assert_eq!(config.scoring.high_threshold, 4);
        assert_eq!(config.extraction.section_window, 300);
        assert_eq!(config.input.min_text_chars, 100);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.output.format = OutputFormat::Json;
        config.extraction.section_window = 120;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert_eq!(loaded.extraction.section_window, 120);
        assert!(loaded.lexicon_path.is_none());
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.scoring.medium_threshold = 5;
        config.save_to(&path).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(SkillGapError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "extraction = 3").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
