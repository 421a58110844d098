//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use examtrack_core::model::Section;

/// Top-level examtrack configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamtrackConfig {
    /// Where the tracker state is saved.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Section stamped on pasted questions when `--section` is not given.
    #[serde(default)]
    pub default_section: Section,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("examtrack-data.json")
}

impl Default for ExamtrackConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            default_section: Section::A,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `examtrack.toml` in the current directory
/// 2. `~/.config/examtrack/config.toml`
///
/// With no file found, built-in defaults apply.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamtrackConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examtrack.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<ExamtrackConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(ExamtrackConfig::default()),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examtrack"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ExamtrackConfig::default();
        assert_eq!(config.data_file, PathBuf::from("examtrack-data.json"));
        assert_eq!(config.default_section, Section::A);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
data_file = "study/maths.json"
default_section = "B"
"#;
        let config: ExamtrackConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.data_file, PathBuf::from("study/maths.json"));
        assert_eq!(config.default_section, Section::B);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config: ExamtrackConfig = toml::from_str("").unwrap();
        assert_eq!(config.data_file, PathBuf::from("examtrack-data.json"));
        assert_eq!(config.default_section, Section::A);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "default_section = \"B\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_section, Section::B);
    }
}
