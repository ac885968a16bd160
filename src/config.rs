use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::color::ColorBy;
use crate::data::columns::HJD_OFFSET;
use crate::data::filter::QualityCuts;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Viewer settings, read from an optional JSON file. Every field has a default.
///
/// ```json
/// {
///   "time_offset": 2450000.0,
///   "output": "lightcurve.png",
///   "title": "OGLE light curve",
///   "max_seeing": 3.0,
///   "color_by": "seeing"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Subtracted from every time value before plotting.
    pub time_offset: f64,
    /// Write the chart here (`.png` or `.svg`) instead of opening a window.
    pub output: Option<PathBuf>,
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    pub max_seeing: Option<f64>,
    pub max_magnitude_error: Option<f64>,
    pub color_by: ColorBy,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            time_offset: HJD_OFFSET,
            output: None,
            title: None,
            width: 1024,
            height: 640,
            max_seeing: None,
            max_magnitude_error: None,
            color_by: ColorBy::None,
        }
    }
}

impl ViewerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ViewerConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn quality_cuts(&self) -> QualityCuts {
        QualityCuts {
            max_seeing: self.max_seeing,
            max_magnitude_error: self.max_magnitude_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_json(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let file = create_temp_json("{}");
        let config = ViewerConfig::from_file(file.path()).unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.time_offset, 2_450_000.0);
        assert!(!config.quality_cuts().is_active());
    }

    #[test]
    fn test_overrides() {
        let file = create_temp_json(
            r#"{"time_offset": 0.0, "output": "out.svg", "max_seeing": 2.5, "color_by": "seeing"}"#,
        );
        let config = ViewerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.time_offset, 0.0);
        assert_eq!(config.output, Some(PathBuf::from("out.svg")));
        assert_eq!(config.color_by, ColorBy::Seeing);
        assert_eq!(config.quality_cuts().max_seeing, Some(2.5));
        assert_eq!(config.width, 1024);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let file = create_temp_json(r#"{"offset": 1.0}"#);
        assert!(matches!(
            ViewerConfig::from_file(file.path()),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(
            ViewerConfig::from_file(Path::new("no-such-config.json")),
            Err(ConfigError::Io { .. })
        ));
    }
}
