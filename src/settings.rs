use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller-supplied configuration for a load.
///
/// JSON form:
///
/// ```json
/// { "source": "frames/m31.fits" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// FITS file to load.
    pub source: PathBuf,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("reading settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Settings {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read settings from a JSON file. A relative `source` is resolved
    /// against the directory holding the settings file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if settings.source.is_relative() {
            if let Some(dir) = path.parent() {
                settings.source = dir.join(&settings.source);
            }
        }
        Ok(settings)
    }
}
