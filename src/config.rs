//! User settings, stored as JSON under the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatioMode;
use crate::drag::DEFAULT_HANDLE_SIZE;
use crate::error::Result;
use crate::model::{Constraints, DEFAULT_MIN_SIZE};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum crop size in preview pixels.
    pub min_width: i32,
    pub min_height: i32,
    pub handle_size: i32,
    pub default_aspect: AspectRatioMode,
    /// Round saved crops down to even width/height.
    pub even_dimensions: bool,
    pub output_dir: Option<PathBuf>,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_SIZE,
            min_height: DEFAULT_MIN_SIZE,
            handle_size: DEFAULT_HANDLE_SIZE,
            default_aspect: AspectRatioMode::Free,
            even_dimensions: true,
            output_dir: None,
            window_width: 800.0,
            window_height: 600.0,
        }
    }
}

impl Settings {
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cropbox").join("settings.json"))
    }

    /// Load from the default location; defaults when there is no config dir
    /// or no file yet.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Editor constraints. Sizes below one pixel are raised to one.
    pub fn constraints(&self) -> Constraints {
        Constraints {
            min_width: self.min_width.max(1),
            min_height: self.min_height.max(1),
            aspect_ratio: None,
        }
    }
}
