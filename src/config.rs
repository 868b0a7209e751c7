use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{EyePreset, TimelineOptions};

/// Conversion defaults read from a settings TOML file.
///
/// All fields are optional so files written for older or newer versions
/// still load. Unset fields fall back to [`TimelineOptions::default`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertSettings {
    pub duration_ms: Option<u64>,
    pub easing: Option<String>,
    #[serde(rename = "loop")]
    pub looping: Option<bool>,
    pub repeat: Option<usize>,
    pub preset: Option<EyePreset>,
}

impl ConvertSettings {
    /// Parse a settings TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a settings file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Self::from_toml_str(&text)
    }

    /// Timeline options with unset fields taken from defaults.
    pub fn timeline_options(&self) -> TimelineOptions {
        let defaults = TimelineOptions::default();
        TimelineOptions {
            duration_ms: self.duration_ms.unwrap_or(defaults.duration_ms),
            easing: self.easing.clone().unwrap_or(defaults.easing),
            looping: self.looping.unwrap_or(defaults.looping),
            repeat: self.repeat.unwrap_or(defaults.repeat),
        }
    }

    /// Geometry preset, defaulting to [`EyePreset::Corrected`].
    pub fn preset(&self) -> EyePreset {
        self.preset.unwrap_or_default()
    }
}
