//! Named detector presets

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A named set of enabled built-in detectors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Swipes only
    Navigation,
    /// Pinch, push and static poses
    Control,
    All,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Navigation => "navigation",
            Preset::Control => "control",
            Preset::All => "all",
        }
    }

    /// Built-in detectors this preset turns on; the rest are turned off
    pub fn enabled_detectors(&self) -> &'static [&'static str] {
        match self {
            Preset::Navigation => &["swipe"],
            Preset::Control => &["pinch", "push", "static"],
            Preset::All => &["swipe", "pinch", "push", "static"],
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "navigation" => Ok(Preset::Navigation),
            "control" => Ok(Preset::Control),
            "all" => Ok(Preset::All),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}
