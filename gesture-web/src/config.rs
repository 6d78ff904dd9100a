//! Per-gesture-class configuration
//!
//! Defaults match the shipped product tuning. Out-of-range values are never
//! rejected: `validated()` clamps them or substitutes the default.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwipeConfig {
    pub enabled: bool,
    pub debounce_ms: f64,
    /// Minimum smoothed wrist speed (units/sec)
    pub velocity_threshold: f32,
    /// Frames in the velocity moving average
    #[serde(deserialize_with = "lenient_window")]
    pub smoothing_window: usize,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 300.0,
            velocity_threshold: 0.5,
            smoothing_window: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PinchConfig {
    pub enabled: bool,
    /// Minimum gap between successive pinch starts
    pub debounce_ms: f64,
    /// Smoothed thumb-index distance that starts a pinch
    pub distance_threshold: f32,
    /// Smoothed distance that ends it (>= distance_threshold)
    pub release_threshold: f32,
    /// EMA factor for the distance signal (0-1)
    pub smoothing_alpha: f32,
    /// Horizontal index-tip travel per frame for a volume step
    pub volume_threshold: f32,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 100.0,
            distance_threshold: 0.05,
            release_threshold: 0.08,
            smoothing_alpha: 0.3,
            volume_threshold: 0.02,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PushConfig {
    pub enabled: bool,
    pub debounce_ms: f64,
    /// Box-area growth relative to the current area
    pub depth_threshold: f32,
    /// Box-area growth rate (area units/sec)
    pub velocity_threshold: f32,
    #[serde(deserialize_with = "lenient_window")]
    pub smoothing_window: usize,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 500.0,
            depth_threshold: 0.15,
            velocity_threshold: 0.3,
            smoothing_window: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaticConfig {
    pub enabled: bool,
    pub debounce_ms: f64,
    /// How long a pose must be held before it fires (ms)
    pub hold_duration: f64,
    pub confidence_threshold: f32,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 1000.0,
            hold_duration: 500.0,
            confidence_threshold: 0.7,
        }
    }
}

/// Configuration for every built-in gesture class
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub swipe: SwipeConfig,
    pub pinch: PinchConfig,
    pub push: PushConfig,
    #[serde(rename = "static")]
    pub static_pose: StaticConfig,
}

impl GestureConfig {
    /// Parse a (possibly partial) JSON config; missing keys take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    pub fn validated(self) -> Self {
        Self {
            swipe: self.swipe.validated(),
            pinch: self.pinch.validated(),
            push: self.push.validated(),
            static_pose: self.static_pose.validated(),
        }
    }
}

/// Clamp-or-default pass applied to every config before use
pub trait Validate: Sized {
    fn validated(self) -> Self;
}

impl Validate for SwipeConfig {
    fn validated(self) -> Self {
        let d = Self::default();
        Self {
            enabled: self.enabled,
            debounce_ms: non_negative_ms(self.debounce_ms, d.debounce_ms, "swipe.debounceMs"),
            velocity_threshold: non_negative(self.velocity_threshold, d.velocity_threshold, "swipe.velocityThreshold"),
            smoothing_window: self.smoothing_window.max(1),
        }
    }
}

impl Validate for PinchConfig {
    fn validated(self) -> Self {
        let d = Self::default();
        let distance_threshold = non_negative(self.distance_threshold, d.distance_threshold, "pinch.distanceThreshold");
        let mut release_threshold = non_negative(self.release_threshold, d.release_threshold, "pinch.releaseThreshold");
        if release_threshold < distance_threshold {
            warn!(
                "pinch.releaseThreshold {} below distanceThreshold {}, raising it",
                release_threshold, distance_threshold
            );
            release_threshold = distance_threshold;
        }
        Self {
            enabled: self.enabled,
            debounce_ms: non_negative_ms(self.debounce_ms, d.debounce_ms, "pinch.debounceMs"),
            distance_threshold,
            release_threshold,
            smoothing_alpha: unit_interval(self.smoothing_alpha, d.smoothing_alpha, "pinch.smoothingAlpha"),
            volume_threshold: non_negative(self.volume_threshold, d.volume_threshold, "pinch.volumeThreshold"),
        }
    }
}

impl Validate for PushConfig {
    fn validated(self) -> Self {
        let d = Self::default();
        Self {
            enabled: self.enabled,
            debounce_ms: non_negative_ms(self.debounce_ms, d.debounce_ms, "push.debounceMs"),
            depth_threshold: non_negative(self.depth_threshold, d.depth_threshold, "push.depthThreshold"),
            velocity_threshold: non_negative(self.velocity_threshold, d.velocity_threshold, "push.velocityThreshold"),
            smoothing_window: self.smoothing_window.max(1),
        }
    }
}

impl Validate for StaticConfig {
    fn validated(self) -> Self {
        let d = Self::default();
        Self {
            enabled: self.enabled,
            debounce_ms: non_negative_ms(self.debounce_ms, d.debounce_ms, "static.debounceMs"),
            hold_duration: non_negative_ms(self.hold_duration, d.hold_duration, "static.holdDuration"),
            confidence_threshold: unit_interval(self.confidence_threshold, d.confidence_threshold, "static.confidenceThreshold"),
        }
    }
}

/// Shallow-merge the keys of a JSON object into `current`, then validate
pub fn merge_patch<T>(current: &T, patch: &Value) -> Result<T, ConfigError>
where
    T: Serialize + DeserializeOwned + Validate,
{
    let Value::Object(patch) = patch else {
        return Err(ConfigError::NotAnObject);
    };
    let mut merged = serde_json::to_value(current)?;
    if let Value::Object(fields) = &mut merged {
        for (key, value) in patch {
            fields.insert(key.clone(), value.clone());
        }
    }
    let merged: T = serde_json::from_value(merged)?;
    Ok(merged.validated())
}

/// Any JSON number is accepted as a window: rounded, at least 1
fn lenient_window<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(window_from(raw))
}

fn window_from(raw: f64) -> usize {
    let rounded = raw.round();
    if !rounded.is_finite() || rounded < 1.0 {
        warn!("smoothingWindow = {} is invalid, using 1", raw);
        return 1;
    }
    if rounded != raw {
        warn!("smoothingWindow = {} rounded to {}", raw, rounded);
    }
    rounded as usize
}

fn non_negative(value: f32, default: f32, field: &str) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("{} = {} is invalid, using default {}", field, value, default);
        default
    }
}

fn non_negative_ms(value: f64, default: f64, field: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("{} = {} is invalid, using default {}", field, value, default);
        default
    }
}

fn unit_interval(value: f32, default: f32, field: &str) -> f32 {
    if value.is_nan() {
        warn!("{} is NaN, using default {}", field, default);
        return default;
    }
    value.clamp(0.0, 1.0)
}
