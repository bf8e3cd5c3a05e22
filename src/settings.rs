//! Game settings and preferences
//!
//! Persisted separately from the high score as JSON.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::platform::KeyValueStore;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    /// For iOS and Safari: 30 fps, pixel ratio capped at 2
    Low,
    #[default]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::High => "High",
        }
    }

    /// Render rate cap
    pub fn target_fps(&self) -> u32 {
        match self {
            QualityPreset::Low => 30,
            QualityPreset::High => 60,
        }
    }

    /// Minimum wall-clock spacing between rendered frames
    pub fn min_frame_ms(&self) -> f64 {
        1000.0 / self.target_fps() as f64
    }

    /// Device pixel ratio actually used for the canvases
    pub fn effective_dpr(&self, device_dpr: f64) -> f64 {
        let dpr = if device_dpr > 0.0 { device_dpr } else { 1.0 };
        match self {
            QualityPreset::Low => dpr.min(2.0),
            QualityPreset::High => dpr,
        }
    }

    /// Countdown decrement per tick; faster where frames are capped
    pub fn countdown_step(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.025,
            QualityPreset::High => 0.016,
        }
    }

    /// Whether image smoothing is enabled on the canvases
    pub fn smoothing(&self) -> bool {
        matches!(self, QualityPreset::High)
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound_enabled: bool,
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            quality: QualityPreset::High,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "hero_flight_settings";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Load stored settings, falling back to `fallback` when absent or corrupt
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, fallback: Settings) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            log::info!("Using default settings");
            return fallback;
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from storage");
                settings
            }
            Err(err) => {
                log::warn!("Ignoring corrupt settings: {err}");
                fallback
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), Error> {
        let json = serde_json::to_string(self).map_err(|err| Error::StorageWrite {
            key: Self::STORAGE_KEY.to_string(),
            reason: err.to_string(),
        })?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
