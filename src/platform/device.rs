//! Device detection
//!
//! iOS devices and desktop Safari get the low quality preset: capped frame
//! rate, capped pixel ratio and a slower touch throttle.

use crate::settings::QualityPreset;

/// What we know about the browser we run in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceProfile {
    pub ios_like: bool,
    pub touch: bool,
}

impl DeviceProfile {
    /// Classify from navigator fields
    pub fn from_navigator(user_agent: &str, platform: &str, max_touch_points: i32) -> Self {
        // iPadOS reports itself as a Mac with touch support
        let ios = ["iPad", "iPhone", "iPod"]
            .iter()
            .any(|name| user_agent.contains(name))
            || (platform == "MacIntel" && max_touch_points > 1);
        let ua = user_agent.to_lowercase();
        let safari = ua.contains("safari") && !ua.contains("chrome") && !ua.contains("android");
        Self {
            ios_like: ios || safari,
            touch: max_touch_points > 0,
        }
    }

    pub fn default_preset(&self) -> QualityPreset {
        if self.ios_like {
            QualityPreset::Low
        } else {
            QualityPreset::High
        }
    }

    /// Read the live navigator
    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        let Some(navigator) = web_sys::window().map(|w| w.navigator()) else {
            return Self::default();
        };
        let user_agent = navigator.user_agent().unwrap_or_default();
        let platform = navigator.platform().unwrap_or_default();
        let profile = Self::from_navigator(&user_agent, &platform, navigator.max_touch_points());
        log::info!(
            "Device: ios_like={}, touch={}",
            profile.ios_like,
            profile.touch
        );
        profile
    }
}
