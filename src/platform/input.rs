//! Input mapping
//!
//! Browser events are reduced to session [`Command`]s here so the mapping can
//! be tested without a DOM.

use crate::game::Command;
use crate::sim::GamePhase;

/// Minimum spacing between accepted touches on most devices
pub const TOUCH_THROTTLE_MS: f64 = 16.0;
/// Slower touch spacing for iOS-like devices
pub const TOUCH_THROTTLE_IOS_MS: f64 = 32.0;

/// Map a `KeyboardEvent.code` to a command for the current phase
pub fn command_for_key(code: &str, phase: GamePhase) -> Option<Command> {
    match code {
        // Sound and demo toggles work everywhere, even during the countdown
        "KeyM" => Some(Command::ToggleMute),
        "KeyI" => Some(Command::ToggleDemo),
        "Space" | "ArrowUp" => match phase {
            GamePhase::Idle => Some(Command::Start),
            GamePhase::Running => Some(Command::Jump),
            _ => None,
        },
        "KeyP" => match phase {
            GamePhase::Running | GamePhase::Paused => Some(Command::TogglePause),
            _ => None,
        },
        "Enter" if phase == GamePhase::GameOver => Some(Command::Restart),
        _ => None,
    }
}

/// Map a click or touch-start on the play area
pub fn command_for_pointer(phase: GamePhase) -> Option<Command> {
    match phase {
        GamePhase::Idle => Some(Command::Start),
        GamePhase::Paused => Some(Command::Resume),
        GamePhase::Running => Some(Command::Jump),
        GamePhase::Countdown | GamePhase::GameOver => None,
    }
}

/// Drops touches that arrive faster than the device can usefully handle
#[derive(Debug, Clone)]
pub struct TouchThrottle {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl TouchThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    pub fn for_device(ios_like: bool) -> Self {
        Self::new(if ios_like {
            TOUCH_THROTTLE_IOS_MS
        } else {
            TOUCH_THROTTLE_MS
        })
    }

    /// Accept and record the touch at `now_ms`, or reject it
    pub fn accept(&mut self, now_ms: f64) -> bool {
        if self
            .last_ms
            .is_some_and(|last| now_ms - last < self.interval_ms)
        {
            return false;
        }
        self.last_ms = Some(now_ms);
        true
    }
}
