//! Heads-up display models
//!
//! Everything drawn on the overlay layer is computed here from the game state
//! as plain values, so the renderer only has to paint and the numbers can be
//! tested natively.

use glam::Vec2;

use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::sim::{Aabb, GamePhase, GameState};

/// Side of the square shield sprite drawn around the player
pub const SHIELD_SIZE: f32 = 50.0;
/// Height of the translucent bar at the top of the screen
pub const TOP_BAR_HEIGHT: f32 = 50.0;

/// Centred text with animated size and opacity
#[derive(Debug, Clone, PartialEq)]
pub struct TextGlyph {
    pub text: String,
    pub font_px: f32,
    pub alpha: f32,
    pub pos: Vec2,
}

/// The big "3, 2, 1": grows and fades within each second
pub fn countdown_glyph(countdown: f32) -> Option<TextGlyph> {
    if countdown <= 0.0 {
        return None;
    }
    let frac = countdown - countdown.floor();
    Some(TextGlyph {
        text: (countdown.ceil() as u32).to_string(),
        font_px: 100.0 + 50.0 * frac,
        alpha: 1.0 - frac,
        pos: board_center(),
    })
}

/// "LEVEL n" banner that shrinks and fades after a level-up
pub fn level_banner(state: &GameState) -> Option<TextGlyph> {
    let since = state.level_banner_since_ms?;
    let duration = state.tuning.level_banner_ms.max(1.0);
    let progress = ((state.clock_ms - since) / duration).clamp(0.0, 1.0) as f32;
    Some(TextGlyph {
        text: format!("LEVEL {}", state.level),
        font_px: 40.0 + 20.0 * (1.0 - progress),
        alpha: 1.0 - progress,
        pos: board_center(),
    })
}

/// Shield sprite placement around the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShieldVisual {
    pub bounds: Aabb,
    pub alpha: f32,
}

pub fn shield_visual(state: &GameState) -> Option<ShieldVisual> {
    if !state.shield.active {
        return None;
    }
    let player = &state.player;
    let x = player.pos.x - (SHIELD_SIZE - player.size.x) / 2.0;
    let y = player.pos.y - (SHIELD_SIZE - player.size.y) / 2.0;
    let flashing = state
        .shield
        .is_flashing(state.clock_ms, state.tuning.shield_warning_ms);
    Some(ShieldVisual {
        bounds: Aabb::new(x, y, SHIELD_SIZE, SHIELD_SIZE),
        alpha: if flashing { 0.5 } else { 1.0 },
    })
}

/// Top bar and score readout during play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopBar {
    pub high_score: u32,
    pub level: u32,
    pub score: u32,
    pub fps: Option<u32>,
}

pub fn top_bar(state: &GameState, fps: Option<u32>) -> Option<TopBar> {
    match state.phase {
        GamePhase::Running | GamePhase::Paused => Some(TopBar {
            high_score: state.high_score,
            level: state.level,
            score: state.display_score(),
            fps,
        }),
        _ => None,
    }
}

/// Game-over card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub score: u32,
    pub high_score: u32,
    pub new_record: bool,
}

pub fn summary(state: &GameState) -> Option<Summary> {
    if state.phase != GamePhase::GameOver {
        return None;
    }
    let score = state.display_score();
    Some(Summary {
        score,
        high_score: state.high_score,
        new_record: state.new_record,
    })
}

/// Which DOM controls are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub start_screen: bool,
    pub pause_button: bool,
    pub pause_overlay: bool,
    pub game_over: bool,
    /// Sound-on icon shown (mute icon otherwise)
    pub sound_on: bool,
}

impl Controls {
    pub fn for_phase(phase: GamePhase, sound_enabled: bool) -> Self {
        Self {
            start_screen: phase == GamePhase::Idle,
            pause_button: phase == GamePhase::Running,
            pause_overlay: phase == GamePhase::Paused,
            game_over: phase == GamePhase::GameOver,
            sound_on: sound_enabled,
        }
    }
}

/// Rolling FPS estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    /// Record a frame timestamp (ms) and return the current estimate
    pub fn record(&mut self, time_ms: f64) -> u32 {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample sits where the next write goes
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (59_000.0 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

fn board_center() -> Vec2 {
    Vec2::new(BOARD_WIDTH / 2.0, BOARD_HEIGHT / 2.0)
}
