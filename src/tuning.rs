//! Data-driven game balance
//!
//! Every gameplay constant lives here so a build can ship overrides as JSON
//! without touching the simulation. Velocities are in logical pixels per tick
//! (negative = leftward / upward), durations in simulation milliseconds.

use serde::{Deserialize, Serialize};

use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Downward acceleration added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity set (not added) by a jump
    pub jump_velocity: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub pipe_height: f32,
    /// Vertical size of the passable gap between a pipe pair
    pub pipe_gap: f32,
    pub base_pipe_interval_ms: f64,
    pub min_pipe_interval_ms: f64,
    pub pipe_interval_reduction_per_level_ms: f64,

    // === Scrolling ===
    pub base_velocity_x: f32,
    /// Fastest allowed scroll (most negative)
    pub max_velocity_x: f32,
    pub level_speed_increase: f32,
    /// Levels beyond this stop increasing speed and spawn rate
    pub max_difficulty_level: u32,

    // === Hazard pipe styling ===
    pub base_hazard_chance: f32,
    pub hazard_chance_per_level: f32,
    pub max_hazard_chance: f32,

    // === Power-ups ===
    pub power_up_size: f32,
    pub power_up_interval_ms: f64,
    pub shield_duration_ms: f64,
    /// Shield flashes during this final window
    pub shield_warning_ms: f64,

    // === Enemies ===
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_interval_ms: f64,
    pub base_enemy_speed: f32,
    pub enemy_speed_increase: f32,
    pub max_enemy_speed: f32,
    /// Resample budget for keeping enemies out of the latest gap
    pub enemy_placement_tries: u32,

    // === Progression ===
    /// Score needed per level
    pub points_per_level: f32,
    pub level_banner_ms: f64,

    // === Countdown ===
    pub countdown_start: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: 74.8,
            player_height: 32.4,
            gravity: 0.4,
            jump_velocity: -6.0,

            pipe_width: 64.0,
            pipe_height: 512.0,
            pipe_gap: BOARD_HEIGHT / 3.2,
            base_pipe_interval_ms: 1700.0,
            min_pipe_interval_ms: 900.0,
            pipe_interval_reduction_per_level_ms: 200.0,

            base_velocity_x: -2.0,
            max_velocity_x: -6.0,
            level_speed_increase: -0.5,
            max_difficulty_level: 5,

            base_hazard_chance: 0.1,
            hazard_chance_per_level: 0.05,
            max_hazard_chance: 0.75,

            power_up_size: 40.0,
            power_up_interval_ms: 10_000.0,
            shield_duration_ms: 5000.0,
            shield_warning_ms: 1000.0,

            enemy_width: 60.0,
            enemy_height: 40.0,
            enemy_interval_ms: 4000.0,
            base_enemy_speed: -4.0,
            enemy_speed_increase: -0.5,
            max_enemy_speed: -8.0,
            enemy_placement_tries: 10,

            points_per_level: 15.0,
            level_banner_ms: 1000.0,

            countdown_start: 3.0,
        }
    }
}

impl Tuning {
    /// Parse overrides; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| Error::InvalidTuning(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation's ordering assumptions
    pub fn validate(&self) -> Result<(), Error> {
        if self.base_velocity_x >= 0.0 || self.max_velocity_x > self.base_velocity_x {
            return Err(Error::InvalidTuning(
                "scroll velocities must be negative with max_velocity_x <= base_velocity_x".into(),
            ));
        }
        if self.min_pipe_interval_ms <= 0.0 || self.base_pipe_interval_ms < self.min_pipe_interval_ms {
            return Err(Error::InvalidTuning(
                "pipe intervals must be positive with base >= min".into(),
            ));
        }
        if self.points_per_level <= 0.0 {
            return Err(Error::InvalidTuning("points_per_level must be positive".into()));
        }
        if self.enemy_height >= BOARD_HEIGHT || self.power_up_size >= BOARD_HEIGHT {
            return Err(Error::InvalidTuning("entities must fit on the board".into()));
        }
        Ok(())
    }

    /// Player spawn point (fixed x, vertical centre)
    pub fn player_start(&self) -> (f32, f32) {
        (BOARD_WIDTH / 8.0, BOARD_HEIGHT / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_default_gap_is_fraction_of_board() {
        let t = Tuning::default();
        assert!((t.pipe_gap - 200.0).abs() < 0.001);
    }

    #[test]
    fn test_partial_override() {
        let t = Tuning::from_json(r#"{ "gravity": 0.5, "shield_duration_ms": 8000 }"#).unwrap();
        assert!((t.gravity - 0.5).abs() < f32::EPSILON);
        assert_eq!(t.shield_duration_ms, 8000.0);
        // Untouched fields keep defaults
        assert_eq!(t.pipe_width, 64.0);
    }

    #[test]
    fn test_rejects_positive_scroll() {
        let err = Tuning::from_json(r#"{ "base_velocity_x": 2.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidTuning(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(Tuning::from_json("{ gravity: ").is_err());
    }
}
