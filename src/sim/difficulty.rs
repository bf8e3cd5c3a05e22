//! Difficulty policy
//!
//! Speed and spawn rate scale with `min(level, max_difficulty_level)` and are
//! clamped, so difficulty stops growing past the level cap.

use crate::tuning::Tuning;

/// Level reached for a score (integer division)
pub fn level_for_score(score: f32, tuning: &Tuning) -> u32 {
    (score / tuning.points_per_level).floor().max(0.0) as u32
}

fn effective_level(level: u32, tuning: &Tuning) -> u32 {
    level.min(tuning.max_difficulty_level)
}

/// Horizontal scroll velocity for pipes and power-ups (negative = leftward)
pub fn scroll_velocity(level: u32, tuning: &Tuning) -> f32 {
    let level = effective_level(level, tuning) as f32;
    (tuning.base_velocity_x + tuning.level_speed_increase * level).max(tuning.max_velocity_x)
}

/// Delay between pipe pairs
pub fn pipe_interval_ms(level: u32, tuning: &Tuning) -> f64 {
    let level = effective_level(level, tuning) as f64;
    (tuning.base_pipe_interval_ms - level * tuning.pipe_interval_reduction_per_level_ms)
        .max(tuning.min_pipe_interval_ms)
}

/// Probability that a freshly placed pipe uses the hazard style
pub fn hazard_chance(level: u32, tuning: &Tuning) -> f32 {
    (tuning.base_hazard_chance + level as f32 * tuning.hazard_chance_per_level)
        .min(tuning.max_hazard_chance)
}

/// Enemy base speed before per-instance jitter. Not capped by the difficulty
/// level; only the speed floor bounds it.
pub fn enemy_base_speed(level: u32, tuning: &Tuning) -> f32 {
    (tuning.base_enemy_speed + tuning.enemy_speed_increase * level as f32)
        .max(tuning.max_enemy_speed)
}
