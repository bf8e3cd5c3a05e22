//! Entity spawning on simulation-time timers
//!
//! Spawn timers are due-timestamps on the simulation clock instead of
//! wall-clock intervals, so a run replays identically from its seed and a
//! paused game cannot spawn anything.

use rand::Rng;

use super::collision::overlaps_band;
use super::difficulty;
use super::state::{Entity, EntityKind, GameState, Gap, PipeSide, PipeStyle};
use crate::consts::BOARD_HEIGHT;
use crate::tuning::Tuning;

/// Due times for the three independent spawners
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnClock {
    /// Next pipe pair; `None` while the pipe timer is disarmed
    pub next_pipe_due_ms: Option<f64>,
    /// Interval the pipe timer was armed with
    pub pipe_interval_ms: f64,
    /// Last power-up spawn; `None` means one is due immediately
    pub last_power_up_ms: Option<f64>,
    pub last_enemy_ms: Option<f64>,
}

impl SpawnClock {
    /// (Re)start the pipe timer: first pair one full interval from now
    pub fn arm_pipes(&mut self, now_ms: f64, interval_ms: f64) {
        self.pipe_interval_ms = interval_ms;
        self.next_pipe_due_ms = Some(now_ms + interval_ms);
    }

    pub fn disarm_pipes(&mut self) {
        self.next_pipe_due_ms = None;
    }

    pub fn pipes_armed(&self) -> bool {
        self.next_pipe_due_ms.is_some()
    }

    /// Forget power-up/enemy history so both fire on the first running tick
    pub fn reset_timers(&mut self) {
        self.last_power_up_ms = None;
        self.last_enemy_ms = None;
    }

    /// Number of pipe pairs that fell due by `now_ms`, advancing the timer
    pub fn take_due_pipes(&mut self, now_ms: f64) -> u32 {
        let Some(mut due) = self.next_pipe_due_ms else {
            return 0;
        };
        if self.pipe_interval_ms <= 0.0 {
            return 0;
        }
        let mut fired = 0;
        while now_ms >= due {
            fired += 1;
            due += self.pipe_interval_ms;
        }
        self.next_pipe_due_ms = Some(due);
        fired
    }

    pub fn power_up_due(&mut self, now_ms: f64, interval_ms: f64) -> bool {
        interval_elapsed(&mut self.last_power_up_ms, now_ms, interval_ms)
    }

    pub fn enemy_due(&mut self, now_ms: f64, interval_ms: f64) -> bool {
        interval_elapsed(&mut self.last_enemy_ms, now_ms, interval_ms)
    }
}

/// Stamp `last` and return true when strictly more than `interval` has passed
fn interval_elapsed(last: &mut Option<f64>, now_ms: f64, interval_ms: f64) -> bool {
    let due = last.is_none_or(|stamp| now_ms - stamp > interval_ms);
    if due {
        *last = Some(now_ms);
    }
    due
}

/// Place a top/bottom pipe pair at the right edge and remember its gap
pub fn place_pipes(state: &mut GameState) {
    let t = &state.tuning;
    let min_y = -t.pipe_height + 50.0;
    let max_y = -t.pipe_gap - 150.0;
    let (pipe_w, pipe_h, gap) = (t.pipe_width, t.pipe_height, t.pipe_gap);
    let hazard = difficulty::hazard_chance(state.level, t);

    let top_y = if max_y > min_y {
        state.rng.random_range(min_y..max_y)
    } else {
        min_y
    };
    let gap_top = top_y + pipe_h;
    state.last_gap = Some(Gap {
        top: gap_top,
        bottom: gap_top + gap,
    });

    let x = state.spawn_x();
    for (side, y) in [(PipeSide::Top, top_y), (PipeSide::Bottom, gap_top + gap)] {
        let style = if state.rng.random::<f32>() < hazard {
            PipeStyle::Hazard
        } else {
            PipeStyle::Classic
        };
        state.pipes.push_back(Entity::new(
            x,
            y,
            pipe_w,
            pipe_h,
            EntityKind::Pipe {
                side,
                style,
                passed: false,
            },
        ));
    }
    log::trace!("pipes placed at y={top_y:.1}, gap {gap_top:.1}..{:.1}", gap_top + gap);
}

pub fn spawn_power_up(state: &mut GameState) {
    let size = state.tuning.power_up_size;
    let y = state.rng.random::<f32>() * (BOARD_HEIGHT - size);
    let x = state.spawn_x();
    state
        .power_ups
        .push(Entity::new(x, y, size, size, EntityKind::PowerUp));
}

/// Pick an enemy altitude, avoiding the most recent gap when possible.
///
/// Returns the altitude and how many samples were drawn. Once the retry
/// budget is spent the last sample is accepted even if it blocks the gap.
pub fn sample_enemy_y<R: Rng>(rng: &mut R, last_gap: Option<Gap>, tuning: &Tuning) -> (f32, u32) {
    let height = tuning.enemy_height;
    let mut tries = 0;
    loop {
        let y = rng.random::<f32>() * (BOARD_HEIGHT - height);
        tries += 1;
        let blocks_gap = last_gap.is_some_and(|gap| overlaps_band(y, y + height, gap.top, gap.bottom));
        if !blocks_gap || tries >= tuning.enemy_placement_tries {
            return (y, tries);
        }
    }
}

pub fn spawn_enemy(state: &mut GameState) {
    let (y, tries) = sample_enemy_y(&mut state.rng, state.last_gap, &state.tuning);
    if tries >= state.tuning.enemy_placement_tries {
        log::debug!("enemy placement budget exhausted, accepting y={y:.1}");
    }
    let jitter = state.rng.random::<f32>() - 0.5;
    let speed = difficulty::enemy_base_speed(state.level, &state.tuning) + jitter;
    let (w, h) = (state.tuning.enemy_width, state.tuning.enemy_height);
    let x = state.spawn_x();
    state
        .enemies
        .push(Entity::new(x, y, w, h, EntityKind::Enemy { speed }));
}
