//! Game state and core simulation types
//!
//! Everything the game loop mutates lives in [`GameState`]; `tick` is the
//! only writer during play.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::difficulty;
use super::spawn::SpawnClock;
use crate::consts::BOARD_WIDTH;
use crate::tuning::Tuning;

/// Countdown decrement per tick at the standard frame rate
pub const COUNTDOWN_STEP: f32 = 0.016;

/// Current phase of the game. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for a start trigger
    Idle,
    /// "3, 2, 1" before the run begins
    Countdown,
    /// Active gameplay
    Running,
    /// Run frozen by the player
    Paused,
    /// Run ended, summary on screen
    GameOver,
}

/// Which half of an obstacle pair a pipe is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeSide {
    Top,
    Bottom,
}

/// Visual variant of a pipe (no gameplay difference)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeStyle {
    Classic,
    Hazard,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Pipe {
        side: PipeSide,
        style: PipeStyle,
        /// Set once the player clears the trailing edge (scored)
        passed: bool,
    },
    PowerUp,
    Enemy {
        /// Horizontal velocity, pixels per tick
        speed: f32,
    },
}

/// A scrolling rectangle: pipe, power-up or enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(x: f32, y: f32, w: f32, h: f32, kind: EntityKind) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            kind,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Fully scrolled past the left edge
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -self.size.x
    }
}

/// The flying hero
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, pixels per tick (positive = falling)
    pub vel_y: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let (x, y) = tuning.player_start();
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vel_y: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Timed invulnerability from a power-up
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Shield {
    pub active: bool,
    /// Simulation time at which the shield drops
    pub ends_at_ms: f64,
}

impl Shield {
    pub fn grant(&mut self, now_ms: f64, duration_ms: f64) {
        self.active = true;
        self.ends_at_ms = now_ms + duration_ms;
    }

    /// Near expiry the shield blinks, dimmed on alternating 100 ms windows
    pub fn is_flashing(&self, now_ms: f64, warning_ms: f64) -> bool {
        self.active
            && self.ends_at_ms - now_ms < warning_ms
            && ((now_ms / 100.0).floor() as i64) % 2 == 0
    }
}

/// Vertical extent of the passable gap of the most recent pipe pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gap {
    pub top: f32,
    pub bottom: f32,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    /// Fell off the bottom of the board
    Ground,
    Pipe,
    Enemy,
}

/// Things that happened during a tick, consumed by audio and UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    CountdownStarted,
    /// Countdown finished, play begins
    RunStarted,
    Jumped,
    ShieldGained,
    ShieldExpired,
    LevelUp { level: u32 },
    Paused,
    Resumed,
    Crashed { cause: CrashCause, score: u32 },
    NewHighScore { score: u32 },
    ReturnedToTitle,
    /// Sound muted or unmuted from the session
    SoundToggled { enabled: bool },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Remaining countdown (3.0 → 0.0)
    pub countdown: f32,
    /// Countdown decrement per tick
    pub countdown_step: f32,
    /// Simulation clock, advances only while running
    pub clock_ms: f64,
    /// Running ticks this run
    pub ticks: u64,
    /// +0.5 per pipe passed
    pub score: f32,
    pub level: u32,
    /// Best floored score seen, mirrored to storage by the session
    pub high_score: u32,
    /// This run beat the previous record
    pub new_record: bool,
    /// Current scroll velocity (negative)
    pub velocity_x: f32,
    pub player: Player,
    /// Ordered by spawn time == ordered by x, evicted from the front
    pub pipes: VecDeque<Entity>,
    pub power_ups: Vec<Entity>,
    pub enemies: Vec<Entity>,
    pub shield: Shield,
    pub spawn: SpawnClock,
    pub last_gap: Option<Gap>,
    /// Start time of the "LEVEL n" banner
    pub level_banner_since_ms: Option<f64>,
    /// Box where the crash happened, drawn on the game-over screen
    pub crash: Option<Aabb>,
    /// Pending events (drained by the session)
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new state on the title screen
    pub fn new(seed: u64, tuning: Tuning, high_score: u32) -> Self {
        let velocity_x = difficulty::scroll_velocity(0, &tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            countdown: tuning.countdown_start,
            countdown_step: COUNTDOWN_STEP,
            clock_ms: 0.0,
            ticks: 0,
            score: 0.0,
            level: 0,
            high_score,
            new_record: false,
            velocity_x,
            player: Player::new(&tuning),
            pipes: VecDeque::new(),
            power_ups: Vec::new(),
            enemies: Vec::new(),
            shield: Shield::default(),
            spawn: SpawnClock::default(),
            last_gap: None,
            level_banner_since_ms: None,
            crash: None,
            events: Vec::new(),
            tuning,
        }
    }

    /// Clear everything that belongs to a single run.
    ///
    /// Timers are disarmed before any other field is touched.
    pub fn reset_run(&mut self) {
        self.spawn.disarm_pipes();
        self.spawn.reset_timers();
        self.countdown = self.tuning.countdown_start;
        self.clock_ms = 0.0;
        self.ticks = 0;
        self.score = 0.0;
        self.level = 0;
        self.new_record = false;
        self.velocity_x = difficulty::scroll_velocity(0, &self.tuning);
        self.player = Player::new(&self.tuning);
        self.pipes.clear();
        self.power_ups.clear();
        self.enemies.clear();
        self.shield = Shield::default();
        self.last_gap = None;
        self.level_banner_since_ms = None;
        self.crash = None;
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Score as shown on screen and stored
    pub fn display_score(&self) -> u32 {
        self.score.floor().max(0.0) as u32
    }

    /// Right edge of the board, where new entities appear
    pub fn spawn_x(&self) -> f32 {
        BOARD_WIDTH
    }
}
