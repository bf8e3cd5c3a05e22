//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timers on the simulation clock, never wall-clock time
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, detect_collision};
pub use spawn::SpawnClock;
pub use state::{
    COUNTDOWN_STEP, CrashCause, Entity, EntityKind, GameEvent, GamePhase, GameState, Gap,
    PipeSide, PipeStyle, Player, Shield,
};
pub use tick::{TickInput, tick};
