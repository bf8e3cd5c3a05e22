//! Hero Flight - a side-scrolling flying-hero arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `game`: Session wiring the simulation to commands, settings and storage
//! - `platform`: Browser/native platform abstraction
//! - `ui`: Pure overlay models and surface layout
//! - `renderer`: Canvas 2D rendering (painter is wasm only)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::Error;
pub use game::{Command, Game};
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Milliseconds of simulation time per tick
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical board dimensions (everything is simulated and drawn in this space)
    pub const BOARD_WIDTH: f32 = 360.0;
    pub const BOARD_HEIGHT: f32 = 640.0;
}
