//! Canvas 2D rendering module
//!
//! Two stacked canvases: the board layer holds the world, the ui layer holds
//! text and cards. Both are cleared and redrawn every frame in logical board
//! coordinates.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod sprites;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use sprites::{Sprite, sprite_for};

/// Color palette (CSS color strings)
pub mod colors {
    pub const HERO: &str = "#1e4fd8";
    pub const PIPE: &str = "#3aa635";
    pub const HAZARD: &str = "#c0392b";
    pub const POWER_UP: &str = "#f1c40f";
    pub const ENEMY: &str = "#6c3483";
    pub const COLLISION: &str = "rgba(255, 120, 0, 0.8)";
    pub const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";
    /// Gold used for every piece of HUD text
    pub const TEXT: &str = "#FFD700";
    pub const BAR: &str = "rgba(0, 0, 0, 0.5)";
    pub const DIM: &str = "rgba(0, 0, 0, 0.5)";
}
