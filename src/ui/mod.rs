//! Overlay models and surface layout

pub mod hud;
pub mod layout;

pub use hud::{Controls, FpsCounter, ShieldVisual, Summary, TextGlyph, TopBar};
pub use layout::SurfaceLayout;
