//! Sprite catalogue
//!
//! Every drawable has an image file and a flat fallback color, so the game
//! stays playable while images load or if they are missing.

use crate::sim::{Entity, EntityKind, PipeSide, PipeStyle};

use super::colors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Hero,
    PipeTop,
    PipeBottom,
    HazardTop,
    HazardBottom,
    PowerUp,
    Enemy,
    Collision,
    GameOver,
    HighScore,
}

impl Sprite {
    pub const ALL: [Sprite; 10] = [
        Sprite::Hero,
        Sprite::PipeTop,
        Sprite::PipeBottom,
        Sprite::HazardTop,
        Sprite::HazardBottom,
        Sprite::PowerUp,
        Sprite::Enemy,
        Sprite::Collision,
        Sprite::GameOver,
        Sprite::HighScore,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Sprite::Hero => "hero.png",
            Sprite::PipeTop => "toppipe.png",
            Sprite::PipeBottom => "bottompipe.png",
            Sprite::HazardTop => "hazard_top.png",
            Sprite::HazardBottom => "hazard_bottom.png",
            Sprite::PowerUp => "powerup.png",
            Sprite::Enemy => "enemy.png",
            Sprite::Collision => "collision.png",
            Sprite::GameOver => "gameover.png",
            Sprite::HighScore => "highscore.png",
        }
    }

    /// Flat fill used until the image is ready
    pub fn fallback_color(&self) -> &'static str {
        match self {
            Sprite::Hero => colors::HERO,
            Sprite::PipeTop | Sprite::PipeBottom => colors::PIPE,
            Sprite::HazardTop | Sprite::HazardBottom => colors::HAZARD,
            Sprite::PowerUp => colors::POWER_UP,
            Sprite::Enemy => colors::ENEMY,
            Sprite::Collision => colors::COLLISION,
            Sprite::GameOver | Sprite::HighScore => colors::TRANSPARENT,
        }
    }
}

/// Image for a scrolling entity
pub fn sprite_for(entity: &Entity) -> Sprite {
    match entity.kind {
        EntityKind::Pipe { side, style, .. } => match (side, style) {
            (PipeSide::Top, PipeStyle::Classic) => Sprite::PipeTop,
            (PipeSide::Bottom, PipeStyle::Classic) => Sprite::PipeBottom,
            (PipeSide::Top, PipeStyle::Hazard) => Sprite::HazardTop,
            (PipeSide::Bottom, PipeStyle::Hazard) => Sprite::HazardBottom,
        },
        EntityKind::PowerUp => Sprite::PowerUp,
        EntityKind::Enemy { .. } => Sprite::Enemy,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::SpriteSheet;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use wasm_bindgen::JsValue;
    use web_sys::HtmlImageElement;

    use super::Sprite;

    /// Loaded (or loading) sprite images
    pub struct SpriteSheet {
        images: HashMap<Sprite, HtmlImageElement>,
    }

    impl SpriteSheet {
        /// Start loading every sprite from `images_dir`
        pub fn load(images_dir: &str) -> Result<Self, JsValue> {
            let dir = images_dir.trim_end_matches('/');
            let mut images = HashMap::new();
            for sprite in Sprite::ALL {
                let image = HtmlImageElement::new()?;
                image.set_src(&format!("{dir}/{}", sprite.file_name()));
                images.insert(sprite, image);
            }
            Ok(Self { images })
        }

        /// The image if it finished loading and decoded to something visible
        pub fn ready(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
            self.images
                .get(&sprite)
                .filter(|image| image.complete() && image.natural_width() > 0)
        }
    }
}
