//! Surface layout
//!
//! The game is simulated in a fixed 360x640 logical board and stretched to
//! whatever the canvas occupies on screen.

use glam::Vec2;

use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH};

/// Backing-store size of both canvases and the logical → pixel transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Pixels per logical unit on each axis
    pub scale: Vec2,
}

impl SurfaceLayout {
    /// Fit a CSS-sized surface at the given device pixel ratio
    pub fn fit(css_width: f64, css_height: f64, dpr: f64) -> Self {
        let pixel_width = (css_width * dpr).round().max(1.0) as u32;
        let pixel_height = (css_height * dpr).round().max(1.0) as u32;
        Self {
            pixel_width,
            pixel_height,
            scale: Vec2::new(
                pixel_width as f32 / BOARD_WIDTH,
                pixel_height as f32 / BOARD_HEIGHT,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_scales_each_axis() {
        let layout = SurfaceLayout::fit(360.0, 640.0, 2.0);
        assert_eq!(layout.pixel_width, 720);
        assert_eq!(layout.pixel_height, 1280);
        assert_eq!(layout.scale, Vec2::new(2.0, 2.0));

        let wide = SurfaceLayout::fit(720.0, 640.0, 1.0);
        assert_eq!(wide.scale, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_zero_sized_surface_stays_valid() {
        let layout = SurfaceLayout::fit(0.0, 0.0, 1.0);
        assert_eq!(layout.pixel_width, 1);
        assert!(layout.scale.x > 0.0);
    }
}
