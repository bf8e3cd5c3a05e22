//! Canvas 2D painter

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::colors;
use super::sprites::{Sprite, SpriteSheet, sprite_for};
use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::settings::QualityPreset;
use crate::sim::{Aabb, GamePhase, GameState};
use crate::ui::hud::{self, TOP_BAR_HEIGHT, TextGlyph};
use crate::ui::SurfaceLayout;

const W: f64 = BOARD_WIDTH as f64;
const H: f64 = BOARD_HEIGHT as f64;

pub struct CanvasRenderer {
    board: HtmlCanvasElement,
    ui: HtmlCanvasElement,
    board_ctx: CanvasRenderingContext2d,
    ui_ctx: CanvasRenderingContext2d,
    sprites: SpriteSheet,
    layout: SurfaceLayout,
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

impl CanvasRenderer {
    pub fn new(
        board: HtmlCanvasElement,
        ui: HtmlCanvasElement,
        sprites: SpriteSheet,
    ) -> Result<Self, JsValue> {
        let board_ctx = context_2d(&board)?;
        let ui_ctx = context_2d(&ui)?;
        let layout = SurfaceLayout::fit(W, H, 1.0);
        Ok(Self {
            board,
            ui,
            board_ctx,
            ui_ctx,
            sprites,
            layout,
        })
    }

    /// Resize both backing stores and reset the logical transform
    pub fn resize(&mut self, css_width: f64, css_height: f64, device_dpr: f64, quality: QualityPreset) {
        let dpr = quality.effective_dpr(device_dpr);
        self.layout = SurfaceLayout::fit(css_width, css_height, dpr);
        for (canvas, ctx) in [(&self.board, &self.board_ctx), (&self.ui, &self.ui_ctx)] {
            canvas.set_width(self.layout.pixel_width);
            canvas.set_height(self.layout.pixel_height);
            let scale = self.layout.scale;
            if let Err(err) = ctx.set_transform(scale.x as f64, 0.0, 0.0, scale.y as f64, 0.0, 0.0) {
                log::warn!("set_transform failed: {err:?}");
            }
            ctx.set_image_smoothing_enabled(quality.smoothing());
        }
        log::info!(
            "Canvas resized to {}x{} (dpr {dpr})",
            self.layout.pixel_width,
            self.layout.pixel_height
        );
    }

    /// Draw one frame of both layers
    pub fn render(&self, state: &GameState, fps: Option<u32>) {
        self.board_ctx.clear_rect(0.0, 0.0, W, H);
        self.ui_ctx.clear_rect(0.0, 0.0, W, H);

        match state.phase {
            // Title screen is plain DOM
            GamePhase::Idle => {}
            GamePhase::Countdown => {
                self.draw_world(state);
                if let Some(glyph) = hud::countdown_glyph(state.countdown) {
                    self.draw_glyph(&glyph);
                }
            }
            GamePhase::Running | GamePhase::Paused => {
                self.draw_world(state);
                self.draw_top_bar(state, fps);
                if let Some(banner) = hud::level_banner(state) {
                    self.draw_glyph(&banner);
                }
            }
            GamePhase::GameOver => {
                self.draw_world(state);
                if let Some(crash) = state.crash {
                    self.draw_sprite(&self.board_ctx, Sprite::Collision, &crash, 1.0);
                }
                self.draw_summary(state);
            }
        }
    }

    fn draw_world(&self, state: &GameState) {
        let ctx = &self.board_ctx;
        for entity in state
            .pipes
            .iter()
            .chain(&state.power_ups)
            .chain(&state.enemies)
        {
            self.draw_sprite(ctx, sprite_for(entity), &entity.bounds(), 1.0);
        }
        self.draw_sprite(ctx, Sprite::Hero, &state.player.bounds(), 1.0);
        if let Some(shield) = hud::shield_visual(state) {
            self.draw_sprite(ctx, Sprite::PowerUp, &shield.bounds, shield.alpha);
        }
    }

    fn draw_top_bar(&self, state: &GameState, fps: Option<u32>) {
        let Some(bar) = hud::top_bar(state, fps) else {
            return;
        };
        let ctx = &self.ui_ctx;
        let cx = W / 2.0;
        ctx.set_fill_style_str(colors::BAR);
        ctx.fill_rect(0.0, 0.0, W, TOP_BAR_HEIGHT as f64);

        ctx.set_fill_style_str(colors::TEXT);
        ctx.set_text_align("center");
        ctx.set_font("16px Arial");
        let _ = ctx.fill_text(&format!("HIGH: {}", bar.high_score), cx - 140.0, 30.0);
        let _ = ctx.fill_text(&format!("LEVEL {}", bar.level), cx, 30.0);
        if let Some(fps) = bar.fps {
            let _ = ctx.fill_text(&format!("{fps} FPS"), cx + 140.0, 30.0);
        }

        ctx.set_font("bold 45px 'Arial Black'");
        let _ = ctx.fill_text(&bar.score.to_string(), cx, 100.0);
    }

    fn draw_summary(&self, state: &GameState) {
        let Some(card) = hud::summary(state) else {
            return;
        };
        let ctx = &self.ui_ctx;
        let cx = W / 2.0;
        ctx.set_fill_style_str(colors::DIM);
        ctx.fill_rect(0.0, 0.0, W, H);

        self.draw_sprite(ctx, Sprite::GameOver, &Aabb::new(cx as f32 - 225.0, 95.0, 450.0, 200.0), 1.0);
        self.draw_sprite(ctx, Sprite::HighScore, &Aabb::new(cx as f32 - 110.0, 280.0, 150.0, 80.0), 1.0);

        ctx.set_fill_style_str(colors::TEXT);
        ctx.set_text_align("center");
        ctx.set_font("bold 45px 'Arial Black'");
        let _ = ctx.fill_text(&card.score.to_string(), cx, 100.0);
        let _ = ctx.fill_text(&card.high_score.to_string(), cx + 75.0, 330.0);
        if card.new_record {
            ctx.set_font("bold 20px Arial");
            let _ = ctx.fill_text("NEW RECORD!", cx, 400.0);
        }
    }

    fn draw_glyph(&self, glyph: &TextGlyph) {
        let ctx = &self.ui_ctx;
        ctx.save();
        ctx.set_global_alpha(glyph.alpha.clamp(0.0, 1.0) as f64);
        ctx.set_fill_style_str(colors::TEXT);
        ctx.set_text_align("center");
        ctx.set_font(&format!("bold {:.0}px Arial", glyph.font_px));
        let _ = ctx.fill_text(&glyph.text, glyph.pos.x as f64, glyph.pos.y as f64);
        ctx.restore();
    }

    /// Draw the sprite image, or its fallback rectangle while it loads
    fn draw_sprite(&self, ctx: &CanvasRenderingContext2d, sprite: Sprite, bounds: &Aabb, alpha: f32) {
        let (x, y) = (bounds.left() as f64, bounds.top() as f64);
        let (w, h) = (bounds.size.x as f64, bounds.size.y as f64);
        ctx.set_global_alpha(alpha as f64);
        match self.sprites.ready(sprite) {
            Some(image) => {
                let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h);
            }
            None => {
                ctx.set_fill_style_str(sprite.fallback_color());
                ctx.fill_rect(x, y, w, h);
            }
        }
        ctx.set_global_alpha(1.0);
    }
}
