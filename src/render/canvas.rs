//! Canvas 2D implementation of the drawing surface

use std::f64::consts::{PI, TAU};

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::assets::{ImageStore, SpriteId};
use crate::render::{Surface, TextAlign};

const GRID_SPACING: f64 = 50.0;
const GRID_COLOR: &str = "rgba(255, 255, 255, 0.02)";
const ARROW_HEAD_LENGTH: f64 = 12.0;

/// Drawing surface backed by a `<canvas>` 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixel_ratio: f64,
    images: ImageStore,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, images: ImageStore) -> Result<Self, &'static str> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "failed to get 2d context")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "context is not 2d")?;

        let pixel_ratio = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);

        let mut surface = Self {
            canvas,
            ctx,
            pixel_ratio,
            images,
        };
        surface.setup_high_dpi();
        Ok(surface)
    }

    /// Size the backing store to CSS pixels times the device pixel ratio so
    /// drawing coordinates stay in CSS pixels.
    fn setup_high_dpi(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        self.canvas.set_width((rect.width() * self.pixel_ratio) as u32);
        self.canvas.set_height((rect.height() * self.pixel_ratio) as u32);
        let _ = self.ctx.scale(self.pixel_ratio, self.pixel_ratio);
    }

    /// Refit the backing store after a window resize
    pub fn handle_resize(&mut self) {
        self.setup_high_dpi();
    }

    /// Drawing area in CSS pixels
    fn logical_size(&self) -> (f64, f64) {
        (
            self.canvas.width() as f64 / self.pixel_ratio,
            self.canvas.height() as f64 / self.pixel_ratio,
        )
    }

    fn set_align(&self, align: TextAlign) {
        let name = match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        };
        self.ctx.set_text_align(name);
        self.ctx.set_text_baseline("top");
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, color: &str) {
        let (w, h) = self.logical_size();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn draw_grid(&mut self) {
        let (w, h) = self.logical_size();
        self.ctx.set_stroke_style_str(GRID_COLOR);
        self.ctx.set_line_width(0.5);

        let mut x = 0.0;
        while x <= w {
            self.ctx.begin_path();
            self.ctx.move_to(x, 0.0);
            self.ctx.line_to(x, h);
            self.ctx.stroke();
            x += GRID_SPACING;
        }

        let mut y = 0.0;
        while y <= h {
            self.ctx.begin_path();
            self.ctx.move_to(0.0, y);
            self.ctx.line_to(w, y);
            self.ctx.stroke();
            y += GRID_SPACING;
        }
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(x as f64, y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, x: f32, y: f32, radius: f32, color: &str, line_width: f32) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.begin_path();
        let _ = self.ctx.arc(x as f64, y as f64, radius as f64, 0.0, TAU);
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn draw_sprite(&mut self, sprite: SpriteId, x: f32, y: f32, width: f32, height: f32, rotation: f32) {
        let Some(image) = self.images.get(sprite) else {
            return;
        };

        self.ctx.save();
        let _ = self.ctx.translate(x as f64, y as f64);
        if rotation != 0.0 {
            let _ = self.ctx.rotate(rotation as f64);
        }
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            -(width as f64) / 2.0,
            -(height as f64) / 2.0,
            width as f64,
            height as f64,
        );
        self.ctx.restore();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str, align: TextAlign) {
        self.ctx.set_font(font);
        self.set_align(align);
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn stroke_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: &str,
        color: &str,
        stroke_color: &str,
        align: TextAlign,
    ) {
        self.ctx.set_font(font);
        self.set_align(align);

        self.ctx.set_stroke_style_str(stroke_color);
        self.ctx.set_line_width(3.0);
        let _ = self.ctx.stroke_text(text, x as f64, y as f64);

        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn draw_particle(&mut self, x: f32, y: f32, size: f32, color: &str, alpha: f32) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        self.fill_circle(x, y, size, color);
        self.ctx.restore();
    }

    fn draw_arrow(&mut self, x: f32, y: f32, angle: f32, length: f32, color: &str) {
        let angle = angle as f64;
        let end_x = x as f64 + angle.cos() * length as f64;
        let end_y = y as f64 + angle.sin() * length as f64;

        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.move_to(end_x, end_y);
        self.ctx.line_to(
            end_x - ARROW_HEAD_LENGTH * (angle - PI / 6.0).cos(),
            end_y - ARROW_HEAD_LENGTH * (angle - PI / 6.0).sin(),
        );
        self.ctx.line_to(
            end_x - ARROW_HEAD_LENGTH * (angle + PI / 6.0).cos(),
            end_y - ARROW_HEAD_LENGTH * (angle + PI / 6.0).sin(),
        );
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn draw_heart(&mut self, x: f32, y: f32, size: f32, filled: bool) {
        let size = size as f64;
        let top = size * 0.3;

        self.ctx.save();
        let _ = self.ctx.translate(x as f64, y as f64);

        self.ctx.begin_path();
        self.ctx.move_to(0.0, top);
        self.ctx.bezier_curve_to(0.0, 0.0, -size / 2.0, 0.0, -size / 2.0, top);
        self.ctx.bezier_curve_to(
            -size / 2.0,
            (size + top) / 2.0,
            0.0,
            (size + top) / 1.3,
            0.0,
            size,
        );
        self.ctx.bezier_curve_to(
            0.0,
            (size + top) / 1.3,
            size / 2.0,
            (size + top) / 2.0,
            size / 2.0,
            top,
        );
        self.ctx.bezier_curve_to(size / 2.0, 0.0, 0.0, 0.0, 0.0, top);
        self.ctx.close_path();

        if filled {
            self.ctx.set_fill_style_str("#ff6b6b");
            self.ctx.fill();
        } else {
            self.ctx.set_stroke_style_str("#555555");
            self.ctx.set_line_width(2.0);
            self.ctx.stroke();
        }

        self.ctx.restore();
    }
}
