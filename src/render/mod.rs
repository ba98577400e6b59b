//! Drawing-surface contract
//!
//! The simulation renders through this trait so it never touches the canvas
//! (or any platform API) directly. The wasm implementation lives in
//! [`canvas`]; tests use [`NullSurface`].

use crate::assets::SpriteId;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// 2D drawing primitives consumed by the game's render paths
pub trait Surface {
    /// Fill the whole surface with a background color
    fn clear(&mut self, color: &str);

    /// Faint alignment grid over the playing field
    fn draw_grid(&mut self);

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str);

    fn stroke_circle(&mut self, x: f32, y: f32, radius: f32, color: &str, line_width: f32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: &str);

    /// Image blit centered at (x, y), rotated around the center
    fn draw_sprite(&mut self, sprite: SpriteId, x: f32, y: f32, width: f32, height: f32, rotation: f32);

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str, align: TextAlign);

    /// Text with a dark outline so it stays readable over the field
    fn stroke_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: &str,
        color: &str,
        stroke_color: &str,
        align: TextAlign,
    );

    /// Alpha-blended particle dot
    fn draw_particle(&mut self, x: f32, y: f32, size: f32, color: &str, alpha: f32);

    /// Aim indicator: arrowhead at `length` along `angle` from (x, y)
    fn draw_arrow(&mut self, x: f32, y: f32, angle: f32, length: f32, color: &str);

    /// HUD heart glyph, filled for remaining health
    fn draw_heart(&mut self, x: f32, y: f32, size: f32, filled: bool);
}

/// Surface that draws nothing. Lets the simulation run headless.
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self, _color: &str) {}
    fn draw_grid(&mut self) {}
    fn fill_circle(&mut self, _x: f32, _y: f32, _radius: f32, _color: &str) {}
    fn stroke_circle(&mut self, _x: f32, _y: f32, _radius: f32, _color: &str, _line_width: f32) {}
    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, _color: &str) {}
    fn draw_sprite(
        &mut self,
        _sprite: SpriteId,
        _x: f32,
        _y: f32,
        _width: f32,
        _height: f32,
        _rotation: f32,
    ) {
    }
    fn fill_text(&mut self, _text: &str, _x: f32, _y: f32, _font: &str, _color: &str, _align: TextAlign) {}
    fn stroke_text(
        &mut self,
        _text: &str,
        _x: f32,
        _y: f32,
        _font: &str,
        _color: &str,
        _stroke_color: &str,
        _align: TextAlign,
    ) {
    }
    fn draw_particle(&mut self, _x: f32, _y: f32, _size: f32, _color: &str, _alpha: f32) {}
    fn draw_arrow(&mut self, _x: f32, _y: f32, _angle: f32, _length: f32, _color: &str) {}
    fn draw_heart(&mut self, _x: f32, _y: f32, _size: f32, _filled: bool) {}
}
