//! Drawing primitives for the display list

use glam::Vec2;

use crate::sim::Rect;

/// sRGB colour with alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    /// From a 0xRRGGBB literal
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Hue in degrees, full saturation, given lightness (0.0 - 1.0)
    pub fn hsl(hue: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let l = lightness.clamp(0.0, 1.0);
        let c = 1.0 - (2.0 * l - 1.0).abs();
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: 1.0,
        }
    }

    /// CSS `rgba()` string
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a.clamp(0.0, 1.0))
    }
}

/// The neon palette shared by the games
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::hex(0x050505);
    pub const WHITE: Color = Color::hex(0xffffff);
    pub const GRID: Color = Color::hex(0x1a1a1a);
    pub const CYAN: Color = Color::hex(0x00f3ff);
    pub const PINK: Color = Color::hex(0xff00ff);
    pub const PURPLE: Color = Color::hex(0xa855f7);
    pub const GREEN: Color = Color::hex(0x22c55e);
    pub const YELLOW: Color = Color::hex(0xeab308);
    pub const ORANGE: Color = Color::hex(0xf97316);
    pub const RED: Color = Color::hex(0xef4444);
    pub const SLATE: Color = Color::hex(0x64748b);
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// One primitive in draw order
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        rect: Rect,
        color: Color,
        /// Neon glow blur radius (0 = none)
        glow: f32,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        glow: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    /// Closed filled polygon
    Poly {
        points: Vec<Vec2>,
        color: Color,
        glow: f32,
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: Color,
        align: Align,
    },
}
