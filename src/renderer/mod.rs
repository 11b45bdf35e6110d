//! Backend-neutral rendering
//!
//! Games emit a `Frame` (an ordered display list in CSS pixels). The wasm
//! host paints it onto a Canvas 2D context; tests inspect it directly.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

use glam::Vec2;

pub use shapes::{Align, Color, Shape, palette};

use crate::sim::{Rect, Viewport};

/// One frame's display list
#[derive(Debug, Clone)]
pub struct Frame {
    pub viewport: Viewport,
    pub background: Color,
    pub shapes: Vec<Shape>,
}

impl Frame {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: palette::BACKGROUND,
            shapes: Vec::with_capacity(256),
        }
    }

    pub fn clear(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.background = palette::BACKGROUND;
        self.shapes.clear();
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.shapes.push(Shape::Rect { rect, color, glow: 0.0 });
    }

    pub fn glow_rect(&mut self, rect: Rect, color: Color, glow: f32) {
        self.shapes.push(Shape::Rect { rect, color, glow });
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.shapes.push(Shape::StrokeRect { rect, color, width });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color, glow: f32) {
        self.shapes.push(Shape::Circle {
            center,
            radius,
            color,
            glow,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.shapes.push(Shape::Line {
            from,
            to,
            color,
            width,
        });
    }

    pub fn poly(&mut self, points: Vec<Vec2>, color: Color, glow: f32) {
        self.shapes.push(Shape::Poly { points, color, glow });
    }

    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, size: f32, color: Color, align: Align) {
        self.shapes.push(Shape::Text {
            pos,
            text: text.into(),
            size,
            color,
            align,
        });
    }

    /// Centred text
    pub fn label(&mut self, pos: Vec2, text: impl Into<String>, size: f32, color: Color) {
        self.text(pos, text, size, color, Align::Center);
    }

    /// Texts in draw order (used by tests and the headless host)
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_collects_shapes_in_order() {
        let mut frame = Frame::new(Viewport::default());
        frame.rect(Rect::new(0.0, 0.0, 10.0, 10.0), palette::CYAN);
        frame.label(Vec2::new(5.0, 5.0), "HELLO", 12.0, palette::WHITE);
        frame.circle(Vec2::ZERO, 3.0, palette::PINK, 8.0);

        assert_eq!(frame.shapes.len(), 3);
        assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["HELLO"]);

        frame.clear(Viewport::new(400.0, 300.0));
        assert!(frame.shapes.is_empty());
        assert_eq!(frame.viewport.width, 400.0);
    }
}
