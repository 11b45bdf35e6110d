//! Canvas 2D painter for the wasm host

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::{Align, Frame, Shape};

/// Paint a frame, replacing whatever the canvas showed before
pub fn paint(ctx: &CanvasRenderingContext2d, frame: &Frame) {
    let (w, h) = (frame.viewport.width as f64, frame.viewport.height as f64);
    ctx.set_shadow_blur(0.0);
    ctx.set_fill_style_str(&frame.background.css());
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_text_baseline("middle");

    for shape in &frame.shapes {
        match shape {
            Shape::Rect { rect, color, glow } => {
                set_glow(ctx, *glow, &color.css());
                ctx.set_fill_style_str(&color.css());
                ctx.fill_rect(
                    rect.pos.x as f64,
                    rect.pos.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
            Shape::StrokeRect { rect, color, width } => {
                set_glow(ctx, 0.0, "");
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width(*width as f64);
                ctx.stroke_rect(
                    rect.pos.x as f64,
                    rect.pos.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
            Shape::Circle {
                center,
                radius,
                color,
                glow,
            } => {
                set_glow(ctx, *glow, &color.css());
                ctx.set_fill_style_str(&color.css());
                ctx.begin_path();
                if ctx
                    .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
                    .is_ok()
                {
                    ctx.fill();
                }
            }
            Shape::Line {
                from,
                to,
                color,
                width,
            } => {
                set_glow(ctx, 0.0, "");
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            Shape::Poly { points, color, glow } => {
                let Some(first) = points.first() else { continue };
                set_glow(ctx, *glow, &color.css());
                ctx.set_fill_style_str(&color.css());
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in &points[1..] {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();
                ctx.fill();
            }
            Shape::Text {
                pos,
                text,
                size,
                color,
                align,
            } => {
                set_glow(ctx, 0.0, "");
                ctx.set_fill_style_str(&color.css());
                ctx.set_font(&format!("bold {}px monospace", size.round()));
                ctx.set_text_align(match align {
                    Align::Left => "left",
                    Align::Center => "center",
                    Align::Right => "right",
                });
                let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
            }
        }
    }
    ctx.set_shadow_blur(0.0);
}

fn set_glow(ctx: &CanvasRenderingContext2d, glow: f32, color: &str) {
    if glow > 0.0 {
        ctx.set_shadow_blur(glow as f64);
        ctx.set_shadow_color(color);
    } else {
        ctx.set_shadow_blur(0.0);
    }
}
