// board.rs - Replays the core's draw list onto an egui painter

use conway::{DrawCommand, DrawList, PixelRect, Rgb};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

/// The last render, kept so every egui frame can repaint the board without
/// asking the core to render again.
#[derive(Default)]
pub struct BoardCache {
    pub container: Vec2,
    pub commands: DrawList,
}

#[inline]
pub fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

#[inline]
pub fn rgb(color: Color32) -> Rgb {
    Rgb(color.r(), color.g(), color.b())
}

fn to_rect(origin: Pos2, rect: &PixelRect) -> Rect {
    Rect::from_min_size(
        origin + Vec2::new(rect.x, rect.y),
        Vec2::new(rect.width, rect.height),
    )
}

pub fn paint(painter: &Painter, origin: Pos2, list: &DrawList) {
    for command in list.commands() {
        match command {
            DrawCommand::Fill { rect, color } => {
                painter.rect_filled(to_rect(origin, rect), 0.0, color32(*color));
            }
            DrawCommand::Stroke {
                rect,
                line_width,
                color,
            } => {
                painter.rect_stroke(
                    to_rect(origin, rect),
                    0.0,
                    Stroke::new(*line_width, color32(*color)),
                );
            }
            DrawCommand::Text {
                x,
                y,
                size,
                text,
                color,
            } => {
                painter.text(
                    origin + Vec2::new(*x, *y),
                    Align2::LEFT_TOP,
                    text,
                    FontId::monospace(*size),
                    color32(*color),
                );
            }
        }
    }
}
