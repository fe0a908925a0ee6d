// render.rs - Projects the grid onto an injected drawing surface

use serde::{Deserialize, Serialize};

use crate::grid::GridStore;
use crate::mapper::{Cell, Layout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    pub alive: Rgb,
    pub dead: Rgb,
    pub hover: Rgb,
    pub text: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb(50, 50, 50),
            alive: Rgb(100, 100, 100),
            dead: Rgb::BLACK,
            hover: Rgb(150, 150, 150),
            text: Rgb(230, 230, 230),
        }
    }
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn square(x: f32, y: f32, side: f32) -> Self {
        Self {
            x,
            y,
            width: side,
            height: side,
        }
    }
}

/// A canvas-like drawing target supplied by the host.
pub trait Surface {
    fn fill_rect(&mut self, rect: PixelRect, color: Rgb);
    fn stroke_rect(&mut self, rect: PixelRect, line_width: f32, color: Rgb);
    /// `size` is the font height in pixels; `(x, y)` is the top-left of the text.
    fn text(&mut self, x: f32, y: f32, size: f32, text: &str, color: Rgb);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: PixelRect,
        color: Rgb,
    },
    Stroke {
        rect: PixelRect,
        line_width: f32,
        color: Rgb,
    },
    Text {
        x: f32,
        y: f32,
        size: f32,
        text: String,
        color: Rgb,
    },
}

/// Records surface calls so a host can replay the last render every display frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DrawList {
    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    fn stroke_rect(&mut self, rect: PixelRect, line_width: f32, color: Rgb) {
        self.commands.push(DrawCommand::Stroke {
            rect,
            line_width,
            color,
        });
    }

    fn text(&mut self, x: f32, y: f32, size: f32, text: &str, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            size,
            text: text.to_owned(),
            color,
        });
    }
}

/// Live counters shown on top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// `None` until the first rate window has been flushed.
    pub steps_per_second: Option<u32>,
    pub generation: u64,
    pub population: usize,
}

impl Stats {
    pub fn lines(&self) -> [String; 3] {
        let sps = self
            .steps_per_second
            .map_or_else(String::new, |sps| sps.to_string());
        [
            format!("Steps/s: {sps}"),
            format!("Generation: {}", self.generation),
            format!("Population: {}", self.population),
        ]
    }
}

const OVERLAY_FONT_SIZE: f32 = 14.0;

/// Draw the window of `store` onto `surface`. Reads the store, never writes it.
pub fn render(
    surface: &mut impl Surface,
    store: &GridStore,
    layout: &Layout,
    hover: Option<Cell>,
    stats: Option<&Stats>,
    palette: &Palette,
) {
    surface.fill_rect(
        PixelRect::square(0.0, 0.0, layout.board_size),
        palette.background,
    );

    let size = store.game_size();
    for y in 0..size {
        for x in 0..size {
            let (px, py) = layout.cell_origin(x, y);
            let color = if store.get(x, y) {
                palette.alive
            } else {
                palette.dead
            };
            surface.fill_rect(PixelRect::square(px, py, layout.square_size), color);
        }
    }

    if let Some((x, y)) = hover.filter(|&(x, y)| x < size && y < size) {
        let (px, py) = layout.cell_origin(x, y);
        surface.stroke_rect(
            PixelRect::square(px, py, layout.square_size),
            (layout.line_size / 3.0).max(1.0),
            palette.hover,
        );
    }

    if let Some(stats) = stats {
        let line_height = OVERLAY_FONT_SIZE * 1.3;
        for (row, line) in stats.lines().iter().enumerate() {
            surface.text(
                layout.line_size + 4.0,
                layout.line_size + 4.0 + row as f32 * line_height,
                OVERLAY_FONT_SIZE,
                line,
                palette.text,
            );
        }
    }
}
