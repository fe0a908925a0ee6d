// mapper.rs - Conversions between surface pixels, window cells and backing indices

/// Window coordinate of a cell, `(x, y)` with `x` the column.
pub type Cell = (usize, usize);

/// Pixel geometry of the board for a given container and window size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub line_size: f32,
    pub square_size: f32,
    /// Side of the square drawing surface.
    pub board_size: f32,
}

impl Layout {
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.square_size + self.line_size
    }

    /// Top-left pixel of a cell's square.
    #[inline]
    pub fn cell_origin(&self, x: usize, y: usize) -> (f32, f32) {
        let pitch = self.pitch();
        (
            x as f32 * pitch + self.line_size,
            y as f32 * pitch + self.line_size,
        )
    }
}

pub fn layout(container_width: f32, container_height: f32, game_size: usize, margin: f32) -> Layout {
    let game_size = game_size.max(1) as f32;
    let board_size = (container_width.min(container_height) - margin).max(0.0);
    let line_size = board_size / game_size / 5.0;
    let square_size = (board_size - line_size) / game_size - line_size;
    Layout {
        line_size,
        square_size,
        board_size,
    }
}

/// Signed so that pixels left of or above the first cell map to negative cells.
pub fn pixel_to_cell(px: f32, py: f32, square_size: f32, line_size: f32) -> (i64, i64) {
    let pitch = square_size + line_size;
    if pitch <= 0.0 {
        return (-1, -1);
    }
    let half_line = line_size / 2.0;
    (
        ((px - half_line) / pitch).floor() as i64,
        ((py - half_line) / pitch).floor() as i64,
    )
}

#[inline]
pub fn cell_in_window(x: i64, y: i64, game_size: usize) -> bool {
    let size = game_size as i64;
    x >= 0 && x < size && y >= 0 && y < size
}

/// Resolve a pixel to a window cell, or `None` when it falls outside the window.
pub fn resolve_cell(px: f32, py: f32, layout: &Layout, game_size: usize) -> Option<Cell> {
    let (x, y) = pixel_to_cell(px, py, layout.square_size, layout.line_size);
    cell_in_window(x, y, game_size).then_some((x as usize, y as usize))
}

/// Offset of the window origin inside the backing array, on both axes.
#[inline]
pub fn window_offset(game_size: usize, array_size: usize) -> usize {
    (array_size / 2).saturating_sub(game_size / 2)
}

pub fn window_to_backing_index(x: usize, y: usize, game_size: usize, array_size: usize) -> usize {
    let zero = window_offset(game_size, array_size);
    (zero + y) * array_size + (zero + x)
}
