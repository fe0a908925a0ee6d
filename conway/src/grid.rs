// grid.rs - Backing array of cells with a centered active window

use crate::mapper::{cell_in_window, window_offset, window_to_backing_index};

pub const ARRAY_SIZE: usize = 200;                     // Side of the fixed backing array
pub const DEFAULT_GAME_SIZE: usize = 50;               // Side of the active window at startup

/// Value copy of the whole backing array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    cells: Vec<bool>,
}

impl Snapshot {
    pub fn live_cells(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}

/// Owns the cell states, the snapshot taken at the last run start, and the
/// generation/population counters. Coordinates are window coordinates.
#[derive(Debug, Clone)]
pub struct GridStore {
    array_size: usize,
    game_size: usize,
    cells: Vec<bool>,
    last_game: Snapshot,
    generation: u64,
    population: usize,
}

impl Default for GridStore {
    fn default() -> Self {
        Self::new(ARRAY_SIZE, DEFAULT_GAME_SIZE)
    }
}

impl GridStore {
    pub fn new(array_size: usize, game_size: usize) -> Self {
        let array_size = array_size.max(1);
        let cells = vec![false; array_size * array_size];
        Self {
            array_size,
            game_size: game_size.clamp(1, array_size),
            last_game: Snapshot {
                cells: cells.clone(),
            },
            cells,
            generation: 0,
            population: 0,
        }
    }

    #[inline]
    pub fn array_size(&self) -> usize {
        self.array_size
    }

    #[inline]
    pub fn game_size(&self) -> usize {
        self.game_size
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.population
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        cell_in_window(x as i64, y as i64, self.game_size)
            .then(|| window_to_backing_index(x, y, self.game_size, self.array_size))
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// Writes outside the window are dropped.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        if let Some(i) = self.index(x, y) {
            if self.cells[i] != alive {
                self.cells[i] = alive;
                if alive {
                    self.population += 1;
                } else {
                    self.population -= 1;
                }
            }
        }
    }

    /// Returns the new state of the cell.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        match self.index(x, y) {
            Some(i) => {
                let alive = !self.cells[i];
                self.set(x, y, alive);
                alive
            }
            None => false,
        }
    }

    /// Moore neighborhood clipped to the window; edge cells have fewer than 8 neighbors.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        let y_end = (y + 2).min(self.game_size);
        let x_end = (x + 2).min(self.game_size);
        let mut count = 0;
        for ny in y.saturating_sub(1)..y_end {
            for nx in x.saturating_sub(1)..x_end {
                if (nx, ny) != (x, y) && self.get(nx, ny) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn count_population(&self) -> usize {
        let zero = window_offset(self.game_size, self.array_size);
        (zero..zero + self.game_size)
            .map(|row| {
                let start = row * self.array_size + zero;
                self.cells[start..start + self.game_size]
                    .iter()
                    .filter(|&&alive| alive)
                    .count()
            })
            .sum()
    }

    /// Kill every cell in the backing array and zero the counters.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.generation = 0;
        self.population = 0;
    }

    /// Move to a new window size. Always clears.
    pub fn resize(&mut self, game_size: usize) {
        self.game_size = game_size.clamp(1, self.array_size);
        self.clear();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.cells.clone(),
        }
    }

    /// Snapshots from an array of another size are ignored.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.cells.len() == self.cells.len() {
            self.cells.copy_from_slice(&snapshot.cells);
            self.population = self.count_population();
        }
    }

    pub fn capture_last_run(&mut self) {
        self.last_game = self.snapshot();
    }

    /// Bring back the grid captured at the most recent run start.
    pub fn restore_last_run(&mut self) {
        let last_game = self.last_game.clone();
        self.restore(&last_game);
        self.generation = 0;
    }

    pub fn last_run(&self) -> &Snapshot {
        &self.last_game
    }

    /// Overwrite the window with a row-major generation of `game_size * game_size`
    /// cells. Returns whether any cell changed.
    pub(crate) fn replace_window(&mut self, next: &[bool]) -> bool {
        let size = self.game_size;
        debug_assert_eq!(next.len(), size * size);
        let zero = window_offset(size, self.array_size);
        let mut changed = false;
        for (row, next_row) in next.chunks_exact(size).enumerate() {
            let start = (zero + row) * self.array_size + zero;
            let current = &mut self.cells[start..start + size];
            if current != next_row {
                changed = true;
                current.copy_from_slice(next_row);
            }
        }
        changed
    }

    pub(crate) fn finish_generation(&mut self) {
        self.generation += 1;
        self.population = self.count_population();
    }

    pub(crate) fn reset_generation(&mut self) {
        self.generation = 0;
        self.population = self.count_population();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(cells: &[(usize, usize)]) -> GridStore {
        let mut store = GridStore::new(20, 10);
        for &(x, y) in cells {
            store.set(x, y, true);
        }
        store
    }

    #[test]
    fn set_and_get_use_window_coordinates() {
        let mut store = GridStore::new(200, 50);
        store.set(0, 0, true);
        assert!(store.get(0, 0));
        assert!(store.snapshot().cells[75 * 200 + 75]);
    }

    #[test]
    fn out_of_window_access_is_ignored() {
        let mut store = GridStore::new(20, 10);
        store.set(10, 3, true);
        assert!(!store.get(10, 3));
        assert!(!store.toggle(3, 10));
        assert_eq!(store.snapshot().live_cells(), 0);
    }

    #[test]
    fn toggle_flips_and_tracks_population() {
        let mut store = GridStore::new(20, 10);
        assert!(store.toggle(4, 4));
        assert_eq!(store.population(), 1);
        assert!(!store.toggle(4, 4));
        assert_eq!(store.population(), 0);
    }

    #[test]
    fn neighbors_are_clipped_at_edges() {
        let store = store_with(&[(0, 1), (1, 0), (1, 1), (9, 9)]);
        assert_eq!(store.count_live_neighbors(0, 0), 3);
        assert_eq!(store.count_live_neighbors(1, 1), 2);
        // no wraparound from the far corner
        assert_eq!(store.count_live_neighbors(0, 9), 0);
        assert_eq!(store.count_live_neighbors(8, 8), 1);
    }

    #[test]
    fn neighbors_never_count_the_cell_itself() {
        let store = store_with(&[(5, 5)]);
        assert_eq!(store.count_live_neighbors(5, 5), 0);
        assert_eq!(store.count_live_neighbors(4, 4), 1);
    }

    #[test]
    fn population_counts_only_window() {
        let mut store = store_with(&[(0, 0), (9, 9), (3, 4)]);
        assert_eq!(store.count_population(), 3);
        store.resize(4);
        assert_eq!(store.count_population(), 0);
    }

    #[test]
    fn snapshot_is_a_value_copy() {
        let mut store = store_with(&[(2, 2)]);
        let snap = store.snapshot();
        store.set(2, 2, false);
        store.set(7, 7, true);
        assert_eq!(snap.live_cells(), 1);
        store.restore(&snap);
        assert!(store.get(2, 2));
        assert!(!store.get(7, 7));
        assert_eq!(store.population(), 1);
    }

    #[test]
    fn resize_clears_everything() {
        let mut store = store_with(&[(1, 1), (2, 2)]);
        store.finish_generation();
        store.resize(15);
        assert_eq!(store.game_size(), 15);
        assert_eq!(store.generation(), 0);
        assert_eq!(store.population(), 0);
        assert_eq!(store.snapshot().live_cells(), 0);
    }

    #[test]
    fn resize_is_clamped_to_array() {
        let mut store = GridStore::new(20, 10);
        store.resize(500);
        assert_eq!(store.game_size(), 20);
        store.resize(0);
        assert_eq!(store.game_size(), 1);
    }

    #[test]
    fn replace_window_reports_changes() {
        let mut store = store_with(&[(0, 0)]);
        let mut next = vec![false; 100];
        next[0] = true;
        assert!(!store.replace_window(&next));
        next[11] = true;
        assert!(store.replace_window(&next));
        assert!(store.get(1, 1));
    }
}
