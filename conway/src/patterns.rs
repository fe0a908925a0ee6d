// patterns.rs - Preset starting patterns and seeded random fill

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::grid::GridStore;
use crate::mapper::cell_in_window;

/// A named shape. Cells are `(x, y)` offsets from the shape's top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Width and height of the shape's bounding box.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(w, h), &(x, y)| (w.max(x + 1), h.max(y + 1)))
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 1), (2, 1), (2, 0), (1, 2), (0, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (0, 4), (1, 4), (0, 5), (1, 5),
            (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8),
            (13, 2), (13, 8), (14, 5), (15, 3), (15, 7), (16, 4), (16, 5),
            (16, 6), (17, 5), (20, 2), (20, 3), (20, 4), (21, 2), (21, 3),
            (21, 4), (22, 1), (22, 5), (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (34, 3), (35, 2), (35, 3),
        ],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

/// Clear the grid and stamp `pattern` centered in the window. Cells that land
/// outside the window are dropped.
pub fn apply_pattern(store: &mut GridStore, pattern: &Pattern) {
    store.clear();

    let size = store.game_size() as i64;
    let (width, height) = pattern.extent();
    let origin_x = (size - width as i64) / 2;
    let origin_y = (size - height as i64) / 2;

    for &(x, y) in pattern.cells {
        let (wx, wy) = (origin_x + x as i64, origin_y + y as i64);
        if cell_in_window(wx, wy, store.game_size()) {
            store.set(wx as usize, wy as usize, true);
        }
    }
}

/// Clear the grid and fill the window with roughly one live cell in three.
pub fn apply_random_pattern(store: &mut GridStore, seed: u64) {
    store.clear();

    let mut rng = SmallRng::seed_from_u64(seed);
    let size = store.game_size();
    for y in 0..size {
        for x in 0..size {
            if rng.gen_bool(1.0 / 3.0) {
                store.set(x, y, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stepper::step;

    #[test]
    fn extents_cover_every_cell() {
        for pattern in PATTERNS {
            let (w, h) = pattern.extent();
            assert!(
                pattern.cells.iter().all(|&(x, y)| x < w && y < h),
                "{} escapes its extent",
                pattern.name
            );
        }
        assert_eq!(find("pulsar").map(Pattern::extent), Some((13, 13)));
    }

    #[test]
    fn pattern_is_centered() {
        let mut store = GridStore::new(40, 11);
        let blinker = find("Blinker").expect("blinker preset");
        apply_pattern(&mut store, blinker);
        assert!(store.get(4, 5) && store.get(5, 5) && store.get(6, 5));
        assert_eq!(store.population(), 3);
    }

    #[test]
    fn oversized_pattern_is_clipped_to_window() {
        let mut store = GridStore::new(200, 20);
        let gun = find("Gosper Glider Gun").expect("gun preset");
        apply_pattern(&mut store, gun);
        assert!(store.population() < gun.cells.len());
        assert_eq!(store.population(), store.count_population());
    }

    #[test]
    fn stamping_replaces_previous_cells() {
        let mut store = GridStore::new(40, 20);
        store.set(0, 0, true);
        apply_pattern(&mut store, find("Block").expect("block preset"));
        assert!(!store.get(0, 0));
        assert_eq!(store.population(), 4);
        assert!(!step(&mut store), "block is a still life");
    }

    #[test]
    fn random_fill_is_reproducible() {
        let mut a = GridStore::new(60, 30);
        let mut b = GridStore::new(60, 30);
        apply_random_pattern(&mut a, 7);
        apply_random_pattern(&mut b, 7);
        assert_eq!(a.snapshot(), b.snapshot());
        let live = a.population();
        assert!(live > 150 && live < 450, "about a third of 900 cells, got {live}");
    }

    #[test]
    fn pulsar_oscillates_with_period_three() {
        let mut store = GridStore::new(40, 20);
        apply_pattern(&mut store, find("Pulsar").expect("pulsar preset"));
        let start = store.snapshot();
        for _ in 0..3 {
            assert!(step(&mut store));
        }
        assert_eq!(store.snapshot(), start);
    }
}
