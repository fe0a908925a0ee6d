// stepper.rs - Conway's transition rule applied to the active window

use crate::grid::GridStore;

/// B3/S23.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Advance the window by one generation. Every cell is computed from the
/// current generation before any cell is written back.
///
/// Returns `false` when the produced generation equals its predecessor.
pub fn step(store: &mut GridStore) -> bool {
    let size = store.game_size();
    let mut next = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            next.push(next_state(store.get(x, y), store.count_live_neighbors(x, y)));
        }
    }
    let changed = store.replace_window(&next);
    store.finish_generation();
    changed
}
