// life.rs - The simulation-state object driven by the host's frame and input callbacks

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::LifeConfig;
use crate::grid::GridStore;
use crate::mapper::{self, Cell, Layout};
use crate::patterns::{self, Pattern};
use crate::render::{self, Palette, Stats, Surface};
use crate::scheduler::{RunState, Scheduler, SpeedTable};
use crate::stepper;

/// What a display frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// One generation was applied.
    pub stepped: bool,
    /// The applied generation matched its predecessor and the run stopped.
    pub stabilized: bool,
}

/// Grid, clock, hover and layout for one board. Hosts own one of these and
/// translate their input events into method calls.
pub struct Life {
    config: LifeConfig,
    store: GridStore,
    scheduler: Scheduler,
    container: (f32, f32),
    layout: Layout,
    hover: Option<Cell>,
    show_stats: bool,
    redraw: bool,
}

impl Default for Life {
    fn default() -> Self {
        Self::new(LifeConfig::default())
    }
}

impl Life {
    /// A config that fails [`LifeConfig::validate`] is replaced by the defaults.
    pub fn new(config: LifeConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!(%err, "invalid config, using defaults");
                LifeConfig::default()
            }
        };
        let game_size = config.clamp_game_size(config.initial_game_size);
        let speeds = SpeedTable::new(config.min_speed_level, config.max_speed_level);
        let scheduler = Scheduler::new(
            speeds,
            config.initial_speed_level,
            Duration::from_millis(config.rate_window_ms),
        );
        Self {
            store: GridStore::new(config.array_size, game_size),
            scheduler,
            container: (0.0, 0.0),
            layout: Layout::default(),
            hover: None,
            show_stats: true,
            redraw: true,
            config,
        }
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn store(&self) -> &GridStore {
        &self.store
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn run_state(&self) -> RunState {
        self.scheduler.state()
    }

    #[inline]
    pub fn board_size(&self) -> usize {
        self.store.game_size()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.store.population()
    }

    pub fn speed_level(&self) -> u32 {
        self.scheduler.speed_level()
    }

    pub fn interval(&self) -> Duration {
        self.scheduler.interval()
    }

    pub fn steps_per_second(&self) -> Option<u32> {
        self.scheduler.rate().steps_per_second()
    }

    pub fn hover(&self) -> Option<Cell> {
        self.hover
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn palette(&self) -> &Palette {
        &self.config.palette
    }

    pub fn stats(&self) -> Stats {
        Stats {
            steps_per_second: self.steps_per_second(),
            generation: self.generation(),
            population: self.population(),
        }
    }

    fn relayout(&mut self) {
        let (width, height) = self.container;
        self.layout = mapper::layout(width, height, self.board_size(), self.config.board_margin);
    }

    // --- size and speed controls ---

    /// Stops the run, clears the grid and lays the board out again, even when
    /// the size does not change.
    pub fn set_board_size(&mut self, requested: usize) {
        let size = self.config.clamp_game_size(requested);
        if size != requested {
            warn!(requested, applied = size, "board size adjusted to the allowed range");
        }
        self.stop();
        self.store.resize(size);
        self.hover = None;
        self.relayout();
        self.redraw = true;
        info!(game_size = size, "board size changed");
    }

    /// Grow (`steps > 0`) or shrink the board by whole size steps. Does nothing
    /// at the ends of the range.
    pub fn zoom(&mut self, steps: i32) {
        let step = self.config.size_step as i64;
        let target = self.board_size() as i64 + i64::from(steps) * step;
        let min = self.config.min_game_size as i64;
        let max = self.config.max_game_size as i64;
        if steps == 0 || !(min..=max).contains(&target) {
            return;
        }
        self.set_board_size(target as usize);
    }

    /// The running state is left alone.
    pub fn set_speed(&mut self, level: u32) -> u32 {
        let applied = self.scheduler.set_speed(level);
        if applied != level {
            warn!(requested = level, applied, "speed level adjusted to the allowed range");
        }
        debug!(level = applied, interval_ms = self.interval().as_millis() as u64, "speed changed");
        applied
    }

    /// Move the speed level by `steps` within range.
    pub fn scroll_speed(&mut self, steps: i32) {
        let target = i64::from(self.speed_level()) + i64::from(steps);
        let speeds = self.scheduler.speeds();
        let (min, max) = (i64::from(speeds.min_level()), i64::from(speeds.max_level()));
        if steps != 0 && (min..=max).contains(&target) {
            self.set_speed(target as u32);
        }
    }

    // --- run state ---

    pub fn run(&mut self) {
        if self.scheduler.run() {
            self.store.capture_last_run();
            info!(
                generation = self.generation(),
                population = self.population(),
                "simulation started"
            );
        }
    }

    pub fn stop(&mut self) {
        if self.scheduler.stop() {
            self.redraw = true;
            info!(generation = self.generation(), "simulation stopped");
        }
    }

    pub fn toggle_run(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.run();
        }
    }

    /// Bring back the grid captured when the last run started.
    pub fn reset_to_last_run(&mut self) {
        self.stop();
        self.store.restore_last_run();
        self.redraw = true;
        info!(population = self.population(), "grid reset to last run");
    }

    // --- editing ---

    /// Ignored while running. Returns the new cell state when a cell was toggled.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Option<bool> {
        if self.is_running() || x >= self.board_size() || y >= self.board_size() {
            return None;
        }
        let alive = self.store.toggle(x, y);
        self.redraw = true;
        debug!(x, y, alive, "cell toggled");
        Some(alive)
    }

    pub fn clear(&mut self) {
        self.stop();
        self.store.clear();
        self.redraw = true;
        info!("grid cleared");
    }

    pub fn apply_pattern(&mut self, pattern: &Pattern) {
        self.stop();
        patterns::apply_pattern(&mut self.store, pattern);
        self.redraw = true;
        info!(pattern = pattern.name, population = self.population(), "pattern applied");
    }

    pub fn randomize(&mut self, seed: u64) {
        self.stop();
        patterns::apply_random_pattern(&mut self.store, seed);
        self.redraw = true;
        info!(seed, population = self.population(), "random pattern applied");
    }

    // --- pointer and surface events (pixel coordinates relative to the board) ---

    pub fn on_pointer_move(&mut self, px: f32, py: f32) {
        if self.is_running() {
            return;
        }
        let cell = mapper::resolve_cell(px, py, &self.layout, self.board_size());
        if cell != self.hover {
            self.hover = cell;
            self.redraw = true;
        }
    }

    pub fn on_pointer_leave(&mut self) {
        if self.is_running() || self.hover.is_none() {
            return;
        }
        self.hover = None;
        self.redraw = true;
    }

    pub fn on_click(&mut self, px: f32, py: f32) -> Option<bool> {
        if self.is_running() {
            return None;
        }
        let (x, y) = mapper::resolve_cell(px, py, &self.layout, self.board_size())?;
        self.toggle_cell(x, y)
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.container = (width, height);
        self.relayout();
        self.redraw = true;
        debug!(width, height, board = self.layout.board_size, "surface resized");
    }

    // --- display loop ---

    /// Called once per display frame with the host's frame timestamp. Steps at
    /// most once, and only when the selected interval has elapsed since the
    /// last step; other frames are dropped.
    pub fn frame(&mut self, now: Duration) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if !self.is_running() {
            return outcome;
        }

        // A flush only updates the counter; renders stay tied to steps
        self.scheduler.rate_mut().poll(now);

        if self.scheduler.due(now) {
            let changed = stepper::step(&mut self.store);
            self.scheduler.rate_mut().tick(now);
            self.redraw = true;
            outcome.stepped = true;
            debug!(
                generation = self.generation(),
                population = self.population(),
                "generation applied"
            );
            if !changed {
                info!(generation = self.generation(), "pattern is stable");
                self.stop();
                outcome.stabilized = true;
            }
        }
        outcome
    }

    /// Whether a render was requested since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn set_show_stats(&mut self, show: bool) {
        if self.show_stats != show {
            self.show_stats = show;
            self.redraw = true;
        }
    }

    pub fn show_stats(&self) -> bool {
        self.show_stats
    }

    pub fn set_palette(&mut self, palette: Palette) {
        if self.config.palette != palette {
            self.config.palette = palette;
            self.redraw = true;
        }
    }

    pub fn render(&self, surface: &mut impl Surface) {
        let stats = self.show_stats.then(|| self.stats());
        render::render(
            surface,
            &self.store,
            &self.layout,
            self.hover,
            stats.as_ref(),
            &self.config.palette,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn board() -> Life {
        let mut life = Life::default();
        life.on_resize(503.0, 503.0);
        life.take_redraw();
        life
    }

    fn center_of(life: &Life, x: usize, y: usize) -> (f32, f32) {
        let (px, py) = life.layout().cell_origin(x, y);
        let half = life.layout().square_size / 2.0;
        (px + half, py + half)
    }

    #[test]
    fn starts_stopped_with_configured_board() {
        let life = Life::default();
        assert!(!life.is_running());
        assert_eq!(life.board_size(), 50);
        assert_eq!(life.speed_level(), 5);
        assert_eq!(life.interval(), ms(616));
        assert_eq!(life.steps_per_second(), None);
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let mut life = Life::new(LifeConfig {
            min_game_size: 60,
            max_game_size: 10,
            ..LifeConfig::default()
        });
        assert_eq!(life.config(), &LifeConfig::default());
        assert_eq!(life.board_size(), 50);
        life.set_board_size(1000);
        assert_eq!(life.board_size(), 100);
    }

    #[test]
    fn run_captures_the_starting_grid() {
        let mut life = board();
        life.toggle_cell(1, 1);
        life.toggle_cell(2, 1);
        assert_eq!(life.store().last_run().live_cells(), 0);
        life.run();
        assert_eq!(life.store().last_run().live_cells(), 2);
        life.frame(ms(0));
        assert_eq!(life.population(), 0);
        assert_eq!(life.store().last_run().live_cells(), 2, "stepping leaves the capture alone");
    }

    #[test]
    fn click_toggles_resolved_cell() {
        let mut life = board();
        let (px, py) = center_of(&life, 3, 9);
        assert_eq!(life.on_click(px, py), Some(true));
        assert!(life.store().get(3, 9));
        assert!(life.take_redraw());
        assert!(!life.take_redraw());
        assert_eq!(life.on_click(px, py), Some(false));
    }

    #[test]
    fn clicks_outside_window_are_ignored() {
        let mut life = board();
        assert_eq!(life.on_click(-3.0, 10.0), None);
        assert_eq!(life.on_click(10.0, 900.0), None);
        assert!(!life.take_redraw());
    }

    #[test]
    fn hover_follows_pointer_and_clears_on_leave() {
        let mut life = board();
        let (px, py) = center_of(&life, 4, 4);
        life.on_pointer_move(px, py);
        assert_eq!(life.hover(), Some((4, 4)));
        assert!(life.take_redraw());
        life.on_pointer_move(px + 0.5, py);
        assert!(!life.take_redraw(), "same cell does not redraw");
        life.on_pointer_move(-10.0, -10.0);
        assert_eq!(life.hover(), None);
        life.on_pointer_move(px, py);
        life.on_pointer_leave();
        assert_eq!(life.hover(), None);
    }

    #[test]
    fn zoom_steps_within_range() {
        let mut life = board();
        life.zoom(1);
        assert_eq!(life.board_size(), 55);
        life.set_board_size(100);
        life.zoom(1);
        assert_eq!(life.board_size(), 100);
        life.set_board_size(5);
        life.zoom(-1);
        assert_eq!(life.board_size(), 5);
    }

    #[test]
    fn zoom_at_range_end_keeps_cells() {
        let mut life = board();
        life.set_board_size(100);
        life.toggle_cell(1, 1);
        life.zoom(1);
        assert!(life.store().get(1, 1));
    }

    #[test]
    fn scroll_speed_steps_within_range() {
        let mut life = board();
        life.scroll_speed(1);
        assert_eq!(life.speed_level(), 6);
        life.set_speed(10);
        life.scroll_speed(1);
        assert_eq!(life.speed_level(), 10);
        assert_eq!(life.set_speed(0), 1);
    }

    #[test]
    fn out_of_range_board_size_is_clamped() {
        let mut life = board();
        life.set_board_size(1000);
        assert_eq!(life.board_size(), 100);
        life.set_board_size(0);
        assert_eq!(life.board_size(), 5);
    }

    #[test]
    fn resize_surface_keeps_grid() {
        let mut life = board();
        life.toggle_cell(2, 2);
        life.on_resize(1003.0, 800.0);
        assert!(life.store().get(2, 2));
        assert!((life.layout().board_size - 797.0).abs() < 1e-3);
        assert!(life.take_redraw());
    }

    #[test]
    fn stopped_frames_do_nothing() {
        let mut life = board();
        life.toggle_cell(1, 1);
        let outcome = life.frame(ms(10_000));
        assert_eq!(outcome, FrameOutcome::default());
        assert_eq!(life.generation(), 0);
    }

    #[test]
    fn render_reflects_store_and_stats() {
        let mut life = board();
        life.toggle_cell(0, 0);
        let mut list = crate::render::DrawList::new();
        life.render(&mut list);
        // background + 2500 cells + three stat lines
        assert_eq!(list.len(), 1 + 2500 + 3);
        life.set_show_stats(false);
        list.clear();
        life.render(&mut list);
        assert_eq!(list.len(), 1 + 2500);
    }
}
