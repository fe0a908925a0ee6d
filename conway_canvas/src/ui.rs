// ui.rs - Controls and board widget; every handler is a thin call into `Life`

use std::time::Duration;

use eframe::egui;
use egui::{Color32, Vec2};

use crate::board;
use crate::GameOfLife;
use conway::PATTERNS;

/// One wheel notch in either direction. Wheel-down grows the board and
/// raises the speed level.
fn wheel_steps(ui: &egui::Ui) -> i32 {
    let delta = ui.input(|i| i.scroll_delta.y);
    if delta < 0.0 {
        1
    } else if delta > 0.0 {
        -1
    } else {
        0
    }
}

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Duration::from_secs_f64(ctx.input(|i| i.time));
        let outcome = self.life.frame(now);
        if outcome.stabilized {
            tracing::debug!(generation = self.life.generation(), "run ended on a stable pattern");
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.run_controls(ui);
            ui.separator();
            self.size_and_speed(ui);
            ui.separator();
            self.stats_row(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.board_ui(ui);
        });

        // Display-synced loop: keep frames coming only while running
        if self.life.is_running() {
            ctx.request_repaint();
        }
    }
}

impl GameOfLife {
    fn run_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.life.is_running() { "⏸ Stop" } else { "▶ Run" };
            if ui.button(button_text).clicked() {
                self.life.toggle_run();
            }

            if ui.button("↺ Reset").on_hover_text("Back to the grid of the last run").clicked() {
                self.life.reset_to_last_run();
            }

            if ui.button("⏹ Clear").clicked() {
                self.life.clear();
            }

            if ui.button("🎲 Random").clicked() {
                self.apply_random_pattern();
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.apply_selected_pattern();
            }
        });
    }

    fn size_and_speed(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let config = self.life.config();
            let (min_size, max_size, step) =
                (config.min_game_size, config.max_game_size, config.size_step);

            let mut size = self.life.board_size();
            let response = ui.add(
                egui::Slider::new(&mut size, min_size..=max_size)
                    .step_by(step as f64)
                    .text("cells"),
            );
            if response.changed() {
                self.life.set_board_size(size);
            }
            if response.hovered() {
                let steps = wheel_steps(ui);
                if steps != 0 {
                    self.life.zoom(steps);
                }
            }

            ui.separator();

            let speeds = (self.life.config().min_speed_level, self.life.config().max_speed_level);
            let mut level = self.life.speed_level();
            let response = ui.add(
                egui::Slider::new(&mut level, speeds.0..=speeds.1)
                    .text(format!("speed ({} ms)", self.life.interval().as_millis())),
            );
            if response.changed() {
                self.life.set_speed(level);
            }
            if response.hovered() {
                let steps = wheel_steps(ui);
                if steps != 0 {
                    self.life.scroll_speed(steps);
                }
            }

            ui.separator();

            // Live and dead colors
            let mut palette = *self.life.palette();
            let mut live = board::color32(palette.alive);
            let mut dead = board::color32(palette.dead);
            ui.label("Live:");
            let live_changed = ui.color_edit_button_srgba(&mut live).changed();
            ui.label("Dead:");
            let dead_changed = ui.color_edit_button_srgba(&mut dead).changed();
            if live_changed || dead_changed {
                palette.alive = board::rgb(live);
                palette.dead = board::rgb(dead);
                self.life.set_palette(palette);
            }
        });
    }

    fn stats_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let sps = self
                .life
                .steps_per_second()
                .map_or_else(String::new, |sps| sps.to_string());
            ui.label(format!("Steps/s: {sps}"));
            ui.label(format!("Generation: {}", self.life.generation()));
            ui.label(format!("Population: {}", self.life.population()));

            let mut overlay = self.life.show_stats();
            if ui.checkbox(&mut overlay, "Overlay").changed() {
                self.life.set_show_stats(overlay);
            }

            if self.life.is_running() {
                ui.colored_label(Color32::LIGHT_GREEN, "running");
            } else {
                ui.label("Click cells to toggle them; scroll over the board to resize it.");
            }
        });
    }

    fn board_ui(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        if self.board.container != available {
            self.board.container = available;
            self.life.on_resize(available.x, available.y);
        }

        let side = self.life.layout().board_size;
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), egui::Sense::click());
        let origin = response.rect.min;

        match response.hover_pos() {
            Some(pos) => self.life.on_pointer_move(pos.x - origin.x, pos.y - origin.y),
            None => self.life.on_pointer_leave(),
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.life.on_click(pos.x - origin.x, pos.y - origin.y);
            }
        }

        if response.hovered() {
            let steps = wheel_steps(ui);
            if steps != 0 {
                self.life.zoom(steps);
            }
        }

        if self.life.take_redraw() {
            self.board.commands.clear();
            self.life.render(&mut self.board.commands);
        }
        board::paint(&painter, origin, &self.board.commands);
    }
}
