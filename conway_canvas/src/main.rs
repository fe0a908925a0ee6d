// main.rs - eframe host for the Game of Life core
// Window, controls and input live here; the simulation lives in `conway::Life`.

use eframe::egui;

mod board;
mod ui;

use board::BoardCache;
use conway::{Life, LifeConfig, PATTERNS};

/// Environment variable naming an optional JSON config file.
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV: &str = "CONWAY_CONFIG";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = load_config()?;
    tracing::info!(
        array_size = config.array_size,
        board_size = config.initial_game_size,
        speed_level = config.initial_speed_level,
        "starting Game of Life"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(GameOfLife::new(config))),
    )
    .map_err(|err| anyhow::anyhow!("eframe exited with an error: {err}"))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();

    let web_options = eframe::WebOptions::default();
    wasm_bindgen_futures::spawn_local(async {
        let started = eframe::WebRunner::new()
            .start(
                "game_of_life",
                web_options,
                Box::new(|_cc| Box::new(GameOfLife::new(LifeConfig::default()))),
            )
            .await;
        // No tracing subscriber runs in the browser; the panic hook reports to the console
        if let Err(err) = started {
            panic!("failed to start the web runner: {err:?}");
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> anyhow::Result<LifeConfig> {
    use anyhow::Context;

    match std::env::var_os(CONFIG_ENV) {
        Some(path) => LifeConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.to_string_lossy())),
        None => Ok(LifeConfig::default()),
    }
}

pub struct GameOfLife {
    pub life: Life,
    board: BoardCache,
    pub selected_pattern: usize,
    random_seed: u64,
}

impl GameOfLife {
    pub fn new(config: LifeConfig) -> Self {
        Self {
            life: Life::new(config),
            board: BoardCache::default(),
            selected_pattern: 0,
            random_seed: 0,
        }
    }

    fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
            self.life.apply_pattern(pattern);
        }
    }

    fn apply_random_pattern(&mut self) {
        self.random_seed = self.random_seed.wrapping_add(1);
        self.life.randomize(self.random_seed);
    }
}
