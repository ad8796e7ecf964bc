//! RUNNGUN frame driver
//!
//! Opens the window, builds the simulation from the built-in map and runs
//! the sample-input / update / draw loop.

use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use runngun::assets::{Assets, TEXTURES_DIR};
use runngun::config::{GameConfig, CONFIG_FILE};
use runngun::game::renderer::{draw_frame, TextureCache};
use runngun::game::{level, Simulation};
use runngun::input::sample_keyboard;
use runngun::VERSION;

fn window_conf() -> Conf {
    let config = GameConfig::load_or_default(CONFIG_FILE);
    Conf {
        window_title: format!("RUNNGUN v{}", VERSION),
        window_width: config.window_width as i32,
        window_height: config.window_height as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    init_tracing();

    let config = GameConfig::load_or_default(CONFIG_FILE);
    let max_frame_delta = config.max_frame_delta;
    let assets = Assets::default();

    let maps = match level::default_map() {
        Ok(maps) => maps,
        Err(e) => {
            error!("built-in map is invalid: {}", e);
            return;
        }
    };
    let mut sim = match Simulation::new(&maps, &assets, config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("failed to build level: {}", e);
            return;
        }
    };

    let textures = TextureCache::load(TEXTURES_DIR).await;

    info!("=== RUNNGUN v{} ===", VERSION);

    loop {
        let delta = get_frame_time().min(max_frame_delta);
        let input = sample_keyboard();
        sim.update(delta, &input, &assets);
        draw_frame(&sim, &textures);
        next_frame().await;
    }
}
