mod frame_input;
mod scene_render;
mod window_config;

use std::env;
use std::time::Duration;

use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wayfarer_app::app_loop::AppState;
use wayfarer_app::launch::{generate_runtime_seed, parse_launch_args};
use wayfarer_app::ui_text::run_status_line;
use wayfarer_core::{DirectoryAssets, Game, Renderer, SimConfig};

use crate::frame_input::capture_frame_keys;
use crate::scene_render::SceneRenderer;
use crate::window_config::build_window_conf;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

#[macroquad::main(build_window_conf)]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let options = match parse_launch_args(&args, generate_runtime_seed()) {
        Ok(options) => options,
        Err(message) => {
            error!(%message, "invalid launch arguments");
            return;
        }
    };
    let seed = options.seed.value();
    info!(seed, maps = %options.map_dir.display(), "starting");

    let assets = Box::new(DirectoryAssets::new(options.map_dir));
    let game = match Game::new(seed, SimConfig::default(), assets) {
        Ok(game) => game,
        Err(err) => {
            error!(%err, "could not create the starting world");
            return;
        }
    };
    let mut app = AppState::new(game);
    let mut renderer = SceneRenderer::default();

    loop {
        let keys = capture_frame_keys();
        app.frame(&keys, Duration::from_secs_f32(get_frame_time().max(0.0)));
        if let Some(frame) = app.game.frame_view() {
            renderer.draw_frame(&frame);
        }
        draw_text(&run_status_line(&app.game), 8.0, screen_height() - 1.0, 12.0, GRAY);
        next_frame().await
    }
}
