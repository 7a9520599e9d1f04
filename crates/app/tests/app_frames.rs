use std::time::Duration;

use wayfarer_app::app_loop::{AppState, FrameKeys};
use wayfarer_core::{Game, NoAssets, PlayerInput, SimConfig};

fn new_game(seed: u64) -> Game {
    Game::new(seed, SimConfig::default(), Box::new(NoAssets)).expect("overworld")
}

#[test]
fn frame_driven_run_matches_direct_ticks() {
    let keys = FrameKeys { left: true, charge_held: true, ..FrameKeys::default() };
    let mut app = AppState::new(new_game(21));
    for _ in 0..120 {
        app.frame(&keys, Duration::from_millis(16));
    }

    let mut direct = new_game(21);
    let input = PlayerInput { left: true, charge: true, ..PlayerInput::default() };
    for _ in 0..120 {
        direct.advance(&input, 16);
    }

    assert_eq!(app.game.current_tick(), 120);
    assert_eq!(app.game.snapshot_hash(), direct.snapshot_hash());
}

#[test]
fn uneven_frame_times_still_run_every_tick() {
    let mut app = AppState::new(new_game(4));
    let frames = [5_u64, 9, 30, 1, 17, 50, 8, 40];
    for ms in frames {
        app.frame(&FrameKeys::default(), Duration::from_millis(ms));
    }
    let total: u64 = frames.iter().sum();
    assert_eq!(app.game.current_tick(), total / 16);
}
