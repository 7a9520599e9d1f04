use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use wayfarer_core::catalog::NoAssets;
use wayfarer_core::{Game, PlayerInput, SimConfig};

fn random_input(rng: &mut ChaCha8Rng) -> PlayerInput {
    let bits = rng.next_u64();
    PlayerInput {
        up: bits & 1 != 0,
        down: bits & 2 != 0,
        left: bits & 4 != 0,
        right: bits & 8 != 0,
        charge: bits & 0x30 != 0,
        interact: bits & 0x1C0 == 0x1C0,
        use_health_potion: bits & 0x200 != 0,
        use_mana_potion: bits & 0x400 != 0,
    }
}

fn run_fuzz_simulation(map_seed: u64, input_seed: u64, ticks: u32) -> Result<(), String> {
    let mut game = Game::new(map_seed, SimConfig::default(), Box::new(NoAssets))
        .map_err(|err| err.to_string())?;
    let mut rng = ChaCha8Rng::seed_from_u64(input_seed);
    // Inputs are held for a few ticks so the player actually travels.
    let mut input = PlayerInput::default();

    for tick in 0..ticks {
        if tick % 8 == 0 {
            input = random_input(&mut rng);
        }
        game.advance(&input, 16);

        let world = game.active_world().ok_or("active world missing")?;
        let state = game.state();
        if world.check_collision(state.player.rect()) {
            return Err(format!(
                "player overlaps a solid tile at {:?} (seed {map_seed}, tick {tick})",
                state.player.pos
            ));
        }
        for (id, enemy) in &state.enemies {
            if !enemy.dying && world.check_collision(enemy.rect()) {
                return Err(format!("enemy {id:?} inside a solid tile (seed {map_seed})"));
            }
        }
        if state.player.mana < 0 || state.player.mana > state.player.max_mana {
            return Err(format!("mana out of range: {}", state.player.mana));
        }
    }
    Ok(())
}

#[test]
fn bodies_never_end_a_tick_inside_solid_tiles() {
    let mut runner = TestRunner::new(ProptestConfig { cases: 12, ..ProptestConfig::default() });
    runner
        .run(&(any::<u64>(), any::<u64>()), |(map_seed, input_seed)| {
            run_fuzz_simulation(map_seed, input_seed, 600).map_err(TestCaseError::fail)
        })
        .expect("collision invariants hold");
}

#[test]
fn fixed_seed_smoke_run() {
    run_fuzz_simulation(42, 7, 1500).expect("smoke run");
}
