use wayfarer_core::catalog::{DirectoryAssets, NoAssets};
use wayfarer_core::game::TransitionState;
use wayfarer_core::world::WorldSource;
use wayfarer_core::{Game, GameEvent, PlayerInput, SimConfig, TransitionError, Vec2, WorldId};

const MAP_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/maps");

fn new_game(seed: u64) -> Game {
    Game::new(seed, SimConfig::default(), Box::new(DirectoryAssets::new(MAP_DIR)))
        .expect("overworld is defined")
}

fn enter_cave(game: &mut Game) {
    game.set_player_position(Vec2::new(820.0, 110.0));
    game.advance(&PlayerInput::default(), 16);
    assert_eq!(game.active_world_id(), &WorldId::cave());
}

#[test]
fn game_starts_in_the_imported_overworld() {
    let game = new_game(3);
    let world = game.active_world().expect("active");
    assert!(matches!(world.source(), WorldSource::Imported { .. }));
    assert_eq!(game.state().player.pos, Vec2::new(480.0, 800.0));
    assert!(!game.catalog().is_generated(&WorldId::cave()));
    assert_eq!(game.state().npcs.len(), 1);
    assert_eq!(game.state().enemies.len(), 10);
}

#[test]
fn cave_entrance_generates_the_cave_and_reseeds_pools() {
    let mut game = new_game(3);
    enter_cave(&mut game);

    let world = game.active_world().expect("active");
    assert!(matches!(world.source(), WorldSource::Procedural { .. }));
    assert_eq!((world.width(), world.height()), (40, 40));
    assert!(!world.check_collision(game.state().player.rect()));
    assert!(game.state().npcs.is_empty());
    assert!(game.state().enemies.len() <= 20);
    assert!(game.state().items.len() <= 12);
    assert!(matches!(game.transition_state(), TransitionState::Cooldown { .. }));

    let arrival = game.state().player.pos;
    assert!(arrival.distance(Vec2::new(1120.0, 1120.0)) <= 80.0 * 2f32.sqrt());
    assert!(game.log().iter().any(|event| matches!(
        event,
        GameEvent::WorldEntered { world, npcs: 0, .. } if world == &WorldId::cave()
    )));
}

#[test]
fn cooldown_blocks_an_immediate_return() {
    let mut game = new_game(3);
    enter_cave(&mut game);
    let err = game.teleport_to(&WorldId::overworld()).expect_err("cooling down");
    assert!(matches!(err, TransitionError::CoolingDown { .. }));
    assert_eq!(game.active_world_id(), &WorldId::cave());
}

#[test]
fn cave_exit_returns_to_the_overworld_spawn() {
    let mut game = new_game(3);
    enter_cave(&mut game);
    let cave_fingerprint = game.active_world().expect("active").fingerprint();
    let overworld_fingerprint = game
        .catalog()
        .world(&WorldId::overworld())
        .expect("still generated")
        .fingerprint();

    for _ in 0..130 {
        game.advance(&PlayerInput::default(), 16);
    }
    assert_eq!(game.transition_state(), TransitionState::Idle);

    game.set_player_position(Vec2::new(1190.0, 1190.0));
    let target = game.try_portal_transition().expect("portal works");
    assert_eq!(target, Some(WorldId::overworld()));
    assert_eq!(game.state().player.pos, Vec2::new(480.0, 800.0));

    let overworld = game.active_world().expect("active");
    assert_eq!(overworld.fingerprint(), overworld_fingerprint);
    let cave = game.catalog().world(&WorldId::cave()).expect("cached");
    assert_eq!(cave.fingerprint(), cave_fingerprint);
}

#[test]
fn legacy_alias_reaches_the_cave_directly() {
    let mut game = new_game(8);
    let entered = game.teleport_to(&WorldId::new("dungeon")).expect("alias resolves");
    assert_eq!(entered, WorldId::cave());
    assert_eq!(game.active_world_id(), &WorldId::cave());
}

#[test]
fn procedural_overworld_still_leads_to_the_cave() {
    let mut game = Game::new(3, SimConfig::default(), Box::new(NoAssets)).expect("overworld");
    let world = game.active_world().expect("active");
    assert!(matches!(world.source(), WorldSource::Procedural { .. }));
    let entrance = world.portals().iter().next().expect("synthesized entrance");
    assert_eq!(entrance.name, "Cave Entrance");
    assert_eq!(entrance.teleport_to, WorldId::cave());
    let inside = Vec2::new(entrance.rect.x + 20.0, entrance.rect.y + 20.0);

    game.set_player_position(inside);
    game.advance(&PlayerInput::default(), 16);
    assert_eq!(game.active_world_id(), &WorldId::cave());
}
