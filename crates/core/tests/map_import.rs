use wayfarer_core::catalog::{DirectoryAssets, NoAssets};
use wayfarer_core::world::{TileType, WorldSource};
use wayfarer_core::{TilePos, Vec2, WorldCatalog, WorldId};

const MAP_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/maps");

fn imported_overworld(seed: u64) -> WorldCatalog {
    let mut catalog = WorldCatalog::new(seed);
    catalog
        .generate_world(&WorldId::overworld(), &DirectoryAssets::new(MAP_DIR))
        .expect("overworld is defined");
    catalog
}

#[test]
fn shipped_overworld_map_imports_with_its_layers() {
    let catalog = imported_overworld(1);
    let world = catalog.world(&WorldId::overworld()).expect("generated");

    assert_eq!(world.source(), &WorldSource::Imported { asset: "overworld_map".to_owned() });
    assert_eq!((world.width(), world.height()), (30, 30));

    let corner = world.tile(TilePos { y: 0, x: 0 }).expect("in bounds");
    assert_eq!(corner.kind, TileType::Rock);
    assert!(corner.solid);

    let pond = world.tile(TilePos { y: 11, x: 12 }).expect("in bounds");
    assert_eq!(pond.kind, TileType::Water);
    assert!(pond.solid);

    let bridge = world.tile(TilePos { y: 12, x: 12 }).expect("in bounds");
    assert_eq!(bridge.kind, TileType::Path);
    assert!(!bridge.solid);
    assert_eq!(bridge.overlays.len(), 2);

    let flowers = world.tile(TilePos { y: 22, x: 3 }).expect("in bounds");
    assert_eq!(flowers.kind, TileType::Grass);
    assert!(!flowers.solid);
    assert_eq!(flowers.overlays[0].kind, TileType::Decoration);
}

#[test]
fn legacy_portal_target_is_canonicalized() {
    let catalog = imported_overworld(1);
    let world = catalog.world(&WorldId::overworld()).expect("generated");

    assert_eq!(world.portals().len(), 1);
    let portal = world.portals().iter().next().expect("cave entrance");
    assert_eq!(portal.name, "Cave Entrance");
    assert_eq!(portal.teleport_to, WorldId::cave());
    assert_eq!((portal.rect.width, portal.rect.height), (64.0, 64.0));
}

#[test]
fn overworld_spawn_is_walkable_in_the_shipped_map() {
    let catalog = imported_overworld(1);
    let world = catalog.world(&WorldId::overworld()).expect("generated");
    assert_eq!(world.spawn_pixel(), Vec2::new(480.0, 800.0));
    assert!(!world.store().is_solid(TilePos { y: 25, x: 15 }));
}

#[test]
fn imported_worlds_do_not_depend_on_the_run_seed() {
    let a = imported_overworld(1);
    let b = imported_overworld(99);
    let id = WorldId::overworld();
    assert_eq!(
        a.world(&id).expect("generated").fingerprint(),
        b.world(&id).expect("generated").fingerprint()
    );
}

#[test]
fn missing_map_directory_falls_back_to_procedural() {
    let mut catalog = WorldCatalog::new(5);
    let world = catalog
        .generate_world(&WorldId::overworld(), &DirectoryAssets::new("/nonexistent/maps"))
        .expect("fallback");
    assert!(matches!(world.source(), WorldSource::Procedural { .. }));

    let mut other = WorldCatalog::new(5);
    let same = other.generate_world(&WorldId::overworld(), &NoAssets).expect("fallback");
    assert_eq!(world.fingerprint(), same.fingerprint());
}
