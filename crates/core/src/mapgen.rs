//! World construction: authored map import and seeded procedural generation.

pub mod import;
pub mod procedural;

mod seed;

pub use import::{DEFAULT_PORTAL_SIZE, import_world, layer_rule};
pub use procedural::{EXIT_PORTAL_SIZE, ProceduralGenerator};
