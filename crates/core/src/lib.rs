pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod mapgen;
pub mod random;
pub mod render;
pub mod state;
pub mod types;
pub mod world;

pub use catalog::{AssetProvider, DirectoryAssets, MemoryAssets, NoAssets, WorldCatalog};
pub use clock::{FixedStepScheduler, StepPlan};
pub use config::SimConfig;
pub use error::{CatalogError, MapImportError, TransitionError};
pub use game::{Game, PlayerInput, TransitionState};
pub use render::{FrameView, NullRenderer, Renderer};
pub use state::GameState;
pub use types::*;
pub use world::{World, WorldDef};
