//! World definitions and the generated-world cache. This module exists to resolve a world id to
//! a built `World` exactly once per run. It does not own the active-world choice or entity pools.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::mapgen::{ProceduralGenerator, import_world};
use crate::types::WorldId;
use crate::world::{World, WorldDef};

/// Source of authored map documents, keyed by asset name.
pub trait AssetProvider {
    fn map_document(&self, key: &str) -> Option<String>;
}

/// Provides nothing; every world falls back to procedural generation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAssets;

impl AssetProvider for NoAssets {
    fn map_document(&self, _key: &str) -> Option<String> {
        None
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    documents: BTreeMap<String, String>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, key: impl Into<String>, document: impl Into<String>) -> Self {
        self.documents.insert(key.into(), document.into());
        self
    }
}

impl AssetProvider for MemoryAssets {
    fn map_document(&self, key: &str) -> Option<String> {
        self.documents.get(key).cloned()
    }
}

/// Reads `<root>/<key>.json`.
#[derive(Clone, Debug)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetProvider for DirectoryAssets {
    fn map_document(&self, key: &str) -> Option<String> {
        let path = self.root.join(format!("{key}.json"));
        match fs::read_to_string(&path) {
            Ok(document) => Some(document),
            Err(err) => {
                debug!(path = %path.display(), %err, "map asset unavailable");
                None
            }
        }
    }
}

pub fn default_definitions() -> Vec<WorldDef> {
    vec![WorldDef::overworld(), WorldDef::cave()]
}

pub struct WorldCatalog {
    run_seed: u64,
    definitions: BTreeMap<WorldId, WorldDef>,
    worlds: BTreeMap<WorldId, World>,
}

impl WorldCatalog {
    pub fn new(run_seed: u64) -> Self {
        Self::with_definitions(run_seed, default_definitions())
    }

    pub fn with_definitions(run_seed: u64, definitions: impl IntoIterator<Item = WorldDef>) -> Self {
        let definitions = definitions.into_iter().map(|def| (def.id.clone(), def)).collect();
        Self { run_seed, definitions, worlds: BTreeMap::new() }
    }

    pub fn definition(&self, id: &WorldId) -> Option<&WorldDef> {
        self.definitions.get(&id.canonical())
    }

    pub fn world_ids(&self) -> impl Iterator<Item = &WorldId> {
        self.definitions.keys()
    }

    pub fn is_generated(&self, id: &WorldId) -> bool {
        self.worlds.contains_key(&id.canonical())
    }

    pub fn world(&self, id: &WorldId) -> Option<&World> {
        self.worlds.get(&id.canonical())
    }

    pub(crate) fn world_mut(&mut self, id: &WorldId) -> Option<&mut World> {
        self.worlds.get_mut(&id.canonical())
    }

    /// Builds the world on first request and returns the cached instance afterwards.
    pub fn generate_world(
        &mut self,
        id: &WorldId,
        assets: &dyn AssetProvider,
    ) -> Result<&World, CatalogError> {
        let id = id.canonical();
        let def = self.definitions.get(&id).ok_or_else(|| CatalogError::UnknownWorld(id.clone()))?;
        if !self.worlds.contains_key(&id) {
            let world = build_world(self.run_seed, def, assets);
            info!(
                world = %id,
                width = world.width(),
                height = world.height(),
                portals = world.portals().len(),
                fingerprint = world.fingerprint(),
                "world generated"
            );
            self.worlds.insert(id.clone(), world);
        }
        self.worlds.get(&id).ok_or(CatalogError::UnknownWorld(id))
    }
}

fn build_world(run_seed: u64, def: &WorldDef, assets: &dyn AssetProvider) -> World {
    if let Some(asset) = def.map_asset.as_deref()
        && !def.force_procedural
    {
        match assets.map_document(asset) {
            Some(document) => match import_world(def, asset, &document) {
                Ok(world) => return world,
                Err(err) => warn!(world = %def.id, asset, %err, "map import failed, generating procedurally"),
            },
            None => warn!(world = %def.id, asset, "map asset missing, generating procedurally"),
        }
    }
    ProceduralGenerator::new(run_seed).generate(def)
}
