//! Error types for map import, catalog lookups, and world transitions.
//! None of these are fatal: callers degrade to a safe default and log.

use thiserror::Error;

use crate::types::WorldId;

#[derive(Debug, Error)]
pub enum MapImportError {
    #[error("map document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("map document is missing `{0}`")]
    MissingField(&'static str),
    #[error("map dimensions {width}x{height} are empty")]
    EmptyDimensions { width: usize, height: usize },
    #[error("map dimensions {width}x{height} exceed the supported size")]
    TooLarge { width: usize, height: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown world `{0}`")]
    UnknownWorld(WorldId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("a world transition is already in progress")]
    InProgress,
    #[error("portal cooldown active for another {remaining_ms} ms")]
    CoolingDown { remaining_ms: u32 },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
