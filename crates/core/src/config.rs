//! Simulation tunables shared by the library, the app, and the tools.

use serde::{Deserialize, Serialize};

use crate::types::WorldId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub tick_ms: u32,
    pub portal_cooldown_ms: u32,
    pub spawn_search_attempts: u32,
    pub spawn_search_radius_px: f32,
    pub spawn_attempt_multiplier: u32,
    pub enemy_spawn_min_distance_px: f32,
    /// Entity count a density of 1.0 asks for.
    pub density_scale: f32,
    pub view_width: f32,
    pub view_height: f32,
    pub starting_world: WorldId,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            portal_cooldown_ms: 2000,
            spawn_search_attempts: 20,
            spawn_search_radius_px: 80.0,
            spawn_attempt_multiplier: 10,
            enemy_spawn_min_distance_px: 100.0,
            density_scale: 80.0,
            view_width: 800.0,
            view_height: 600.0,
            starting_world: WorldId::overworld(),
        }
    }
}

impl SimConfig {
    pub fn target_count(&self, density: f32) -> usize {
        (density.max(0.0) * self.density_scale).round() as usize
    }
}
