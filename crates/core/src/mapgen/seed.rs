//! Deterministic per-world seed derivation.

use xxhash_rust::xxh3::xxh3_64;

use crate::types::WorldId;

pub(crate) fn derive_world_seed(run_seed: u64, world_id: &WorldId) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= xxh3_64(world_id.as_str().as_bytes()).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
