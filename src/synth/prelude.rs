// Prelude module for conditional wasm compatibility

// OnceLock / OnceCell
#[cfg(feature = "once_cell")]
pub use once_cell::sync::OnceCell as OnceLock;
#[cfg(not(feature = "once_cell"))]
pub use std::sync::OnceLock;

// PI constants
pub use core::f32::consts::{PI, TAU};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Per-operator noise source. Seeded, so no thread-local or OS entropy is
/// touched from the audio thread.
#[derive(Clone, Debug)]
pub struct NoiseSource {
    rng: SmallRng,
}

impl NoiseSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.random_range(min..max)
    }
}
