//! Seeded environment with a virtual clock.

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sealpost_core::Environment;

/// Deterministic [`Environment`].
///
/// Randomness comes from a ChaCha20 stream seeded at construction; time only
/// moves when [`SimEnv::advance`] is called. Clones share both.
#[derive(Debug, Clone)]
pub struct SimEnv {
    rng: Arc<Mutex<ChaCha20Rng>>,
    now: Arc<Mutex<Instant>>,
}

impl SimEnv {
    /// Environment seeded with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed))),
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move the virtual clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for SimEnv {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl Environment for SimEnv {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner).fill_bytes(buffer);
    }
}
