//! Environment abstraction for time and randomness.
//!
//! Production code uses [`SystemEnv`]. Tests substitute a seeded, manually
//! clocked implementation so key generation and cache expiry are
//! reproducible.

use std::time::Instant;

use rand::{RngCore, rngs::OsRng};

/// Source of time and randomness.
pub trait Environment {
    /// Current monotonic time.
    fn now(&self) -> Instant;

    /// Fill `buffer` with random bytes.
    ///
    /// Production implementations must use a cryptographically secure
    /// generator: the output becomes access key material.
    fn random_bytes(&self, buffer: &mut [u8]);
}

/// Wall clock and the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        OsRng.fill_bytes(buffer);
    }
}
