//! Time-bounded sender certificate cache.
//!
//! Certificates are valid for much longer than a send takes, so fetching one
//! per message wastes a round trip. [`CachedCertificateSource`] wraps any
//! [`CertificateSource`] and keeps the last successful fetch of each kind for
//! a configurable time. Failures are never cached: the next send retries.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use bytes::Bytes;
use tracing::debug;

use crate::{
    env::Environment,
    error::CertificateError,
    source::{CertificateKind, CertificateSource},
};

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CertificateCacheConfig {
    /// How long a fetched certificate is reused
    pub ttl: Duration,
}

impl Default for CertificateCacheConfig {
    fn default() -> Self {
        Self { ttl: Duration::from_secs(24 * 60 * 60) }
    }
}

/// [`CertificateSource`] decorator that reuses recent certificates.
#[derive(Debug)]
pub struct CachedCertificateSource<C, E> {
    inner: C,
    env: E,
    config: CertificateCacheConfig,
    entries: Mutex<HashMap<CertificateKind, CachedCertificate>>,
}

#[derive(Debug, Clone)]
struct CachedCertificate {
    fetched_at: Instant,
    bytes: Bytes,
}

impl<C, E> CachedCertificateSource<C, E>
where
    C: CertificateSource,
    E: Environment,
{
    /// Wrap `inner` with the default one-day lifetime.
    pub fn new(inner: C, env: E) -> Self {
        Self::with_config(inner, env, CertificateCacheConfig::default())
    }

    /// Wrap `inner` with a custom configuration.
    pub fn with_config(inner: C, env: E, config: CertificateCacheConfig) -> Self {
        Self { inner, env, config, entries: Mutex::new(HashMap::new()) }
    }

    /// The wrapped source.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Drop all cached certificates.
    ///
    /// Call after the account's number or registration changes.
    pub fn invalidate(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn cached(&self, kind: CertificateKind, now: Instant) -> Option<Bytes> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(&kind)?;
        if now.saturating_duration_since(entry.fetched_at) < self.config.ttl {
            Some(entry.bytes.clone())
        } else {
            None
        }
    }
}

impl<C, E> CertificateSource for CachedCertificateSource<C, E>
where
    C: CertificateSource,
    E: Environment,
{
    fn fetch(&self, kind: CertificateKind) -> Result<Bytes, CertificateError> {
        let now = self.env.now();
        if let Some(bytes) = self.cached(kind, now) {
            return Ok(bytes);
        }

        // Lock is not held across the fetch; concurrent misses both fetch.
        debug!(?kind, "sender certificate cache miss");
        let bytes = self.inner.fetch(kind)?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, CachedCertificate { fetched_at: now, bytes: bytes.clone() });
        Ok(bytes)
    }
}
