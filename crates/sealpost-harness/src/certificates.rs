//! Scripted certificate source.

use std::{
    collections::HashSet,
    io,
    sync::{Mutex, MutexGuard, PoisonError},
};

use bytes::Bytes;
use sealpost_core::{CertificateError, CertificateKind, CertificateSource};
use tracing::trace;

/// Bytes returned for [`CertificateKind::Normal`].
pub const NORMAL_CERTIFICATE: &[u8] = b"normal-sender-certificate";

/// Bytes returned for [`CertificateKind::PhoneNumberPrivacy`].
pub const PRIVACY_CERTIFICATE: &[u8] = b"privacy-sender-certificate";

/// Certificate source with fixed answers and injectable failures.
///
/// Every request is recorded so tests can assert which kind the resolver
/// asked for.
#[derive(Debug, Default)]
pub struct ScriptedCertificates {
    state: Mutex<ScriptState>,
}

#[derive(Debug, Default)]
struct ScriptState {
    failing: HashSet<CertificateKind>,
    requests: Vec<CertificateKind>,
}

impl ScriptedCertificates {
    /// Source that answers every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make requests for `kind` fail with an I/O error.
    pub fn fail(&self, kind: CertificateKind) {
        self.state().failing.insert(kind);
    }

    /// Make requests for `kind` succeed again.
    pub fn recover(&self, kind: CertificateKind) {
        self.state().failing.remove(&kind);
    }

    /// Every kind requested so far, in order.
    pub fn requests(&self) -> Vec<CertificateKind> {
        self.state().requests.clone()
    }

    fn state(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CertificateSource for ScriptedCertificates {
    fn fetch(&self, kind: CertificateKind) -> Result<Bytes, CertificateError> {
        let mut state = self.state();
        state.requests.push(kind);
        trace!(?kind, "scripted certificate request");

        if state.failing.contains(&kind) {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "scripted failure").into());
        }
        Ok(match kind {
            CertificateKind::Normal => Bytes::from_static(NORMAL_CERTIFICATE),
            CertificateKind::PhoneNumberPrivacy => Bytes::from_static(PRIVACY_CERTIFICATE),
        })
    }
}
