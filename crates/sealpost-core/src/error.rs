//! Error types for identity parsing and certificate retrieval.

use std::io;

use thiserror::Error;

use crate::phone::NumberFormatError;

/// Malformed recipient input.
///
/// Always reported to the caller: it reflects bad input, not a transient
/// condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Input was not an id and could not be normalized as a phone number.
    #[error("invalid number: {0}")]
    InvalidNumber(#[from] NumberFormatError),
}

/// Failure to obtain a usable sender certificate.
///
/// Never crosses the resolver's public operations; the resolver logs it and
/// falls back to unsealed delivery.
#[derive(Debug, Error)]
pub enum CertificateError {
    /// Network or transport failure.
    #[error("certificate fetch failed: {0}")]
    Io(#[from] io::Error),

    /// The service returned no certificate bytes.
    #[error("empty sender certificate")]
    Empty,
}
