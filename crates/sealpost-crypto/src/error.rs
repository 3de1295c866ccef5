//! Error types for key handling.

use thiserror::Error;

/// Errors from key parsing and derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Key material had the wrong size.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// The AEAD refused to produce the derivation keystream.
    #[error("access key derivation failed")]
    Derivation,
}
