//! Key material for sealed-sender delivery.
//!
//! A profile key is a 32-byte secret an account shares with the people it
//! trusts. From it both sides derive the same 16-byte access key, which the
//! server checks before accepting an envelope whose sender it cannot see.
//!
//! # Security
//!
//! The derivation must be bit-compatible with the server's verifier, so it is
//! fixed: AES-256-GCM under the profile key, all-zero nonce, encrypting 16
//! zero bytes, keeping the ciphertext and discarding the tag. Key types never
//! print their contents through `Debug`.

pub mod derivation;
pub mod error;
pub mod keys;

pub use derivation::{AccessKeyDerivation, ProfileKeyDerivation, derive_access_key};
pub use error::CryptoError;
pub use keys::{ACCESS_KEY_LEN, AccessKey, PROFILE_KEY_LEN, ProfileKey};
