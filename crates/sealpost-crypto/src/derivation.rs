//! Access key derivation from profile keys.

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{AeadInPlace, KeyInit},
};

use crate::{
    error::CryptoError,
    keys::{ACCESS_KEY_LEN, AccessKey, ProfileKey},
};

/// Derivation of an access key from a profile key.
///
/// Consumers hold this as a seam so the protocol derivation can be swapped
/// for a recording double in tests.
pub trait AccessKeyDerivation {
    /// Derive the access key that `profile_key`'s owner will accept.
    fn derive(&self, profile_key: &ProfileKey) -> Result<AccessKey, CryptoError>;
}

/// The protocol's access key derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileKeyDerivation;

impl AccessKeyDerivation for ProfileKeyDerivation {
    fn derive(&self, profile_key: &ProfileKey) -> Result<AccessKey, CryptoError> {
        derive_access_key(profile_key)
    }
}

/// Derive the access key for `profile_key`.
///
/// AES-256-GCM with the profile key, a zero nonce and 16 zero plaintext
/// bytes. The ciphertext is the key; the tag is dropped.
pub fn derive_access_key(profile_key: &ProfileKey) -> Result<AccessKey, CryptoError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(profile_key.as_bytes()));
    let nonce = Nonce::from_slice(&[0u8; 12]);

    let mut block = [0u8; ACCESS_KEY_LEN];
    cipher
        .encrypt_in_place_detached(nonce, &[], &mut block)
        .map_err(|_| CryptoError::Derivation)?;

    Ok(AccessKey::from_bytes(block))
}
