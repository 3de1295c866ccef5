//! Fixed-size key newtypes.

use std::fmt;

use crate::error::CryptoError;

/// Size of a profile key in bytes.
pub const PROFILE_KEY_LEN: usize = 32;

/// Size of an unidentified access key in bytes.
pub const ACCESS_KEY_LEN: usize = 16;

/// Per-account profile secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ProfileKey([u8; PROFILE_KEY_LEN]);

impl ProfileKey {
    /// Wrap raw key bytes.
    pub const fn from_bytes(bytes: [u8; PROFILE_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PROFILE_KEY_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for ProfileKey {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let key: [u8; PROFILE_KEY_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKeyLength { expected: PROFILE_KEY_LEN, actual: bytes.len() }
        })?;
        Ok(Self(key))
    }
}

impl fmt::Debug for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProfileKey(<redacted>)")
    }
}

/// Symmetric token authorizing sealed-sender delivery to one account.
///
/// Either derived from a profile key or, for recipients in unrestricted
/// mode, filled with fresh random bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey([u8; ACCESS_KEY_LEN]);

impl AccessKey {
    /// Wrap raw key bytes.
    pub const fn from_bytes(bytes: [u8; ACCESS_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; ACCESS_KEY_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for AccessKey {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let key: [u8; ACCESS_KEY_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKeyLength { expected: ACCESS_KEY_LEN, actual: bytes.len() }
        })?;
        Ok(Self(key))
    }
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessKey(<redacted>)")
    }
}
