//! Collaborator interfaces.
//!
//! The resolver owns no state. Account settings, contacts, profiles and
//! certificates all come from implementations of these traits, which are
//! responsible for their own synchronization. Every call is treated as a
//! point-in-time snapshot.

use std::sync::Arc;

use bytes::Bytes;
use sealpost_crypto::ProfileKey;

use crate::{error::CertificateError, recipient::Single};

/// Account-wide setting controlling who may learn the account's number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberSharingMode {
    /// Anyone we message sees the number.
    Everybody,
    /// Only stored contacts see the number.
    Contacts,
    /// Nobody sees the number.
    Nobody,
}

/// A recipient's stated willingness to accept sealed-sender messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnidentifiedAccessMode {
    /// Profile never stated a mode.
    #[default]
    Unknown,
    /// Sealed sender refused.
    Disabled,
    /// Accepted with an access key derived from the recipient's profile key.
    Enabled,
    /// Accepted from anyone, no shared secret required.
    Unrestricted,
}

/// The parts of a recipient's profile that matter for access resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecipientProfile {
    /// Declared sealed-sender mode.
    pub unidentified_access_mode: UnidentifiedAccessMode,
}

impl RecipientProfile {
    /// Profile declaring `mode`.
    pub fn new(unidentified_access_mode: UnidentifiedAccessMode) -> Self {
        Self { unidentified_access_mode }
    }
}

/// Which sender certificate to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertificateKind {
    /// Carries the sender's phone number.
    Normal,
    /// Omits the sender's phone number.
    PhoneNumberPrivacy,
}

/// Server-issued sender certificate, opaque to this crate.
///
/// Cloning shares the underlying buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderCertificate(Bytes);

impl SenderCertificate {
    /// Raw certificate bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Bytes> for SenderCertificate {
    type Error = CertificateError;

    fn try_from(bytes: Bytes) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            return Err(CertificateError::Empty);
        }
        Ok(Self(bytes))
    }
}

/// Supplies sender certificates.
///
/// Fetching may hit the network and may be slow.
pub trait CertificateSource {
    /// Fetch the current certificate of `kind`.
    fn fetch(&self, kind: CertificateKind) -> Result<Bytes, CertificateError>;
}

/// Account-wide configuration.
pub trait AccountSettings {
    /// Current phone number sharing mode.
    fn phone_number_sharing_mode(&self) -> PhoneNumberSharingMode;
}

/// Contact list lookups.
pub trait ContactTrustSource {
    /// Whether `recipient` is a stored contact.
    fn is_known_contact(&self, recipient: &Single) -> bool;
}

/// Profile and profile key lookups.
pub trait ProfileKeySource {
    /// The local account's own profile key.
    fn own_profile_key(&self) -> Option<ProfileKey>;

    /// `recipient`'s profile, `None` when it has never been retrieved or the
    /// retrieval failed.
    fn recipient_profile(&self, recipient: &Single) -> Option<RecipientProfile>;

    /// `recipient`'s profile key from local storage.
    fn stored_profile_key(&self, recipient: &Single) -> Option<ProfileKey>;
}

impl<T: CertificateSource + ?Sized> CertificateSource for &T {
    fn fetch(&self, kind: CertificateKind) -> Result<Bytes, CertificateError> {
        (**self).fetch(kind)
    }
}

impl<T: CertificateSource + ?Sized> CertificateSource for Arc<T> {
    fn fetch(&self, kind: CertificateKind) -> Result<Bytes, CertificateError> {
        (**self).fetch(kind)
    }
}

impl<T: AccountSettings + ?Sized> AccountSettings for &T {
    fn phone_number_sharing_mode(&self) -> PhoneNumberSharingMode {
        (**self).phone_number_sharing_mode()
    }
}

impl<T: AccountSettings + ?Sized> AccountSettings for Arc<T> {
    fn phone_number_sharing_mode(&self) -> PhoneNumberSharingMode {
        (**self).phone_number_sharing_mode()
    }
}

impl<T: ContactTrustSource + ?Sized> ContactTrustSource for &T {
    fn is_known_contact(&self, recipient: &Single) -> bool {
        (**self).is_known_contact(recipient)
    }
}

impl<T: ContactTrustSource + ?Sized> ContactTrustSource for Arc<T> {
    fn is_known_contact(&self, recipient: &Single) -> bool {
        (**self).is_known_contact(recipient)
    }
}

impl<T: ProfileKeySource + ?Sized> ProfileKeySource for &T {
    fn own_profile_key(&self) -> Option<ProfileKey> {
        (**self).own_profile_key()
    }

    fn recipient_profile(&self, recipient: &Single) -> Option<RecipientProfile> {
        (**self).recipient_profile(recipient)
    }

    fn stored_profile_key(&self, recipient: &Single) -> Option<ProfileKey> {
        (**self).stored_profile_key(recipient)
    }
}

impl<T: ProfileKeySource + ?Sized> ProfileKeySource for Arc<T> {
    fn own_profile_key(&self) -> Option<ProfileKey> {
        (**self).own_profile_key()
    }

    fn recipient_profile(&self, recipient: &Single) -> Option<RecipientProfile> {
        (**self).recipient_profile(recipient)
    }

    fn stored_profile_key(&self, recipient: &Single) -> Option<ProfileKey> {
        (**self).stored_profile_key(recipient)
    }
}
