//! Access credentials handed to the transport layer.

use sealpost_crypto::AccessKey;

use crate::source::SenderCertificate;

/// One side of a sealed-sender authorization: an access key and the sender
/// certificate presented with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnidentifiedAccess {
    access_key: AccessKey,
    certificate: SenderCertificate,
}

impl UnidentifiedAccess {
    /// Pair `access_key` with `certificate`.
    pub fn new(access_key: AccessKey, certificate: SenderCertificate) -> Self {
        Self { access_key, certificate }
    }

    /// Access key for this side.
    pub fn access_key(&self) -> &AccessKey {
        &self.access_key
    }

    /// Sender certificate for this side.
    pub fn certificate(&self) -> &SenderCertificate {
        &self.certificate
    }
}

/// Fully resolved sealed-sender credentials for one send.
///
/// `target` goes into the envelope for the recipient; `own` lets the
/// account's other devices accept the sync copy. Both sides always carry the
/// same sender certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnidentifiedAccessPair {
    target: UnidentifiedAccess,
    own: UnidentifiedAccess,
}

impl UnidentifiedAccessPair {
    /// Build a pair sharing `certificate` between both sides.
    pub fn new(target_key: AccessKey, own_key: AccessKey, certificate: SenderCertificate) -> Self {
        Self {
            target: UnidentifiedAccess::new(target_key, certificate.clone()),
            own: UnidentifiedAccess::new(own_key, certificate),
        }
    }

    /// Credentials for the recipient.
    pub fn target(&self) -> &UnidentifiedAccess {
        &self.target
    }

    /// Credentials for the local account.
    pub fn own(&self) -> &UnidentifiedAccess {
        &self.own
    }
}
