//! The sealed-sender access resolver.
//!
//! # Certificate choice
//!
//! | Sharing mode | Known contact | Certificate            |
//! |--------------|---------------|------------------------|
//! | Everybody    | any           | Normal                 |
//! | Contacts     | yes           | Normal                 |
//! | Contacts     | no            | PhoneNumberPrivacy     |
//! | Nobody       | any           | PhoneNumberPrivacy     |
//!
//! Sync traffic to the account's own devices always uses the normal
//! certificate; no third party sees it.
//!
//! # Failure policy
//!
//! Sealed sender is an optimization over a working unsealed path, so nothing
//! here returns an error. Unavailable keys, profiles or certificates become
//! `None` plus a log line and the message goes out unsealed.

use sealpost_crypto::{
    ACCESS_KEY_LEN, AccessKey, AccessKeyDerivation, ProfileKey, ProfileKeyDerivation,
};
use tracing::{debug, warn};

use crate::{
    access::pair::UnidentifiedAccessPair,
    env::Environment,
    recipient::Single,
    source::{
        AccountSettings, CertificateKind, CertificateSource, ContactTrustSource,
        PhoneNumberSharingMode, ProfileKeySource, SenderCertificate, UnidentifiedAccessMode,
    },
};

/// Resolves sealed-sender credentials per recipient.
///
/// Stateless over its collaborators: `account` supplies settings and
/// contacts, `profiles` supplies profile keys, `certificates` supplies
/// sender certificates and `env` supplies randomness for unrestricted
/// recipients. Wrap `certificates` in
/// [`CachedCertificateSource`](crate::cache::CachedCertificateSource) to
/// avoid a fetch per send.
#[derive(Debug)]
pub struct AccessResolver<A, P, C, E, D = ProfileKeyDerivation> {
    account: A,
    profiles: P,
    certificates: C,
    env: E,
    derivation: D,
}

impl<A, P, C, E> AccessResolver<A, P, C, E>
where
    A: AccountSettings + ContactTrustSource,
    P: ProfileKeySource,
    C: CertificateSource,
    E: Environment,
{
    /// Create a resolver using the protocol access key derivation.
    pub fn new(account: A, profiles: P, certificates: C, env: E) -> Self {
        Self { account, profiles, certificates, env, derivation: ProfileKeyDerivation }
    }
}

impl<A, P, C, E, D> AccessResolver<A, P, C, E, D>
where
    A: AccountSettings + ContactTrustSource,
    P: ProfileKeySource,
    C: CertificateSource,
    E: Environment,
    D: AccessKeyDerivation,
{
    /// Replace the access key derivation.
    pub fn with_derivation<D2: AccessKeyDerivation>(
        self,
        derivation: D2,
    ) -> AccessResolver<A, P, C, E, D2> {
        AccessResolver {
            account: self.account,
            profiles: self.profiles,
            certificates: self.certificates,
            env: self.env,
            derivation,
        }
    }

    /// Certificate source.
    pub fn certificates(&self) -> &C {
        &self.certificates
    }

    /// Which certificate a direct message to `recipient` should carry.
    pub fn certificate_kind_for(&self, recipient: &Single) -> CertificateKind {
        match self.account.phone_number_sharing_mode() {
            PhoneNumberSharingMode::Everybody => CertificateKind::Normal,
            PhoneNumberSharingMode::Contacts if self.account.is_known_contact(recipient) => {
                CertificateKind::Normal
            },
            PhoneNumberSharingMode::Contacts | PhoneNumberSharingMode::Nobody => {
                CertificateKind::PhoneNumberPrivacy
            },
        }
    }

    /// Sender certificate for a direct message to `recipient`.
    ///
    /// `None` if the certificate could not be fetched.
    pub fn certificate_for(&self, recipient: &Single) -> Option<SenderCertificate> {
        let kind = self.certificate_kind_for(recipient);
        match kind {
            CertificateKind::Normal => {
                debug!(%recipient, "using normal sender certificate");
            },
            CertificateKind::PhoneNumberPrivacy => {
                debug!(%recipient, "using phone number privacy sender certificate");
            },
        }
        self.fetch_certificate(kind)
    }

    /// Access key other parties use to reach the local account.
    ///
    /// `None` only if the account has no profile key.
    pub fn own_access_key(&self) -> Option<AccessKey> {
        let Some(profile_key) = self.profiles.own_profile_key() else {
            warn!("own profile key unavailable, sealed sender disabled");
            return None;
        };
        self.derive(&profile_key)
    }

    /// Access key for delivering to `recipient`.
    ///
    /// Enabled recipients need their stored profile key. Unrestricted
    /// recipients get a fresh random key on every call; the server does not
    /// check it. Disabled, unknown or missing profiles yield `None`.
    pub fn recipient_access_key(&self, recipient: &Single) -> Option<AccessKey> {
        let Some(profile) = self.profiles.recipient_profile(recipient) else {
            debug!(%recipient, "no profile, sealed sender unavailable");
            return None;
        };

        match profile.unidentified_access_mode {
            UnidentifiedAccessMode::Enabled => {
                let Some(profile_key) = self.profiles.stored_profile_key(recipient) else {
                    debug!(%recipient, "sealed sender enabled but profile key unknown");
                    return None;
                };
                self.derive(&profile_key)
            },
            UnidentifiedAccessMode::Unrestricted => Some(self.unrestricted_access_key()),
            mode @ (UnidentifiedAccessMode::Disabled | UnidentifiedAccessMode::Unknown) => {
                debug!(%recipient, ?mode, "recipient does not accept sealed sender");
                None
            },
        }
    }

    /// Credentials for a direct message to `recipient`.
    ///
    /// All of recipient key, own key and certificate must resolve; otherwise
    /// `None`. Both sides share the contact-aware certificate.
    pub fn access_pair_for(&self, recipient: &Single) -> Option<UnidentifiedAccessPair> {
        let target_key = self.recipient_access_key(recipient)?;
        let own_key = self.own_access_key()?;
        let certificate = self.certificate_for(recipient)?;
        Some(UnidentifiedAccessPair::new(target_key, own_key, certificate))
    }

    /// Credentials for sync messages to the account's own devices.
    ///
    /// Own access key on both sides and always the normal certificate,
    /// whatever the sharing mode.
    pub fn access_pair_for_sync(&self) -> Option<UnidentifiedAccessPair> {
        let own_key = self.own_access_key()?;
        let certificate = self.fetch_certificate(CertificateKind::Normal)?;
        Some(UnidentifiedAccessPair::new(own_key.clone(), own_key, certificate))
    }

    /// [`Self::access_pair_for`] over each recipient, in order.
    ///
    /// One recipient failing leaves the others untouched.
    pub fn access_pairs_for<'a, I>(&self, recipients: I) -> Vec<Option<UnidentifiedAccessPair>>
    where
        I: IntoIterator<Item = &'a Single>,
    {
        recipients.into_iter().map(|recipient| self.access_pair_for(recipient)).collect()
    }

    fn fetch_certificate(&self, kind: CertificateKind) -> Option<SenderCertificate> {
        let result = self.certificates.fetch(kind).and_then(SenderCertificate::try_from);
        match result {
            Ok(certificate) => Some(certificate),
            Err(error) => {
                warn!(?kind, %error, "failed to get sender certificate, ignoring");
                None
            },
        }
    }

    fn derive(&self, profile_key: &ProfileKey) -> Option<AccessKey> {
        match self.derivation.derive(profile_key) {
            Ok(key) => Some(key),
            Err(error) => {
                warn!(%error, "access key derivation failed");
                None
            },
        }
    }

    fn unrestricted_access_key(&self) -> AccessKey {
        let mut bytes = [0u8; ACCESS_KEY_LEN];
        self.env.random_bytes(&mut bytes);
        AccessKey::from_bytes(bytes)
    }
}
