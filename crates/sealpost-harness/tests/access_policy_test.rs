//! Access resolver policy tests.
//!
//! Runs the resolver against the in-memory collaborators and checks the
//! certificate choice, the all-or-nothing pair composition and the batch
//! ordering guarantees.

use sealpost_core::{
    AccessResolver, CertificateKind, PhoneNumberSharingMode, Single, UnidentifiedAccessMode,
};
use sealpost_crypto::{PROFILE_KEY_LEN, ProfileKey, derive_access_key};
use sealpost_harness::{
    MemoryAccount, NORMAL_CERTIFICATE, PRIVACY_CERTIFICATE, ScriptedCertificates, SimEnv,
};

type Resolver<'a> =
    AccessResolver<&'a MemoryAccount, &'a MemoryAccount, &'a ScriptedCertificates, SimEnv>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn own_key() -> ProfileKey {
    ProfileKey::from_bytes([0x11; PROFILE_KEY_LEN])
}

fn key_for(seed: u8) -> ProfileKey {
    ProfileKey::from_bytes([seed; PROFILE_KEY_LEN])
}

fn number(n: u32) -> Single {
    Single::Number(format!("+1555{n:07}"))
}

fn resolver<'a>(account: &'a MemoryAccount, certificates: &'a ScriptedCertificates) -> Resolver<'a> {
    init_tracing();
    AccessResolver::new(account, account, certificates, SimEnv::with_seed(42))
}

/// Recipient with sealed sender enabled and a stored profile key.
fn enabled(account: &MemoryAccount, recipient: &Single, seed: u8) {
    account.set_profile(recipient.clone(), UnidentifiedAccessMode::Enabled);
    account.set_profile_key(recipient.clone(), key_for(seed));
}

#[test]
fn everybody_always_uses_normal_certificate() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Everybody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let stranger = number(1);
    let contact = number(2);
    account.add_contact(contact.clone());

    resolver.certificate_for(&stranger).unwrap();
    resolver.certificate_for(&contact).unwrap();
    assert_eq!(certificates.requests(), vec![CertificateKind::Normal, CertificateKind::Normal]);
}

#[test]
fn contacts_mode_reveals_number_only_to_contacts() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Contacts, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let stranger = number(1);
    let contact = number(2);
    account.add_contact(contact.clone());

    let to_stranger = resolver.certificate_for(&stranger).unwrap();
    let to_contact = resolver.certificate_for(&contact).unwrap();

    assert_eq!(to_stranger.as_bytes(), PRIVACY_CERTIFICATE);
    assert_eq!(to_contact.as_bytes(), NORMAL_CERTIFICATE);
}

#[test]
fn nobody_always_uses_privacy_certificate() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Nobody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let contact = number(2);
    account.add_contact(contact.clone());

    resolver.certificate_for(&contact).unwrap();
    assert_eq!(certificates.requests(), vec![CertificateKind::PhoneNumberPrivacy]);
}

#[test]
fn enabled_recipient_gets_full_pair() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Everybody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let bob = number(7);
    enabled(&account, &bob, 0x22);

    let pair = resolver.access_pair_for(&bob).unwrap();
    assert_eq!(pair.target().access_key(), &derive_access_key(&key_for(0x22)).unwrap());
    assert_eq!(pair.own().access_key(), &derive_access_key(&own_key()).unwrap());
    assert_eq!(pair.target().certificate(), pair.own().certificate());
    assert_eq!(pair.own().certificate().as_bytes(), NORMAL_CERTIFICATE);
}

#[test]
fn missing_own_profile_key_yields_none() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Everybody, None);
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let bob = number(7);
    enabled(&account, &bob, 0x22);

    assert!(resolver.own_access_key().is_none());
    assert!(resolver.access_pair_for(&bob).is_none());
}

#[test]
fn own_profile_key_changes_apply_on_next_call() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Everybody, None);
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    assert!(resolver.access_pair_for_sync().is_none());

    account.set_own_profile_key(Some(own_key()));
    let pair = resolver.access_pair_for_sync().unwrap();
    assert_eq!(pair.own().access_key(), &derive_access_key(&own_key()).unwrap());

    account.set_own_profile_key(None);
    assert!(resolver.own_access_key().is_none());
}

#[test]
fn missing_recipient_access_key_yields_none() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Everybody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let bob = number(7);
    account.set_profile(bob.clone(), UnidentifiedAccessMode::Disabled);

    assert!(resolver.recipient_access_key(&bob).is_none());
    assert!(resolver.access_pair_for(&bob).is_none());
}

#[test]
fn missing_certificate_yields_none() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Everybody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let bob = number(7);
    enabled(&account, &bob, 0x22);
    certificates.fail(CertificateKind::Normal);

    assert!(resolver.access_pair_for(&bob).is_none());

    certificates.recover(CertificateKind::Normal);
    assert!(resolver.access_pair_for(&bob).is_some());
}

#[test]
fn unknown_profile_yields_none() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Everybody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let bob = number(7);
    enabled(&account, &bob, 0x22);
    account.remove_profile(&bob);

    assert!(resolver.access_pair_for(&bob).is_none());
}

#[test]
fn enabled_without_stored_profile_key_yields_none() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Everybody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let bob = number(7);
    account.set_profile(bob.clone(), UnidentifiedAccessMode::Enabled);

    assert!(resolver.access_pair_for(&bob).is_none());
}

#[test]
fn unrestricted_works_without_profile_key_and_varies() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Everybody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let bob = number(7);
    account.set_profile(bob.clone(), UnidentifiedAccessMode::Unrestricted);

    let first = resolver.access_pair_for(&bob).unwrap();
    let second = resolver.access_pair_for(&bob).unwrap();

    assert_ne!(first.target().access_key(), second.target().access_key());
    assert_eq!(first.own().access_key(), second.own().access_key());
}

#[test]
fn batch_preserves_order_and_isolates_failures() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Everybody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let a = number(1);
    let b = number(2);
    let c = number(3);
    enabled(&account, &a, 0x31);
    account.set_profile(b.clone(), UnidentifiedAccessMode::Enabled);
    enabled(&account, &c, 0x33);

    let pairs = resolver.access_pairs_for([&a, &b, &c]);

    assert_eq!(pairs.len(), 3);
    assert_eq!(
        pairs[0].as_ref().map(|p| p.target().access_key().clone()),
        Some(derive_access_key(&key_for(0x31)).unwrap())
    );
    assert!(pairs[1].is_none());
    assert_eq!(
        pairs[2].as_ref().map(|p| p.target().access_key().clone()),
        Some(derive_access_key(&key_for(0x33)).unwrap())
    );
}

#[test]
fn sync_uses_normal_certificate_when_sharing_with_nobody() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Nobody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let pair = resolver.access_pair_for_sync().unwrap();

    assert_eq!(certificates.requests(), vec![CertificateKind::Normal]);
    assert_eq!(pair.own().certificate().as_bytes(), NORMAL_CERTIFICATE);
    assert_eq!(pair.target().access_key(), &derive_access_key(&own_key()).unwrap());
    assert_eq!(pair.own().access_key(), pair.target().access_key());
}

#[test]
fn direct_and_sync_certificates_differ_under_privacy() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Nobody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let bob = number(7);
    enabled(&account, &bob, 0x22);

    let direct = resolver.access_pair_for(&bob).unwrap();
    let sync = resolver.access_pair_for_sync().unwrap();

    assert_eq!(direct.own().certificate().as_bytes(), PRIVACY_CERTIFICATE);
    assert_eq!(sync.own().certificate().as_bytes(), NORMAL_CERTIFICATE);
}

#[test]
fn sharing_mode_change_applies_on_next_call() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Everybody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let bob = number(7);
    assert_eq!(resolver.certificate_kind_for(&bob), CertificateKind::Normal);

    account.set_sharing_mode(PhoneNumberSharingMode::Nobody);
    assert_eq!(resolver.certificate_kind_for(&bob), CertificateKind::PhoneNumberPrivacy);
}

#[test]
fn privacy_certificate_failure_does_not_affect_sync() {
    let account = MemoryAccount::new(PhoneNumberSharingMode::Nobody, Some(own_key()));
    let certificates = ScriptedCertificates::new();
    let resolver = resolver(&account, &certificates);

    let bob = number(7);
    enabled(&account, &bob, 0x22);
    certificates.fail(CertificateKind::PhoneNumberPrivacy);

    assert!(resolver.access_pair_for(&bob).is_none());
    assert!(resolver.access_pair_for_sync().is_some());
}
