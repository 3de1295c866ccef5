//! In-memory account, contact and profile store.

use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, MutexGuard, PoisonError},
};

use sealpost_core::{
    AccountSettings, ContactTrustSource, PhoneNumberSharingMode, ProfileKeySource,
    RecipientProfile, Single, UnidentifiedAccessMode,
};
use sealpost_crypto::ProfileKey;

/// Account state held in memory.
///
/// Implements every account-side collaborator trait. Setters take `&self` so
/// a test can change state after handing the store to a resolver.
#[derive(Debug)]
pub struct MemoryAccount {
    state: Mutex<AccountState>,
}

#[derive(Debug)]
struct AccountState {
    sharing_mode: PhoneNumberSharingMode,
    own_profile_key: Option<ProfileKey>,
    contacts: HashSet<Single>,
    profiles: HashMap<Single, RecipientProfile>,
    profile_keys: HashMap<Single, ProfileKey>,
}

impl MemoryAccount {
    /// Empty account with the given sharing mode and own profile key.
    pub fn new(sharing_mode: PhoneNumberSharingMode, own_profile_key: Option<ProfileKey>) -> Self {
        Self {
            state: Mutex::new(AccountState {
                sharing_mode,
                own_profile_key,
                contacts: HashSet::new(),
                profiles: HashMap::new(),
                profile_keys: HashMap::new(),
            }),
        }
    }

    /// Change the account-wide sharing mode.
    pub fn set_sharing_mode(&self, mode: PhoneNumberSharingMode) {
        self.state().sharing_mode = mode;
    }

    /// Replace or remove the account's own profile key.
    pub fn set_own_profile_key(&self, key: Option<ProfileKey>) {
        self.state().own_profile_key = key;
    }

    /// Store `recipient` as a contact.
    pub fn add_contact(&self, recipient: Single) {
        self.state().contacts.insert(recipient);
    }

    /// Record `recipient`'s profile with the given access mode.
    pub fn set_profile(&self, recipient: Single, mode: UnidentifiedAccessMode) {
        self.state().profiles.insert(recipient, RecipientProfile::new(mode));
    }

    /// Forget `recipient`'s profile, as if it was never fetched.
    pub fn remove_profile(&self, recipient: &Single) {
        self.state().profiles.remove(recipient);
    }

    /// Store `recipient`'s profile key.
    pub fn set_profile_key(&self, recipient: Single, key: ProfileKey) {
        self.state().profile_keys.insert(recipient, key);
    }

    fn state(&self) -> MutexGuard<'_, AccountState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AccountSettings for MemoryAccount {
    fn phone_number_sharing_mode(&self) -> PhoneNumberSharingMode {
        self.state().sharing_mode
    }
}

impl ContactTrustSource for MemoryAccount {
    fn is_known_contact(&self, recipient: &Single) -> bool {
        self.state().contacts.contains(recipient)
    }
}

impl ProfileKeySource for MemoryAccount {
    fn own_profile_key(&self) -> Option<ProfileKey> {
        self.state().own_profile_key.clone()
    }

    fn recipient_profile(&self, recipient: &Single) -> Option<RecipientProfile> {
        self.state().profiles.get(recipient).copied()
    }

    fn stored_profile_key(&self, recipient: &Single) -> Option<ProfileKey> {
        self.state().profile_keys.get(recipient).cloned()
    }
}
