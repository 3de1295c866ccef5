//! Sealed-sender access policy for outgoing messages.
//!
//! Decides, per recipient, whether a message can travel without revealing
//! its sender to the server, and packages the material needed to do so.
//! Everything stateful lives behind collaborator traits; this crate only
//! reads point-in-time snapshots and never blocks delivery: any missing
//! prerequisite yields `None` and the caller sends unsealed.
//!
//! # Components
//!
//! - [`recipient`]: Message targets and their canonical forms
//! - [`phone`]: E.164 phone number normalization
//! - [`source`]: Collaborator traits (certificates, profiles, contacts)
//! - [`access`]: The access resolver and credential pairs
//! - [`cache`]: Time-bounded certificate cache decorator
//! - [`mod@env`]: Environment abstraction (time, RNG)
//! - [`error`]: Error types

pub mod access;
pub mod cache;
pub mod env;
pub mod error;
pub mod phone;
pub mod recipient;
pub mod source;

pub use access::{AccessResolver, UnidentifiedAccess, UnidentifiedAccessPair};
pub use cache::{CachedCertificateSource, CertificateCacheConfig};
pub use env::{Environment, SystemEnv};
pub use error::{CertificateError, IdentityError};
pub use phone::NumberFormatError;
pub use recipient::{GroupId, RecipientAddress, RecipientIdentity, Single};
pub use source::{
    AccountSettings, CertificateKind, CertificateSource, ContactTrustSource,
    PhoneNumberSharingMode, ProfileKeySource, RecipientProfile, SenderCertificate,
    UnidentifiedAccessMode,
};
