//! Deterministic collaborators for sealed-sender access tests.
//!
//! In-memory implementations of the resolver's collaborator traits, plus a
//! seeded environment, so resolver behavior can be checked without a
//! network or a real account store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod certificates;
pub mod sim_env;

pub use account::MemoryAccount;
pub use certificates::{NORMAL_CERTIFICATE, PRIVACY_CERTIFICATE, ScriptedCertificates};
pub use sim_env::SimEnv;
