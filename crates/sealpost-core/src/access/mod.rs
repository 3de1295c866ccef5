//! Sealed-sender access resolution.
//!
//! [`AccessResolver`] combines account settings, contact trust, profiles and
//! certificates into an [`UnidentifiedAccessPair`] per recipient. Any
//! missing piece produces `None`, which callers treat as "send unsealed".

mod pair;
mod resolver;

pub use pair::{UnidentifiedAccess, UnidentifiedAccessPair};
pub use resolver::AccessResolver;
