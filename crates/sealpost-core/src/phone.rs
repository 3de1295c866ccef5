//! E.164 phone number normalization.
//!
//! Free-form user text is reduced to digits and `+`, then parsed with the
//! libphonenumber metadata from the [`phonenumber`] crate. National formats
//! (trunk prefixes, international dialing prefixes) are resolved against the
//! region of the local account's own number.

use phonenumber::{Mode, country};
use thiserror::Error;

/// Why a phone number could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberFormatError {
    /// Input looks like an email address.
    #[error("possible attempt to use email address")]
    EmailAddress,

    /// Nothing left after removing formatting characters.
    #[error("no valid characters found")]
    NoValidCharacters,

    /// National input, but the local account number names no region.
    #[error("local number {0:?} does not identify a region")]
    InvalidLocalNumber(String),

    /// The number parser rejected the input.
    #[error("{0}")]
    Unparseable(String),
}

/// Normalize `number` to E.164, using `local_number` to resolve national
/// formats.
///
/// International input (leading `+`) normalizes identically for every local
/// account.
pub fn normalize(number: &str, local_number: &str) -> Result<String, NumberFormatError> {
    if number.contains('@') {
        return Err(NumberFormatError::EmailAddress);
    }

    let stripped: String = number.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
    if stripped.is_empty() {
        return Err(NumberFormatError::NoValidCharacters);
    }

    let region = local_region(local_number);
    let has_region = region.is_some();
    match phonenumber::parse(region, &stripped) {
        Ok(parsed) => Ok(parsed.format().mode(Mode::E164).to_string()),
        Err(_) if !has_region && !stripped.starts_with('+') => {
            Err(NumberFormatError::InvalidLocalNumber(local_number.to_string()))
        },
        Err(err) => Err(NumberFormatError::Unparseable(err.to_string())),
    }
}

fn local_region(local_number: &str) -> Option<country::Id> {
    phonenumber::parse(None, local_number).ok().and_then(|parsed| parsed.country().id())
}
