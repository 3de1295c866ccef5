//! Message targets.
//!
//! A [`RecipientIdentity`] names where a message goes: the account's own
//! note-to-self conversation, a single correspondent, or a group. Sealed
//! sender only applies to direct delivery, so access resolution takes a
//! [`Single`] and groups or note-to-self cannot reach it.

use std::fmt;

use uuid::Uuid;

use crate::{error::IdentityError, phone};

/// Length of the canonical hyphenated id form.
const HYPHENATED_ID_LEN: usize = 36;

/// Any message target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecipientIdentity {
    /// The account's own "notes to self" conversation.
    NoteToSelf,
    /// One correspondent.
    Single(Single),
    /// A group conversation.
    Group(GroupId),
}

impl RecipientIdentity {
    /// The single correspondent, if this target is one.
    pub fn as_single(&self) -> Option<&Single> {
        match self {
            Self::Single(single) => Some(single),
            Self::NoteToSelf | Self::Group(_) => None,
        }
    }
}

impl From<Single> for RecipientIdentity {
    fn from(single: Single) -> Self {
        Self::Single(single)
    }
}

impl From<GroupId> for RecipientIdentity {
    fn from(group_id: GroupId) -> Self {
        Self::Group(group_id)
    }
}

/// A single correspondent, named by service id or by phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Single {
    /// Stable service identifier.
    Id(Uuid),
    /// E.164 phone number.
    Number(String),
}

impl Single {
    /// Parse free-form text as a correspondent.
    ///
    /// Text in canonical hyphenated id form becomes [`Single::Id`]; anything
    /// else is normalized as a phone number, with `local_number` resolving
    /// national formats.
    pub fn parse(text: &str, local_number: &str) -> Result<Self, IdentityError> {
        if let Some(id) = parse_id(text) {
            return Ok(Self::Id(id));
        }
        let number = phone::normalize(text, local_number)?;
        Ok(Self::Number(number))
    }

    /// Canonical textual form: the hyphenated id or the raw number.
    pub fn identifier(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Single {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id.hyphenated()),
            Self::Number(number) => f.write_str(number),
        }
    }
}

impl From<&RecipientAddress> for Single {
    /// The number wins when the address carries both.
    fn from(address: &RecipientAddress) -> Self {
        match &address.parts {
            AddressParts::Number(number) | AddressParts::Both { number, .. } => {
                Self::Number(number.clone())
            },
            AddressParts::Id(id) => Self::Id(*id),
        }
    }
}

fn parse_id(text: &str) -> Option<Uuid> {
    if text.len() != HYPHENATED_ID_LEN {
        return None;
    }
    Uuid::try_parse(text).ok()
}

/// Opaque group identifier.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GroupId(Vec<u8>);

impl GroupId {
    /// Wrap raw group id bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw group id bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupId({self})")
    }
}

/// A resolved address record from the recipient store.
///
/// Always carries at least one identifier; there is no way to build one
/// without.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipientAddress {
    parts: AddressParts,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum AddressParts {
    Id(Uuid),
    Number(String),
    Both { id: Uuid, number: String },
}

impl RecipientAddress {
    /// Address known only by service id.
    pub fn from_id(id: Uuid) -> Self {
        Self { parts: AddressParts::Id(id) }
    }

    /// Address known only by phone number.
    pub fn from_number(number: impl Into<String>) -> Self {
        Self { parts: AddressParts::Number(number.into()) }
    }

    /// Address from optional parts; `None` when both are missing.
    pub fn from_parts(id: Option<Uuid>, number: Option<String>) -> Option<Self> {
        let parts = match (id, number) {
            (Some(id), Some(number)) => AddressParts::Both { id, number },
            (Some(id), None) => AddressParts::Id(id),
            (None, Some(number)) => AddressParts::Number(number),
            (None, None) => return None,
        };
        Some(Self { parts })
    }

    /// Service id, if known.
    pub fn id(&self) -> Option<Uuid> {
        match &self.parts {
            AddressParts::Id(id) | AddressParts::Both { id, .. } => Some(*id),
            AddressParts::Number(_) => None,
        }
    }

    /// Phone number, if known.
    pub fn number(&self) -> Option<&str> {
        match &self.parts {
            AddressParts::Number(number) | AddressParts::Both { number, .. } => Some(number),
            AddressParts::Id(_) => None,
        }
    }
}
