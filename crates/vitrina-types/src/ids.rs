//! Typed identifier for blocks and nested items.
//!
//! Ids are opaque strings on the wire: authored content may carry any string,
//! and imported documents keep whatever ids they arrive with. Freshly minted
//! ids wrap UUIDv7 (time-ordered, globally unique) so that duplicated content
//! never collides with the ids it was copied from.
//!
//! An empty id means "lacking an id": the importer fills those in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A block or nested-item identifier.
#[derive(Clone, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Wrap an existing id string verbatim.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a new time-ordered id (UUIDv7, 32 hex chars).
    pub fn mint() -> Self {
        Self(uuid::Uuid::now_v7().as_simple().to_string())
    }

    /// Mint a time-based id carrying its position: `"{uuidv7}-{pos}"`.
    ///
    /// Used by the importer, where `pos` is the dotted path of the block or
    /// item (e.g. `"3"` or `"3.1"`).
    pub fn mint_positional(pos: &str) -> Self {
        Self(format!("{}-{}", uuid::Uuid::now_v7().as_simple(), pos))
    }

    /// The empty id (no id assigned yet).
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Check whether no id has been assigned.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters: for human display only, not lookup.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for BlockId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_is_unique() {
        let a = BlockId::mint();
        let b = BlockId::mint();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn test_mint_positional_carries_position() {
        let id = BlockId::mint_positional("4.2");
        assert!(id.as_str().ends_with("-4.2"));
        assert_ne!(id, BlockId::mint_positional("4.2"));
    }

    #[test]
    fn test_empty_detection() {
        assert!(BlockId::empty().is_empty());
        assert!(BlockId::new("  ").is_empty());
        assert!(!BlockId::new("b1").is_empty());
    }

    #[test]
    fn test_short_handles_short_ids() {
        assert_eq!(BlockId::new("abc").short(), "abc");
        assert_eq!(BlockId::new("0123456789").short(), "01234567");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = BlockId::new("intro-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"intro-1\"");
        let parsed: BlockId = serde_json::from_str("\"intro-1\"").unwrap();
        assert_eq!(parsed, id);
    }
}
