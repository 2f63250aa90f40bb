//! Identifier types for ShardTx entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a shard datasource.
///
/// This is the key the resource registry dedupes on: two registrations with
/// the same `ShardId` refer to the same recoverable resource, regardless of
/// which datasource handle they carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShardId(String);

impl ShardId {
    /// Create a new shard ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the shard ID format.
    pub fn is_valid(&self) -> bool {
        // Non-empty, bounded, and limited to characters that are safe in
        // datasource names and recovery-log entries.
        !self.0.is_empty()
            && self.0.len() <= 64
            && self
                .0
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
    }
}

impl fmt::Display for ShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ShardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ShardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Unique identifier for a logical transaction.
/// Uses UUID v7 for time-ordered identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Create a new transaction ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_transaction_id_creation() {
        let id1 = TransactionId::new();
        let id2 = TransactionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_transaction_id_parse() {
        let uuid_str = "019456ab-1234-7def-8901-234567890abc";
        let id = TransactionId::parse(uuid_str).unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn test_shard_id_validation() {
        assert!(ShardId::new("ds1").is_valid());
        assert!(ShardId::new("orders_shard-03").is_valid());
        assert!(ShardId::new("eu.west.ds0").is_valid());
        assert!(!ShardId::new("").is_valid());
        assert!(!ShardId::new("shard with spaces").is_valid());
        assert!(!ShardId::new("a".repeat(65)).is_valid());
    }

    #[test]
    fn test_shard_id_equality_by_key() {
        assert_eq!(ShardId::new("ds1"), ShardId::from("ds1"));
        assert_ne!(ShardId::new("ds1"), ShardId::new("ds2"));
    }

    proptest! {
        #[test]
        fn valid_shard_ids_roundtrip(s in "[A-Za-z0-9_.-]{1,64}") {
            let id = ShardId::new(s.clone());
            prop_assert!(id.is_valid());
            prop_assert_eq!(id.as_str(), s.as_str());
            prop_assert_eq!(id.to_string(), s);
        }
    }
}
