//! Transaction context handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifiers::TransactionId;

/// Handle for one logical transaction.
///
/// The underlying engine associates a transaction with the calling execution
/// context; this handle makes that association explicit, so commit and
/// rollback name the transaction they act on. Returned by `begin`, consumed
/// by `commit` or `rollback`, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionContext {
    /// Unique transaction ID.
    pub id: TransactionId,
    /// When the transaction was begun.
    pub started_at: DateTime<Utc>,
}

impl TransactionContext {
    /// Create a new context for a freshly begun transaction.
    pub fn new() -> Self {
        Self {
            id: TransactionId::new(),
            started_at: Utc::now(),
        }
    }

    /// Time elapsed since the transaction was begun.
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}

impl Default for TransactionContext {
    fn default() -> Self {
        Self::new()
    }
}
