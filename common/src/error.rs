//! Error types for the ShardTx coordination layer.

use std::fmt;
use thiserror::Error;

/// Failure reported by the underlying XA transaction manager engine.
///
/// The engine is a trusted collaborator; these variants are the vocabulary
/// it reports in at the boundary, not a re-implementation of its states.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// System-level failure: resource exhaustion, lost shard connectivity,
    /// or a nested-begin violation.
    #[error("engine system failure: {0}")]
    System(String),

    /// Heuristic outcome reported during the commit phase.
    #[error("heuristic outcome: {0}")]
    Heuristic(String),

    /// A verb was invoked outside the order the engine permits.
    #[error("illegal transaction state: {0}")]
    IllegalState(String),

    /// The transaction was marked rollback-only before commit.
    #[error("transaction marked rollback-only")]
    RollbackOnly,
}

/// Transaction verb that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOperation {
    Begin,
    Commit,
    Rollback,
}

impl fmt::Display for TxOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxOperation::Begin => write!(f, "begin"),
            TxOperation::Commit => write!(f, "commit"),
            TxOperation::Rollback => write!(f, "rollback"),
        }
    }
}

/// Main error type for ShardTx operations.
#[derive(Error, Debug)]
pub enum ShardTxError {
    /// Begin, commit, or rollback failed in the underlying engine.
    ///
    /// All engine failures on the transactional path collapse into this one
    /// kind. The original cause is preserved for diagnosis; distinguishing
    /// failure subtypes and deciding on retries is the caller's job.
    #[error("transaction {operation} failed")]
    TransactionOperation {
        operation: TxOperation,
        #[source]
        source: EngineError,
    },

    /// Invalid coordinator configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ShardTxError {
    /// The engine failure that caused this error, if any.
    pub fn engine_cause(&self) -> Option<&EngineError> {
        match self {
            ShardTxError::TransactionOperation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for ShardTx operations.
pub type Result<T> = std::result::Result<T, ShardTxError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_operation_error_names_verb() {
        let err = ShardTxError::TransactionOperation {
            operation: TxOperation::Commit,
            source: EngineError::System("prepare phase timed out".to_string()),
        };
        assert_eq!(err.to_string(), "transaction commit failed");
    }

    #[test]
    fn test_operation_error_preserves_cause() {
        let err = ShardTxError::TransactionOperation {
            operation: TxOperation::Begin,
            source: EngineError::System("out of branches".to_string()),
        };
        let cause = err.source().expect("cause must be preserved");
        assert_eq!(cause.to_string(), "engine system failure: out of branches");
        assert_eq!(
            err.engine_cause(),
            Some(&EngineError::System("out of branches".to_string()))
        );
    }

    #[test]
    fn test_engine_error_display() {
        assert_eq!(
            EngineError::RollbackOnly.to_string(),
            "transaction marked rollback-only"
        );
        assert_eq!(
            EngineError::Heuristic("mixed".to_string()).to_string(),
            "heuristic outcome: mixed"
        );
    }
}
