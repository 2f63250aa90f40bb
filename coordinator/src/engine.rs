//! Boundary traits for the underlying XA transaction manager engine.
//!
//! The engine is a trusted collaborator: it implements the XA state machine,
//! two-phase commit messaging, and recovery-log persistence. This layer only
//! drives it and translates its failures.

use shardtx_common::{EngineError, TransactionContext};

use crate::resource::RecoverableResource;

/// Result type at the engine boundary.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Transactional interface of the engine.
///
/// Implementations must be safe for concurrent calls from distinct threads
/// operating on distinct transaction contexts. All three verbs may block on
/// network I/O to the participating shards during prepare/commit messaging;
/// there is no asynchronous variant.
pub trait TransactionManager: Send + Sync {
    /// Start a new logical transaction and return its context handle.
    fn begin(&self) -> EngineResult<TransactionContext>;

    /// Commit the given transaction across all enlisted shards.
    fn commit(&self, context: &TransactionContext) -> EngineResult<()>;

    /// Roll back the given transaction across all enlisted shards.
    fn rollback(&self, context: &TransactionContext) -> EngineResult<()>;
}

/// Administrative interface of the engine.
///
/// Covers process-wide startup/shutdown and the recovery-resource tracking
/// the engine consults when scanning for in-doubt transactions after a
/// crash. The engine, not this layer, is the source of truth for what is
/// currently tracked.
pub trait RecoveryService: Send + Sync {
    /// Initialize the service. Called exactly once per process.
    fn init(&self) -> EngineResult<()>;

    /// Stop the service. `force` terminates still-active transactions
    /// instead of draining them.
    fn shutdown(&self, force: bool) -> EngineResult<()>;

    /// Start tracking a shard's recoverable resource.
    fn register_resource(&self, resource: &RecoverableResource) -> EngineResult<()>;

    /// Stop tracking a shard's recoverable resource.
    fn remove_resource(&self, resource: &RecoverableResource) -> EngineResult<()>;
}

/// An XA-capable shard datasource handle.
///
/// Constructed and owned by the routing layer; this layer only borrows it
/// long enough to expose it to the engine recovery subsystem.
pub trait XaDataSource: Send + Sync {
    /// Datasource name as configured by the routing layer.
    fn name(&self) -> &str;

    /// Connection URL the recovery subsystem uses to reopen the datasource.
    fn connection_url(&self) -> &str;
}
