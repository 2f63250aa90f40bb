//! ShardTx Coordinator
//!
//! The coordination layer sitting above an XA-capable transaction manager
//! engine. It drives the begin/commit/rollback lifecycle for transactions
//! spanning sharded datasources and keeps each shard's recoverable resource
//! registered with the engine's crash recovery subsystem.

pub mod coordinator;
pub mod config;
pub mod engine;
pub mod lifecycle;
pub mod registry;
pub mod resource;
pub mod state;
pub mod metrics;

pub use coordinator::XaCoordinator;
pub use config::CoordinatorConfig;
pub use engine::{EngineResult, RecoveryService, TransactionManager, XaDataSource};
pub use resource::RecoverableResource;
