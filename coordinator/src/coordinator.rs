//! Coordinator facade.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, instrument};

use shardtx_common::{Result, ShardId, TransactionContext};

use crate::config::CoordinatorConfig;
use crate::engine::{EngineResult, RecoveryService, TransactionManager, XaDataSource};
use crate::lifecycle::LifecycleController;
use crate::metrics::{Metrics, SharedMetrics};
use crate::registry::ResourceRegistry;
use crate::state::CoordinatorState;

/// Single entry point for the sharding/routing layer.
///
/// Composes the lifecycle controller and the resource registry; no
/// transactional logic of its own. Constructed once per process with the
/// engine handles injected, so teardown order is explicit rather than left
/// to global initialization.
pub struct XaCoordinator {
    /// Configuration.
    config: CoordinatorConfig,
    /// Node ID for this coordinator instance.
    node_id: String,
    /// Current coordinator state.
    state: RwLock<CoordinatorState>,
    /// Lifecycle controller over the engine.
    lifecycle: LifecycleController,
    /// Recovery resource registry.
    registry: ResourceRegistry,
    /// Metrics.
    metrics: SharedMetrics,
}

impl XaCoordinator {
    /// Create a new coordinator over the given engine handles.
    pub fn new(
        config: CoordinatorConfig,
        transaction_manager: Arc<dyn TransactionManager>,
        recovery_service: Arc<dyn RecoveryService>,
    ) -> Self {
        let node_id = config
            .node_id
            .clone()
            .unwrap_or_else(|| format!("coordinator-{}", uuid::Uuid::new_v4()));

        Self {
            config,
            node_id,
            state: RwLock::new(CoordinatorState::Created),
            lifecycle: LifecycleController::new(transaction_manager, recovery_service.clone()),
            registry: ResourceRegistry::new(recovery_service),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Initialize the engine, once per process. Failures propagate unwrapped
    /// and should be treated as fatal for this process.
    #[instrument(skip(self), fields(node_id = %self.node_id))]
    pub fn startup(&self) -> EngineResult<()> {
        info!("Starting XA coordinator");
        self.lifecycle.startup()?;
        *self.state.write() = CoordinatorState::Running;
        info!("XA coordinator running");
        Ok(())
    }

    /// Tear the engine down, once per process.
    ///
    /// Deregisters every tracked recovery resource first, so the engine holds
    /// no reference to datasources about to be closed, then stops the
    /// administrative service with force-termination of in-flight
    /// transactions.
    #[instrument(skip(self), fields(node_id = %self.node_id))]
    pub fn shutdown(&self) -> EngineResult<()> {
        info!("Stopping XA coordinator");
        *self.state.write() = CoordinatorState::ShuttingDown;

        self.registry.remove_all()?;
        self.lifecycle.shutdown()?;

        *self.state.write() = CoordinatorState::Stopped;
        info!("XA coordinator stopped");
        Ok(())
    }

    /// Begin a new logical transaction.
    pub fn begin(&self) -> Result<TransactionContext> {
        match self.lifecycle.begin() {
            Ok(context) => {
                self.metrics.transaction_begun();
                Ok(context)
            }
            Err(err) => {
                self.metrics.begin_failed();
                Err(err)
            }
        }
    }

    /// Commit the given transaction across all enlisted shards.
    pub fn commit(&self, context: &TransactionContext) -> Result<()> {
        match self.lifecycle.commit(context) {
            Ok(()) => {
                self.metrics.transaction_committed();
                Ok(())
            }
            Err(err) => {
                self.metrics.transaction_failed();
                Err(err)
            }
        }
    }

    /// Roll back the given transaction across all enlisted shards.
    pub fn rollback(&self, context: &TransactionContext) -> Result<()> {
        match self.lifecycle.rollback(context) {
            Ok(()) => {
                self.metrics.transaction_rolled_back();
                Ok(())
            }
            Err(err) => {
                self.metrics.transaction_failed();
                Err(err)
            }
        }
    }

    /// Expose a shard's datasource to the engine's crash recovery scanning.
    pub fn register_recovery_resource(
        &self,
        shard_id: ShardId,
        datasource: Arc<dyn XaDataSource>,
    ) -> EngineResult<()> {
        self.registry.register(shard_id, datasource)?;
        self.metrics.resource_registered();
        Ok(())
    }

    /// Remove a shard's datasource from the engine's crash recovery scanning.
    pub fn remove_recovery_resource(
        &self,
        shard_id: ShardId,
        datasource: Arc<dyn XaDataSource>,
    ) -> EngineResult<()> {
        self.registry.remove(shard_id, datasource)?;
        self.metrics.resource_removed();
        Ok(())
    }

    /// Get the current coordinator state.
    pub fn state(&self) -> CoordinatorState {
        *self.state.read()
    }

    /// Identifiers of all shards currently registered for recovery.
    pub fn registered_shards(&self) -> Vec<ShardId> {
        self.registry.shard_ids()
    }

    /// Metrics handle.
    pub fn metrics(&self) -> SharedMetrics {
        self.metrics.clone()
    }

    /// This coordinator's node ID.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// The configuration this coordinator was constructed with.
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }
}
