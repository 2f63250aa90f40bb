//! Recoverable resource registry.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{info, warn};

use shardtx_common::ShardId;

use crate::engine::{EngineResult, RecoveryService, XaDataSource};
use crate::resource::RecoverableResource;

/// Registry of shard resources currently exposed to the engine recovery
/// subsystem.
///
/// The recovery service remains the source of truth for what the engine
/// tracks; the local map exists so shutdown can deregister everything and
/// operators can inspect the current shard topology. Mutation happens during
/// startup, shutdown, and shard topology changes, never on the transactional
/// hot path.
pub struct ResourceRegistry {
    /// Registered resources keyed by shard identifier.
    resources: DashMap<ShardId, RecoverableResource>,
    /// The engine's administrative service.
    recovery_service: Arc<dyn RecoveryService>,
}

impl ResourceRegistry {
    /// Create a registry backed by the given recovery service.
    pub fn new(recovery_service: Arc<dyn RecoveryService>) -> Self {
        Self {
            resources: DashMap::new(),
            recovery_service,
        }
    }

    /// Register a shard's datasource for crash recovery.
    ///
    /// Until this is done, an engine crash mid-transaction on that shard
    /// cannot be resolved by this process. Registration failures propagate
    /// from the engine unwrapped.
    pub fn register(
        &self,
        shard_id: ShardId,
        datasource: Arc<dyn XaDataSource>,
    ) -> EngineResult<()> {
        let resource = RecoverableResource::new(shard_id.clone(), datasource);
        self.recovery_service.register_resource(&resource)?;

        if self.resources.insert(shard_id.clone(), resource).is_some() {
            // Callers are expected to deregister before re-registering; the
            // engine dedupes by resource name, so only the local entry is
            // replaced here.
            warn!(shard_id = %shard_id, "Replacing already-registered recovery resource");
        }

        info!(shard_id = %shard_id, "Recovery resource registered");
        Ok(())
    }

    /// Remove a shard's datasource from crash recovery tracking.
    ///
    /// Must happen before the datasource is closed, so the engine never holds
    /// a reference to a dead connection. Removal failures propagate unwrapped.
    pub fn remove(&self, shard_id: ShardId, datasource: Arc<dyn XaDataSource>) -> EngineResult<()> {
        let resource = RecoverableResource::new(shard_id.clone(), datasource);
        self.recovery_service.remove_resource(&resource)?;
        self.resources.remove(&shard_id);

        info!(shard_id = %shard_id, "Recovery resource removed");
        Ok(())
    }

    /// Deregister every tracked resource, in support of graceful shutdown.
    ///
    /// Stops at the first engine failure, leaving the remaining entries
    /// registered.
    pub fn remove_all(&self) -> EngineResult<()> {
        let resources: Vec<RecoverableResource> =
            self.resources.iter().map(|e| e.value().clone()).collect();

        for resource in resources {
            self.recovery_service.remove_resource(&resource)?;
            self.resources.remove(resource.shard_id());
            info!(shard_id = %resource.shard_id(), "Recovery resource removed");
        }

        Ok(())
    }

    /// Check whether a shard is currently registered.
    pub fn contains(&self, shard_id: &ShardId) -> bool {
        self.resources.contains_key(shard_id)
    }

    /// Number of registered resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether no resources are registered.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Identifiers of all registered shards.
    pub fn shard_ids(&self) -> Vec<ShardId> {
        self.resources.iter().map(|e| e.key().clone()).collect()
    }
}
