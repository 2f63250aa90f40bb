//! Recoverable resource adapter.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use shardtx_common::ShardId;

use crate::engine::XaDataSource;

/// Adapter exposing one shard's XA datasource to the engine recovery
/// subsystem.
///
/// Two adapters carrying the same shard identifier are equivalent: removal
/// after a re-registration must hit the same tracked resource, so equality
/// and hashing go by the identifier key alone, never by datasource identity.
#[derive(Clone)]
pub struct RecoverableResource {
    shard_id: ShardId,
    datasource: Arc<dyn XaDataSource>,
}

impl RecoverableResource {
    /// Bind a shard identifier to its XA datasource handle.
    pub fn new(shard_id: ShardId, datasource: Arc<dyn XaDataSource>) -> Self {
        Self {
            shard_id,
            datasource,
        }
    }

    /// The shard this resource belongs to.
    pub fn shard_id(&self) -> &ShardId {
        &self.shard_id
    }

    /// The underlying datasource handle.
    pub fn datasource(&self) -> &Arc<dyn XaDataSource> {
        &self.datasource
    }

    /// Name under which the engine tracks this resource.
    pub fn unique_resource_name(&self) -> String {
        format!("shardtx-{}", self.shard_id)
    }
}

impl PartialEq for RecoverableResource {
    fn eq(&self, other: &Self) -> bool {
        self.shard_id == other.shard_id
    }
}

impl Eq for RecoverableResource {}

impl Hash for RecoverableResource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shard_id.hash(state);
    }
}

impl fmt::Debug for RecoverableResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoverableResource")
            .field("shard_id", &self.shard_id)
            .field("datasource", &self.datasource.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubDataSource {
        name: String,
        url: String,
    }

    impl XaDataSource for StubDataSource {
        fn name(&self) -> &str {
            &self.name
        }

        fn connection_url(&self) -> &str {
            &self.url
        }
    }

    fn stub(name: &str) -> Arc<dyn XaDataSource> {
        Arc::new(StubDataSource {
            name: name.to_string(),
            url: format!("jdbc:postgresql://{}/orders", name),
        })
    }

    #[test]
    fn test_equality_by_shard_id_only() {
        let a = RecoverableResource::new(ShardId::new("ds1"), stub("primary"));
        let b = RecoverableResource::new(ShardId::new("ds1"), stub("replica"));
        let c = RecoverableResource::new(ShardId::new("ds2"), stub("primary"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unique_resource_name() {
        let resource = RecoverableResource::new(ShardId::new("ds1"), stub("ds1"));
        assert_eq!(resource.unique_resource_name(), "shardtx-ds1");
    }

    #[test]
    fn test_datasource_is_shared_not_owned() {
        let ds = stub("ds1");
        let resource = RecoverableResource::new(ShardId::new("ds1"), ds.clone());
        drop(resource);
        // The caller's handle remains usable after the adapter is gone.
        assert_eq!(ds.name(), "ds1");
    }
}
