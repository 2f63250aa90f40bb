//! Metrics collection for coordinator monitoring.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Coordinator metrics.
pub struct Metrics {
    /// Total transactions begun.
    pub transactions_begun: AtomicU64,
    /// Transactions committed.
    pub transactions_committed: AtomicU64,
    /// Transactions rolled back.
    pub transactions_rolled_back: AtomicU64,
    /// Transactional verbs that failed in the engine.
    pub transactions_failed: AtomicU64,
    /// Transactions currently active.
    pub transactions_active: AtomicU64,
    /// Total recovery resources registered.
    pub resources_registered: AtomicU64,
    /// Total recovery resources removed.
    pub resources_removed: AtomicU64,
}

impl Metrics {
    /// Create new metrics instance.
    pub fn new() -> Self {
        Self {
            transactions_begun: AtomicU64::new(0),
            transactions_committed: AtomicU64::new(0),
            transactions_rolled_back: AtomicU64::new(0),
            transactions_failed: AtomicU64::new(0),
            transactions_active: AtomicU64::new(0),
            resources_registered: AtomicU64::new(0),
            resources_removed: AtomicU64::new(0),
        }
    }

    /// Record a successful begin.
    pub fn transaction_begun(&self) {
        self.transactions_begun.fetch_add(1, Ordering::Relaxed);
        self.transactions_active.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed begin. No active transaction was created.
    pub fn begin_failed(&self) {
        self.transactions_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful commit.
    pub fn transaction_committed(&self) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
        self.dec_active();
    }

    /// Record a successful rollback.
    pub fn transaction_rolled_back(&self) {
        self.transactions_rolled_back.fetch_add(1, Ordering::Relaxed);
        self.dec_active();
    }

    /// Record a failed commit or rollback. The transaction leaves the
    /// active set either way; its final outcome is the engine's.
    pub fn transaction_failed(&self) {
        self.transactions_failed.fetch_add(1, Ordering::Relaxed);
        self.dec_active();
    }

    /// Record a recovery resource registration.
    pub fn resource_registered(&self) {
        self.resources_registered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a recovery resource removal.
    pub fn resource_removed(&self) {
        self.resources_removed.fetch_add(1, Ordering::Relaxed);
    }

    fn dec_active(&self) {
        let _ = self
            .transactions_active
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| v.checked_sub(1));
    }

    /// Get current metrics snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            transactions_begun: self.transactions_begun.load(Ordering::Relaxed),
            transactions_committed: self.transactions_committed.load(Ordering::Relaxed),
            transactions_rolled_back: self.transactions_rolled_back.load(Ordering::Relaxed),
            transactions_failed: self.transactions_failed.load(Ordering::Relaxed),
            transactions_active: self.transactions_active.load(Ordering::Relaxed),
            resources_registered: self.resources_registered.load(Ordering::Relaxed),
            resources_removed: self.resources_removed.load(Ordering::Relaxed),
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        format!(
            r#"# HELP shardtx_transactions_begun Total transactions begun
# TYPE shardtx_transactions_begun counter
shardtx_transactions_begun {}

# HELP shardtx_transactions_committed Total transactions committed
# TYPE shardtx_transactions_committed counter
shardtx_transactions_committed {}

# HELP shardtx_transactions_rolled_back Total transactions rolled back
# TYPE shardtx_transactions_rolled_back counter
shardtx_transactions_rolled_back {}

# HELP shardtx_transactions_failed Total failed transactional operations
# TYPE shardtx_transactions_failed counter
shardtx_transactions_failed {}

# HELP shardtx_transactions_active Current active transactions
# TYPE shardtx_transactions_active gauge
shardtx_transactions_active {}

# HELP shardtx_resources_registered Total recovery resources registered
# TYPE shardtx_resources_registered counter
shardtx_resources_registered {}

# HELP shardtx_resources_removed Total recovery resources removed
# TYPE shardtx_resources_removed counter
shardtx_resources_removed {}
"#,
            snapshot.transactions_begun,
            snapshot.transactions_committed,
            snapshot.transactions_rolled_back,
            snapshot.transactions_failed,
            snapshot.transactions_active,
            snapshot.resources_registered,
            snapshot.resources_removed,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub transactions_begun: u64,
    pub transactions_committed: u64,
    pub transactions_rolled_back: u64,
    pub transactions_failed: u64,
    pub transactions_active: u64,
    pub resources_registered: u64,
    pub resources_removed: u64,
}

/// Shared metrics instance.
pub type SharedMetrics = Arc<Metrics>;
