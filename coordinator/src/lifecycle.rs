//! Transaction lifecycle control.

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use shardtx_common::{Result, ShardTxError, TransactionContext, TxOperation};

use crate::engine::{EngineResult, RecoveryService, TransactionManager};

/// Drives the begin/commit/rollback lifecycle against the underlying engine.
///
/// The three transactional verbs delegate one-to-one and apply a uniform
/// translation: any engine failure becomes a `TransactionOperation` error
/// carrying the original cause. Nothing is retried here; retry policy belongs
/// to the routing layer. Startup and shutdown touch the administrative
/// service instead and propagate its failures unwrapped, since those are
/// process-lifecycle events the caller should treat as fatal.
pub struct LifecycleController {
    /// Transactional interface of the engine.
    transaction_manager: Arc<dyn TransactionManager>,
    /// Administrative interface of the engine.
    recovery_service: Arc<dyn RecoveryService>,
}

impl LifecycleController {
    /// Create a controller over the given engine handles.
    pub fn new(
        transaction_manager: Arc<dyn TransactionManager>,
        recovery_service: Arc<dyn RecoveryService>,
    ) -> Self {
        Self {
            transaction_manager,
            recovery_service,
        }
    }

    /// Initialize the engine's administrative service, exactly once per
    /// process.
    #[instrument(skip(self))]
    pub fn startup(&self) -> EngineResult<()> {
        info!("Initializing transaction recovery service");
        self.recovery_service.init()
    }

    /// Stop the administrative service, force-terminating any still-active
    /// transactions. Called at most once during teardown.
    #[instrument(skip(self))]
    pub fn shutdown(&self) -> EngineResult<()> {
        info!("Shutting down transaction recovery service");
        self.recovery_service.shutdown(true)
    }

    /// Begin a new logical transaction.
    pub fn begin(&self) -> Result<TransactionContext> {
        match self.transaction_manager.begin() {
            Ok(context) => {
                debug!(transaction_id = %context.id, "Transaction begun");
                Ok(context)
            }
            Err(source) => {
                error!(error = %source, "Transaction begin failed");
                Err(ShardTxError::TransactionOperation {
                    operation: TxOperation::Begin,
                    source,
                })
            }
        }
    }

    /// Commit the given transaction. May block while the engine runs the
    /// prepare and commit phases against every enlisted shard.
    pub fn commit(&self, context: &TransactionContext) -> Result<()> {
        self.transaction_manager.commit(context).map_err(|source| {
            error!(transaction_id = %context.id, error = %source, "Transaction commit failed");
            ShardTxError::TransactionOperation {
                operation: TxOperation::Commit,
                source,
            }
        })
    }

    /// Roll back the given transaction.
    pub fn rollback(&self, context: &TransactionContext) -> Result<()> {
        self.transaction_manager.rollback(context).map_err(|source| {
            error!(transaction_id = %context.id, error = %source, "Transaction rollback failed");
            ShardTxError::TransactionOperation {
                operation: TxOperation::Rollback,
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardtx_common::EngineError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingTransactionManager {
        begins: AtomicUsize,
        commits: AtomicUsize,
        rollbacks: AtomicUsize,
        fail_commit: AtomicBool,
    }

    impl TransactionManager for CountingTransactionManager {
        fn begin(&self) -> EngineResult<TransactionContext> {
            self.begins.fetch_add(1, Ordering::SeqCst);
            Ok(TransactionContext::new())
        }

        fn commit(&self, _context: &TransactionContext) -> EngineResult<()> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            if self.fail_commit.load(Ordering::SeqCst) {
                return Err(EngineError::Heuristic("hazard".to_string()));
            }
            Ok(())
        }

        fn rollback(&self, _context: &TransactionContext) -> EngineResult<()> {
            self.rollbacks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingRecoveryService {
        inits: AtomicUsize,
        shutdowns: AtomicUsize,
        last_force: AtomicBool,
    }

    impl RecoveryService for CountingRecoveryService {
        fn init(&self) -> EngineResult<()> {
            self.inits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn shutdown(&self, force: bool) -> EngineResult<()> {
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
            self.last_force.store(force, Ordering::SeqCst);
            Ok(())
        }

        fn register_resource(
            &self,
            _resource: &crate::resource::RecoverableResource,
        ) -> EngineResult<()> {
            Ok(())
        }

        fn remove_resource(
            &self,
            _resource: &crate::resource::RecoverableResource,
        ) -> EngineResult<()> {
            Ok(())
        }
    }

    fn controller() -> (
        LifecycleController,
        Arc<CountingTransactionManager>,
        Arc<CountingRecoveryService>,
    ) {
        let manager = Arc::new(CountingTransactionManager::default());
        let service = Arc::new(CountingRecoveryService::default());
        (
            LifecycleController::new(manager.clone(), service.clone()),
            manager,
            service,
        )
    }

    #[test]
    fn test_startup_initializes_once() {
        let (controller, _, service) = controller();
        controller.startup().unwrap();
        assert_eq!(service.inits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shutdown_forces_termination() {
        let (controller, _, service) = controller();
        controller.shutdown().unwrap();
        assert_eq!(service.shutdowns.load(Ordering::SeqCst), 1);
        assert!(service.last_force.load(Ordering::SeqCst));
    }

    #[test]
    fn test_begin_commit_delegates_once_each() {
        let (controller, manager, _) = controller();
        let cx = controller.begin().unwrap();
        controller.commit(&cx).unwrap();

        assert_eq!(manager.begins.load(Ordering::SeqCst), 1);
        assert_eq!(manager.commits.load(Ordering::SeqCst), 1);
        assert_eq!(manager.rollbacks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_commit_failure_wraps_without_retry() {
        let (controller, manager, _) = controller();
        let cx = controller.begin().unwrap();
        manager.fail_commit.store(true, Ordering::SeqCst);

        let err = controller.commit(&cx).unwrap_err();
        assert!(matches!(
            err,
            ShardTxError::TransactionOperation {
                operation: TxOperation::Commit,
                source: EngineError::Heuristic(_),
            }
        ));
        // The failing verb was attempted exactly once.
        assert_eq!(manager.commits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rollback_delegates_once() {
        let (controller, manager, _) = controller();
        let cx = controller.begin().unwrap();
        controller.rollback(&cx).unwrap();
        assert_eq!(manager.rollbacks.load(Ordering::SeqCst), 1);
    }
}
