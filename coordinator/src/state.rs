//! Coordinator state definitions.

/// Coordinator operational state.
///
/// Tracked for observability only; transactional verbs are never gated on it
/// because verb ordering is the engine's contract, not this layer's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Coordinator constructed, engine not yet initialized.
    Created,
    /// Engine initialized and accepting transactional verbs.
    Running,
    /// Shutdown in progress, recovery resources being deregistered.
    ShuttingDown,
    /// Engine administrative service stopped.
    Stopped,
}

impl CoordinatorState {
    /// Check if the coordinator is operational.
    pub fn is_running(&self) -> bool {
        matches!(self, CoordinatorState::Running)
    }

    /// Check if the coordinator is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CoordinatorState::Stopped)
    }
}
