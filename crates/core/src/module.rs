//! State module trait: the action/mutation split over a single state container.

use crate::error::{StoreError, StoreResult};

/// Versioned state marker + minimal interface.
pub trait Versioned {
    /// Monotonically increasing number of mutations committed to this state.
    fn version(&self) -> u64;
}

/// Optimistic concurrency expectation for a state container.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking.
    Any,
    /// Require the state to be at an exact version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> StoreResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(StoreError::conflict(format!(
                "state version check failed (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}

/// Execution semantics of a state module.
///
/// - **Action dispatch**: `dispatch(&self, state, action)` decides which
///   mutations to commit. It reads the state but never writes it.
/// - **Mutation commit**: `commit(state, mutation)` is the only write path.
///
/// `&self` is the module's environment (external collaborators such as a
/// data source); the state itself is owned by whoever composes the module.
pub trait Module {
    type State: Versioned + core::fmt::Debug;
    type Action: Clone + core::fmt::Debug;
    type Mutation: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Apply a single mutation. Must be synchronous and deterministic and
    /// should bump `version()` by one.
    fn commit(state: &mut Self::State, mutation: Self::Mutation);

    /// Decide which mutations an action commits, in order.
    fn dispatch(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Result<Vec<Self::Mutation>, Self::Error>;
}
