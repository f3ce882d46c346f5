//! Rebuild a state container from recorded mutations.
//!
//! History is the audit trail; state is derived. Replaying a module's records
//! in sequence order through `Module::commit` yields the state those commits
//! produced, without running any action (and so without touching external
//! collaborators).

use stocktrader_core::Module;
use thiserror::Error;

use crate::MutationRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("record belongs to module `{found}`, expected `{expected}`")]
    ModuleMismatch { expected: String, found: String },

    #[error("non-monotonic sequence: last applied {last}, found {found}")]
    NonMonotonicSequence { last: u64, found: u64 },

    /// Records before `found` are missing (e.g. a trimmed history).
    #[error("sequence gap: expected {expected}, found {found}")]
    SequenceGap { expected: u64, found: u64 },
}

/// Commits recorded mutations into a state and tracks progress.
#[derive(Debug)]
pub struct ReplayRunner<M>
where
    M: Module,
{
    module: String,
    state: M::State,
    last_sequence_number: u64,
}

impl<M> ReplayRunner<M>
where
    M: Module,
{
    /// Start replaying into `state`; only records of `module` are accepted.
    pub fn new(module: impl Into<String>, state: M::State) -> Self {
        Self {
            module: module.into(),
            state,
            last_sequence_number: 0,
        }
    }

    pub fn state(&self) -> &M::State {
        &self.state
    }

    pub fn into_state(self) -> M::State {
        self.state
    }

    /// Sequence number of the last applied record (0 if none).
    pub fn last_sequence_number(&self) -> u64 {
        self.last_sequence_number
    }

    /// Apply a single record, enforcing module identity and contiguous sequencing.
    ///
    /// Replay starts from the state the first record was committed against,
    /// so a history that does not start at sequence 1 or skips records is
    /// rejected.
    pub fn apply(&mut self, record: &MutationRecord<M::Mutation>) -> Result<(), ReplayError> {
        if record.module() != self.module {
            return Err(ReplayError::ModuleMismatch {
                expected: self.module.clone(),
                found: record.module().to_string(),
            });
        }
        let found = record.sequence_number();
        if found <= self.last_sequence_number {
            return Err(ReplayError::NonMonotonicSequence {
                last: self.last_sequence_number,
                found,
            });
        }
        let expected = self.last_sequence_number + 1;
        if found != expected {
            return Err(ReplayError::SequenceGap { expected, found });
        }

        M::commit(&mut self.state, record.payload().clone());
        self.last_sequence_number = found;
        tracing::trace!(module = %self.module, sequence = found, "replayed mutation");
        Ok(())
    }

    /// Apply many records in order.
    pub fn run<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a MutationRecord<M::Mutation>>,
    ) -> Result<(), ReplayError>
    where
        M::Mutation: 'a,
    {
        for record in records {
            self.apply(record)?;
        }
        Ok(())
    }

    /// Rebuild a state from scratch by replaying a full history.
    pub fn rebuild_from_scratch<'a>(
        module: impl Into<String>,
        factory: impl FnOnce() -> M::State,
        records: impl IntoIterator<Item = &'a MutationRecord<M::Mutation>>,
    ) -> Result<M::State, ReplayError>
    where
        M::Mutation: 'a,
    {
        let mut runner = ReplayRunner::<M>::new(module, factory());
        runner.run(records)?;
        Ok(runner.state)
    }
}
