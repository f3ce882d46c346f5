//! Store: the composition root that owns one module's state.
//!
//! ```text
//! caller
//!   ↓ dispatch(action)
//! 1. Lock state (one writer at a time, actions applied in arrival order)
//!   ↓
//! 2. Optional version check (ExpectedVersion)
//!   ↓
//! 3. Module::dispatch decides mutations (reads state, no writes)
//!   ↓
//! 4. Module::commit applies each mutation, each gets a MutationRecord
//!   ↓
//! 5. Records appended to history, then published to subscribers
//!    (publish failures are logged; the commit stands)
//! ```
//!
//! Every write goes through step 4; readers borrow the state through
//! `Store::read`.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use stocktrader_core::{ExpectedVersion, Module, StoreError, Versioned};
use stocktrader_events::{
    InMemoryMutationBus, Mutation, MutationBus, MutationRecord, ReplayError, ReplayRunner,
    Subscription,
};

use crate::config::StoreConfig;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The module (or one of its collaborators) rejected the action.
    #[error("rejected: {0}")]
    Rejected(StoreError),
    /// The state was not at the version the caller expected.
    #[error("conflict: {0}")]
    Conflict(String),
    /// A previous writer panicked while holding the state lock.
    #[error("state lock poisoned")]
    Poisoned,
}

impl From<StoreError> for DispatchError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict(msg) => DispatchError::Conflict(msg),
            StoreError::Poisoned => DispatchError::Poisoned,
            other => DispatchError::Rejected(other),
        }
    }
}

/// Records of one module's mutations.
pub type RecordOf<M> = MutationRecord<<M as Module>::Mutation>;

/// A store publishing to an in-process bus.
pub type LocalStore<M> = Store<M, InMemoryMutationBus<RecordOf<M>>>;

#[derive(Debug)]
struct Inner<M: Module> {
    state: M::State,
    sequence: u64,
    history: VecDeque<RecordOf<M>>,
}

/// Owns a module, its state, the mutation history and the subscriber bus.
///
/// Access is serialized by a mutex: an action's mutations are all committed
/// before the next action is looked at.
#[derive(Debug)]
pub struct Store<M, B>
where
    M: Module,
{
    name: String,
    module: M,
    inner: Mutex<Inner<M>>,
    bus: B,
    history_limit: usize,
}

impl<M> Store<M, InMemoryMutationBus<RecordOf<M>>>
where
    M: Module,
    M::Mutation: Mutation,
    M::Error: Into<StoreError>,
{
    /// Store with an in-memory bus and default configuration.
    pub fn new(name: impl Into<String>, module: M, state: M::State) -> Self {
        Self::with_bus(name, module, state, InMemoryMutationBus::new(), &StoreConfig::default())
    }

    pub fn with_config(
        name: impl Into<String>,
        module: M,
        state: M::State,
        config: &StoreConfig,
    ) -> Self {
        Self::with_bus(name, module, state, InMemoryMutationBus::new(), config)
    }
}

impl<M, B> Store<M, B>
where
    M: Module,
    M::Mutation: Mutation,
    M::Error: Into<StoreError>,
    B: MutationBus<RecordOf<M>>,
{
    pub fn with_bus(
        name: impl Into<String>,
        module: M,
        state: M::State,
        bus: B,
        config: &StoreConfig,
    ) -> Self {
        Self {
            name: name.into(),
            module,
            inner: Mutex::new(Inner {
                state,
                sequence: 0,
                history: VecDeque::new(),
            }),
            bus,
            history_limit: config.history_limit,
        }
    }

    /// Rebuild a store from a recorded history.
    ///
    /// The records are committed into `initial` without running any action;
    /// new commits continue after the last replayed sequence number. The
    /// history must be complete (starting at sequence 1, no gaps), so one
    /// trimmed by `history_limit` is rejected with `ReplayError::SequenceGap`.
    pub fn rehydrate<'a>(
        name: impl Into<String>,
        module: M,
        initial: M::State,
        records: impl IntoIterator<Item = &'a RecordOf<M>>,
        bus: B,
        config: &StoreConfig,
    ) -> Result<Self, ReplayError>
    where
        M::Mutation: 'a,
    {
        let name = name.into();
        let mut runner = ReplayRunner::<M>::new(name.clone(), initial);
        let mut history = VecDeque::new();
        for record in records {
            runner.apply(record)?;
            push_bounded(&mut history, record.clone(), config.history_limit);
        }
        let sequence = runner.last_sequence_number();
        tracing::info!(module = %name, sequence, "store rehydrated from history");

        Ok(Self {
            name,
            module,
            inner: Mutex::new(Inner {
                state: runner.into_state(),
                sequence,
                history,
            }),
            bus,
            history_limit: config.history_limit,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dispatch an action; returns the records of the mutations it committed.
    pub fn dispatch(&self, action: M::Action) -> Result<Vec<RecordOf<M>>, DispatchError> {
        self.dispatch_expecting(ExpectedVersion::Any, action)
    }

    /// Dispatch an action only if the state is still at `expected`.
    pub fn dispatch_expecting(
        &self,
        expected: ExpectedVersion,
        action: M::Action,
    ) -> Result<Vec<RecordOf<M>>, DispatchError> {
        let mut inner = self.lock()?;
        expected.check(inner.state.version())?;

        tracing::debug!(module = %self.name, ?action, "dispatching action");
        let mutations = self
            .module
            .dispatch(&inner.state, &action)
            .map_err(|e| {
                let err: StoreError = e.into();
                DispatchError::from(err)
            })?;

        let records: Vec<_> = mutations
            .into_iter()
            .map(|m| self.commit_locked(&mut inner, m))
            .collect();

        // Publish under the lock so subscribers observe commit order.
        self.publish_all(&records);
        Ok(records)
    }

    /// Commit a single mutation directly, bypassing action dispatch.
    pub fn commit(&self, mutation: M::Mutation) -> Result<RecordOf<M>, DispatchError> {
        let mut inner = self.lock()?;
        let record = self.commit_locked(&mut inner, mutation);
        self.publish_all(std::slice::from_ref(&record));
        Ok(record)
    }

    /// Run a getter against the current state.
    pub fn read<R>(&self, getter: impl FnOnce(&M::State) -> R) -> Result<R, DispatchError> {
        let inner = self.lock()?;
        Ok(getter(&inner.state))
    }

    /// Current state version (number of commits applied to it).
    pub fn version(&self) -> Result<u64, DispatchError> {
        self.read(|s| s.version())
    }

    /// Snapshot of the retained mutation history, oldest first.
    pub fn history(&self) -> Result<Vec<RecordOf<M>>, DispatchError> {
        let inner = self.lock()?;
        Ok(inner.history.iter().cloned().collect())
    }

    /// Receive every record committed from now on.
    pub fn subscribe(&self) -> Subscription<RecordOf<M>> {
        self.bus.subscribe()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner<M>>, DispatchError> {
        self.inner.lock().map_err(|_| DispatchError::Poisoned)
    }

    fn commit_locked(&self, inner: &mut Inner<M>, mutation: M::Mutation) -> RecordOf<M> {
        inner.sequence += 1;
        let record = MutationRecord::new(
            Uuid::now_v7(),
            self.name.as_str(),
            inner.sequence,
            Utc::now(),
            mutation.clone(),
        );

        if mutation.is_noop() {
            tracing::debug!(
                module = %self.name,
                mutation = record.mutation_type(),
                sequence = inner.sequence,
                "committing stub mutation"
            );
        } else {
            tracing::debug!(
                module = %self.name,
                mutation = record.mutation_type(),
                sequence = inner.sequence,
                "committing mutation"
            );
        }

        M::commit(&mut inner.state, mutation);
        push_bounded(&mut inner.history, record.clone(), self.history_limit);
        record
    }

    /// Notify subscribers. The records are already committed, so a bus
    /// failure is logged and never turned into a dispatch error.
    fn publish_all(&self, records: &[RecordOf<M>]) {
        for record in records {
            if let Err(e) = self.bus.publish(record.clone()) {
                tracing::warn!(
                    module = %self.name,
                    sequence = record.sequence_number(),
                    error = ?e,
                    "mutation committed but subscribers were not notified"
                );
            }
        }
    }
}

fn push_bounded<T>(history: &mut VecDeque<T>, item: T, limit: usize) {
    if limit == 0 {
        return;
    }
    while history.len() >= limit {
        history.pop_front();
    }
    history.push_back(item);
}
