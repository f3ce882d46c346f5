use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Mutation;

/// Audit record for one committed mutation.
///
/// This is the unit kept in a store's history and fanned out to subscribers.
///
/// Notes:
/// - `sequence_number` increases by one per commit within a module.
/// - `payload` is the mutation exactly as it was committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRecord<M> {
    record_id: Uuid,
    module: String,

    /// Position of this commit in the module's history (1-based).
    sequence_number: u64,
    committed_at: DateTime<Utc>,

    payload: M,
}

impl<M> MutationRecord<M> {
    pub fn new(
        record_id: Uuid,
        module: impl Into<String>,
        sequence_number: u64,
        committed_at: DateTime<Utc>,
        payload: M,
    ) -> Self {
        Self {
            record_id,
            module: module.into(),
            sequence_number,
            committed_at,
            payload,
        }
    }

    pub fn record_id(&self) -> Uuid {
        self.record_id
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn committed_at(&self) -> DateTime<Utc> {
        self.committed_at
    }

    pub fn payload(&self) -> &M {
        &self.payload
    }

    pub fn into_payload(self) -> M {
        self.payload
    }
}

impl<M: Mutation> MutationRecord<M> {
    pub fn mutation_type(&self) -> &'static str {
        self.payload.mutation_type()
    }
}
