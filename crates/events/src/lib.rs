//! Actions, mutations and their audit trail.

pub mod action;
pub mod bus;
pub mod handler;
pub mod in_memory_bus;
pub mod mutation;
pub mod record;
pub mod replay;

pub use action::Action;
pub use bus::{MutationBus, Subscription};
pub use handler::execute;
pub use in_memory_bus::{InMemoryBusError, InMemoryMutationBus};
pub use mutation::Mutation;
pub use record::MutationRecord;
pub use replay::{ReplayError, ReplayRunner};
