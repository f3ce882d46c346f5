//! Mutation subscription (publish/subscribe mechanics only).
//!
//! A store publishes every committed mutation record after the state has been
//! updated. Subscribers see records in commit order; what they do with them
//! (dev tooling, persistence, UI refresh) is outside this crate.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to committed mutations.
///
/// Each subscription gets its own copy of every record published after it was
/// created (broadcast semantics). Dropping the subscription unsubscribes.
///
/// ```ignore
/// let sub = store.subscribe();
/// store.dispatch(StocksAction::InitStocks)?;
/// let record = sub.try_recv()?;
/// assert_eq!(record.mutation_type(), "SET_STOCKS");
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain everything that is already queued.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Fan-out of committed mutations to subscribers.
///
/// Publication happens after commit, so a failing bus never rolls a state
/// back. Implementations must be `Send + Sync`; the store publishes while
/// holding its state lock, which keeps delivery in commit order.
pub trait MutationBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> MutationBus<M> for Arc<B>
where
    B: MutationBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
