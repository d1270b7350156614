//! The owner-loop handle captured by asynchronous image operations.
//!
//! Asynchronous edits must finish on the thread that owns the state. Rather
//! than reading an ambient "current execution context", every
//! [`Image`](crate::image::Image) carries an explicit [`Context`] handle:
//! futures handed to [`Context::spawn`] are queued over a channel and
//! polled by the owning loop (see [`crate::program`]), so completion — and
//! the dispatch it performs — always lands on the owner's thread.
//!
//! A root constructed outside [`Program`](crate::program::Program) (tests,
//! custom drivers) obtains its own pair from [`Context::channel`] and
//! drains the [`TaskReceiver`] however it sees fit.

use std::future::Future;

use futures::future::LocalBoxFuture;
use tokio::sync::mpsc;

/// A task queued for the owning loop. Not `Send`: tasks close over
/// `Rc`-backed images and never leave the owner's thread.
pub type Task = LocalBoxFuture<'static, ()>;

/// A cloneable handle enqueueing futures onto the owning loop.
#[derive(Clone)]
pub struct Context {
    sender: mpsc::UnboundedSender<Task>,
}

impl Context {
    /// Creates a context and the receiving end the owning loop drains.
    #[must_use]
    pub fn channel() -> (Self, TaskReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, TaskReceiver { receiver })
    }

    /// Enqueues a future for the owning loop to poll.
    ///
    /// Never blocks. If the owning loop is gone the task is dropped —
    /// started work whose owner has shut down has nowhere to deliver.
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        if self.sender.send(Box::pin(future)).is_err() {
            tracing::debug!("owner loop is gone; dropping spawned task");
        }
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("Context").finish_non_exhaustive()
    }
}

/// The receiving end of a [`Context`]: the stream of queued tasks.
pub struct TaskReceiver {
    receiver: mpsc::UnboundedReceiver<Task>,
}

impl TaskReceiver {
    /// Waits for the next queued task.
    ///
    /// Returns `None` once every [`Context`] clone has been dropped and
    /// the queue is drained.
    pub async fn recv(&mut self) -> Option<Task> {
        self.receiver.recv().await
    }

    /// Takes the next queued task without waiting.
    pub fn try_recv(&mut self) -> Option<Task> {
        self.receiver.try_recv().ok()
    }
}

impl std::fmt::Debug for TaskReceiver {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TaskReceiver")
            .finish_non_exhaustive()
    }
}
