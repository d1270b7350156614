//! The driver loop adapter: root state ownership and the update cycle.
//!
//! A [`Program`] owns the one mutable location in the system. It applies
//! dispatched whole-state updates strictly one at a time, re-renders after
//! every applied update, and polls the futures queued through the loop's
//! [`Context`] on the same thread — which is what lets asynchronous image
//! operations promise "the update lands on the owner".
//!
//! The view function receives a freshly constructed root
//! [`Image`](crate::image::Image) on every render and derives whatever
//! child images it needs; the render callback receives the view's output
//! and steers the loop with [`ControlFlow`]. Side-effect command channels
//! have no representation here: an update produces a state, nothing else.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::ops::ControlFlow;
//!
//! use imago::image::Image;
//! use imago::program::Program;
//!
//! let program = Program::new(0_i32, |root: &Image<i32>| root.clone());
//! let final_count = program
//!     .run(|counter| {
//!         if counter.get() >= 3 {
//!             ControlFlow::Break(())
//!         } else {
//!             counter.update(|count| count + 1);
//!             ControlFlow::Continue(())
//!         }
//!     })
//!     .unwrap();
//! assert_eq!(final_count, 3);
//! ```

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use tokio::runtime::Builder;
use tokio::sync::mpsc;
use tokio::task::LocalSet;

use crate::context::Context;
use crate::image::{Image, Update};

/// Failure to stand up the driver loop.
#[derive(Debug)]
pub enum ProgramError {
    /// The underlying runtime could not be constructed.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProgramError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Runtime(error) => {
                write!(formatter, "failed to build the program runtime: {error}")
            }
        }
    }
}

impl std::error::Error for ProgramError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Runtime(error) => Some(error),
        }
    }
}

/// An image-based application: initial state plus a view deriving images.
pub struct Program<S, V> {
    initial: S,
    view: Box<dyn Fn(&Image<S>) -> V>,
}

impl<S, V> std::fmt::Debug for Program<S, V>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Program")
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

impl<S, V> Program<S, V>
where
    S: Clone + PartialEq + 'static,
    V: 'static,
{
    /// Creates a program from its initial state and view function.
    ///
    /// The view runs once per render with a fresh root image over the
    /// current state; its output is handed to the render callback given to
    /// [`run`](Program::run).
    #[must_use]
    pub fn new(initial: S, view: impl Fn(&Image<S>) -> V + 'static) -> Self {
        Self {
            initial,
            view: Box::new(view),
        }
    }

    /// Runs the update loop until the render callback breaks, returning
    /// the final state.
    ///
    /// Builds a current-thread runtime; every update application, render,
    /// and queued task runs on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::Runtime`] when the runtime cannot be
    /// constructed.
    pub fn run<R>(self, render: R) -> Result<S, ProgramError>
    where
        R: FnMut(V) -> ControlFlow<()>,
    {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProgramError::Runtime)?;
        let local = LocalSet::new();
        Ok(local.block_on(&runtime, self.drive(render)))
    }

    async fn drive<R>(self, mut render: R) -> S
    where
        R: FnMut(V) -> ControlFlow<()>,
    {
        let (update_sender, mut updates) = mpsc::unbounded_channel::<Update<S>>();
        let (context, mut tasks) = Context::channel();
        let state = Rc::new(RefCell::new(self.initial));

        let root = {
            let state = Rc::clone(&state);
            move || {
                let reader = Rc::clone(&state);
                let sender = update_sender.clone();
                Image::new(
                    move || reader.borrow().clone(),
                    move |update| {
                        if sender.send(update).is_err() {
                            tracing::debug!("update loop is gone; dropping dispatch");
                        }
                    },
                    context.clone(),
                )
            }
        };

        if render((self.view)(&root())).is_break() {
            return state.borrow().clone();
        }

        loop {
            tokio::select! {
                Some(update) = updates.recv() => {
                    tracing::trace!("applying dispatched update");
                    let current = state.borrow().clone();
                    let next = update(current);
                    *state.borrow_mut() = next;
                    if render((self.view)(&root())).is_break() {
                        tracing::debug!("render requested stop");
                        break;
                    }
                }
                Some(task) = tasks.recv() => {
                    tracing::trace!("polling queued context task");
                    tokio::task::spawn_local(task);
                }
                else => break,
            }
        }

        state.borrow().clone()
    }
}
