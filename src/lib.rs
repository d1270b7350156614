//! # imago
//!
//! An optics-based state-management library for Elm-style applications.
//!
//! A view never touches application state directly. It holds an
//! [`Image`](crate::image::Image): a two-way bound accessor pairing a lazy
//! reader of the current value with a dispatcher that submits whole-state
//! update functions to the single owner of the state. Images derive:
//! focusing through a [`Lens`](crate::optics::Lens), re-shaping through an
//! [`Iso`](crate::optics::Iso), or viewing through a fallible
//! [`Epimorphism`](crate::optics::Epimorphism) each produce a narrower
//! image whose edits are lifted back into whole-state updates — so every
//! edit, from however deep a derivation chain, reaches the root as exactly
//! one dispatch.
//!
//! ## Modules
//!
//! - [`optics`]: the accessor vocabulary — lenses, isos, epimorphisms,
//!   their async variants, and vector element lenses.
//! - [`image`]: the reactive accessor and its derivation combinators.
//! - [`context`]: the explicit owner-loop handle async operations resume
//!   on.
//! - [`program`]: the driver loop owning root state and serializing
//!   updates.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::ops::ControlFlow;
//!
//! use imago::image::Image;
//! use imago::lens;
//! use imago::program::Program;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct AppState { count: i32 }
//!
//! let program = Program::new(AppState { count: 0 }, |root: &Image<AppState>| {
//!     root.focus(lens!(AppState, count))
//! });
//!
//! let final_state = program.run(|counter| {
//!     if counter.get() >= 10 {
//!         ControlFlow::Break(())
//!     } else {
//!         counter.update(|count| count + 1);
//!         ControlFlow::Continue(())
//!     }
//! })?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the working vocabulary: image, optics, context, and program
/// types.
///
/// # Usage
///
/// ```rust
/// use imago::prelude::*;
/// ```
pub mod prelude {
    pub use crate::context::*;
    pub use crate::image::*;
    pub use crate::optics::*;
    pub use crate::program::*;
}

pub mod context;
pub mod image;
pub mod optics;
pub mod program;
