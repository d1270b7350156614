//! Epimorphism optics: transforms whose reverse direction can fail.
//!
//! An [`Epimorphism`] converts a source into a target unconditionally but
//! may reject the way back: reconstructing the source from an arbitrary
//! target value returns a `Result` carrying a typed error. The canonical
//! case is viewing a structured value as its textual form — every number
//! renders as a string, but not every string parses back.
//!
//! [`Image::parse`](crate::image::Image::parse) pairs an epimorphism with
//! an error side-channel: rejected conversions leave the state untouched
//! and surface the error value instead of faulting.
//!
//! # Examples
//!
//! ```
//! use imago::optics::{Epimorphism, FunctionEpimorphism};
//!
//! let as_text = FunctionEpimorphism::new(
//!     |number: i64| number.to_string(),
//!     |text: String| text.parse::<i64>(),
//! );
//!
//! assert_eq!(as_text.get(42), "42");
//! assert_eq!(as_text.reverse_get("42".to_string()), Ok(42));
//! assert!(as_text.reverse_get("forty-two".to_string()).is_err());
//! ```

use std::future::Future;
use std::marker::PhantomData;

use futures::future::LocalBoxFuture;

/// A conversion pair whose reconstruction direction is partial.
///
/// The forward direction is total; the reverse direction yields
/// `Result<S, Self::Error>`, with the error value intended for an error
/// side-channel rather than for propagation as a fault.
pub trait Epimorphism<S, A> {
    /// The error produced when a target value cannot be converted back.
    type Error;

    /// Converts the source into the target shape. Always succeeds.
    fn get(&self, source: S) -> A;

    /// Attempts to reconstruct a source from a target value.
    ///
    /// # Errors
    ///
    /// Returns the conversion error when `value` has no corresponding
    /// source.
    fn reverse_get(&self, value: A) -> Result<S, Self::Error>;
}

/// An epimorphism whose reconstruction completes asynchronously.
///
/// The forward direction stays synchronous, as with
/// [`AsyncLens`](crate::optics::AsyncLens) and
/// [`AsyncIso`](crate::optics::AsyncIso).
pub trait AsyncEpimorphism<S, A> {
    /// The error produced when a target value cannot be converted back.
    type Error;

    /// Converts the source into the target shape. Always succeeds.
    fn get(&self, source: S) -> A;

    /// Attempts to reconstruct a source from a target value,
    /// asynchronously.
    fn reverse_get(&self, value: A) -> LocalBoxFuture<'static, Result<S, Self::Error>>;
}

/// An epimorphism built from a total forward closure and a fallible
/// reverse closure.
pub struct FunctionEpimorphism<S, A, E, G, Rg>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> Result<S, E>,
{
    get_function: G,
    reverse_get_function: Rg,
    _marker: PhantomData<(S, A, E)>,
}

impl<S, A, E, G, Rg> FunctionEpimorphism<S, A, E, G, Rg>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> Result<S, E>,
{
    /// Creates a new `FunctionEpimorphism` from the two directions.
    #[must_use]
    pub const fn new(get_function: G, reverse_get_function: Rg) -> Self {
        Self {
            get_function,
            reverse_get_function,
            _marker: PhantomData,
        }
    }
}

impl<S, A, E, G, Rg> Epimorphism<S, A> for FunctionEpimorphism<S, A, E, G, Rg>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> Result<S, E>,
{
    type Error = E;

    fn get(&self, source: S) -> A {
        (self.get_function)(source)
    }

    fn reverse_get(&self, value: A) -> Result<S, E> {
        (self.reverse_get_function)(value)
    }
}

impl<S, A, E, G, Rg> Clone for FunctionEpimorphism<S, A, E, G, Rg>
where
    G: Fn(S) -> A + Clone,
    Rg: Fn(A) -> Result<S, E> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            get_function: self.get_function.clone(),
            reverse_get_function: self.reverse_get_function.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, E, G, Rg> std::fmt::Debug for FunctionEpimorphism<S, A, E, G, Rg>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> Result<S, E>,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionEpimorphism")
            .finish_non_exhaustive()
    }
}

/// An async epimorphism built from a total forward closure and a fallible
/// async reverse closure.
pub struct FunctionAsyncEpimorphism<S, A, E, G, Rg, Fut>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> Fut,
    Fut: Future<Output = Result<S, E>> + 'static,
{
    get_function: G,
    reverse_get_function: Rg,
    _marker: PhantomData<(S, A, E, Fut)>,
}

impl<S, A, E, G, Rg, Fut> FunctionAsyncEpimorphism<S, A, E, G, Rg, Fut>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> Fut,
    Fut: Future<Output = Result<S, E>> + 'static,
{
    /// Creates a new `FunctionAsyncEpimorphism` from the two directions.
    #[must_use]
    pub const fn new(get_function: G, reverse_get_function: Rg) -> Self {
        Self {
            get_function,
            reverse_get_function,
            _marker: PhantomData,
        }
    }
}

impl<S, A, E, G, Rg, Fut> AsyncEpimorphism<S, A> for FunctionAsyncEpimorphism<S, A, E, G, Rg, Fut>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> Fut,
    Fut: Future<Output = Result<S, E>> + 'static,
{
    type Error = E;

    fn get(&self, source: S) -> A {
        (self.get_function)(source)
    }

    fn reverse_get(&self, value: A) -> LocalBoxFuture<'static, Result<S, E>> {
        Box::pin((self.reverse_get_function)(value))
    }
}

impl<S, A, E, G, Rg, Fut> Clone for FunctionAsyncEpimorphism<S, A, E, G, Rg, Fut>
where
    G: Fn(S) -> A + Clone,
    Rg: Fn(A) -> Fut + Clone,
    Fut: Future<Output = Result<S, E>> + 'static,
{
    fn clone(&self) -> Self {
        Self {
            get_function: self.get_function.clone(),
            reverse_get_function: self.reverse_get_function.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, E, G, Rg, Fut> std::fmt::Debug for FunctionAsyncEpimorphism<S, A, E, G, Rg, Fut>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> Fut,
    Fut: Future<Output = Result<S, E>> + 'static,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionAsyncEpimorphism")
            .finish_non_exhaustive()
    }
}
