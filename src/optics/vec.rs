//! Element lenses for vectors, and the per-element image combinator.
//!
//! [`find`] addresses an element by predicate, [`at`] by position. Both are
//! precondition-based: the caller guarantees a match exists or the index is
//! in bounds, and a violated precondition panics rather than degrading
//! silently. [`each`] snapshots a vector image into one child image per
//! element.
//!
//! # Examples
//!
//! ```
//! use imago::optics::{at, find, Lens};
//!
//! let numbers = vec![1, 2, 3];
//! assert_eq!(at(1).get(&numbers), 2);
//! assert_eq!(at(1).set(numbers, 20), vec![1, 20, 3]);
//!
//! let first_even = find(|n: &i32| n % 2 == 0);
//! assert_eq!(first_even.get(&vec![1, 2, 3, 4]), 2);
//! ```

use std::marker::PhantomData;

use crate::image::Image;

use super::Lens;

/// A lens addressing a vector element by predicate.
///
/// The getter returns the **first** matching element; the setter replaces
/// **every** matching element. The asymmetry is deliberate: a predicate
/// identifies a logical entity, and every physical occurrence of it is
/// kept in step on write.
pub struct VecFind<T, P>
where
    P: Fn(&T) -> bool,
{
    predicate: P,
    _marker: PhantomData<T>,
}

impl<T, P> VecFind<T, P>
where
    P: Fn(&T) -> bool,
{
    /// Creates a new `VecFind` with the given predicate.
    #[must_use]
    pub const fn new(predicate: P) -> Self {
        Self {
            predicate,
            _marker: PhantomData,
        }
    }
}

impl<T, P> Lens<Vec<T>, T> for VecFind<T, P>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    /// # Panics
    ///
    /// Panics when no element satisfies the predicate. Matching is a
    /// caller-guaranteed precondition.
    fn get(&self, source: &Vec<T>) -> T {
        source
            .iter()
            .find(|element| (self.predicate)(element))
            .expect("no element satisfies the predicate")
            .clone()
    }

    fn set(&self, source: Vec<T>, value: T) -> Vec<T> {
        source
            .into_iter()
            .map(|element| {
                if (self.predicate)(&element) {
                    value.clone()
                } else {
                    element
                }
            })
            .collect()
    }
}

impl<T, P> Clone for VecFind<T, P>
where
    P: Fn(&T) -> bool + Clone,
{
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, P> std::fmt::Debug for VecFind<T, P>
where
    P: Fn(&T) -> bool,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("VecFind").finish_non_exhaustive()
    }
}

/// A lens addressing a vector element by position.
pub struct VecAt<T> {
    index: usize,
    _marker: PhantomData<T>,
}

impl<T> VecAt<T> {
    /// Creates a new `VecAt` for the given index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }
}

impl<T: Clone> Lens<Vec<T>, T> for VecAt<T> {
    /// # Panics
    ///
    /// Panics when the index is out of bounds. Bounds are a
    /// caller-guaranteed precondition; a stale image focused past the end
    /// of a shrunk vector fails here rather than corrupting anything.
    fn get(&self, source: &Vec<T>) -> T {
        source[self.index].clone()
    }

    /// # Panics
    ///
    /// Panics when the index is out of bounds.
    fn set(&self, mut source: Vec<T>, value: T) -> Vec<T> {
        source[self.index] = value;
        source
    }
}

impl<T> Clone for VecAt<T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for VecAt<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("VecAt")
            .field("index", &self.index)
            .finish()
    }
}

/// Builds a lens addressing the element(s) a predicate selects.
///
/// See [`VecFind`] for the first-match-read / all-match-write contract.
#[must_use]
pub const fn find<T, P>(predicate: P) -> VecFind<T, P>
where
    P: Fn(&T) -> bool,
{
    VecFind::new(predicate)
}

/// Builds a lens addressing the element at `index`.
///
/// See [`VecAt`] for the out-of-bounds contract.
#[must_use]
pub const fn at<T>(index: usize) -> VecAt<T> {
    VecAt::new(index)
}

/// Splits an image over a vector into one child image per element,
/// snapshotted at call time.
///
/// Each child is focused through [`at`] with the index the element held
/// when `each` ran. The children do not track structural changes: after
/// the vector grows, shrinks, or reorders, a previously produced child may
/// address a different element or panic on a now-absent index. Re-invoke
/// `each` after any structural change.
#[must_use]
pub fn each<T>(image: &Image<Vec<T>>) -> Vec<Image<T>>
where
    T: Clone + PartialEq + 'static,
{
    (0..image.get().len())
        .map(|index| image.focus(at(index)))
        .collect()
}
