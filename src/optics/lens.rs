//! Lens optics: get/set access to a sub-part of a larger value.
//!
//! A [`Lens`] pairs a getter with a setter over an immutable source: the
//! getter produces the focused part, the setter rebuilds the whole source
//! with that part replaced. Lenses compose, which lets an [`Image`]
//! (see [`crate::image`]) be narrowed onto arbitrarily nested state.
//!
//! The getter returns the focused value by value rather than by reference:
//! lenses in this crate are routinely derived from transforms (see
//! [`IsoAsLens`](crate::optics::IsoAsLens) and
//! [`Image::parse`](crate::image::Image::parse)) whose results are computed
//! rather than stored, and every read flows through an [`Image`] that
//! materializes the current state anyway.
//!
//! # Laws
//!
//! A well-behaved lens satisfies three laws. The library documents them but
//! does not enforce them:
//!
//! 1. **GetPut**: setting back what was read is a no-op.
//!    ```text
//!    lens.set(source.clone(), lens.get(&source)) == source
//!    ```
//! 2. **PutGet**: reading after a set yields the set value.
//!    ```text
//!    lens.get(&lens.set(source, value)) == value
//!    ```
//! 3. **PutPut**: of two consecutive sets, the last wins.
//!    ```text
//!    lens.set(lens.set(source, v1), v2) == lens.set(source, v2)
//!    ```
//!
//! # Examples
//!
//! ```
//! use imago::lens;
//! use imago::optics::Lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let x_lens = lens!(Point, x);
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(x_lens.get(&point), 10);
//!
//! let moved = x_lens.set(point, 100);
//! assert_eq!(moved, Point { x: 100, y: 20 });
//! ```
//!
//! [`Image`]: crate::image::Image

use std::future::Future;
use std::marker::PhantomData;

use futures::future::LocalBoxFuture;

/// A two-way accessor focused on one part of a larger value.
///
/// # Type Parameters
///
/// - `S`: the source (whole) type
/// - `A`: the focused (part) type
///
/// # Laws
///
/// 1. **GetPut**: `lens.set(source.clone(), lens.get(&source)) == source`
/// 2. **PutGet**: `lens.get(&lens.set(source, value)) == value`
/// 3. **PutPut**: `lens.set(lens.set(source, v1), v2) == lens.set(source, v2)`
pub trait Lens<S, A> {
    /// Reads the focused part out of the source.
    fn get(&self, source: &S) -> A;

    /// Rebuilds the source with the focused part replaced.
    ///
    /// # Arguments
    ///
    /// * `source` - the source value (consumed)
    /// * `value` - the new value for the focused part
    fn set(&self, source: S, value: A) -> S;

    /// Applies a function to the focused part.
    ///
    /// Equivalent to reading the current part, transforming it, and setting
    /// the result back.
    ///
    /// # Example
    ///
    /// ```
    /// use imago::lens;
    /// use imago::optics::Lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let x_lens = lens!(Point, x);
    /// let doubled = x_lens.modify(Point { x: 10, y: 20 }, |x| x * 2);
    /// assert_eq!(doubled.x, 20);
    /// ```
    fn modify<F>(&self, source: S, function: F) -> S
    where
        F: FnOnce(A) -> A,
    {
        let current = self.get(&source);
        self.set(source, function(current))
    }

    /// Composes this lens with a lens over the focused part, yielding a
    /// lens from the source to the nested part.
    ///
    /// # Example
    ///
    /// ```
    /// use imago::lens;
    /// use imago::optics::Lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Engine { rpm: u32 }
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Car { engine: Engine }
    ///
    /// let rpm = lens!(Car, engine).compose(lens!(Engine, rpm));
    ///
    /// let car = Car { engine: Engine { rpm: 800 } };
    /// assert_eq!(rpm.get(&car), 800);
    /// assert_eq!(rpm.set(car, 2400).engine.rpm, 2400);
    /// ```
    fn compose<B, L>(self, other: L) -> ComposedLens<Self, L, A>
    where
        Self: Sized,
        L: Lens<A, B>,
    {
        ComposedLens::new(self, other)
    }
}

/// A lens whose setter completes asynchronously.
///
/// The getter stays synchronous: candidate values are always computed on
/// the spot. Only the reconstruction of the source is deferred, which is
/// what [`Image::focus_async`](crate::image::Image::focus_async) needs to
/// hand the write to the owning loop without blocking the caller.
pub trait AsyncLens<S, A> {
    /// Reads the focused part out of the source.
    fn get(&self, source: &S) -> A;

    /// Rebuilds the source with the focused part replaced, asynchronously.
    fn set(&self, source: S, value: A) -> LocalBoxFuture<'static, S>;
}

/// A lens built from a getter and a setter closure.
///
/// This is the ordinary way to create a lens; the [`lens!`](crate::lens)
/// macro expands to one of these.
///
/// # Example
///
/// ```
/// use imago::optics::{FunctionLens, Lens};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = FunctionLens::new(
///     |point: &Point| point.x,
///     |point: Point, x: i32| Point { x, ..point },
/// );
///
/// assert_eq!(x_lens.get(&Point { x: 10, y: 20 }), 10);
/// ```
pub struct FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    getter: G,
    setter: St,
    _marker: PhantomData<(S, A)>,
}

impl<S, A, G, St> FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    /// Creates a new `FunctionLens` from a getter and a setter.
    #[must_use]
    pub const fn new(getter: G, setter: St) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St> Lens<S, A> for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    fn get(&self, source: &S) -> A {
        (self.getter)(source)
    }

    fn set(&self, source: S, value: A) -> S {
        (self.setter)(source, value)
    }
}

impl<S, A, G, St> Clone for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A + Clone,
    St: Fn(S, A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St> std::fmt::Debug for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionLens")
            .finish_non_exhaustive()
    }
}

/// An asynchronous lens built from a getter and an async setter closure.
///
/// The setter returns a future that resolves to the rebuilt source; it is
/// boxed when [`AsyncLens::set`] is called.
pub struct FunctionAsyncLens<S, A, G, St, Fut>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> Fut,
    Fut: Future<Output = S> + 'static,
{
    getter: G,
    setter: St,
    _marker: PhantomData<(S, A, Fut)>,
}

impl<S, A, G, St, Fut> FunctionAsyncLens<S, A, G, St, Fut>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> Fut,
    Fut: Future<Output = S> + 'static,
{
    /// Creates a new `FunctionAsyncLens` from a getter and an async setter.
    #[must_use]
    pub const fn new(getter: G, setter: St) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St, Fut> AsyncLens<S, A> for FunctionAsyncLens<S, A, G, St, Fut>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> Fut,
    Fut: Future<Output = S> + 'static,
{
    fn get(&self, source: &S) -> A {
        (self.getter)(source)
    }

    fn set(&self, source: S, value: A) -> LocalBoxFuture<'static, S> {
        Box::pin((self.setter)(source, value))
    }
}

impl<S, A, G, St, Fut> Clone for FunctionAsyncLens<S, A, G, St, Fut>
where
    G: Fn(&S) -> A + Clone,
    St: Fn(S, A) -> Fut + Clone,
    Fut: Future<Output = S> + 'static,
{
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St, Fut> std::fmt::Debug for FunctionAsyncLens<S, A, G, St, Fut>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> Fut,
    Fut: Future<Output = S> + 'static,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionAsyncLens")
            .finish_non_exhaustive()
    }
}

/// Two lenses chained into one, focusing through an intermediate type.
///
/// # Type Parameters
///
/// - `L1`: the outer lens
/// - `L2`: the inner lens
/// - `A`: the intermediate type (target of `L1`, source of `L2`)
pub struct ComposedLens<L1, L2, A> {
    first: L1,
    second: L2,
    _marker: PhantomData<A>,
}

impl<L1, L2, A> ComposedLens<L1, L2, A> {
    /// Creates a new composed lens from an outer and an inner lens.
    #[must_use]
    pub const fn new(first: L1, second: L2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, A, B, L1, L2> Lens<S, B> for ComposedLens<L1, L2, A>
where
    L1: Lens<S, A>,
    L2: Lens<A, B>,
{
    fn get(&self, source: &S) -> B {
        let intermediate = self.first.get(source);
        self.second.get(&intermediate)
    }

    fn set(&self, source: S, value: B) -> S {
        let intermediate = self.first.get(&source);
        let updated = self.second.set(intermediate, value);
        self.first.set(source, updated)
    }
}

impl<L1: Clone, L2: Clone, A> Clone for ComposedLens<L1, L2, A> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
            _marker: PhantomData,
        }
    }
}

impl<L1: std::fmt::Debug, L2: std::fmt::Debug, A> std::fmt::Debug for ComposedLens<L1, L2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedLens")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// Creates a lens for a struct field.
///
/// # Syntax
///
/// ```text
/// lens!(StructType, field_name)
/// ```
///
/// The field type must implement `Clone`; the getter clones the field out
/// of the source.
///
/// # Example
///
/// ```
/// use imago::lens;
/// use imago::optics::Lens;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let y_lens = lens!(Point, y);
///
/// let point = Point { x: 10, y: 20 };
/// assert_eq!(y_lens.get(&point), 20);
/// assert_eq!(y_lens.set(point, 5), Point { x: 10, y: 5 });
/// ```
#[macro_export]
macro_rules! lens {
    ($struct_type:ty, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type| source.$field.clone(),
            |mut source: $struct_type, value| {
                source.$field = value;
                source
            },
        )
    };
}
