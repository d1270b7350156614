//! Iso optics: total, mutually-invertible transforms between two shapes.
//!
//! An [`Iso`] converts a source into a target and back without losing
//! information. Within this crate its main job is to back
//! [`Image::morph`](crate::image::Image::morph): viewing a state slice
//! under a different shape (say, a number as its display string) while
//! edits to the transformed shape rebuild the original wholesale.
//!
//! Unlike a [`Lens`], the reverse direction re-derives a complete source
//! from the target alone; the previous source is discarded entirely.
//!
//! # Laws
//!
//! 1. **GetReverseGet**: `iso.reverse_get(iso.get(source)) == source`
//! 2. **ReverseGetGet**: `iso.get(iso.reverse_get(value)) == value`
//!
//! # Examples
//!
//! ```
//! use imago::optics::{FunctionIso, Iso};
//!
//! let meters_to_millimeters = FunctionIso::new(
//!     |meters: i64| meters * 1000,
//!     |millimeters: i64| millimeters / 1000,
//! );
//!
//! assert_eq!(meters_to_millimeters.get(3), 3000);
//! assert_eq!(meters_to_millimeters.reverse_get(3000), 3);
//! ```

use std::future::Future;
use std::marker::PhantomData;

use futures::future::LocalBoxFuture;

use super::{AsyncLens, Lens};

/// A total two-way transform between a source and a target shape.
///
/// # Laws
///
/// 1. **GetReverseGet**: `iso.reverse_get(iso.get(source)) == source`
/// 2. **ReverseGetGet**: `iso.get(iso.reverse_get(value)) == value`
pub trait Iso<S, A> {
    /// Converts the source into the target shape.
    fn get(&self, source: S) -> A;

    /// Converts a target value back into the source shape.
    fn reverse_get(&self, value: A) -> S;

    /// Swaps the two directions.
    ///
    /// # Example
    ///
    /// ```
    /// use imago::optics::{FunctionIso, Iso};
    ///
    /// let doubled = FunctionIso::new(|x: i32| x * 2, |x: i32| x / 2);
    /// let halved = doubled.reverse();
    ///
    /// assert_eq!(halved.get(10), 5);
    /// ```
    fn reverse(self) -> ReversedIso<Self>
    where
        Self: Sized,
    {
        ReversedIso::new(self)
    }

    /// Applies a function under the transform and converts back.
    ///
    /// Equivalent to `reverse_get(function(get(source)))`.
    fn modify<F>(&self, source: S, function: F) -> S
    where
        F: FnOnce(A) -> A,
    {
        self.reverse_get(function(self.get(source)))
    }

    /// Chains this iso with an iso over the target shape.
    fn compose<B, I>(self, other: I) -> ComposedIso<Self, I, A>
    where
        Self: Sized,
        I: Iso<A, B>,
    {
        ComposedIso::new(self, other)
    }

    /// Adapts this iso into a [`Lens`] whose setter ignores the previous
    /// source and reconstructs it from the new target value alone.
    fn to_lens(self) -> IsoAsLens<Self, S, A>
    where
        Self: Sized,
    {
        IsoAsLens::new(self)
    }
}

/// An iso whose reverse direction completes asynchronously.
///
/// The forward direction stays synchronous; only the reconstruction of the
/// source is deferred, mirroring [`AsyncLens`].
pub trait AsyncIso<S, A> {
    /// Converts the source into the target shape.
    fn get(&self, source: S) -> A;

    /// Converts a target value back into the source shape, asynchronously.
    fn reverse_get(&self, value: A) -> LocalBoxFuture<'static, S>;
}

/// An iso built from two conversion closures.
pub struct FunctionIso<S, A, G, Rg>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> S,
{
    get_function: G,
    reverse_get_function: Rg,
    _marker: PhantomData<(S, A)>,
}

impl<S, A, G, Rg> FunctionIso<S, A, G, Rg>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> S,
{
    /// Creates a new `FunctionIso` from the two directions.
    #[must_use]
    pub const fn new(get_function: G, reverse_get_function: Rg) -> Self {
        Self {
            get_function,
            reverse_get_function,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, Rg> Iso<S, A> for FunctionIso<S, A, G, Rg>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> S,
{
    fn get(&self, source: S) -> A {
        (self.get_function)(source)
    }

    fn reverse_get(&self, value: A) -> S {
        (self.reverse_get_function)(value)
    }
}

impl<S, A, G, Rg> Clone for FunctionIso<S, A, G, Rg>
where
    G: Fn(S) -> A + Clone,
    Rg: Fn(A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self {
            get_function: self.get_function.clone(),
            reverse_get_function: self.reverse_get_function.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, Rg> std::fmt::Debug for FunctionIso<S, A, G, Rg>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> S,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("FunctionIso").finish_non_exhaustive()
    }
}

/// An async iso built from a forward closure and an async reverse closure.
pub struct FunctionAsyncIso<S, A, G, Rg, Fut>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> Fut,
    Fut: Future<Output = S> + 'static,
{
    get_function: G,
    reverse_get_function: Rg,
    _marker: PhantomData<(S, A, Fut)>,
}

impl<S, A, G, Rg, Fut> FunctionAsyncIso<S, A, G, Rg, Fut>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> Fut,
    Fut: Future<Output = S> + 'static,
{
    /// Creates a new `FunctionAsyncIso` from the two directions.
    #[must_use]
    pub const fn new(get_function: G, reverse_get_function: Rg) -> Self {
        Self {
            get_function,
            reverse_get_function,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, Rg, Fut> AsyncIso<S, A> for FunctionAsyncIso<S, A, G, Rg, Fut>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> Fut,
    Fut: Future<Output = S> + 'static,
{
    fn get(&self, source: S) -> A {
        (self.get_function)(source)
    }

    fn reverse_get(&self, value: A) -> LocalBoxFuture<'static, S> {
        Box::pin((self.reverse_get_function)(value))
    }
}

impl<S, A, G, Rg, Fut> Clone for FunctionAsyncIso<S, A, G, Rg, Fut>
where
    G: Fn(S) -> A + Clone,
    Rg: Fn(A) -> Fut + Clone,
    Fut: Future<Output = S> + 'static,
{
    fn clone(&self) -> Self {
        Self {
            get_function: self.get_function.clone(),
            reverse_get_function: self.reverse_get_function.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, Rg, Fut> std::fmt::Debug for FunctionAsyncIso<S, A, G, Rg, Fut>
where
    G: Fn(S) -> A,
    Rg: Fn(A) -> Fut,
    Fut: Future<Output = S> + 'static,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionAsyncIso")
            .finish_non_exhaustive()
    }
}

/// An iso with its directions swapped.
#[derive(Clone, Debug)]
pub struct ReversedIso<I> {
    iso: I,
}

impl<I> ReversedIso<I> {
    /// Wraps an iso so that its directions trade places.
    #[must_use]
    pub const fn new(iso: I) -> Self {
        Self { iso }
    }
}

impl<S, A, I> Iso<A, S> for ReversedIso<I>
where
    I: Iso<S, A>,
{
    fn get(&self, source: A) -> S {
        self.iso.reverse_get(source)
    }

    fn reverse_get(&self, value: S) -> A {
        self.iso.get(value)
    }
}

/// Two isos chained into one through an intermediate shape.
pub struct ComposedIso<I1, I2, A> {
    first: I1,
    second: I2,
    _marker: PhantomData<A>,
}

impl<I1, I2, A> ComposedIso<I1, I2, A> {
    /// Creates a new composed iso from an outer and an inner iso.
    #[must_use]
    pub const fn new(first: I1, second: I2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, A, B, I1, I2> Iso<S, B> for ComposedIso<I1, I2, A>
where
    I1: Iso<S, A>,
    I2: Iso<A, B>,
{
    fn get(&self, source: S) -> B {
        self.second.get(self.first.get(source))
    }

    fn reverse_get(&self, value: B) -> S {
        self.first.reverse_get(self.second.reverse_get(value))
    }
}

impl<I1: Clone, I2: Clone, A> Clone for ComposedIso<I1, I2, A> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
            _marker: PhantomData,
        }
    }
}

impl<I1: std::fmt::Debug, I2: std::fmt::Debug, A> std::fmt::Debug for ComposedIso<I1, I2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedIso")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// An iso viewed as a [`Lens`].
///
/// The getter converts a clone of the source forward; the setter discards
/// the previous source and reconstructs a fresh one from the new target
/// value. This asymmetry is what
/// [`Image::morph`](crate::image::Image::morph) relies on.
pub struct IsoAsLens<I, S, A> {
    iso: I,
    _marker: PhantomData<(S, A)>,
}

impl<I, S, A> IsoAsLens<I, S, A> {
    /// Wraps an iso as a lens.
    #[must_use]
    pub const fn new(iso: I) -> Self {
        Self {
            iso,
            _marker: PhantomData,
        }
    }
}

impl<I, S, A> Lens<S, A> for IsoAsLens<I, S, A>
where
    I: Iso<S, A>,
    S: Clone,
{
    fn get(&self, source: &S) -> A {
        self.iso.get(source.clone())
    }

    fn set(&self, _source: S, value: A) -> S {
        self.iso.reverse_get(value)
    }
}

impl<I: Clone, S, A> Clone for IsoAsLens<I, S, A> {
    fn clone(&self) -> Self {
        Self {
            iso: self.iso.clone(),
            _marker: PhantomData,
        }
    }
}

impl<I: std::fmt::Debug, S, A> std::fmt::Debug for IsoAsLens<I, S, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("IsoAsLens")
            .field("iso", &self.iso)
            .finish()
    }
}

/// An async iso viewed as an [`AsyncLens`].
///
/// Same shape as [`IsoAsLens`] with the reconstruction deferred.
pub struct AsyncIsoAsLens<I, S, A> {
    iso: I,
    _marker: PhantomData<(S, A)>,
}

impl<I, S, A> AsyncIsoAsLens<I, S, A> {
    /// Wraps an async iso as an async lens.
    #[must_use]
    pub const fn new(iso: I) -> Self {
        Self {
            iso,
            _marker: PhantomData,
        }
    }
}

impl<I, S, A> AsyncLens<S, A> for AsyncIsoAsLens<I, S, A>
where
    I: AsyncIso<S, A>,
    S: Clone,
{
    fn get(&self, source: &S) -> A {
        self.iso.get(source.clone())
    }

    fn set(&self, _source: S, value: A) -> LocalBoxFuture<'static, S> {
        self.iso.reverse_get(value)
    }
}

impl<I: Clone, S, A> Clone for AsyncIsoAsLens<I, S, A> {
    fn clone(&self) -> Self {
        Self {
            iso: self.iso.clone(),
            _marker: PhantomData,
        }
    }
}

impl<I: std::fmt::Debug, S, A> std::fmt::Debug for AsyncIsoAsLens<I, S, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AsyncIsoAsLens")
            .field("iso", &self.iso)
            .finish()
    }
}

/// Creates an iso from two conversion closures.
///
/// # Example
///
/// ```
/// use imago::iso;
/// use imago::optics::Iso;
///
/// let negated = iso!(|x: i32| -x, |x: i32| -x);
/// assert_eq!(negated.get(5), -5);
/// assert_eq!(negated.reverse_get(-5), 5);
/// ```
#[macro_export]
macro_rules! iso {
    ($get:expr, $reverse_get:expr) => {
        $crate::optics::FunctionIso::new($get, $reverse_get)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display_iso() -> impl Iso<i64, String> + Clone {
        FunctionIso::new(
            |number: i64| number.to_string(),
            |text: String| text.parse().unwrap_or_default(),
        )
    }

    #[test]
    fn iso_roundtrips_both_directions() {
        let iso = display_iso();
        assert_eq!(iso.get(42), "42");
        assert_eq!(iso.reverse_get("42".to_string()), 42);
        assert_eq!(iso.reverse_get(iso.get(-7)), -7);
    }

    #[test]
    fn modify_applies_under_the_transform() {
        let iso = display_iso();
        let padded = iso.modify(7, |text| format!("{text}0"));
        assert_eq!(padded, 70);
    }

    #[test]
    fn reversed_iso_swaps_directions() {
        let iso = display_iso().reverse();
        assert_eq!(iso.get("12".to_string()), 12);
        assert_eq!(iso.reverse_get(12), "12");
    }

    #[test]
    fn composed_iso_chains_through_the_middle_shape() {
        let widen = FunctionIso::new(|x: i32| i64::from(x), |x: i64| x as i32);
        let composed = widen.compose(display_iso());
        assert_eq!(composed.get(9), "9");
        assert_eq!(composed.reverse_get("9".to_string()), 9);
    }

    #[test]
    fn iso_as_lens_setter_ignores_the_previous_source() {
        let lens = display_iso().to_lens();
        assert_eq!(lens.get(&11), "11");
        assert_eq!(lens.set(11, "230".to_string()), 230);
    }

    #[tokio::test]
    async fn async_iso_reverse_direction_resolves() {
        let iso = FunctionAsyncIso::new(
            |number: i64| number.to_string(),
            |text: String| async move { text.parse().unwrap_or_default() },
        );

        assert_eq!(iso.get(5), "5");
        assert_eq!(iso.reverse_get("5".to_string()).await, 5);
    }
}
