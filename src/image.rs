//! The reactive two-way accessor at the heart of the crate.
//!
//! An [`Image`] bundles exactly two capabilities over one value of
//! application state: a reader that lazily produces the current value, and
//! a dispatcher that submits a whole-state update function to whoever owns
//! the state. It owns no state itself and caches nothing; every [`get`]
//! reads through to the root store, and every edit — however deeply the
//! image has been derived — funnels into a single root dispatch.
//!
//! Derivation is the point: [`focus`] narrows an image through a
//! [`Lens`], [`morph`] re-shapes it through an [`Iso`], and [`parse`]
//! views it through a fallible [`Epimorphism`] with rejected edits
//! reported on an error side-channel image instead of faulting. Each
//! combinator returns a fresh `Image` whose dispatcher lifts child updates
//! into parent updates, so nesting composes without any coordination
//! beyond the root update queue.
//!
//! Asynchronous variants ([`update_async`], [`focus_async`],
//! [`morph_async`], [`parse_async`]) never block the caller: the dispatched
//! wrapper starts the work on the owning loop's [`Context`] and returns the
//! current state unchanged; the real update arrives later as a separate
//! dispatch, applied on the owner's thread.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use imago::context::Context;
//! use imago::image::Image;
//! use imago::lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct AppState { count: i32, label: String }
//!
//! let state = Rc::new(RefCell::new(AppState { count: 0, label: "ready".into() }));
//! let (context, _tasks) = Context::channel();
//!
//! let root = {
//!     let reader = Rc::clone(&state);
//!     let writer = Rc::clone(&state);
//!     Image::new(
//!         move || reader.borrow().clone(),
//!         move |update| {
//!             let next = update(writer.borrow().clone());
//!             *writer.borrow_mut() = next;
//!         },
//!         context,
//!     )
//! };
//!
//! let count = root.focus(lens!(AppState, count));
//! count.set(5);
//!
//! assert_eq!(count.get(), 5);
//! assert_eq!(state.borrow().label, "ready");
//! ```
//!
//! [`get`]: Image::get
//! [`focus`]: Image::focus
//! [`morph`]: Image::morph
//! [`parse`]: Image::parse
//! [`update_async`]: Image::update_async
//! [`Lens`]: crate::optics::Lens
//! [`Iso`]: crate::optics::Iso
//! [`Epimorphism`]: crate::optics::Epimorphism

use std::future::Future;
use std::rc::Rc;

use crate::context::Context;
use crate::optics::{
    AsyncEpimorphism, AsyncIso, AsyncIsoAsLens, AsyncLens, Epimorphism, FunctionAsyncLens,
    FunctionLens, Iso, IsoAsLens, Lens,
};

/// A whole-state update function, as submitted to the state owner.
pub type Update<S> = Box<dyn FnOnce(S) -> S>;

/// The dispatching half of an [`Image`]: applies an [`Update`] at the
/// state owner.
pub type Dispatch<S> = Rc<dyn Fn(Update<S>)>;

/// A two-way bound view over one value of application state.
///
/// Holds a value reader, an update dispatcher, and the [`Context`] handle
/// of the owning loop. Cloning an `Image` clones the two `Rc` closures and
/// the handle; clones address the same underlying state.
pub struct Image<S> {
    value: Rc<dyn Fn() -> S>,
    dispatch: Dispatch<S>,
    context: Context,
}

impl<S> Clone for Image<S> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            dispatch: Rc::clone(&self.dispatch),
            context: self.context.clone(),
        }
    }
}

impl<S> std::fmt::Debug for Image<S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("Image").finish_non_exhaustive()
    }
}

impl<S> Image<S>
where
    S: Clone + PartialEq + 'static,
{
    /// Creates a root image from a value reader, a dispatcher, and the
    /// owning loop's context handle.
    ///
    /// The reader must produce the *current* value on every call; the
    /// image never caches. Derived images inherit the context handle.
    #[must_use]
    pub fn new(
        value: impl Fn() -> S + 'static,
        dispatch: impl Fn(Update<S>) + 'static,
        context: Context,
    ) -> Self {
        Self {
            value: Rc::new(value),
            dispatch: Rc::new(dispatch),
            context,
        }
    }

    /// Reads the current value. No side effects.
    #[must_use]
    pub fn get(&self) -> S {
        (*self.value)()
    }

    /// Replaces the value, skipping the dispatch entirely when the new
    /// value equals the current one.
    ///
    /// The short-circuit is the designed guard against redundant
    /// update/render cycles; use [`update`](Image::update) to force a
    /// dispatch.
    pub fn set(&self, value: S) {
        if value != self.get() {
            self.dispatch(Box::new(move |_| value));
        }
    }

    /// Dispatches an update function directly, unconditionally.
    ///
    /// The function is applied by the state owner to the state current at
    /// application time, which may differ from the value visible now.
    pub fn update(&self, function: impl FnOnce(S) -> S + 'static) {
        self.dispatch(Box::new(function));
    }

    /// Dispatches an asynchronous update without blocking the caller.
    ///
    /// The dispatched wrapper clones the state current at application
    /// time into `function`, hands the resulting future to the owning
    /// loop's [`Context`], and immediately returns that state unchanged.
    /// When the future completes — on the owner's thread — its result is
    /// delivered through [`set`](Image::set) as a fresh dispatch.
    ///
    /// Two overlapping asynchronous updates resolve last-dispatch-wins;
    /// nothing reconciles them.
    pub fn update_async<F, Fut>(&self, function: F)
    where
        F: FnOnce(S) -> Fut + 'static,
        Fut: Future<Output = S> + 'static,
    {
        let this = self.clone();
        self.dispatch(Box::new(move |current: S| {
            let future = function(current.clone());
            let target = this.clone();
            this.context.spawn(async move {
                let updated = future.await;
                target.set(updated);
            });
            current
        }));
    }

    /// Derives an image over the part of the state a lens focuses on.
    ///
    /// The child's reader applies the lens getter to the parent's current
    /// value. The child's dispatcher lifts a child update into a parent
    /// update: read the child out of the incoming parent state, apply the
    /// child update, set the result back, and forward through the parent's
    /// own dispatcher. Every derived image, however deep, reaches the root
    /// as exactly one dispatch per edit.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::cell::RefCell;
    /// # use std::rc::Rc;
    /// # use imago::context::Context;
    /// # use imago::image::Image;
    /// # use imago::lens;
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Form { name: String, age: u32 }
    ///
    /// # let state = Rc::new(RefCell::new(Form { name: "b".into(), age: 1 }));
    /// # let (context, _tasks) = Context::channel();
    /// # let root = {
    /// #     let reader = Rc::clone(&state);
    /// #     let writer = Rc::clone(&state);
    /// #     Image::new(
    /// #         move || reader.borrow().clone(),
    /// #         move |update| {
    /// #             let next = update(writer.borrow().clone());
    /// #             *writer.borrow_mut() = next;
    /// #         },
    /// #         context,
    /// #     )
    /// # };
    /// let age = root.focus(lens!(Form, age));
    /// age.update(|age| age + 1);
    /// assert_eq!(age.get(), 2);
    /// ```
    #[must_use]
    pub fn focus<A, L>(&self, lens: L) -> Image<A>
    where
        A: 'static,
        L: Lens<S, A> + Clone + 'static,
    {
        let reader = self.clone();
        let writer = self.clone();
        let read_lens = lens.clone();
        Image {
            value: Rc::new(move || read_lens.get(&reader.get())),
            dispatch: Rc::new(move |update: Update<A>| {
                let lens = lens.clone();
                writer.dispatch(Box::new(move |state: S| {
                    let child = lens.get(&state);
                    let updated = update(child);
                    lens.set(state, updated)
                }));
            }),
            context: self.context.clone(),
        }
    }

    /// Derives an image through a lens whose setter is asynchronous.
    ///
    /// The child update still runs synchronously to produce the candidate
    /// child value; rebuilding the parent state is handed to the owning
    /// loop. The dispatched wrapper returns the original parent state
    /// untouched, and the rebuilt state arrives later through the parent
    /// image's [`set`](Image::set).
    #[must_use]
    pub fn focus_async<A, L>(&self, lens: L) -> Image<A>
    where
        A: 'static,
        L: AsyncLens<S, A> + Clone + 'static,
    {
        let reader = self.clone();
        let parent = self.clone();
        let read_lens = lens.clone();
        Image {
            value: Rc::new(move || read_lens.get(&reader.get())),
            dispatch: Rc::new(move |update: Update<A>| {
                let lens = lens.clone();
                let target = parent.clone();
                parent.dispatch(Box::new(move |state: S| {
                    let child = lens.get(&state);
                    let updated = update(child);
                    let future = lens.set(state.clone(), updated);
                    let context = target.context.clone();
                    context.spawn(async move {
                        let rebuilt = future.await;
                        target.set(rebuilt);
                    });
                    state
                }));
            }),
            context: self.context.clone(),
        }
    }

    /// Derives an image viewing the state under a total two-way
    /// transform.
    ///
    /// The iso is adapted into a lens whose setter discards the previous
    /// state and reconstructs it from the transformed value alone, then
    /// handed to [`focus`](Image::focus).
    #[must_use]
    pub fn morph<A, I>(&self, iso: I) -> Image<A>
    where
        A: 'static,
        I: Iso<S, A> + Clone + 'static,
    {
        self.focus(IsoAsLens::new(iso))
    }

    /// Asynchronous counterpart of [`morph`](Image::morph): the reverse
    /// direction of the transform runs on the owning loop.
    #[must_use]
    pub fn morph_async<A, I>(&self, iso: I) -> Image<A>
    where
        A: 'static,
        I: AsyncIso<S, A> + Clone + 'static,
    {
        self.focus_async(AsyncIsoAsLens::new(iso))
    }

    /// Derives an image through a fallible conversion, reporting rejected
    /// edits on `errors` instead of faulting.
    ///
    /// Edits to the child run the epimorphism's reverse direction. On
    /// success the error image is cleared to `None` and the reconstructed
    /// state is adopted; on failure the error value is written to the
    /// error image and the state stays exactly as it was. The failure is
    /// data on the side-channel — nothing escapes the image boundary.
    ///
    /// The error image is an independently-addressable slice (typically a
    /// sibling field of the same root state); clearing and setting it are
    /// ordinary dispatches in their own right.
    #[must_use]
    pub fn parse<A, E, P>(&self, errors: &Image<Option<E>>, epimorphism: P) -> Image<A>
    where
        A: 'static,
        E: Clone + PartialEq + 'static,
        P: Epimorphism<S, A, Error = E> + Clone + 'static,
    {
        let errors = errors.clone();
        let forward = epimorphism.clone();
        self.focus(FunctionLens::new(
            move |source: &S| forward.get(source.clone()),
            move |source: S, value: A| match epimorphism.reverse_get(value) {
                Ok(rebuilt) => {
                    errors.set(None);
                    rebuilt
                }
                Err(error) => {
                    tracing::debug!("conversion rejected; state left unchanged");
                    errors.set(Some(error));
                    source
                }
            },
        ))
    }

    /// Asynchronous counterpart of [`parse`](Image::parse): the
    /// conversion is awaited on the owning loop, then the same
    /// success/failure branch applies before the result is dispatched.
    #[must_use]
    pub fn parse_async<A, E, P>(&self, errors: &Image<Option<E>>, epimorphism: P) -> Image<A>
    where
        A: 'static,
        E: Clone + PartialEq + 'static,
        P: AsyncEpimorphism<S, A, Error = E> + Clone + 'static,
    {
        let errors = errors.clone();
        let forward = epimorphism.clone();
        self.focus_async(FunctionAsyncLens::new(
            move |source: &S| forward.get(source.clone()),
            move |source: S, value: A| {
                let errors = errors.clone();
                let conversion = epimorphism.reverse_get(value);
                async move {
                    match conversion.await {
                        Ok(rebuilt) => {
                            errors.set(None);
                            rebuilt
                        }
                        Err(error) => {
                            tracing::debug!("conversion rejected; state left unchanged");
                            errors.set(Some(error));
                            source
                        }
                    }
                }
            },
        ))
    }

    fn dispatch(&self, update: Update<S>) {
        (*self.dispatch)(update);
    }
}
