//! Tests for the asynchronous image paths: deferred updates, async
//! lenses/isos/epimorphisms, and completion-order semantics.
//!
//! The harness mirrors a driver loop: dispatched updates queue until
//! applied, and context tasks are polled explicitly. Timer-based tests run
//! under a paused clock, so completion order is deterministic.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use imago::context::{Context, TaskReceiver};
use imago::image::{Image, Update};
use imago::lens;
use imago::optics::{
    AsyncEpimorphism, FunctionAsyncEpimorphism, FunctionAsyncIso, FunctionAsyncLens,
};

// =============================================================================
// Test harness
// =============================================================================

struct Harness<S> {
    state: Rc<RefCell<S>>,
    queue: Rc<RefCell<VecDeque<Update<S>>>>,
    dispatches: Rc<Cell<usize>>,
    tasks: TaskReceiver,
}

impl<S: Clone + PartialEq + 'static> Harness<S> {
    fn root(initial: S) -> (Image<S>, Self) {
        let state = Rc::new(RefCell::new(initial));
        let queue: Rc<RefCell<VecDeque<Update<S>>>> = Rc::new(RefCell::new(VecDeque::new()));
        let dispatches = Rc::new(Cell::new(0));
        let (context, tasks) = Context::channel();
        let image = {
            let reader = Rc::clone(&state);
            let queue = Rc::clone(&queue);
            let counter = Rc::clone(&dispatches);
            Image::new(
                move || reader.borrow().clone(),
                move |update| {
                    counter.set(counter.get() + 1);
                    queue.borrow_mut().push_back(update);
                },
                context,
            )
        };
        (
            image,
            Self {
                state,
                queue,
                dispatches,
                tasks,
            },
        )
    }

    fn apply_pending(&self) {
        loop {
            let update = self.queue.borrow_mut().pop_front();
            let Some(update) = update else { break };
            let current = self.state.borrow().clone();
            let next = update(current);
            *self.state.borrow_mut() = next;
        }
    }

    /// Awaits every queued context task to completion, one after another.
    async fn run_tasks(&mut self) {
        while let Some(task) = self.tasks.try_recv() {
            task.await;
        }
    }

    fn current(&self) -> S {
        self.state.borrow().clone()
    }
}

fn sleep(milliseconds: u64) -> tokio::time::Sleep {
    tokio::time::sleep(Duration::from_millis(milliseconds))
}

// =============================================================================
// update_async
// =============================================================================

#[tokio::test(start_paused = true)]
async fn update_async_returns_the_prior_state_synchronously() {
    let (image, mut harness) = Harness::root(1_i32);

    image.update_async(|count| async move {
        sleep(10).await;
        count + 100
    });

    // The wrapper dispatch applies immediately; the state does not move.
    harness.apply_pending();
    assert_eq!(harness.current(), 1);

    harness.run_tasks().await;
    harness.apply_pending();
    assert_eq!(harness.current(), 101);
}

#[tokio::test(start_paused = true)]
async fn update_async_delivers_its_result_through_set() {
    let (image, mut harness) = Harness::root(5_i32);

    // The async body resolves to the value already in place; the
    // completion-side set short-circuits and no second dispatch happens.
    image.update_async(|count| async move {
        sleep(1).await;
        count
    });
    harness.apply_pending();
    harness.run_tasks().await;
    harness.apply_pending();

    assert_eq!(harness.current(), 5);
    assert_eq!(harness.dispatches.get(), 1);
}

#[tokio::test(start_paused = true)]
async fn overlapping_async_updates_resolve_last_completion_wins() {
    let (image, mut harness) = Harness::root(0_i32);

    // Started first, completes last.
    image.update_async(|count| async move {
        sleep(50).await;
        count + 40
    });
    // Started second, completes first.
    image.update_async(|count| async move {
        sleep(10).await;
        count + 2
    });
    harness.apply_pending();
    assert_eq!(harness.current(), 0);

    let slow = harness.tasks.try_recv().expect("first task queued");
    let fast = harness.tasks.try_recv().expect("second task queued");
    futures::future::join(slow, fast).await;
    harness.apply_pending();

    // Both bodies saw state 0; the slower completion dispatched last.
    assert_eq!(harness.current(), 40);
}

// =============================================================================
// focus_async / morph_async
// =============================================================================

#[derive(Clone, PartialEq, Debug)]
struct Pair {
    a: i32,
    b: i32,
}

#[tokio::test(start_paused = true)]
async fn focus_async_defers_the_parent_rebuild() {
    let (root, mut harness) = Harness::root(Pair { a: 1, b: 2 });
    let a = root.focus_async(FunctionAsyncLens::new(
        |pair: &Pair| pair.a,
        |pair: Pair, a: i32| async move {
            sleep(5).await;
            Pair { a, ..pair }
        },
    ));

    assert_eq!(a.get(), 1);
    a.set(10);
    harness.apply_pending();
    assert_eq!(harness.current(), Pair { a: 1, b: 2 });

    harness.run_tasks().await;
    harness.apply_pending();
    assert_eq!(harness.current(), Pair { a: 10, b: 2 });
}

#[tokio::test(start_paused = true)]
async fn morph_async_rebuilds_the_source_from_the_transformed_value() {
    let (root, mut harness) = Harness::root(7_i64);
    let text = root.morph_async(FunctionAsyncIso::new(
        |number: i64| number.to_string(),
        |text: String| async move {
            sleep(5).await;
            text.parse().unwrap_or_default()
        },
    ));

    assert_eq!(text.get(), "7");
    text.set("19".to_string());
    harness.apply_pending();
    assert_eq!(harness.current(), 7);

    harness.run_tasks().await;
    harness.apply_pending();
    assert_eq!(harness.current(), 19);
}

// =============================================================================
// parse_async
// =============================================================================

#[derive(Clone, PartialEq, Debug)]
struct Form {
    quantity: i64,
    error: Option<String>,
}

fn async_quantity_text() -> impl AsyncEpimorphism<i64, String, Error = String> + Clone {
    FunctionAsyncEpimorphism::new(
        |quantity: i64| quantity.to_string(),
        |text: String| async move {
            sleep(3).await;
            text.parse::<i64>().map_err(|error| error.to_string())
        },
    )
}

#[tokio::test(start_paused = true)]
async fn parse_async_adopts_a_valid_conversion() {
    let (root, mut harness) = Harness::root(Form {
        quantity: 1,
        error: None,
    });
    let errors = root.focus(lens!(Form, error));
    let text = root
        .focus(lens!(Form, quantity))
        .parse_async(&errors, async_quantity_text());

    text.set("23".to_string());
    harness.apply_pending();
    assert_eq!(harness.current().quantity, 1);

    harness.run_tasks().await;
    harness.apply_pending();
    assert_eq!(
        harness.current(),
        Form {
            quantity: 23,
            error: None,
        }
    );
}

#[tokio::test(start_paused = true)]
async fn parse_async_rejection_surfaces_on_the_error_image() {
    let (root, mut harness) = Harness::root(Form {
        quantity: 1,
        error: None,
    });
    let errors = root.focus(lens!(Form, error));
    let text = root
        .focus(lens!(Form, quantity))
        .parse_async(&errors, async_quantity_text());

    text.set("abc".to_string());
    harness.apply_pending();
    harness.run_tasks().await;
    harness.apply_pending();

    let form = harness.current();
    assert_eq!(form.quantity, 1);
    assert!(form.error.is_some());
}
