// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host collaborators: deferred callbacks and haptic output.
//!
//! The controller never touches a platform timer or haptic engine. Instead the
//! host injects a [`Scheduler`] and a [`HapticSink`]. [`ManualScheduler`] is a
//! fake-clock queue suitable for tests and for hosts that already tick a frame
//! clock.
//!
//! ## Minimal example
//!
//! ```
//! use core::cell::Cell;
//! use core::time::Duration;
//! use std::rc::Rc;
//! use understory_swipe::{ManualScheduler, Scheduler};
//!
//! let scheduler = ManualScheduler::new();
//! let fired = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&fired);
//! scheduler.schedule(Duration::from_millis(300), Box::new(move || flag.set(true)));
//!
//! assert_eq!(scheduler.advance(Duration::from_millis(299)), 0);
//! assert!(!fired.get());
//! assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
//! assert!(fired.get());
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;

use crate::HapticFeedback;

/// A fire-once task handed to a [`Scheduler`].
pub type Task = Box<dyn FnOnce()>;

/// Runs a task once after a delay.
///
/// Tasks are not cancellable. Implementations must not run the task
/// synchronously from inside `schedule`.
pub trait Scheduler {
    /// Queues `task` to run once, `delay` from now.
    fn schedule(&self, delay: Duration, task: Task);
}

/// Receives haptic feedback requests.
pub trait HapticSink {
    /// Plays `kind`.
    fn fire(&self, kind: HapticFeedback);
}

/// Discards all feedback.
impl HapticSink for () {
    fn fire(&self, _kind: HapticFeedback) {}
}

struct Pending {
    deadline: Duration,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct Queue {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending>,
}

/// A scheduler driven by an explicit clock.
///
/// Time only moves when [`ManualScheduler::advance`] is called. Due tasks run
/// in deadline order, ties broken by scheduling order.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<Queue>,
}

impl ManualScheduler {
    /// Creates an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current clock value.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Returns the number of tasks that have not run yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Returns the deadline of the earliest pending task.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.borrow().pending.iter().map(|p| p.deadline).min()
    }

    /// Moves the clock forward by `by` and runs every task that became due.
    ///
    /// Tasks run without the queue borrowed, so they may schedule further
    /// tasks; those run in the same call if they are already due.
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = {
            let mut queue = self.queue.borrow_mut();
            queue.now += by;
            queue.now
        };
        let mut ran = 0;
        while let Some(task) = self.pop_due(target) {
            task();
            ran += 1;
        }
        if ran > 0 {
            tracing::trace!(target: "understory_swipe", ran, "scheduled tasks ran");
        }
        ran
    }

    /// Runs every pending task regardless of deadline, advancing the clock to the last one.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        while let Some(deadline) = self.next_deadline() {
            let now = self.now();
            ran += self.advance(deadline.saturating_sub(now));
        }
        ran
    }

    fn pop_due(&self, target: Duration) -> Option<Task> {
        let mut queue = self.queue.borrow_mut();
        let idx = queue
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= target)
            .min_by_key(|(_, p)| (p.deadline, p.seq))
            .map(|(idx, _)| idx)?;
        Some(queue.pending.swap_remove(idx).task)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let mut queue = self.queue.borrow_mut();
        let deadline = queue.now + delay;
        let seq = queue.next_seq;
        queue.next_seq = queue.next_seq.wrapping_add(1);
        queue.pending.push(Pending {
            deadline,
            seq,
            task,
        });
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &queue.now)
            .field("pending", &queue.pending.len())
            .finish()
    }
}
