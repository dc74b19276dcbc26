// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_swipe --heading-base-level=0

//! Understory Swipe: swipe-to-reveal state for list rows.
//!
//! This crate holds the decisions behind a swipeable row: how a horizontal
//! drag moves the row, when a release snaps it closed, locks it open on one
//! side, or swipes it away, when to play haptic feedback, and how sibling rows
//! keep only one row open at a time.
//!
//! It does **not** render anything, recognize gestures, run animations, or talk
//! to a haptic engine. Host frameworks are responsible for:
//!
//! - Delivering the total horizontal drag translation to
//!   [`SwipeController::on_drag_change`] and calling
//!   [`SwipeController::on_drag_end`] on release.
//! - Drawing the row at [`SwipeController::offset`] and sizing buttons with
//!   [`SwipeController::item_display_width`].
//! - Animating snaps described by the [`Transition`] carried in
//!   [`SwipeEvent::OffsetChanged`].
//! - Supplying a [`Scheduler`] for the delayed action callbacks and a
//!   [`HapticSink`] for feedback.
//!
//! The core types are:
//!
//! - [`ActionItem`] and [`ActionGroup`]: the buttons revealed on each [`Side`].
//! - [`SwipeSettings`]: open/swipe-out thresholds, dead zone, and timings.
//! - [`SwipeController`]: the per-row state machine.
//! - [`ActiveRow`] / [`SharedActiveRow`]: the shared "which row is active" cell,
//!   plus [`RowCoordinator`] to forward changes to sibling rows.
//! - [`ManualScheduler`]: a fake-clock [`Scheduler`] for tests and frame-driven hosts.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::rc::Rc;
//! use core::time::Duration;
//! use understory_swipe::{
//!     ActionGroup, ActionItem, ManualScheduler, RowConfig, SharedActiveRow, Side,
//!     SwipeContext, SwipeController, SwipePhase, SwipeSettings,
//! };
//!
//! let active = Rc::new(SharedActiveRow::<u32>::new());
//! let scheduler = Rc::new(ManualScheduler::new());
//! let ctx = SwipeContext::new(active.clone(), scheduler.clone(), Rc::new(()));
//!
//! let config = RowConfig::new(1_u32, 375.0)
//!     .with_leading(ActionGroup::new([ActionItem::new("pin", (), 75.0, || {})]))
//!     .with_settings(SwipeSettings::new(80.0));
//! let mut row = SwipeController::new(config, ctx).unwrap();
//!
//! // A short drag springs back.
//! row.on_drag_change(40.0);
//! row.on_drag_end();
//! assert_eq!(row.offset(), 0.0);
//!
//! // A longer one locks the leading buttons open.
//! row.on_drag_change(90.0);
//! row.on_drag_end();
//! assert_eq!(row.phase(), SwipePhase::LockedOpen(Side::Leading));
//! assert_eq!(row.offset(), 75.0);
//! ```
//!
//! ## Row lifecycle
//!
//! A row is [`SwipePhase::Closed`] until a drag moves it past the dead zone,
//! at which point it claims the shared active-row cell and becomes
//! [`SwipePhase::Dragging`]. On release:
//!
//! - shorter than the open trigger (or, for a row that was already open,
//!   shorter than the close ratio of its menu width): snap back to closed;
//! - past the swipe-out trigger on a side with a swipe-out item: run that
//!   item. Destructive items fly the row off-screen
//!   ([`SwipePhase::SwipedOut`], terminal); others close the row;
//! - otherwise: lock the side open ([`SwipePhase::LockedOpen`]).
//!
//! In every action case the item's callback runs once, after
//! [`SwipeSettings::action_delay`], so its side effects do not race the
//! transition.
//!
//! ## Keeping one row open
//!
//! All rows share one [`ActiveRow`] cell. When a different row becomes active,
//! a locked row closes itself in [`ActiveRowObserver::notify_active_row_changed`].
//! Wire that up with a [`SharedActiveRow::on_change`] listener, or call
//! [`RowCoordinator::sync`] after delivering input:
//!
//! ```rust
//! use std::rc::Rc;
//! use understory_swipe::{
//!     ActionGroup, ActionItem, RowConfig, RowCoordinator, SharedActiveRow, SwipeContext,
//!     SwipeController, ManualScheduler, SwipePhase,
//! };
//!
//! let active = Rc::new(SharedActiveRow::<u32>::new());
//! let ctx = SwipeContext::new(active.clone(), Rc::new(ManualScheduler::new()), Rc::new(()));
//! let make_row = |id| {
//!     let config = RowConfig::new(id, 375.0)
//!         .with_trailing(ActionGroup::new([ActionItem::new("delete", (), 90.0, || {})]));
//!     SwipeController::new(config, ctx.clone()).unwrap()
//! };
//! let mut rows = vec![make_row(1), make_row(2)];
//! let mut coordinator = RowCoordinator::new();
//!
//! rows[0].on_drag_change(-120.0);
//! rows[0].on_drag_end();
//! coordinator.sync(&active, rows.iter_mut());
//! assert!(matches!(rows[0].phase(), SwipePhase::LockedOpen(_)));
//!
//! // Dragging the second row closes the first.
//! rows[1].on_drag_change(-30.0);
//! coordinator.sync(&active, rows.iter_mut());
//! assert_eq!(rows[0].phase(), SwipePhase::Closed);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to dependencies.
//! - `kurbo` (default): adds [`SwipeController::on_drag_translation`] for
//!   `kurbo::Vec2` translations, such as those from
//!   `understory_event_state::drag::DragState::total_offset`.
//! - `libm`: `no_std` float support for `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod action;
mod active_row;
mod controller;
mod error;
mod schedule;
mod settings;
mod side;

pub use action::{ActionGroup, ActionItem, HapticFeedback};
pub use active_row::{ActiveRow, ActiveRowObserver, RowCoordinator, SharedActiveRow};
pub use controller::{
    ControllerState, RowConfig, SwipeContext, SwipeController, SwipeEvent, SwipePhase,
};
pub use error::SwipeConfigError;
pub use schedule::{HapticSink, ManualScheduler, Scheduler, Task};
pub use settings::{Curve, SwipeSettings, Transition};
pub use side::Side;
