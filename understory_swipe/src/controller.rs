// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-row swipe state machine.
//!
//! ## Usage
//!
//! 1) Build a [`SwipeController`] from a [`RowConfig`] and a [`SwipeContext`].
//! 2) While the user drags, call [`SwipeController::on_drag_change`] with the
//!    total horizontal translation since the drag began.
//! 3) When the drag finishes, call [`SwipeController::on_drag_end`].
//! 4) Render from [`SwipeController::offset`], the width/opacity hints, and the
//!    events returned by [`SwipeController::drain_events`].
//! 5) Forward active-row changes to sibling rows, either from a
//!    [`SharedActiveRow::on_change`](crate::SharedActiveRow::on_change) listener
//!    or with a [`RowCoordinator`](crate::RowCoordinator).
//!
//! ## States
//!
//! ```text
//!            drag past dead zone            release: too short
//!   Closed ──────────────────────▶ Dragging ─────────────────▶ Closed
//!     ▲                               │  │
//!     │ other row active,             │  └─ release: far enough ──▶ LockedOpen(side)
//!     │ action tap, short drag        │                               │
//!     └────────────────────────────── ┼ ◀──────── new drag ───────────┘
//!                                     └─ release: destructive swipe-out ──▶ SwipedOut(side)
//! ```
//!
//! `SwipedOut` is terminal: the host is expected to remove or recreate the row.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use crate::action::{ActionGroup, ActionItem};
use crate::active_row::{ActiveRow, ActiveRowObserver};
use crate::error::{SwipeConfigError, is_positive};
use crate::schedule::{HapticSink, Scheduler};
use crate::settings::{SwipeSettings, Transition};
use crate::side::{Side, magnitude};
use crate::HapticFeedback;

/// Scale applied to action buttons while the swipe-out threshold is armed.
const ARMED_SCALE: f64 = 1.5;

/// Static configuration of one row.
pub struct RowConfig<Id, K, P = ()> {
    /// The row's identity in the shared active-row cell.
    pub id: Id,
    /// Width of the row content; destructive swipe-outs fly this far plus the overshoot.
    pub cell_width: f64,
    /// Buttons revealed by dragging right.
    pub leading: ActionGroup<K, P>,
    /// Buttons revealed by dragging left.
    pub trailing: ActionGroup<K, P>,
    /// Thresholds and timings.
    pub settings: SwipeSettings,
}

impl<Id, K, P> RowConfig<Id, K, P> {
    /// Creates a configuration with both sides disabled and default settings.
    pub fn new(id: Id, cell_width: f64) -> Self {
        Self {
            id,
            cell_width,
            leading: ActionGroup::empty(),
            trailing: ActionGroup::empty(),
            settings: SwipeSettings::default(),
        }
    }

    /// Sets the leading group.
    #[must_use]
    pub fn with_leading(mut self, group: ActionGroup<K, P>) -> Self {
        self.leading = group;
        self
    }

    /// Sets the trailing group.
    #[must_use]
    pub fn with_trailing(mut self, group: ActionGroup<K, P>) -> Self {
        self.trailing = group;
        self
    }

    /// Sets the thresholds and timings.
    #[must_use]
    pub fn with_settings(mut self, settings: SwipeSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl<Id: fmt::Debug, K: fmt::Debug, P: fmt::Debug> fmt::Debug for RowConfig<Id, K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowConfig")
            .field("id", &self.id)
            .field("cell_width", &self.cell_width)
            .field("leading", &self.leading)
            .field("trailing", &self.trailing)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Host collaborators shared by every row of a list.
pub struct SwipeContext<Id> {
    /// The shared active-row cell.
    pub active_row: Rc<dyn ActiveRow<Id>>,
    /// Runs action callbacks after the post-trigger delay.
    pub scheduler: Rc<dyn Scheduler>,
    /// Plays threshold-crossing feedback.
    pub haptics: Rc<dyn HapticSink>,
}

impl<Id> SwipeContext<Id> {
    /// Bundles the collaborators.
    pub fn new(
        active_row: Rc<dyn ActiveRow<Id>>,
        scheduler: Rc<dyn Scheduler>,
        haptics: Rc<dyn HapticSink>,
    ) -> Self {
        Self {
            active_row,
            scheduler,
            haptics,
        }
    }
}

impl<Id> Clone for SwipeContext<Id> {
    fn clone(&self) -> Self {
        Self {
            active_row: Rc::clone(&self.active_row),
            scheduler: Rc::clone(&self.scheduler),
            haptics: Rc::clone(&self.haptics),
        }
    }
}

impl<Id> fmt::Debug for SwipeContext<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeContext").finish_non_exhaustive()
    }
}

/// The mutable per-row state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerState {
    /// Signed horizontal offset; `0.0` is closed.
    pub offset: f64,
    /// The side snapped open, if any. Its sign always agrees with `offset`.
    pub locked_side: Option<Side>,
    /// The swipe-out threshold was crossed and feedback played.
    pub positive_feedback_fired: bool,
    /// The drag retreated below the threshold after arming and feedback played.
    pub negative_feedback_fired: bool,
}

/// Coarse interaction phase of a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipePhase {
    /// At rest with nothing revealed.
    Closed,
    /// Following an active drag.
    Dragging,
    /// Snapped open on one side.
    LockedOpen(Side),
    /// Dismissed by a destructive swipe-out; accepts no further input.
    SwipedOut(Side),
}

/// Observable changes, in the order they happened.
#[derive(Clone, Debug, PartialEq)]
pub enum SwipeEvent<K> {
    /// The offset changed. `transition` is `None` while tracking a finger and
    /// describes the animation for snaps.
    OffsetChanged {
        /// New offset.
        offset: f64,
        /// How to animate to it.
        transition: Option<Transition>,
    },
    /// The row snapped open on a side.
    Locked(Side),
    /// The row returned to rest.
    Closed,
    /// A destructive swipe-out dismissed the row.
    SwipedOut(Side),
    /// An action callback was queued on the scheduler.
    ActionScheduled {
        /// The group the action belongs to.
        side: Side,
        /// The action's identity.
        item: K,
    },
}

/// How the current drag gesture started.
#[derive(Clone, Copy, Debug)]
struct Gesture {
    /// Offset the translation is applied to.
    base: f64,
    /// Side that was locked open when the gesture began.
    origin: Option<Side>,
}

/// Drag interpretation, snapping, and swipe-out sequencing for one row.
///
/// See the [crate documentation](crate) for the overall flow.
pub struct SwipeController<Id, K, P = ()> {
    id: Id,
    cell_width: f64,
    leading: ActionGroup<K, P>,
    trailing: ActionGroup<K, P>,
    settings: SwipeSettings,
    ctx: SwipeContext<Id>,
    state: ControllerState,
    gesture: Option<Gesture>,
    swiped_out: Option<Side>,
    revision: u64,
    events: Vec<SwipeEvent<K>>,
}

impl<Id, K, P> SwipeController<Id, K, P>
where
    Id: Clone + PartialEq + fmt::Debug,
    K: Clone,
{
    /// Validates `config` and creates a closed row.
    pub fn new(config: RowConfig<Id, K, P>, ctx: SwipeContext<Id>) -> Result<Self, SwipeConfigError> {
        config.settings.validate()?;
        if !is_positive(config.cell_width) {
            return Err(SwipeConfigError::InvalidCellWidth(config.cell_width));
        }
        config.leading.validate(Side::Leading)?;
        config.trailing.validate(Side::Trailing)?;
        Ok(Self {
            id: config.id,
            cell_width: config.cell_width,
            leading: config.leading,
            trailing: config.trailing,
            settings: config.settings,
            ctx,
            state: ControllerState::default(),
            gesture: None,
            swiped_out: None,
            revision: 0,
            events: Vec::new(),
        })
    }

    /// Returns the row id.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Returns the row content width.
    #[must_use]
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Returns the settings.
    #[must_use]
    pub fn settings(&self) -> &SwipeSettings {
        &self.settings
    }

    /// Returns the action group for `side`.
    #[must_use]
    pub fn group(&self, side: Side) -> &ActionGroup<K, P> {
        match side {
            Side::Leading => &self.leading,
            Side::Trailing => &self.trailing,
        }
    }

    /// Returns a snapshot of the mutable state.
    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Returns the current signed offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    /// Returns the side that is locked open, if any.
    #[must_use]
    pub fn locked_side(&self) -> Option<Side> {
        self.state.locked_side
    }

    /// Returns the coarse interaction phase.
    #[must_use]
    pub fn phase(&self) -> SwipePhase {
        if let Some(side) = self.swiped_out {
            return SwipePhase::SwipedOut(side);
        }
        if let Some(gesture) = self.gesture
            && (self.state.offset != 0.0 || gesture.origin.is_some())
        {
            return SwipePhase::Dragging;
        }
        match self.state.locked_side {
            Some(side) => SwipePhase::LockedOpen(side),
            None => SwipePhase::Closed,
        }
    }

    /// Returns a counter bumped on every observable change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Takes the events recorded since the last call.
    ///
    /// Events accumulate until drained, so hosts should drain once per frame.
    pub fn drain_events(&mut self) -> Vec<SwipeEvent<K>> {
        mem::take(&mut self.events)
    }

    /// Returns the total width of `side`'s buttons, or `None` if the side is disabled.
    #[must_use]
    pub fn menu_width(&self, side: Side) -> Option<f64> {
        self.group(side).menu_width()
    }

    /// Handles a drag update carrying the total horizontal translation since the drag began.
    pub fn on_drag_change(&mut self, delta_x: f64) {
        if self.swiped_out.is_some() || !delta_x.is_finite() {
            return;
        }
        if self.state.offset == 0.0
            && ((self.leading.is_empty() && delta_x > 0.0)
                || (self.trailing.is_empty() && delta_x < 0.0))
        {
            return;
        }

        let gesture = match self.gesture {
            Some(gesture) => gesture,
            None => {
                let gesture = self.begin_gesture();
                self.gesture = Some(gesture);
                gesture
            }
        };

        if gesture.origin.is_some() {
            self.set_offset(gesture.base + delta_x, None);
            self.check_haptics(delta_x);
        } else {
            self.check_haptics(delta_x);
            if magnitude(delta_x) > self.settings.dead_zone {
                self.ctx.active_row.set_active(Some(self.id.clone()));
                self.set_offset(delta_x, None);
            } else {
                self.set_offset(0.0, None);
            }
        }
        tracing::trace!(
            target: "understory_swipe",
            row = ?self.id,
            delta_x,
            offset = self.state.offset,
            "drag update"
        );
    }

    /// `kurbo` convenience for [`SwipeController::on_drag_change`]; only the
    /// horizontal component of `translation` is used.
    #[cfg(feature = "kurbo")]
    pub fn on_drag_translation(&mut self, translation: kurbo::Vec2) {
        self.on_drag_change(translation.x);
    }

    /// Handles the end of a drag and snaps to closed, open, or swiped out.
    ///
    /// A release without any accepted drag update is ignored.
    pub fn on_drag_end(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        if self.swiped_out.is_some() {
            return;
        }
        let origin = gesture.origin;
        // Leaving Dragging is observable even when nothing else moves.
        self.bump();

        let offset = self.state.offset;
        let Some(side) = Side::of_offset(offset) else {
            if self.state.locked_side.take().is_some() {
                self.push(SwipeEvent::Closed);
            }
            return;
        };

        let group = self.group(side);
        let Some(menu_width) = group.menu_width() else {
            tracing::debug!(target: "understory_swipe", row = ?self.id, ?side, "side disabled, closing");
            self.snap_to(0.0);
            return;
        };
        let swipe_out_index = group.swipe_out_index();
        let distance = magnitude(offset);
        let was_locked_here = self.state.locked_side.or(origin) == Some(side);

        if distance < self.settings.open_trigger_value
            || (was_locked_here && distance < menu_width * self.settings.lock_close_ratio)
        {
            tracing::debug!(target: "understory_swipe", row = ?self.id, distance, "released short, closing");
            self.snap_to(0.0);
        } else if let Some(index) = swipe_out_index
            && distance > self.settings.swipe_out_trigger()
        {
            self.swipe_out_action(side, index);
        } else {
            self.lock_open(side);
        }
    }

    /// Animates the offset to `value`.
    ///
    /// Snapping to `0.0` closes the row: the locked side and both feedback
    /// flags are cleared and the shared active-row id is released if it still
    /// names this row. A drag in progress is detached from the old open
    /// position, so its next update starts over as a fresh drag.
    ///
    /// Does nothing on a swiped-out row.
    pub fn snap_to(&mut self, value: f64) {
        if self.swiped_out.is_some() {
            return;
        }
        let was_open = self.state.offset != 0.0 || self.state.locked_side.is_some();
        self.set_offset(value, Some(self.settings.snap_transition()));
        if value == 0.0 {
            let flags_set =
                self.state.positive_feedback_fired || self.state.negative_feedback_fired;
            self.state.locked_side = None;
            self.state.positive_feedback_fired = false;
            self.state.negative_feedback_fired = false;
            self.ctx.active_row.clear_if(&self.id);
            self.gesture = None;
            if flags_set {
                self.bump();
            }
            if was_open {
                self.push(SwipeEvent::Closed);
            }
        }
    }

    /// Closes the row. Equivalent to `snap_to(0.0)`.
    ///
    /// Ignored once the row has been swiped out.
    pub fn close(&mut self) {
        self.snap_to(0.0);
    }

    /// Snaps the row open to fully reveal `side`.
    ///
    /// Returns `false` without changing anything if the side has no buttons or
    /// the row was swiped out.
    pub fn lock_open(&mut self, side: Side) -> bool {
        if self.swiped_out.is_some() {
            return false;
        }
        let Some(width) = self.menu_width(side) else {
            return false;
        };
        self.snap_to(side.sign() * width);
        self.gesture = None;
        self.state.locked_side = Some(side);
        self.state.positive_feedback_fired = false;
        tracing::debug!(target: "understory_swipe", row = ?self.id, ?side, width, "locked open");
        self.push(SwipeEvent::Locked(side));
        true
    }

    /// Triggers `side`'s swipe-out item as if the user had dragged past the threshold.
    ///
    /// Returns `false` if the side has no swipe-out item or the row was swiped out.
    pub fn trigger_swipe_out(&mut self, side: Side) -> bool {
        if self.swiped_out.is_some() {
            return false;
        }
        match self.group(side).swipe_out_index() {
            Some(index) => {
                self.swipe_out_action(side, index);
                true
            }
            None => false,
        }
    }

    /// Handles a tap on a revealed button: the row closes and the callback is scheduled.
    ///
    /// Returns `false` if `side` is not currently revealed or `index` is out of range.
    pub fn tap_action(&mut self, side: Side, index: usize) -> bool {
        if self.swiped_out.is_some() || Side::of_offset(self.state.offset) != Some(side) {
            return false;
        }
        let Some(item) = self.group(side).get(index) else {
            return false;
        };
        let (item_id, callback) = (item.id().clone(), item.callback());
        self.snap_to(0.0);
        self.schedule_callback(side, item_id, callback);
        true
    }

    /// Returns the width to render the button at `index` on `side` with.
    ///
    /// While the side is past the swipe-out trigger, the swipe-out item fills
    /// the revealed area and its siblings collapse to zero. Otherwise widths
    /// are proportional to each button's share of the menu width. Returns
    /// `None` for an out of range index.
    #[must_use]
    pub fn item_display_width(&self, side: Side, index: usize) -> Option<f64> {
        let group = self.group(side);
        let item = group.get(index)?;
        let menu_width = group.menu_width()?;
        let revealed = magnitude(self.state.offset) + self.settings.add_width_margin;
        match group.swipe_out_index() {
            Some(swipe_out)
                if side.is_past(self.state.offset, self.settings.swipe_out_trigger()) =>
            {
                Some(if swipe_out == index { revealed } else { 0.0 })
            }
            _ => Some(revealed * (item.width() / menu_width)),
        }
    }

    /// Returns `1.0` if `side`'s reveal area should be visible, else `0.0`.
    #[must_use]
    pub fn reveal_area_opacity(&self, side: Side) -> f64 {
        if side.is_past(self.state.offset, self.settings.reveal_threshold) {
            1.0
        } else {
            0.0
        }
    }

    /// Returns `true` while the row is displaced and should draw an elevation cue.
    #[must_use]
    pub fn shadow_visible(&self) -> bool {
        self.state.offset != 0.0
    }

    /// Returns `true` while the swipe-out threshold is armed.
    #[must_use]
    pub fn is_swipe_out_armed(&self) -> bool {
        self.state.positive_feedback_fired
    }

    /// Returns the scale for button content: enlarged while swipe-out is armed.
    #[must_use]
    pub fn swipe_out_scale(&self) -> f64 {
        if self.is_swipe_out_armed() {
            ARMED_SCALE
        } else {
            1.0
        }
    }

    fn begin_gesture(&self) -> Gesture {
        match self.state.locked_side {
            Some(side) => Gesture {
                base: side.sign() * self.menu_width(side).unwrap_or(0.0),
                origin: Some(side),
            },
            None => Gesture {
                base: 0.0,
                origin: None,
            },
        }
    }

    fn check_haptics(&mut self, delta_x: f64) {
        let side = if delta_x > 0.0 {
            Side::Leading
        } else {
            Side::Trailing
        };
        let trigger = self.settings.swipe_out_trigger();
        let kind = self
            .group(side)
            .swipe_out_item()
            .and_then(ActionItem::haptic);

        if let Some(kind) = kind
            && !self.state.positive_feedback_fired
            && side.is_past(delta_x, trigger)
        {
            self.fire(kind);
            self.state.positive_feedback_fired = true;
            self.state.negative_feedback_fired = false;
            self.bump();
        } else if self.state.positive_feedback_fired
            && !self.state.negative_feedback_fired
            && magnitude(delta_x) < trigger
        {
            self.fire(HapticFeedback::Success);
            self.state.positive_feedback_fired = false;
            self.state.negative_feedback_fired = true;
            self.bump();
        }
    }

    fn fire(&self, kind: HapticFeedback) {
        tracing::trace!(target: "understory_swipe", row = ?self.id, ?kind, "haptic feedback");
        self.ctx.haptics.fire(kind);
    }

    fn swipe_out_action(&mut self, side: Side, index: usize) {
        let item = &self.group(side).items()[index];
        let (item_id, callback, destructive) =
            (item.id().clone(), item.callback(), item.is_destructive());
        if destructive {
            let target = (self.cell_width + self.settings.swipe_out_overshoot) * side.sign();
            self.snap_to(target);
            self.state.locked_side = None;
            self.swiped_out = Some(side);
            tracing::debug!(target: "understory_swipe", row = ?self.id, ?side, target, "swiped out");
            self.push(SwipeEvent::SwipedOut(side));
        } else {
            tracing::debug!(target: "understory_swipe", row = ?self.id, ?side, "swipe-out action, closing");
            self.snap_to(0.0);
        }
        self.schedule_callback(side, item_id, callback);
    }

    fn schedule_callback(&mut self, side: Side, item: K, callback: Rc<dyn Fn()>) {
        self.ctx
            .scheduler
            .schedule(self.settings.action_delay, Box::new(move || callback()));
        self.push(SwipeEvent::ActionScheduled { side, item });
    }

    fn set_offset(&mut self, value: f64, transition: Option<Transition>) {
        if let Some(locked) = self.state.locked_side
            && Side::of_offset(value) == Some(locked.opposite())
        {
            // Dragged across the rest position: the lock no longer applies.
            self.state.locked_side = None;
            self.bump();
        }
        if self.state.offset == value {
            return;
        }
        self.state.offset = value;
        self.push(SwipeEvent::OffsetChanged {
            offset: value,
            transition,
        });
    }

    fn push(&mut self, event: SwipeEvent<K>) {
        self.events.push(event);
        self.bump();
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<Id, K, P> ActiveRowObserver<Id> for SwipeController<Id, K, P>
where
    Id: Clone + PartialEq + fmt::Debug,
    K: Clone,
{
    /// Closes this row if it is locked open and a different row became active.
    fn notify_active_row_changed(&mut self, active: Option<&Id>) {
        let Some(active) = active else {
            return;
        };
        if *active == self.id || self.state.locked_side.is_none() || self.swiped_out.is_some() {
            return;
        }
        tracing::debug!(
            target: "understory_swipe",
            row = ?self.id,
            active = ?active,
            "another row became active, closing"
        );
        self.snap_to(0.0);
    }
}

impl<Id: fmt::Debug, K, P> fmt::Debug for SwipeController<Id, K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeController")
            .field("id", &self.id)
            .field("cell_width", &self.cell_width)
            .field("leading_len", &self.leading.len())
            .field("trailing_len", &self.trailing.len())
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("swiped_out", &self.swiped_out)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
