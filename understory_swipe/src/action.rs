// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Action buttons and the per-side groups they are revealed in.
//!
//! An [`ActionGroup`] is the ordered list of [`ActionItem`]s for one [`Side`].
//! An empty group disables its side: the row will not open in that direction.
//!
//! At most one item per group is expected to carry the swipe-out flag. If more
//! than one does, only the first flagged item is treated as the swipe-out item
//! and the rest behave like ordinary buttons.

use alloc::rc::Rc;
use core::fmt;

use smallvec::SmallVec;

use crate::Side;
use crate::error::{SwipeConfigError, is_positive};

/// Inline capacity for action groups; most rows show at most a handful of buttons.
const INLINE_ITEMS: usize = 4;

/// Notification-style haptic feedback kinds.
///
/// Items choose the kind fired when their swipe-out threshold is crossed;
/// retreating back below the threshold always fires [`HapticFeedback::Success`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HapticFeedback {
    /// A task completed.
    Success,
    /// A task produced a warning.
    Warning,
    /// A task failed.
    Error,
}

/// One swipeable action button.
///
/// `K` is a stable identity for the button and `P` is an opaque display payload
/// the host uses when rendering (label, icon, colors). The controller never
/// looks at `P`.
pub struct ActionItem<K, P = ()> {
    id: K,
    payload: P,
    width: f64,
    swipe_out: bool,
    destructive: bool,
    haptic: Option<HapticFeedback>,
    callback: Rc<dyn Fn()>,
}

impl<K, P> ActionItem<K, P> {
    /// Creates an ordinary (non swipe-out) button of the given layout width.
    ///
    /// `width` must be finite and positive; this is checked when the row is
    /// built.
    pub fn new(id: K, payload: P, width: f64, callback: impl Fn() + 'static) -> Self {
        Self {
            id,
            payload,
            width,
            swipe_out: false,
            destructive: false,
            haptic: None,
            callback: Rc::new(callback),
        }
    }

    /// Marks this item as the side's swipe-out action.
    #[must_use]
    pub fn swipe_out(mut self) -> Self {
        self.swipe_out = true;
        self
    }

    /// Marks this item as a destructive swipe-out: triggering it flies the row off-screen.
    ///
    /// Implies [`ActionItem::swipe_out`].
    #[must_use]
    pub fn destructive(mut self) -> Self {
        self.swipe_out = true;
        self.destructive = true;
        self
    }

    /// Sets the haptic feedback fired when the swipe-out threshold is crossed.
    #[must_use]
    pub fn with_haptic(mut self, kind: HapticFeedback) -> Self {
        self.haptic = Some(kind);
        self
    }

    /// Returns the item's identity.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Returns the host's display payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Returns the fixed layout width of the button.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns `true` if the item is flagged as a swipe-out action.
    #[must_use]
    pub fn is_swipe_out(&self) -> bool {
        self.swipe_out
    }

    /// Returns `true` if triggering the swipe-out dismisses the row.
    ///
    /// Only meaningful together with [`ActionItem::is_swipe_out`].
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.swipe_out && self.destructive
    }

    /// Returns the haptic feedback kind, if any.
    #[must_use]
    pub fn haptic(&self) -> Option<HapticFeedback> {
        self.haptic
    }

    /// Returns a shared handle to the callback, for deferred invocation.
    pub(crate) fn callback(&self) -> Rc<dyn Fn()> {
        Rc::clone(&self.callback)
    }
}

impl<K: fmt::Debug, P: fmt::Debug> fmt::Debug for ActionItem<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionItem")
            .field("id", &self.id)
            .field("payload", &self.payload)
            .field("width", &self.width)
            .field("swipe_out", &self.swipe_out)
            .field("destructive", &self.destructive)
            .field("haptic", &self.haptic)
            .finish_non_exhaustive()
    }
}

/// The ordered buttons revealed on one side of a row.
pub struct ActionGroup<K, P = ()> {
    items: SmallVec<[ActionItem<K, P>; INLINE_ITEMS]>,
    swipe_out_index: Option<usize>,
}

impl<K, P> ActionGroup<K, P> {
    /// Creates an empty group, which disables its side.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: SmallVec::new(),
            swipe_out_index: None,
        }
    }

    /// Creates a group from items in display order.
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator<Item = ActionItem<K, P>>,
    {
        let items: SmallVec<[ActionItem<K, P>; INLINE_ITEMS]> = items.into_iter().collect();
        let swipe_out_index = items.iter().position(ActionItem::is_swipe_out);
        Self {
            items,
            swipe_out_index,
        }
    }

    /// Returns `true` if the group has no buttons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of buttons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the buttons in display order.
    #[must_use]
    pub fn items(&self) -> &[ActionItem<K, P>] {
        &self.items
    }

    /// Returns the button at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ActionItem<K, P>> {
        self.items.get(index)
    }

    /// Returns the sum of all button widths, or `None` for an empty group.
    ///
    /// Proportional sizing divides by this value, so there is no zero-width
    /// answer to misuse.
    #[must_use]
    pub fn menu_width(&self) -> Option<f64> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.items.iter().map(ActionItem::width).sum())
    }

    /// Returns the index of the group's swipe-out item.
    ///
    /// This is the first item flagged as swipe-out; later flagged items are ignored.
    #[must_use]
    pub fn swipe_out_index(&self) -> Option<usize> {
        self.swipe_out_index
    }

    /// Returns the group's swipe-out item, if any.
    #[must_use]
    pub fn swipe_out_item(&self) -> Option<&ActionItem<K, P>> {
        self.swipe_out_index.map(|idx| &self.items[idx])
    }

    /// Checks button widths and reports tolerated misconfiguration.
    pub(crate) fn validate(&self, side: Side) -> Result<(), SwipeConfigError> {
        for (index, item) in self.items.iter().enumerate() {
            if !is_positive(item.width) {
                return Err(SwipeConfigError::InvalidButtonWidth {
                    side,
                    index,
                    width: item.width,
                });
            }
        }
        let flagged = self.items.iter().filter(|item| item.swipe_out).count();
        if flagged > 1 {
            tracing::warn!(
                target: "understory_swipe",
                ?side,
                flagged,
                "multiple swipe-out actions in one group; only the first is used"
            );
        }
        Ok(())
    }
}

impl<K, P> Default for ActionGroup<K, P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K, P> FromIterator<ActionItem<K, P>> for ActionGroup<K, P> {
    fn from_iter<I: IntoIterator<Item = ActionItem<K, P>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<K: fmt::Debug, P: fmt::Debug> fmt::Debug for ActionGroup<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionGroup")
            .field("items", &self.items.as_slice())
            .field("swipe_out_index", &self.swipe_out_index)
            .finish()
    }
}
