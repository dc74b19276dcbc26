// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-row exclusivity: the shared "currently active row" cell.
//!
//! Every [`SwipeController`](crate::SwipeController) in a list holds a handle to
//! the same [`ActiveRow`] cell. A row claims the cell when the user starts
//! dragging it past the dead zone and releases it when it closes. Sibling rows
//! that are locked open close themselves when they learn that a different row
//! became active.
//!
//! There are two ways to deliver that news:
//!
//! - Register a listener with [`SharedActiveRow::on_change`].
//! - Poll with a [`RowCoordinator`], which watches the cell's revision and
//!   forwards changes to a set of controllers.
//!
//! Writes are last-writer-wins; no locking is involved because everything runs
//! on one thread.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// Shared get/set access to the active row id.
pub trait ActiveRow<Id> {
    /// Returns the id of the row that currently owns drag focus.
    fn active(&self) -> Option<Id>;

    /// Replaces the active row id.
    fn set_active(&self, id: Option<Id>);

    /// Clears the active row id, but only if it currently names `id`.
    ///
    /// Rows use this when they close so they never erase a sibling's claim.
    fn clear_if(&self, id: &Id)
    where
        Id: PartialEq,
    {
        if self.active().as_ref() == Some(id) {
            self.set_active(None);
        }
    }
}

type Listener<Id> = Rc<dyn Fn(Option<&Id>)>;

struct Inner<Id> {
    active: Option<Id>,
    revision: u64,
    /// Most recent `Some` write and the revision it produced.
    last_claim: Option<(u64, Id)>,
    listeners: Vec<Listener<Id>>,
}

/// A [`RefCell`]-backed [`ActiveRow`] with a revision counter and change listeners.
///
/// Share it between rows as `Rc<SharedActiveRow<Id>>`; an `Rc` of it coerces to
/// `Rc<dyn ActiveRow<Id>>`.
pub struct SharedActiveRow<Id> {
    inner: RefCell<Inner<Id>>,
}

impl<Id> SharedActiveRow<Id> {
    /// Creates a cell with no active row.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(Inner {
                active: None,
                revision: 0,
                last_claim: None,
                listeners: Vec::new(),
            }),
        }
    }

    /// Returns a counter that is bumped each time the active id actually changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    /// Returns the most recent claim (a write of `Some(id)`) together with
    /// the revision it produced.
    ///
    /// The claim is remembered after the row releases the cell again, so a
    /// poller that missed a short claim-then-release still sees who claimed.
    #[must_use]
    pub fn last_claim(&self) -> Option<(u64, Id)>
    where
        Id: Clone,
    {
        self.inner.borrow().last_claim.clone()
    }

    /// Registers a listener called after every change with the new active id.
    ///
    /// Listeners run after the cell's borrow has been released, so they may
    /// read or write the cell themselves.
    pub fn on_change(&self, listener: impl Fn(Option<&Id>) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }
}

impl<Id> Default for SharedActiveRow<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Clone + PartialEq> ActiveRow<Id> for SharedActiveRow<Id> {
    fn active(&self) -> Option<Id> {
        self.inner.borrow().active.clone()
    }

    fn set_active(&self, id: Option<Id>) {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            if inner.active == id {
                return;
            }
            inner.active = id.clone();
            inner.revision = inner.revision.wrapping_add(1);
            if let Some(claimed) = &id {
                inner.last_claim = Some((inner.revision, claimed.clone()));
            }
            inner.listeners.clone()
        };
        for listener in listeners {
            listener(id.as_ref());
        }
    }
}

impl<Id: fmt::Debug> fmt::Debug for SharedActiveRow<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SharedActiveRow")
            .field("active", &inner.active)
            .field("revision", &inner.revision)
            .field("last_claim", &inner.last_claim)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Something that reacts when another row becomes active.
///
/// Implemented by [`SwipeController`](crate::SwipeController).
pub trait ActiveRowObserver<Id> {
    /// Called with the newly active row id.
    fn notify_active_row_changed(&mut self, active: Option<&Id>);
}

/// Polls a [`SharedActiveRow`] and forwards changes to sibling rows.
///
/// Call [`RowCoordinator::sync`] after delivering input to any row.
#[derive(Clone, Debug, Default)]
pub struct RowCoordinator {
    seen_revision: u64,
}

impl RowCoordinator {
    /// Creates a coordinator that has seen revision 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifies every row in `rows` if the cell changed since the last sync.
    ///
    /// Rows are told about the latest claim made since the previous sync, even
    /// if that row has already released the cell again; with no new claim they
    /// are told the current value. Earlier claims in the same window are
    /// folded into the latest one.
    ///
    /// Returns `true` if a change was forwarded.
    pub fn sync<'a, Id, R, I>(&mut self, cell: &SharedActiveRow<Id>, rows: I) -> bool
    where
        Id: Clone + PartialEq + 'a,
        R: ActiveRowObserver<Id> + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut R>,
    {
        let revision = cell.revision();
        if revision == self.seen_revision {
            return false;
        }
        let claim = cell
            .last_claim()
            .filter(|(at, _)| *at > self.seen_revision)
            .map(|(_, id)| id);
        self.seen_revision = revision;
        let active = claim.or_else(|| cell.active());
        for row in rows {
            row.notify_active_row_changed(active.as_ref());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn revision_bumps_only_on_change() {
        let cell = SharedActiveRow::<u32>::new();
        assert_eq!(cell.active(), None);
        cell.set_active(Some(1));
        cell.set_active(Some(1));
        assert_eq!(cell.revision(), 1);
        cell.set_active(Some(2));
        cell.set_active(None);
        assert_eq!(cell.revision(), 3);
    }

    #[test]
    fn clear_if_keeps_foreign_claims() {
        let cell = SharedActiveRow::<u32>::new();
        cell.set_active(Some(2));
        cell.clear_if(&1);
        assert_eq!(cell.active(), Some(2));
        cell.clear_if(&2);
        assert_eq!(cell.active(), None);
    }

    #[test]
    fn listeners_see_changes_and_may_reenter() {
        let cell = Rc::new(SharedActiveRow::<u32>::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let reentrant = Rc::clone(&cell);
        cell.on_change(move |id| {
            log.borrow_mut().push(id.copied());
            // Row 9 is never allowed to stay active.
            if id == Some(&9) {
                reentrant.set_active(None);
            }
        });
        cell.set_active(Some(1));
        cell.set_active(Some(9));
        assert_eq!(*seen.borrow(), vec![Some(1), Some(9), None]);
        assert_eq!(cell.active(), None);
    }

    struct Row {
        id: u32,
        closed_by: Option<u32>,
    }

    impl ActiveRowObserver<u32> for Row {
        fn notify_active_row_changed(&mut self, active: Option<&u32>) {
            if let Some(&other) = active
                && other != self.id
            {
                self.closed_by = Some(other);
            }
        }
    }

    #[test]
    fn coordinator_forwards_once_per_revision() {
        let cell = SharedActiveRow::<u32>::new();
        let mut rows = vec![
            Row { id: 1, closed_by: None },
            Row { id: 2, closed_by: None },
        ];
        let mut coordinator = RowCoordinator::new();
        assert!(!coordinator.sync(&cell, rows.iter_mut()));

        cell.set_active(Some(2));
        assert!(coordinator.sync(&cell, rows.iter_mut()));
        assert_eq!(rows[0].closed_by, Some(2));
        assert_eq!(rows[1].closed_by, None);

        assert!(!coordinator.sync(&cell, rows.iter_mut()));
    }

    #[test]
    fn coordinator_forwards_claim_released_before_sync() {
        let cell = SharedActiveRow::<u32>::new();
        let mut rows = vec![
            Row { id: 1, closed_by: None },
            Row { id: 2, closed_by: None },
        ];
        let mut coordinator = RowCoordinator::new();

        cell.set_active(Some(2));
        cell.clear_if(&2);
        assert_eq!(cell.active(), None);
        assert_eq!(cell.last_claim(), Some((1, 2)));

        assert!(coordinator.sync(&cell, rows.iter_mut()));
        assert_eq!(rows[0].closed_by, Some(2));

        // A later release alone carries no new claim.
        rows[0].closed_by = None;
        cell.set_active(Some(1));
        assert!(coordinator.sync(&cell, rows.iter_mut()));
        cell.set_active(None);
        assert!(coordinator.sync(&cell, rows.iter_mut()));
        assert_eq!(rows[0].closed_by, None);
        assert_eq!(rows[1].closed_by, Some(1));
    }
}
