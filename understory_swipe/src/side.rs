// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// One horizontal edge of a row that can reveal an action group.
///
/// [`Side::Leading`] is revealed by dragging right and corresponds to a
/// positive row offset; [`Side::Trailing`] is revealed by dragging left and
/// corresponds to a negative row offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The start edge, revealed by a positive (rightward) offset.
    Leading,
    /// The end edge, revealed by a negative (leftward) offset.
    Trailing,
}

impl Side {
    /// Returns `1.0` for [`Side::Leading`] and `-1.0` for [`Side::Trailing`].
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Leading => 1.0,
            Self::Trailing => -1.0,
        }
    }

    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Leading => Self::Trailing,
            Self::Trailing => Self::Leading,
        }
    }

    /// Returns the side a non-zero offset or translation points at.
    ///
    /// Zero (and NaN) map to `None`.
    #[must_use]
    pub fn of_offset(offset: f64) -> Option<Self> {
        if offset > 0.0 {
            Some(Self::Leading)
        } else if offset < 0.0 {
            Some(Self::Trailing)
        } else {
            None
        }
    }

    /// Returns `true` if `value` lies strictly beyond `threshold` on this side.
    ///
    /// For [`Side::Leading`] this is `value > threshold`, for
    /// [`Side::Trailing`] it is `value < -threshold`.
    #[must_use]
    pub fn is_past(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Leading => value > threshold,
            Self::Trailing => value < -threshold,
        }
    }
}

/// Absolute value without relying on `std` float intrinsics.
pub(crate) fn magnitude(value: f64) -> f64 {
    if value < 0.0 { -value } else { value }
}
