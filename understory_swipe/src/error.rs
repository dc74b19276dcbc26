// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Side;

/// Rejected row configuration.
///
/// Configuration is validated once, when a [`SwipeController`](crate::SwipeController)
/// is built. Event handling never fails.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum SwipeConfigError {
    /// The open trigger must be finite and strictly positive.
    #[error("open trigger value must be finite and > 0, got {0}")]
    InvalidOpenTrigger(f64),
    /// A separate swipe-out trigger must be finite and not below the open trigger.
    #[error("swipe-out trigger value must be finite and >= the open trigger ({open}), got {value}")]
    InvalidSwipeOutTrigger {
        /// The configured swipe-out trigger.
        value: f64,
        /// The configured open trigger.
        open: f64,
    },
    /// The extra width margin must be finite and non-negative.
    #[error("add width margin must be finite and >= 0, got {0}")]
    InvalidWidthMargin(f64),
    /// The close ratio for locked rows must lie in `(0, 1]`.
    #[error("lock close ratio must lie in (0, 1], got {0}")]
    InvalidLockCloseRatio(f64),
    /// Distances such as the dead zone or overshoot must be finite and non-negative.
    #[error("{name} must be finite and >= 0, got {value}")]
    InvalidDistance {
        /// Which setting was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The row width must be finite and strictly positive.
    #[error("cell width must be finite and > 0, got {0}")]
    InvalidCellWidth(f64),
    /// Every action button needs a finite, strictly positive width.
    #[error("button {index} on the {side:?} side has invalid width {width}")]
    InvalidButtonWidth {
        /// The group the item belongs to.
        side: Side,
        /// Position of the item within its group.
        index: usize,
        /// The rejected width.
        width: f64,
    },
}

/// Returns `true` for finite values strictly greater than zero.
pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Returns `true` for finite values greater than or equal to zero.
pub(crate) fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
