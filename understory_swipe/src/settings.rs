// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold settings and snap transitions.

use core::time::Duration;

use crate::error::{SwipeConfigError, is_non_negative, is_positive};

/// Distance and timing thresholds for a swipeable row.
///
/// All distances are in the same units as drag translations (typically logical
/// pixels). The defaults reproduce the stock swipe-cell behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeSettings {
    /// Distance beyond which a released drag commits to opening a side.
    pub open_trigger_value: f64,
    /// Distance beyond which a released drag triggers the side's swipe-out item.
    ///
    /// `None` uses [`SwipeSettings::open_trigger_value`].
    pub swipe_out_trigger_value: Option<f64>,
    /// Extra width handed to buttons as they are revealed.
    pub add_width_margin: f64,
    /// Translations at or below this magnitude leave a closed row closed.
    pub dead_zone: f64,
    /// Fraction of the menu width a locked row must stay open by on release.
    pub lock_close_ratio: f64,
    /// How far past the cell width a destructive swipe-out flies.
    pub swipe_out_overshoot: f64,
    /// Offset magnitude above which a side's reveal area becomes visible.
    pub reveal_threshold: f64,
    /// Duration of snap transitions.
    pub snap_duration: Duration,
    /// Delay between triggering an action and invoking its callback.
    pub action_delay: Duration,
}

impl SwipeSettings {
    /// Creates settings with the given open trigger and default everything else.
    #[must_use]
    pub fn new(open_trigger_value: f64) -> Self {
        Self {
            open_trigger_value,
            ..Self::default()
        }
    }

    /// Sets [`SwipeSettings::open_trigger_value`].
    #[must_use]
    pub fn with_open_trigger_value(mut self, value: f64) -> Self {
        self.open_trigger_value = value;
        self
    }

    /// Sets a swipe-out trigger distinct from the open trigger.
    #[must_use]
    pub fn with_swipe_out_trigger_value(mut self, value: f64) -> Self {
        self.swipe_out_trigger_value = Some(value);
        self
    }

    /// Sets [`SwipeSettings::add_width_margin`].
    #[must_use]
    pub fn with_add_width_margin(mut self, value: f64) -> Self {
        self.add_width_margin = value;
        self
    }

    /// Sets [`SwipeSettings::dead_zone`].
    #[must_use]
    pub fn with_dead_zone(mut self, value: f64) -> Self {
        self.dead_zone = value;
        self
    }

    /// Sets [`SwipeSettings::lock_close_ratio`].
    #[must_use]
    pub fn with_lock_close_ratio(mut self, value: f64) -> Self {
        self.lock_close_ratio = value;
        self
    }

    /// Sets [`SwipeSettings::snap_duration`].
    #[must_use]
    pub fn with_snap_duration(mut self, value: Duration) -> Self {
        self.snap_duration = value;
        self
    }

    /// Sets [`SwipeSettings::action_delay`].
    #[must_use]
    pub fn with_action_delay(mut self, value: Duration) -> Self {
        self.action_delay = value;
        self
    }

    /// Returns the effective swipe-out trigger distance.
    #[must_use]
    pub fn swipe_out_trigger(&self) -> f64 {
        self.swipe_out_trigger_value
            .unwrap_or(self.open_trigger_value)
    }

    /// Returns the transition used for snaps.
    #[must_use]
    pub fn snap_transition(&self) -> Transition {
        Transition::ease_out(self.snap_duration)
    }

    /// Checks every setting.
    pub fn validate(&self) -> Result<(), SwipeConfigError> {
        if !is_positive(self.open_trigger_value) {
            return Err(SwipeConfigError::InvalidOpenTrigger(
                self.open_trigger_value,
            ));
        }
        if let Some(value) = self.swipe_out_trigger_value
            && !(value.is_finite() && value >= self.open_trigger_value)
        {
            return Err(SwipeConfigError::InvalidSwipeOutTrigger {
                value,
                open: self.open_trigger_value,
            });
        }
        if !is_non_negative(self.add_width_margin) {
            return Err(SwipeConfigError::InvalidWidthMargin(self.add_width_margin));
        }
        if !(is_positive(self.lock_close_ratio) && self.lock_close_ratio <= 1.0) {
            return Err(SwipeConfigError::InvalidLockCloseRatio(
                self.lock_close_ratio,
            ));
        }
        for (name, value) in [
            ("dead zone", self.dead_zone),
            ("swipe-out overshoot", self.swipe_out_overshoot),
            ("reveal threshold", self.reveal_threshold),
        ] {
            if !is_non_negative(value) {
                return Err(SwipeConfigError::InvalidDistance { name, value });
            }
        }
        Ok(())
    }
}

impl Default for SwipeSettings {
    fn default() -> Self {
        Self {
            open_trigger_value: 60.0,
            swipe_out_trigger_value: None,
            add_width_margin: 5.0,
            dead_zone: 8.0,
            lock_close_ratio: 0.8,
            swipe_out_overshoot: 10.0,
            reveal_threshold: 5.0,
            snap_duration: Duration::from_millis(200),
            action_delay: Duration::from_millis(300),
        }
    }
}

/// Progress curve for a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Curve {
    /// Constant speed.
    Linear,
    /// Quadratic ease-out: starts fast, decelerates.
    #[default]
    EaseOut,
}

impl Curve {
    /// Maps linear progress in `[0, 1]` to eased progress.
    ///
    /// Input outside the unit interval is clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// How the host should animate a change of row offset.
///
/// The controller decides targets; executing the tween is up to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Total duration of the transition.
    pub duration: Duration,
    /// Progress curve.
    pub curve: Curve,
}

impl Transition {
    /// A decelerating transition of the given duration.
    #[must_use]
    pub const fn ease_out(duration: Duration) -> Self {
        Self {
            duration,
            curve: Curve::EaseOut,
        }
    }

    /// Interpolates between `from` and `to` after `elapsed` time.
    ///
    /// Zero-length transitions land on `to` immediately.
    #[must_use]
    pub fn sample(&self, from: f64, to: f64, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        from + (to - from) * self.curve.apply(t)
    }
}
