// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for `SwipeController` invariants.
//!
//! Random gesture scripts (drag updates, releases, external closes, taps) are
//! replayed against a row and the invariants are checked after every step.

use std::rc::Rc;

use proptest::prelude::*;
use understory_swipe::{
    ActionGroup, ActionItem, ActiveRow, ActiveRowObserver, ManualScheduler, RowConfig,
    SharedActiveRow, Side, SwipeContext, SwipeController, SwipePhase, SwipeSettings,
};

const CELL_WIDTH: f64 = 375.0;

#[derive(Clone, Debug)]
enum Step {
    Drag(f64),
    Release,
    OtherRowActive,
    Tap(Side, usize),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (-400.0..400.0_f64).prop_map(Step::Drag),
        2 => Just(Step::Release),
        1 => Just(Step::OtherRowActive),
        1 => (prop_oneof![Just(Side::Leading), Just(Side::Trailing)], 0..3_usize)
            .prop_map(|(side, index)| Step::Tap(side, index)),
    ]
}

#[derive(Clone, Copy, Debug)]
struct GroupShape {
    buttons: usize,
    width: f64,
    swipe_out: bool,
    destructive: bool,
}

fn arb_group() -> impl Strategy<Value = GroupShape> {
    (0..3_usize, 40.0..120.0_f64, any::<bool>(), any::<bool>()).prop_map(
        |(buttons, width, swipe_out, destructive)| GroupShape {
            buttons,
            width,
            swipe_out,
            destructive,
        },
    )
}

fn build_group(shape: GroupShape) -> ActionGroup<usize> {
    (0..shape.buttons)
        .map(|idx| {
            let item = ActionItem::new(idx, (), shape.width, || {});
            match (idx == 0 && shape.swipe_out, shape.destructive) {
                (true, true) => item.destructive(),
                (true, false) => item.swipe_out(),
                _ => item,
            }
        })
        .collect()
}

fn build_row(
    leading: GroupShape,
    trailing: GroupShape,
    trigger: f64,
) -> (SwipeController<u32, usize>, Rc<SharedActiveRow<u32>>) {
    let active = Rc::new(SharedActiveRow::new());
    let ctx = SwipeContext::new(active.clone(), Rc::new(ManualScheduler::new()), Rc::new(()));
    let config = RowConfig::new(1, CELL_WIDTH)
        .with_leading(build_group(leading))
        .with_trailing(build_group(trailing))
        .with_settings(SwipeSettings::new(trigger));
    (SwipeController::new(config, ctx).unwrap(), active)
}

fn apply(row: &mut SwipeController<u32, usize>, active: &SharedActiveRow<u32>, step: &Step) {
    match *step {
        Step::Drag(dx) => row.on_drag_change(dx),
        Step::Release => row.on_drag_end(),
        Step::OtherRowActive => {
            active.set_active(Some(2));
            row.notify_active_row_changed(Some(&2));
        }
        Step::Tap(side, index) => {
            row.tap_action(side, index);
        }
    }
}

proptest! {
    #[test]
    fn locked_side_never_disagrees_with_offset(
        leading in arb_group(),
        trailing in arb_group(),
        trigger in 20.0..150.0_f64,
        steps in prop::collection::vec(arb_step(), 1..40),
    ) {
        let (mut row, active) = build_row(leading, trailing, trigger);
        for step in &steps {
            apply(&mut row, &active, step);
            let state = row.state();
            match Side::of_offset(state.offset) {
                Some(Side::Leading) => prop_assert_ne!(state.locked_side, Some(Side::Trailing)),
                Some(Side::Trailing) => prop_assert_ne!(state.locked_side, Some(Side::Leading)),
                None => {}
            }
        }
    }

    #[test]
    fn released_rows_rest_within_bounds(
        leading in arb_group(),
        trailing in arb_group(),
        trigger in 20.0..150.0_f64,
        steps in prop::collection::vec(arb_step(), 1..40),
    ) {
        let (mut row, active) = build_row(leading, trailing, trigger);
        for step in &steps {
            apply(&mut row, &active, step);
        }
        row.on_drag_end();
        let offset = row.offset();
        prop_assert!(offset.abs() <= CELL_WIDTH + 10.0);
        match row.phase() {
            SwipePhase::Closed => prop_assert_eq!(offset, 0.0),
            SwipePhase::LockedOpen(side) => {
                let width = row.menu_width(side).unwrap();
                prop_assert_eq!(offset, side.sign() * width);
            }
            SwipePhase::SwipedOut(side) => {
                prop_assert_eq!(offset, side.sign() * (CELL_WIDTH + 10.0));
            }
            SwipePhase::Dragging => prop_assert!(false, "released row still dragging"),
        }
    }

    #[test]
    fn disabled_side_never_opens_from_rest(
        enabled in arb_group().prop_filter("needs buttons", |g| g.buttons > 0),
        drags in prop::collection::vec(0.0..400.0_f64, 1..20),
    ) {
        let empty = GroupShape { buttons: 0, width: 50.0, swipe_out: false, destructive: false };
        let (mut row, active) = build_row(empty, enabled, 60.0);
        for dx in drags {
            row.on_drag_change(dx);
            prop_assert_eq!(row.offset(), 0.0);
        }
        row.on_drag_end();
        prop_assert_eq!(row.offset(), 0.0);
        prop_assert_eq!(active.active(), None);
    }

    #[test]
    fn closing_twice_matches_closing_once(
        leading in arb_group(),
        trailing in arb_group(),
        steps in prop::collection::vec(arb_step(), 0..20),
    ) {
        let (mut row, active) = build_row(leading, trailing, 60.0);
        for step in &steps {
            apply(&mut row, &active, step);
        }
        row.on_drag_end();
        prop_assume!(!matches!(row.phase(), SwipePhase::SwipedOut(_)));
        row.snap_to(0.0);
        let once = row.state();
        let active_once = active.active();
        row.snap_to(0.0);
        prop_assert_eq!(row.state(), once);
        prop_assert_eq!(active.active(), active_once);
        prop_assert_eq!(once.locked_side, None);
        prop_assert!(!once.positive_feedback_fired);
        prop_assert!(!once.negative_feedback_fired);
        prop_assert_ne!(active_once, Some(1));
    }
}
