use cliptrim_editor::{PlaybackState, TickOutcome, TrimController};
use proptest::prelude::*;

fn controller(total: f64, start: f64, end: f64) -> TrimController {
    let mut ctrl = TrimController::new();
    assert!(ctrl.load_source(total));
    assert!(ctrl.set_end_marker(end));
    assert!(ctrl.set_start_marker(start));
    ctrl
}

/// `(total, start, end)` with `0 <= start < end <= total`.
fn valid_range() -> impl Strategy<Value = (f64, f64, f64)> {
    (1.0f64..600.0)
        .prop_flat_map(|total| (Just(total), 0.0..(total - 0.01)))
        .prop_flat_map(|(total, start)| (Just(total), Just(start), (start + 0.005)..=total))
}

#[derive(Debug, Clone)]
enum Op {
    Start(f64),
    End(f64),
    Tick(f64),
    Toggle,
    Seek(f64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-50.0f64..700.0).prop_map(Op::Start),
        (-50.0f64..700.0).prop_map(Op::End),
        (-50.0f64..700.0).prop_map(Op::Tick),
        Just(Op::Toggle),
        (-50.0f64..700.0).prop_map(Op::Seek),
    ]
}

proptest! {
    #[test]
    fn valid_markers_are_accepted((total, start, end) in valid_range()) {
        let ctrl = controller(total, start, end);
        prop_assert_eq!(ctrl.start_marker(), start);
        prop_assert_eq!(ctrl.end_marker(), end);
    }

    #[test]
    fn start_at_or_past_end_is_a_no_op(
        (total, start, end) in valid_range(),
        offset in 0.0f64..100.0,
    ) {
        let mut ctrl = controller(total, start, end);
        let before = ctrl.clone();
        prop_assert!(!ctrl.set_start_marker(end + offset));
        prop_assert_eq!(ctrl, before);
    }

    #[test]
    fn end_outside_range_is_a_no_op(
        (total, start, end) in valid_range(),
        below in 0.0f64..100.0,
        above in 1e-6f64..100.0,
    ) {
        let mut ctrl = controller(total, start, end);
        let before = ctrl.clone();
        prop_assert!(!ctrl.set_end_marker(start - below));
        prop_assert!(!ctrl.set_end_marker(total + above));
        prop_assert_eq!(ctrl, before);
    }

    #[test]
    fn tick_at_or_past_end_rewinds_and_stops(
        (total, start, end) in valid_range(),
        overshoot in 0.0f64..50.0,
    ) {
        let mut ctrl = controller(total, start, end);
        ctrl.toggle_playback();
        prop_assert_eq!(ctrl.advance_playhead(end + overshoot), TickOutcome::ReachedEnd);
        prop_assert_eq!(ctrl.playhead(), start);
        prop_assert_eq!(ctrl.playback_state(), PlaybackState::Paused);
    }

    #[test]
    fn resume_from_end_restarts_at_start(
        (total, start, end) in valid_range(),
        past in 0.0f64..1.0,
    ) {
        let mut ctrl = controller(total, start, end);
        ctrl.seek(end + past * (total - end));
        if ctrl.playhead() >= end {
            prop_assert_eq!(ctrl.toggle_playback(), PlaybackState::Playing);
            prop_assert_eq!(ctrl.playhead(), start);
        }
    }

    #[test]
    fn invariants_hold_under_any_op_sequence(
        (total, start, end) in valid_range(),
        ops in prop::collection::vec(op(), 0..64),
    ) {
        let mut ctrl = controller(total, start, end);
        for op in ops {
            match op {
                Op::Start(t) => { ctrl.set_start_marker(t); }
                Op::End(t) => { ctrl.set_end_marker(t); }
                Op::Tick(t) => { ctrl.advance_playhead(t); }
                Op::Toggle => { ctrl.toggle_playback(); }
                Op::Seek(t) => ctrl.seek(t),
            }
            prop_assert!(ctrl.start_marker() >= 0.0);
            prop_assert!(ctrl.start_marker() < ctrl.end_marker());
            prop_assert!(ctrl.end_marker() <= ctrl.total_duration());
            prop_assert!(ctrl.playhead() >= 0.0);
            prop_assert!(ctrl.playhead() <= ctrl.total_duration());
        }
    }
}
