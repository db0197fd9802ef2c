use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use glide_motion::{
    Curve, Easing, FrameScheduler, ManualScheduler, RealtimeScheduler, Transition,
    TransitionOptions, TransitionState,
};

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Change(f64),
    Ended,
}

fn observe<S: FrameScheduler>(transition: &mut Transition<S>) -> Rc<RefCell<Vec<Seen>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let changes = Rc::clone(&log);
    transition.on_change(move |p| changes.borrow_mut().push(Seen::Change(p)));
    let ends = Rc::clone(&log);
    transition.on_ended(move || ends.borrow_mut().push(Seen::Ended));
    log
}

fn progress(log: &[Seen]) -> Vec<f64> {
    log.iter()
        .filter_map(|s| match s {
            Seen::Change(p) => Some(*p),
            Seen::Ended => None,
        })
        .collect()
}

#[test]
fn non_looping_run_is_monotonic_and_ends_once() {
    let options = TransitionOptions::default()
        .with_ease(Easing::CubicOut)
        .with_duration(300.0);
    let mut transition = Transition::new(options, ManualScheduler::new());
    let log = observe(&mut transition);

    transition.run(None, None);
    transition.advance_until(f64::INFINITY);

    let log = log.borrow();
    let values = progress(&log);
    assert!(values.len() >= 17, "expected ~18 frames, got {}", values.len());
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
    assert_eq!(values.last().copied(), Some(1.0));

    let ended: Vec<usize> = log
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == Seen::Ended)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(ended, vec![log.len() - 1], "exactly one ended, after the last change");
    assert_eq!(transition.state(), TransitionState::Idle);
}

#[test]
fn paused_time_is_excluded_from_progress() {
    let linear = || {
        TransitionOptions::default()
            .with_ease(Curve::linear())
            .with_duration(1000.0)
    };

    let mut paused = Transition::new(linear(), ManualScheduler::new());
    let paused_log = observe(&mut paused);
    paused.run(None, None);
    paused.advance_until(400.0);
    paused.pause();
    assert!((paused.elapsed_ms() - 400.0).abs() < 1e-9);

    paused.advance_by(5000.0);
    assert!(paused_log.borrow().len() < 25, "no frames while paused");
    paused.play();
    let before = paused_log.borrow().len();
    let interval = paused.scheduler().frame_interval();
    paused.advance_by(1.5 * interval);
    let resumed = progress(&paused_log.borrow()[before..]);
    assert_eq!(resumed.len(), 1);

    // An uninterrupted run one frame past 400ms.
    let mut steady = Transition::new(linear(), ManualScheduler::new());
    let steady_log = observe(&mut steady);
    steady.run(None, None);
    steady.advance_until(400.0 + 1.5 * interval);
    let expected = progress(&steady_log.borrow()).last().copied().unwrap_or_default();

    assert!(
        (resumed[0] - expected).abs() < 1e-9,
        "resumed at {}, uninterrupted at {}",
        resumed[0],
        expected
    );
    assert!(resumed[0] < 0.5);
}

#[test]
fn looping_never_ends_and_restarts_near_zero() {
    let options = TransitionOptions::default()
        .with_ease(Curve::linear())
        .with_duration(500.0)
        .with_looping(true);
    let mut transition = Transition::new(options, ManualScheduler::new());
    let log = observe(&mut transition);

    transition.run(None, None);
    transition.advance_until(1600.0);

    let log = log.borrow();
    assert!(!log.contains(&Seen::Ended));
    assert!(transition.is_running());

    let values = progress(&log);
    let restarts: Vec<f64> = values
        .windows(2)
        .filter(|w| w[1] < w[0])
        .map(|w| w[1])
        .collect();
    assert!(restarts.len() >= 3, "expected 3 cycle boundaries, got {restarts:?}");
    assert!(restarts.iter().all(|p| *p < 0.1), "{restarts:?}");
}

#[test]
fn pausing_a_loop_stops_it() {
    let options = TransitionOptions::default()
        .with_duration(200.0)
        .with_looping(true);
    let mut transition = Transition::new(options, ManualScheduler::new());
    let log = observe(&mut transition);
    transition.run(None, None);
    transition.advance_by(450.0);
    transition.pause();

    let count = log.borrow().len();
    assert_eq!(transition.advance_until(f64::INFINITY), 0);
    assert_eq!(log.borrow().len(), count);
    assert_eq!(transition.state(), TransitionState::Paused);
}

#[test]
fn pause_after_end_is_a_noop() {
    let mut transition = Transition::new(
        TransitionOptions::default().with_duration(100.0),
        ManualScheduler::new(),
    );
    let log = observe(&mut transition);
    transition.run(None, None);
    transition.advance_until(f64::INFINITY);
    transition.pause();
    transition.play();

    assert_eq!(transition.state(), TransitionState::Idle);
    let ends = log.borrow().iter().filter(|s| **s == Seen::Ended).count();
    assert_eq!(ends, 1);
}

#[test]
fn transition_is_reusable_after_ending() {
    let mut transition = Transition::new(
        TransitionOptions::default().with_duration(50.0),
        ManualScheduler::new(),
    );
    let log = observe(&mut transition);
    for _ in 0..2 {
        transition.run(None, None);
        transition.advance_until(f64::INFINITY);
    }
    let ends = log.borrow().iter().filter(|s| **s == Seen::Ended).count();
    assert_eq!(ends, 2);
}

#[test]
fn reversed_curve_drives_the_out_direction() -> Result<()> {
    let ease = Curve::cubic_bezier(0.42, 0.0, 1.0, 1.0)?;
    let out = TransitionOptions::default()
        .with_ease(ease.reversed())
        .with_duration(100.0);
    let mut transition = Transition::new(out, ManualScheduler::with_frame_interval(25.0));
    let log = observe(&mut transition);
    transition.run(None, None);
    transition.advance_until(f64::INFINITY);

    let values = progress(&log.borrow());
    assert_eq!(values.len(), 4);
    // The reversed ease-in starts fast.
    assert!(values[0] > 0.25);
    assert!((values[0] - (1.0 - ease.ease(0.75))).abs() < 1e-12);
    Ok(())
}

#[test]
fn realtime_scheduler_runs_to_completion() {
    let options = TransitionOptions::default()
        .with_ease(Easing::Linear)
        .with_duration(30.0);
    let mut transition = Transition::new(options, RealtimeScheduler::with_frame_rate(200.0));
    let log = observe(&mut transition);
    transition.run(None, Some(5.0));
    transition.advance_until(f64::INFINITY);

    let log = log.borrow();
    assert_eq!(log.last(), Some(&Seen::Ended));
    assert_eq!(progress(&log).last().copied(), Some(1.0));
    assert!(!transition.is_running());
}
