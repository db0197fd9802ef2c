//! Frame-driven transition engine.
//!
//! A [`Transition`] turns scheduler time into eased progress:
//! - `run` starts (or restarts) a run, optionally after a delay
//! - every frame computes `fraction = (now - start + diff) / duration`,
//!   clamps it to 1, eases it and reports it to the `change` handler
//! - at `fraction == 1` a looping transition restarts immediately, a
//!   non-looping one stops and reports `ended` once
//! - `pause` folds the elapsed time into `diff` and stops frames; `play`
//!   restarts frames from now so progress continues where it left off
//!
//! # Example
//!
//! ```
//! use glide_motion::easing::Easing;
//! use glide_motion::scheduler::ManualScheduler;
//! use glide_motion::transition::{Transition, TransitionOptions};
//!
//! let options = TransitionOptions::default()
//!     .with_ease(Easing::CubicOut)
//!     .with_duration(300.0);
//! let mut transition = Transition::new(options, ManualScheduler::new());
//! transition.on_change(|progress| assert!((0.0..=1.0).contains(&progress)));
//! transition.run(None, None);
//! transition.advance_by(1000.0);
//! assert!(!transition.is_running());
//! ```

use tracing::{debug, trace};

use crate::easing::Curve;
use crate::events::{EventSlots, Handler};
use crate::scheduler::{FrameScheduler, Ticket, Wake, WakeKind};
use crate::types::TransitionState;

/// Duration used when none is configured.
pub const DEFAULT_DURATION_MS: f64 = 800.0;

/// Construction-time configuration of a transition.
#[derive(Debug, Clone)]
pub struct TransitionOptions {
    /// Curve applied to the linear time fraction.
    pub ease: Curve,
    /// Length of one run in milliseconds.
    pub duration_ms: f64,
    /// Wait before the first frame in milliseconds.
    pub delay_ms: f64,
    /// Restart on completion instead of ending.
    pub looping: bool,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            ease: Curve::default(),
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: 0.0,
            looping: false,
        }
    }
}

impl TransitionOptions {
    /// Set the easing curve.
    pub fn with_ease(mut self, ease: impl Into<Curve>) -> Self {
        self.ease = ease.into();
        self
    }

    /// Set the duration.
    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the start delay.
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Enable or disable looping.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }
}

/// One animated progress value.
///
/// Owns its scheduler; wake-ups the scheduler produces are fed back through
/// [`Transition::dispatch`], or pumped with [`Transition::advance_until`].
#[derive(Debug)]
pub struct Transition<S: FrameScheduler> {
    options: TransitionOptions,
    scheduler: S,
    handlers: EventSlots,
    /// Clock time the current stretch of frames started at.
    start: f64,
    /// Elapsed time carried over from before the last pause.
    diff: f64,
    running: bool,
    paused: bool,
    /// Cycles completed since the last `run`.
    cycles: u32,
    /// The one wake-up this transition is waiting on.
    pending: Option<Ticket>,
}

impl<S: FrameScheduler> Transition<S> {
    /// Create an idle transition.
    pub fn new(options: TransitionOptions, scheduler: S) -> Self {
        Self {
            options,
            scheduler,
            handlers: EventSlots::default(),
            start: 0.0,
            diff: 0.0,
            running: false,
            paused: false,
            cycles: 0,
            pending: None,
        }
    }

    /// Install a handler, replacing any earlier one of the same kind.
    pub fn on(&mut self, handler: Handler) {
        let kind = handler.kind();
        if self.handlers.set(handler) {
            trace!(%kind, "replaced transition handler");
        }
    }

    /// Shorthand for `on(Handler::change(f))`.
    pub fn on_change<F>(&mut self, f: F)
    where
        F: FnMut(f64) + 'static,
    {
        self.on(Handler::change(f));
    }

    /// Shorthand for `on(Handler::ended(f))`.
    pub fn on_ended<F>(&mut self, f: F)
    where
        F: FnMut() + 'static,
    {
        self.on(Handler::ended(f));
    }

    /// Start or restart a run.
    ///
    /// A supplied `duration_ms` or `delay_ms` replaces the stored value for
    /// this and later runs. Any in-flight run or pending delay is discarded
    /// and elapsed time starts again from zero.
    pub fn run(&mut self, duration_ms: Option<f64>, delay_ms: Option<f64>) {
        if let Some(duration) = duration_ms {
            self.options.duration_ms = duration;
        }
        if let Some(delay) = delay_ms {
            self.options.delay_ms = delay;
        }

        self.cancel_pending();
        self.diff = 0.0;
        self.paused = false;
        self.running = false;
        self.cycles = 0;

        let delay = self.options.delay_ms;
        debug!(
            duration_ms = self.options.duration_ms,
            delay_ms = delay,
            looping = self.options.looping,
            "transition run"
        );
        if delay > 0.0 {
            self.pending = Some(self.scheduler.set_timeout(delay));
        } else {
            self.init();
        }
    }

    /// Suspend a running transition, keeping its elapsed time.
    pub fn pause(&mut self) {
        if !self.running || self.paused {
            trace!(running = self.running, "pause ignored");
            return;
        }
        self.paused = true;
        self.diff += self.scheduler.now() - self.start;
        self.cancel_pending();
        trace!(elapsed_ms = self.diff, "transition paused");
    }

    /// Resume a paused transition from where it was paused.
    pub fn play(&mut self) {
        if !self.running || !self.paused {
            trace!(running = self.running, "play ignored");
            return;
        }
        self.paused = false;
        trace!(elapsed_ms = self.diff, "transition resumed");
        self.init();
    }

    /// Deliver a wake-up produced by this transition's scheduler.
    ///
    /// Wake-ups this transition is no longer waiting on are ignored.
    pub fn dispatch(&mut self, wake: Wake) {
        if self.pending != Some(wake.ticket) {
            trace!(?wake.ticket, "stale wake ignored");
            return;
        }
        self.pending = None;
        match wake.kind {
            WakeKind::Timeout => self.init(),
            WakeKind::Frame => self.frame(wake.time),
        }
    }

    /// Deliver every wake-up due up to `deadline` (scheduler ms), in order.
    ///
    /// Returns the number of wake-ups delivered. With an unbounded deadline
    /// this returns once nothing is pending, which a looping transition
    /// never reaches.
    pub fn advance_until(&mut self, deadline: f64) -> usize {
        let mut delivered = 0;
        while let Some(wake) = self.scheduler.next_wake(deadline) {
            self.dispatch(wake);
            delivered += 1;
        }
        delivered
    }

    /// Deliver every wake-up due within the next `ms` milliseconds.
    pub fn advance_by(&mut self, ms: f64) -> usize {
        let deadline = self.scheduler.now() + ms;
        self.advance_until(deadline)
    }

    /// Whether a run has started and not yet ended (paused included).
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the current run is suspended.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The lifecycle state.
    pub fn state(&self) -> TransitionState {
        match (self.running, self.paused) {
            (true, true) => TransitionState::Paused,
            (true, false) => TransitionState::Running,
            (false, _) if self.pending.is_some() => TransitionState::Scheduled,
            (false, _) => TransitionState::Idle,
        }
    }

    /// Elapsed run time in ms, excluding paused stretches.
    pub fn elapsed_ms(&self) -> f64 {
        let state = self.state();
        if state.is_paused() {
            self.diff
        } else if state.is_running() {
            self.scheduler.now() - self.start + self.diff
        } else {
            0.0
        }
    }

    /// Cycles that reached full progress since the last `run`. A looping
    /// transition counts each restart; a non-looping one counts its end.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn options(&self) -> &TransitionOptions {
        &self.options
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn init(&mut self) {
        self.start = self.scheduler.now();
        self.running = true;
        self.pending = Some(self.scheduler.request_frame());
    }

    fn frame(&mut self, time: f64) {
        if self.paused {
            return;
        }

        let duration = self.options.duration_ms;
        let fraction = if duration > 0.0 {
            ((time - self.start + self.diff) / duration).min(1.0)
        } else {
            1.0
        };
        let progress = self.options.ease.ease(fraction);
        self.handlers.emit_change(progress);

        if fraction < 1.0 {
            self.pending = Some(self.scheduler.request_frame());
            return;
        }
        self.cycles = self.cycles.saturating_add(1);
        if self.options.looping {
            debug!(cycles = self.cycles, "transition loop restart");
            self.diff = 0.0;
            self.init();
        } else {
            debug!("transition ended");
            self.running = false;
            self.handlers.emit_ended();
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(ticket) = self.pending.take() {
            self.scheduler.cancel(ticket);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::scheduler::ManualScheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn linear(duration: f64) -> Transition<ManualScheduler> {
        let options = TransitionOptions::default()
            .with_ease(Curve::linear())
            .with_duration(duration);
        Transition::new(options, ManualScheduler::with_frame_interval(10.0))
    }

    fn record(transition: &mut Transition<ManualScheduler>) -> Rc<RefCell<Vec<f64>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        transition.on_change(move |p| sink.borrow_mut().push(p));
        seen
    }

    #[test]
    fn test_options_defaults() {
        let options = TransitionOptions::default();
        assert_eq!(options.duration_ms, 800.0);
        assert_eq!(options.delay_ms, 0.0);
        assert!(!options.looping);
        assert_eq!(options.ease.ease(0.5), Easing::EaseIn.apply(0.5));
    }

    #[test]
    fn test_first_frame_is_one_interval_in() {
        let mut transition = linear(100.0);
        let seen = record(&mut transition);
        transition.run(None, None);
        assert_eq!(transition.state(), TransitionState::Running);
        assert!(seen.borrow().is_empty(), "no change before the first frame");

        transition.advance_by(10.0);
        assert_eq!(*seen.borrow(), vec![0.1]);
    }

    #[test]
    fn test_run_to_completion() {
        let mut transition = linear(100.0);
        let seen = record(&mut transition);
        transition.run(None, None);
        transition.advance_by(1000.0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 10);
        assert_eq!(*seen.last().unwrap(), 1.0);
        assert_eq!(transition.state(), TransitionState::Idle);
        assert_eq!(transition.scheduler().pending(), 0);
    }

    #[test]
    fn test_delay_schedules_then_runs() {
        let mut transition = linear(100.0);
        let seen = record(&mut transition);
        transition.run(None, Some(50.0));
        assert_eq!(transition.state(), TransitionState::Scheduled);
        assert!(!transition.is_running());

        transition.advance_by(50.0);
        assert_eq!(transition.state(), TransitionState::Running);
        assert!(seen.borrow().is_empty());

        transition.advance_by(10.0);
        assert_eq!(*seen.borrow(), vec![0.1]);
    }

    #[test]
    fn test_run_overrides_persist() {
        let mut transition = linear(100.0);
        transition.run(Some(200.0), Some(5.0));
        assert_eq!(transition.options().duration_ms, 200.0);
        assert_eq!(transition.options().delay_ms, 5.0);

        transition.run(None, None);
        assert_eq!(transition.options().duration_ms, 200.0);
        assert_eq!(transition.options().delay_ms, 5.0);
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let mut transition = linear(0.0);
        let seen = record(&mut transition);
        let ended = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&ended);
        transition.on_ended(move || *counter.borrow_mut() += 1);

        transition.run(None, None);
        transition.advance_by(10.0);
        assert_eq!(*seen.borrow(), vec![1.0]);
        assert_eq!(*ended.borrow(), 1);
        assert!(!transition.is_running());
    }

    #[test]
    fn test_negative_duration_completes_on_first_frame() {
        let mut transition = linear(-5.0);
        let seen = record(&mut transition);
        transition.run(None, None);
        transition.advance_by(10.0);
        assert_eq!(*seen.borrow(), vec![1.0]);
    }

    #[test]
    fn test_play_and_pause_before_run_are_noops() {
        let mut transition = linear(100.0);
        transition.play();
        transition.pause();
        assert_eq!(transition.state(), TransitionState::Idle);
        assert_eq!(transition.scheduler().pending(), 0);
    }

    #[test]
    fn test_pause_during_delay_is_noop() {
        let mut transition = linear(100.0);
        transition.run(None, Some(30.0));
        transition.pause();
        assert_eq!(transition.state(), TransitionState::Scheduled);
        transition.advance_by(30.0);
        assert_eq!(transition.state(), TransitionState::Running);
    }

    #[test]
    fn test_pause_cancels_frame_and_keeps_elapsed() {
        let mut transition = linear(100.0);
        let seen = record(&mut transition);
        transition.run(None, None);
        transition.advance_by(45.0);
        transition.pause();

        assert!(transition.is_paused());
        assert!(transition.is_running());
        assert_eq!(transition.elapsed_ms(), 45.0);
        assert_eq!(transition.scheduler().pending(), 0);

        let frames = seen.borrow().len();
        transition.advance_by(500.0);
        assert_eq!(seen.borrow().len(), frames);
        assert_eq!(transition.elapsed_ms(), 45.0);
    }

    #[test]
    fn test_double_pause_does_not_double_count() {
        let mut transition = linear(100.0);
        transition.run(None, None);
        transition.advance_by(30.0);
        transition.pause();
        transition.advance_by(100.0);
        transition.pause();
        assert_eq!(transition.elapsed_ms(), 30.0);
    }

    #[test]
    fn test_play_while_running_is_noop() {
        let mut transition = linear(100.0);
        let seen = record(&mut transition);
        transition.run(None, None);
        transition.advance_by(30.0);
        transition.play();
        transition.advance_by(10.0);
        assert_eq!(seen.borrow().last().copied(), Some(0.4));
    }

    #[test]
    fn test_restart_discards_in_flight_run() {
        let mut transition = linear(100.0);
        let seen = record(&mut transition);
        transition.run(None, None);
        transition.advance_by(50.0);
        transition.run(None, None);
        assert_eq!(transition.scheduler().pending(), 1);

        transition.advance_by(10.0);
        assert_eq!(seen.borrow().last().copied(), Some(0.1));
    }

    #[test]
    fn test_stale_wake_is_ignored() {
        let mut transition = linear(100.0);
        let seen = record(&mut transition);
        transition.run(None, None);
        let stale = Wake {
            ticket: transition.scheduler_mut().request_frame(),
            kind: WakeKind::Frame,
            time: 5.0,
        };
        transition.dispatch(stale);
        assert!(seen.borrow().is_empty());
        assert_eq!(transition.state(), TransitionState::Running);
    }

    #[test]
    fn test_last_change_handler_wins() {
        let mut transition = linear(100.0);
        let first = record(&mut transition);
        let second = record(&mut transition);
        transition.run(None, None);
        transition.advance_by(20.0);

        assert!(first.borrow().is_empty());
        assert_eq!(*second.borrow(), vec![0.1, 0.2]);
    }

    #[test]
    fn test_cycles_count_loop_restarts() {
        let mut transition = linear(100.0);
        transition.run(None, None);
        transition.advance_by(250.0);
        assert_eq!(transition.cycles(), 1);

        let mut looping = Transition::new(
            TransitionOptions::default()
                .with_ease(Curve::linear())
                .with_duration(100.0)
                .with_looping(true),
            ManualScheduler::with_frame_interval(10.0),
        );
        looping.run(None, None);
        looping.advance_by(250.0);
        assert_eq!(looping.cycles(), 2);
        assert!(looping.is_running());

        looping.run(None, None);
        assert_eq!(looping.cycles(), 0);
    }

    #[test]
    fn test_infinite_delay_never_starts() {
        let mut transition = linear(100.0);
        transition.run(None, Some(f64::INFINITY));
        assert_eq!(transition.advance_until(f64::INFINITY), 0);
        assert_eq!(transition.state(), TransitionState::Scheduled);
    }

    #[test]
    fn test_elapsed_is_zero_when_idle() {
        let mut transition = linear(30.0);
        assert_eq!(transition.elapsed_ms(), 0.0);
        transition.run(None, None);
        transition.advance_by(20.0);
        assert_eq!(transition.elapsed_ms(), 20.0);
        transition.advance_by(100.0);
        assert_eq!(transition.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_frames_without_change_handler_still_end() {
        let mut transition = linear(50.0);
        let ended = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&ended);
        transition.on_ended(move || *flag.borrow_mut() = true);
        transition.run(None, None);
        transition.advance_by(100.0);
        assert!(*ended.borrow());
    }
}
