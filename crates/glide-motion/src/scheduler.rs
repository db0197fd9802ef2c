//! Clock and wake-up scheduling for transitions.
//!
//! A transition never reaches for a global clock or frame loop. It is handed
//! a [`FrameScheduler`] that provides:
//! - a monotonic millisecond clock
//! - "call me on the next frame" requests
//! - one-shot delayed wake-ups
//!
//! Everything runs on one thread. The host pumps wake-ups out of the
//! scheduler with [`FrameScheduler::next_wake`] and hands each one back to
//! the transition that asked for it.
//!
//! Two implementations are provided:
//! - [`ManualScheduler`]: virtual time, stepped explicitly (tests, offline use)
//! - [`RealtimeScheduler`]: wall-clock time, sleeps the thread between wake-ups

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

/// Default frame interval, ~60 frames per second.
pub const DEFAULT_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Handle for one scheduled wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

/// What a wake-up was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeKind {
    /// A display frame.
    Frame,
    /// A one-shot delay elapsed.
    Timeout,
}

/// A due wake-up, delivered at `time` (ms on the scheduler clock).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wake {
    pub ticket: Ticket,
    pub kind: WakeKind,
    pub time: f64,
}

/// Injected time source and callback scheduling.
pub trait FrameScheduler {
    /// Current time in milliseconds. Never decreases.
    fn now(&self) -> f64;

    /// Ask for a wake-up on the next frame.
    fn request_frame(&mut self) -> Ticket;

    /// Ask for a wake-up after `delay_ms`.
    fn set_timeout(&mut self, delay_ms: f64) -> Ticket;

    /// Drop a pending wake-up. Unknown or already-delivered tickets are ignored.
    fn cancel(&mut self, ticket: Ticket);

    /// Pop the earliest wake-up due at or before `deadline`, moving the clock
    /// to it. Returns `None` once nothing is due; the clock has then reached
    /// `deadline` (or stays put if `deadline` is unbounded).
    fn next_wake(&mut self, deadline: f64) -> Option<Wake>;

    /// Number of wake-ups still pending.
    fn pending(&self) -> usize;
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    ticket: Ticket,
    kind: WakeKind,
    due: f64,
}

// Reversed so the max-heap yields the earliest due time, then the earliest request.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.ticket.cmp(&self.ticket))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Pending wake-ups ordered by due time, then by request order.
///
/// Entries with a non-finite due time stay pending but are never due.
#[derive(Debug, Default)]
struct WakeQueue {
    next_id: u64,
    heap: BinaryHeap<Entry>,
}

impl WakeQueue {
    fn push(&mut self, kind: WakeKind, due: f64) -> Ticket {
        self.next_id += 1;
        let ticket = Ticket(self.next_id);
        self.heap.push(Entry { ticket, kind, due });
        ticket
    }

    fn cancel(&mut self, ticket: Ticket) {
        self.heap.retain(|e| e.ticket != ticket);
    }

    fn peek_due(&self, deadline: f64) -> Option<Entry> {
        self.heap
            .peek()
            .copied()
            .filter(|e| e.due.is_finite() && e.due <= deadline)
    }

    fn pop_due(&mut self, deadline: f64) -> Option<Entry> {
        self.peek_due(deadline)?;
        self.heap.pop()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Deterministic scheduler over a virtual clock.
///
/// Frames are due one frame interval after they are requested.
#[derive(Debug)]
pub struct ManualScheduler {
    now: f64,
    frame_interval: f64,
    queue: WakeQueue,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    /// A scheduler at time 0 with ~60fps frames.
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL_MS)
    }

    /// A scheduler at time 0 with the given frame interval in ms.
    ///
    /// Intervals that are not finite and positive fall back to
    /// [`DEFAULT_FRAME_INTERVAL_MS`]; a zero interval would stall the clock.
    pub fn with_frame_interval(frame_interval: f64) -> Self {
        let frame_interval = if frame_interval.is_finite() && frame_interval > 0.0 {
            frame_interval
        } else {
            DEFAULT_FRAME_INTERVAL_MS
        };
        Self {
            now: 0.0,
            frame_interval,
            queue: WakeQueue::default(),
        }
    }

    /// The frame interval in ms.
    pub fn frame_interval(&self) -> f64 {
        self.frame_interval
    }
}

impl FrameScheduler for ManualScheduler {
    fn now(&self) -> f64 {
        self.now
    }

    fn request_frame(&mut self) -> Ticket {
        self.queue.push(WakeKind::Frame, self.now + self.frame_interval)
    }

    fn set_timeout(&mut self, delay_ms: f64) -> Ticket {
        self.queue.push(WakeKind::Timeout, self.now + delay_ms.max(0.0))
    }

    fn cancel(&mut self, ticket: Ticket) {
        self.queue.cancel(ticket);
    }

    fn next_wake(&mut self, deadline: f64) -> Option<Wake> {
        match self.queue.pop_due(deadline) {
            Some(entry) => {
                self.now = self.now.max(entry.due);
                Some(Wake {
                    ticket: entry.ticket,
                    kind: entry.kind,
                    time: self.now,
                })
            }
            None => {
                if deadline.is_finite() {
                    self.now = self.now.max(deadline);
                }
                None
            }
        }
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Wall-clock scheduler that sleeps the calling thread until wake-ups are due.
#[derive(Debug)]
pub struct RealtimeScheduler {
    origin: Instant,
    frame_interval: f64,
    queue: WakeQueue,
}

impl Default for RealtimeScheduler {
    fn default() -> Self {
        Self::with_frame_rate(60.0)
    }
}

impl RealtimeScheduler {
    /// A scheduler whose clock starts now, pacing frames at `fps`.
    pub fn with_frame_rate(fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 60.0 };
        Self {
            origin: Instant::now(),
            frame_interval: 1000.0 / fps,
            queue: WakeQueue::default(),
        }
    }

    /// The frame interval in ms.
    pub fn frame_interval(&self) -> f64 {
        self.frame_interval
    }

    /// Sleep until the clock reads `at`. Returns `false` without sleeping
    /// when the wait is too long to represent.
    fn sleep_until(&self, at: f64) -> bool {
        let remaining = at - self.now();
        if remaining <= 0.0 {
            return true;
        }
        match Duration::try_from_secs_f64(remaining / 1000.0) {
            Ok(wait) => {
                thread::sleep(wait);
                true
            }
            Err(_) => {
                debug!(at, "wait out of range, not sleeping");
                false
            }
        }
    }
}

impl FrameScheduler for RealtimeScheduler {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn request_frame(&mut self) -> Ticket {
        let due = self.now() + self.frame_interval;
        self.queue.push(WakeKind::Frame, due)
    }

    fn set_timeout(&mut self, delay_ms: f64) -> Ticket {
        let due = self.now() + delay_ms.max(0.0);
        self.queue.push(WakeKind::Timeout, due)
    }

    fn cancel(&mut self, ticket: Ticket) {
        self.queue.cancel(ticket);
    }

    fn next_wake(&mut self, deadline: f64) -> Option<Wake> {
        match self.queue.peek_due(deadline) {
            Some(entry) if self.sleep_until(entry.due) => {
                self.queue.pop_due(deadline)?;
                let time = self.now();
                trace!(late_ms = time - entry.due, "realtime wake");
                Some(Wake {
                    ticket: entry.ticket,
                    kind: entry.kind,
                    time,
                })
            }
            // Too far out to wait for: never due.
            Some(_) => None,
            None => {
                if deadline.is_finite() {
                    self.sleep_until(deadline);
                }
                None
            }
        }
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
