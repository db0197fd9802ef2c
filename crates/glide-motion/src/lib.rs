//! Time-based transition engine.
//!
//! This crate provides:
//! - **Easing curves**: a cubic bezier root solver and a catalog of named
//!   curves (CSS keywords, sine/quad/cubic/quart/quint/expo/circ/back,
//!   bounce, elastic)
//! - **Transitions**: a frame-scheduled state machine that turns elapsed
//!   time into eased progress with pause/resume, delay and looping
//! - **Schedulers**: injected clocks and frame pacing, virtual or realtime
//!
//! # Architecture
//!
//! ```text
//! Transition<S: FrameScheduler>
//!   ├── TransitionOptions (Curve, duration, delay, looping)
//!   ├── EventSlots (one `change` and one `ended` handler)
//!   └── S: clock + frame/timeout wake-ups
//!
//! Curve
//!   ├── Easing catalog entry
//!   └── CubicBezier solver
//! ```

pub mod easing;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod transition;
pub mod types;

pub use easing::{CubicBezier, Curve, Easing};
pub use error::{MotionError, Result};
pub use events::{EventKind, EventSlots, Handler};
pub use scheduler::{FrameScheduler, ManualScheduler, RealtimeScheduler, Ticket, Wake, WakeKind};
pub use transition::{DEFAULT_DURATION_MS, Transition, TransitionOptions};
pub use types::TransitionState;
