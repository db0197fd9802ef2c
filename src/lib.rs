//! Glide: eased, frame-scheduled transitions.
//!
//! Re-exports the motion engine and its configuration layer.
//!
//! ```
//! use glide::{Easing, ManualScheduler, Transition, TransitionOptions};
//!
//! let options = TransitionOptions::default()
//!     .with_ease(Easing::QuadOut)
//!     .with_duration(100.0);
//! let mut transition = Transition::new(options, ManualScheduler::new());
//! transition.on_change(|progress| assert!((0.0..=1.0).contains(&progress)));
//! transition.run(None, None);
//! transition.advance_until(f64::INFINITY);
//! assert!(!transition.is_running());
//! ```

pub use glide_config as config;
pub use glide_motion::*;

pub use glide_config::GlideConfig;
