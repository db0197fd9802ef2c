//! Error types for the motion engine.

use thiserror::Error;

/// Result type for motion operations.
pub type Result<T> = std::result::Result<T, MotionError>;

/// Errors that can occur while building curves.
///
/// The transition state machine itself never fails: misuse such as
/// `play()` before `run()` is a silent no-op.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Bezier control point x values outside `[0, 1]`.
    #[error("bezier x values must be in [0, 1] range (x1={x1}, x2={x2})")]
    InvalidCurve {
        /// First control point x.
        x1: f64,
        /// Second control point x.
        x2: f64,
    },

    /// No catalog curve with this name.
    #[error("unknown easing curve: {0}")]
    UnknownEasing(String),
}
