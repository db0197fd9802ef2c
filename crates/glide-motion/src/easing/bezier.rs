//! Cubic bezier easing solver.
//!
//! A unit cubic bezier runs from `(0, 0)` to `(1, 1)` through two control
//! points `(x1, y1)` and `(x2, y2)`. Easing with it means solving `x(t) = x`
//! for the curve parameter `t` and then returning `y(t)`.
//!
//! The solver:
//! - precomputes an 11-entry table of `x(t)` at uniform `t` steps
//! - brackets the target x in that table and interpolates an initial guess
//! - refines with Newton-Raphson where the slope is usable
//! - falls back to bisection inside the bracket where it is not
//!
//! # Usage
//!
//! ```
//! use glide_motion::easing::bezier::CubicBezier;
//!
//! let cubic_out = CubicBezier::solve(0.215, 0.61, 0.355, 1.0).unwrap();
//! let progress = cubic_out.ease(0.5);
//! assert!(progress > 0.5);
//!
//! assert!(CubicBezier::solve(1.5, 0.0, 0.5, 1.0).is_err());
//! ```

use tracing::debug;

use crate::error::{MotionError, Result};

// Solver constants; output depends on them.
const NEWTON_ITERATIONS: usize = 4;
const NEWTON_MIN_SLOPE: f64 = 0.001;
const SUBDIVISION_PRECISION: f64 = 0.000_000_1;
const SUBDIVISION_MAX_ITERATIONS: usize = 10;

const SPLINE_TABLE_SIZE: usize = 11;
const SAMPLE_STEP_SIZE: f64 = 1.0 / (SPLINE_TABLE_SIZE as f64 - 1.0);

/// A validated cubic bezier easing curve with its precomputed sample table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    /// `x(t)` at `t = i / 10`. Unused when `linear` is set.
    samples: [f64; SPLINE_TABLE_SIZE],
    /// Control points on the diagonal: the curve is the identity.
    linear: bool,
}

impl CubicBezier {
    /// Build a solver for the given control points.
    ///
    /// # Errors
    /// Returns [`MotionError::InvalidCurve`] unless both `x1` and `x2` lie in
    /// `[0, 1]`. `y1` and `y2` are unconstrained, which allows overshoot.
    pub fn solve(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        if !((0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2)) {
            return Err(MotionError::InvalidCurve { x1, x2 });
        }
        Ok(Self::build(x1, y1, x2, y2))
    }

    /// Build without validating; callers guarantee `x1, x2` in `[0, 1]`.
    pub(crate) fn build(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2));

        let linear = x1 == y1 && x2 == y2;
        let mut samples = [0.0; SPLINE_TABLE_SIZE];
        if !linear {
            for (i, sample) in samples.iter_mut().enumerate() {
                *sample = calc_bezier(i as f64 * SAMPLE_STEP_SIZE, x1, x2);
            }
            debug!(x1, y1, x2, y2, "precomputed bezier sample table");
        }

        Self {
            x1,
            y1,
            x2,
            y2,
            samples,
            linear,
        }
    }

    /// Evaluate the curve at time fraction `x`.
    pub fn ease(&self, x: f64) -> f64 {
        if self.linear {
            return x;
        }
        // Exact extremes regardless of round-off in the solver.
        if x == 0.0 {
            return 0.0;
        }
        if x == 1.0 {
            return 1.0;
        }
        calc_bezier(self.t_for_x(x), self.y1, self.y2)
    }

    /// The control points as `[x1, y1, x2, y2]`.
    pub fn control_points(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Whether this curve took the identity shortcut.
    pub fn is_linear(&self) -> bool {
        self.linear
    }

    fn t_for_x(&self, x: f64) -> f64 {
        let last_sample = SPLINE_TABLE_SIZE - 1;
        let mut current_sample = 1;
        let mut interval_start = 0.0;

        while current_sample != last_sample && self.samples[current_sample] <= x {
            interval_start += SAMPLE_STEP_SIZE;
            current_sample += 1;
        }
        current_sample -= 1;

        // Interpolate within the bracket for an initial guess.
        let lo = self.samples[current_sample];
        let span = self.samples[current_sample + 1] - lo;
        let dist = if span == 0.0 { 0.0 } else { (x - lo) / span };
        let guess = interval_start + dist * SAMPLE_STEP_SIZE;

        let initial_slope = slope(guess, self.x1, self.x2);
        if initial_slope >= NEWTON_MIN_SLOPE {
            newton_raphson_iterate(x, guess, self.x1, self.x2)
        } else if initial_slope == 0.0 {
            guess
        } else {
            binary_subdivide(
                x,
                interval_start,
                interval_start + SAMPLE_STEP_SIZE,
                self.x1,
                self.x2,
            )
        }
    }
}

#[inline]
fn coeff_c(a1: f64) -> f64 {
    3.0 * a1
}

#[inline]
fn coeff_b(a1: f64, a2: f64) -> f64 {
    3.0 * a2 - 6.0 * a1
}

#[inline]
fn coeff_a(a1: f64, a2: f64) -> f64 {
    1.0 - 3.0 * a2 + 3.0 * a1
}

/// x(t) given x1, x2, or y(t) given y1, y2.
#[inline]
fn calc_bezier(t: f64, a1: f64, a2: f64) -> f64 {
    ((coeff_a(a1, a2) * t + coeff_b(a1, a2)) * t + coeff_c(a1)) * t
}

/// dx/dt given x1, x2, or dy/dt given y1, y2.
#[inline]
fn slope(t: f64, a1: f64, a2: f64) -> f64 {
    3.0 * coeff_a(a1, a2) * t * t + 2.0 * coeff_b(a1, a2) * t + coeff_c(a1)
}

fn newton_raphson_iterate(x: f64, mut guess: f64, x1: f64, x2: f64) -> f64 {
    for _ in 0..NEWTON_ITERATIONS {
        let current_slope = slope(guess, x1, x2);
        if current_slope == 0.0 {
            return guess;
        }
        let current_x = calc_bezier(guess, x1, x2) - x;
        guess -= current_x / current_slope;
    }
    guess
}

fn binary_subdivide(x: f64, mut lo: f64, mut hi: f64, x1: f64, x2: f64) -> f64 {
    let mut iterations = 0;
    loop {
        let t = lo + (hi - lo) / 2.0;
        let current_x = calc_bezier(t, x1, x2) - x;
        if current_x > 0.0 {
            hi = t;
        } else {
            lo = t;
        }
        iterations += 1;
        if current_x.abs() <= SUBDIVISION_PRECISION || iterations >= SUBDIVISION_MAX_ITERATIONS {
            return t;
        }
    }
}
