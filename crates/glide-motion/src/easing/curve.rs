//! The `Curve` value type shared by the catalog and transitions.

use std::fmt;
use std::sync::Arc;

use static_assertions::assert_impl_all;

use super::bezier::CubicBezier;
use super::catalog::Easing;
use crate::error::Result;

/// An immutable easing function from a time fraction to a progress value.
///
/// Cloning is cheap; clones share the same underlying function.
#[derive(Clone)]
pub struct Curve {
    f: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

assert_impl_all!(Curve: Send, Sync, Clone);

impl Curve {
    /// Wrap a pure function as a curve.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// The identity curve.
    pub fn linear() -> Self {
        Self::new(|x| x)
    }

    /// Build a cubic bezier curve.
    ///
    /// # Errors
    /// Fails with `MotionError::InvalidCurve` when `x1` or `x2` is outside `[0, 1]`.
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        CubicBezier::solve(x1, y1, x2, y2).map(Self::from)
    }

    /// Evaluate the curve.
    #[inline]
    pub fn ease(&self, x: f64) -> f64 {
        (self.f)(x)
    }

    /// The mirrored curve `x -> 1 - f(1 - x)`, used for the "out" half of
    /// an in/out pair.
    pub fn reversed(&self) -> Self {
        let inner = Arc::clone(&self.f);
        Self::new(move |x| 1.0 - inner(1.0 - x))
    }
}

impl Default for Curve {
    fn default() -> Self {
        Easing::default().curve()
    }
}

impl From<CubicBezier> for Curve {
    fn from(bezier: CubicBezier) -> Self {
        Self::new(move |x| bezier.ease(x))
    }
}

impl From<Easing> for Curve {
    fn from(easing: Easing) -> Self {
        easing.curve()
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Curve(..)")
    }
}
