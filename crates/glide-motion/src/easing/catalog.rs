//! Named easing curves.
//!
//! Most entries are cubic beziers with fixed control points; their solvers
//! are built once on first use and shared. Bounce and elastic are closed
//! forms that no cubic bezier can express.
//!
//! Names parse from either `snake_case` (`cubic_out`) or camelCase
//! (`cubicOut`):
//!
//! ```
//! use glide_motion::easing::Easing;
//!
//! let ease: Easing = "cubicOut".parse().unwrap();
//! assert_eq!(ease, Easing::CubicOut);
//! assert_eq!(ease.apply(1.0), 1.0);
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::bezier::CubicBezier;
use super::curve::Curve;
use crate::error::MotionError;

const HALF: f64 = 0.5;

/// Every curve in the catalog.
///
/// Overshoot curves (back, elastic, bounce) leave `[0, 1]` on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// CSS `ease-in`, `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// CSS `ease-out`, `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// CSS `ease-in-out`, `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// Abrupt start that settles, `cubic-bezier(0, 1, 0.5, 1)`.
    Snap,
    SineIn,
    SineOut,
    SineInOut,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircIn,
    CircOut,
    CircInOut,
    BackIn,
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
}

/// Solvers for the bezier-backed entries, indexed by discriminant.
static SOLVERS: Lazy<Vec<Option<CubicBezier>>> = Lazy::new(|| {
    Easing::ALL
        .iter()
        .map(|easing| {
            easing
                .control_points()
                .map(|[x1, y1, x2, y2]| CubicBezier::build(x1, y1, x2, y2))
        })
        .collect()
});

impl Default for Easing {
    fn default() -> Self {
        Self::EaseIn
    }
}

impl Easing {
    /// All catalog entries in declaration order.
    pub const ALL: [Easing; 35] = [
        Self::Linear,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::Snap,
        Self::SineIn,
        Self::SineOut,
        Self::SineInOut,
        Self::QuadIn,
        Self::QuadOut,
        Self::QuadInOut,
        Self::CubicIn,
        Self::CubicOut,
        Self::CubicInOut,
        Self::QuartIn,
        Self::QuartOut,
        Self::QuartInOut,
        Self::QuintIn,
        Self::QuintOut,
        Self::QuintInOut,
        Self::ExpoIn,
        Self::ExpoOut,
        Self::ExpoInOut,
        Self::CircIn,
        Self::CircOut,
        Self::CircInOut,
        Self::BackIn,
        Self::BackOut,
        Self::BackInOut,
        Self::BounceIn,
        Self::BounceOut,
        Self::BounceInOut,
        Self::ElasticIn,
        Self::ElasticOut,
        Self::ElasticInOut,
    ];

    /// Bezier control points `[x1, y1, x2, y2]`, or `None` for closed forms.
    pub fn control_points(self) -> Option<[f64; 4]> {
        let points = match self {
            Self::Linear => [0.25, 0.25, 0.75, 0.75],
            Self::EaseIn => [0.42, 0.0, 1.0, 1.0],
            Self::EaseOut => [0.0, 0.0, 0.58, 1.0],
            Self::EaseInOut => [0.42, 0.0, 0.58, 1.0],
            Self::Snap => [0.0, 1.0, 0.5, 1.0],
            Self::SineIn => [0.47, 0.0, 0.745, 0.715],
            Self::SineOut => [0.39, 0.575, 0.565, 1.0],
            Self::SineInOut => [0.445, 0.05, 0.55, 0.95],
            Self::QuadIn => [0.55, 0.085, 0.68, 0.53],
            Self::QuadOut => [0.25, 0.46, 0.45, 0.94],
            Self::QuadInOut => [0.455, 0.03, 0.515, 0.955],
            Self::CubicIn => [0.55, 0.055, 0.675, 0.19],
            Self::CubicOut => [0.215, 0.61, 0.355, 1.0],
            Self::CubicInOut => [0.645, 0.045, 0.355, 1.0],
            Self::QuartIn => [0.895, 0.03, 0.685, 0.22],
            Self::QuartOut => [0.165, 0.84, 0.44, 1.0],
            Self::QuartInOut => [0.77, 0.0, 0.175, 1.0],
            Self::QuintIn => [0.755, 0.05, 0.855, 0.06],
            Self::QuintOut => [0.23, 1.0, 0.32, 1.0],
            Self::QuintInOut => [0.86, 0.0, 0.07, 1.0],
            Self::ExpoIn => [0.95, 0.05, 0.795, 0.035],
            Self::ExpoOut => [0.19, 1.0, 0.22, 1.0],
            Self::ExpoInOut => [1.0, 0.0, 0.0, 1.0],
            Self::CircIn => [0.6, 0.04, 0.98, 0.335],
            Self::CircOut => [0.075, 0.82, 0.165, 1.0],
            Self::CircInOut => [0.785, 0.135, 0.15, 0.86],
            Self::BackIn => [0.6, -0.28, 0.735, 0.045],
            Self::BackOut => [0.175, 0.885, 0.32, 1.275],
            Self::BackInOut => [0.68, -0.55, 0.265, 1.55],
            Self::BounceIn
            | Self::BounceOut
            | Self::BounceInOut
            | Self::ElasticIn
            | Self::ElasticOut
            | Self::ElasticInOut => return None,
        };
        Some(points)
    }

    /// Evaluate this curve at time fraction `t`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::BounceIn => bounce_in(t),
            Self::BounceOut => bounce_out(t),
            Self::BounceInOut => bounce_in_out(t),
            Self::ElasticIn => elastic_in(t),
            Self::ElasticOut => elastic_out(t),
            Self::ElasticInOut => elastic_in_out(t),
            _ => match &SOLVERS[self as usize] {
                Some(solver) => solver.ease(t),
                None => t,
            },
        }
    }

    /// This entry as a shareable [`Curve`].
    pub fn curve(self) -> Curve {
        Curve::new(move |t| self.apply(t))
    }

    /// The `snake_case` name, matching the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease_in",
            Self::EaseOut => "ease_out",
            Self::EaseInOut => "ease_in_out",
            Self::Snap => "snap",
            Self::SineIn => "sine_in",
            Self::SineOut => "sine_out",
            Self::SineInOut => "sine_in_out",
            Self::QuadIn => "quad_in",
            Self::QuadOut => "quad_out",
            Self::QuadInOut => "quad_in_out",
            Self::CubicIn => "cubic_in",
            Self::CubicOut => "cubic_out",
            Self::CubicInOut => "cubic_in_out",
            Self::QuartIn => "quart_in",
            Self::QuartOut => "quart_out",
            Self::QuartInOut => "quart_in_out",
            Self::QuintIn => "quint_in",
            Self::QuintOut => "quint_out",
            Self::QuintInOut => "quint_in_out",
            Self::ExpoIn => "expo_in",
            Self::ExpoOut => "expo_out",
            Self::ExpoInOut => "expo_in_out",
            Self::CircIn => "circ_in",
            Self::CircOut => "circ_out",
            Self::CircInOut => "circ_in_out",
            Self::BackIn => "back_in",
            Self::BackOut => "back_out",
            Self::BackInOut => "back_in_out",
            Self::BounceIn => "bounce_in",
            Self::BounceOut => "bounce_out",
            Self::BounceInOut => "bounce_in_out",
            Self::ElasticIn => "elastic_in",
            Self::ElasticOut => "elastic_out",
            Self::ElasticInOut => "elastic_in_out",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_name(s);
        let lookup = match normalized.as_str() {
            // Short CSS-ish alias for ease_in_out.
            "in_out" => "ease_in_out",
            other => other,
        };
        Self::ALL
            .iter()
            .copied()
            .find(|easing| easing.name() == lookup)
            .ok_or_else(|| MotionError::UnknownEasing(s.to_string()))
    }
}

/// `cubicOut`, `cubic-out` and `Cubic_Out` all become `cubic_out`.
fn normalize_name(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, ch) in s.trim().chars().enumerate() {
        if ch == '-' || ch == ' ' {
            out.push('_');
        } else if ch.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// A ball settling under gravity: four quadratic arcs.
pub fn bounce_out(t: f64) -> f64 {
    const A: f64 = 4.0 / 11.0;
    const B: f64 = 8.0 / 11.0;
    const C: f64 = 0.9;
    const CA: f64 = 4356.0 / 361.0;
    const CB: f64 = 35442.0 / 1805.0;
    const CC: f64 = 16061.0 / 1805.0;

    let t2 = t * t;
    if t < A {
        7.5625 * t2
    } else if t < B {
        9.075 * t2 - 9.9 * t + 3.4
    } else if t < C {
        CA * t2 - CB * t + CC
    } else {
        10.8 * t * t - 20.52 * t + 10.72
    }
}

pub fn bounce_in(t: f64) -> f64 {
    1.0 - bounce_out(1.0 - t)
}

pub fn bounce_in_out(t: f64) -> f64 {
    if t < HALF {
        HALF * (1.0 - bounce_out(1.0 - t * 2.0))
    } else {
        HALF * bounce_out(t * 2.0 - 1.0) + HALF
    }
}

/// Damped sinusoid growing into the end point.
pub fn elastic_in(t: f64) -> f64 {
    (13.0 * t * PI / 2.0).sin() * 2f64.powf(10.0 * (t - 1.0))
}

pub fn elastic_out(t: f64) -> f64 {
    (-13.0 * (t + 1.0) * PI / 2.0).sin() * 2f64.powf(-10.0 * t) + 1.0
}

pub fn elastic_in_out(t: f64) -> f64 {
    if t < HALF {
        HALF * (13.0 * PI / 2.0 * 2.0 * t).sin() * 2f64.powf(10.0 * (2.0 * t - 1.0))
    } else {
        HALF * (-13.0 * PI / 2.0 * ((2.0 * t - 1.0) + 1.0)).sin()
            * 2f64.powf(-10.0 * (2.0 * t - 1.0))
            + 1.0
    }
}
