//! Easing curves.
//!
//! - [`bezier`]: the cubic bezier root solver behind most named curves
//! - [`catalog`]: the fixed table of named curves, including the closed-form
//!   bounce and elastic families
//! - [`curve`]: the [`Curve`] value a transition is configured with

pub mod bezier;
pub mod catalog;
pub mod curve;

pub use bezier::CubicBezier;
pub use catalog::{
    Easing, bounce_in, bounce_in_out, bounce_out, elastic_in, elastic_in_out, elastic_out,
};
pub use curve::Curve;
