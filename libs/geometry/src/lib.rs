//! 2-D geometric operations for parametric chip layout.
//!
//! Coordinates are `f64` values in micrometres. Regions are built from
//! primitives, combined with boolean operations, and placed with a single
//! rigid [`Transformation`](crate::transform::Transformation).
//!
//! # Examples
//!
//! Build a pad with a rounded end and place it:
//!
//! ```
//! # use geometry::prelude::*;
//! let rect = rectangle(30., 200., 0., 0.).unwrap();
//! let end = disc(Point::new(0., 100.), 15.).unwrap();
//! let pad = union([&rect, &end]);
//! let placed = pad.transform(Transformation::rotate_translate(90., 500., 0.));
//! assert!(placed.area() > rect.area());
//! ```
#![warn(missing_docs)]

pub mod bbox;
pub mod boolean;
pub mod error;
pub mod path;
pub mod point;
pub mod prelude;
pub mod primitive;
pub mod rect;
pub mod region;
pub mod shape;
pub mod transform;

/// Wraps the given angle to the interval `[0, 360)` degrees.
///
/// # Examples
///
/// ```
/// use geometry::wrap_angle;
///
/// assert_eq!(wrap_angle(10.), 10.);
/// assert_eq!(wrap_angle(-10.), 350.);
/// assert_eq!(wrap_angle(-740.), 340.);
/// assert_eq!(wrap_angle(725.), 5.);
/// assert_eq!(wrap_angle(360.), 0.);
/// assert_eq!(wrap_angle(-360.), 0.);
/// ```
pub fn wrap_angle(angle: f64) -> f64 {
    ((angle % 360.) + 360.) % 360.
}
