//! Named connection points.

use geometry::error::check_positive;
use geometry::prelude::*;

use crate::error::{Error, Result};

/// A connection point on a component, in the component's placed frame.
///
/// Routing resolves connections by `(component, pin)` name and attaches to
/// [`Pin::middle`] heading along [`Pin::normal`].
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    points: [Point; 2],
    middle: Point,
    normal: Point,
    tangent: Point,
    width: f64,
    input_as_norm: bool,
}

impl Pin {
    /// Creates a pin from two placed points.
    ///
    /// If `input_as_norm` is set, `points[1] - points[0]` is the outward
    /// normal and `points[1]` is the attachment point. Otherwise the points
    /// are the ends of the connection edge: the attachment point is their
    /// midpoint and the normal is the edge direction rotated by 90 degrees
    /// counterclockwise.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// # use qgeometry::Pin;
    /// let pin = Pin::new([Point::new(400., -25.), Point::new(600., -25.)], 10., true).unwrap();
    /// assert_eq!(pin.middle(), Point::new(600., -25.));
    /// assert_eq!(pin.normal(), Point::new(1., 0.));
    /// ```
    pub fn new(points: [Point; 2], width: f64, input_as_norm: bool) -> Result<Self> {
        check_positive("pin width", width)?;
        let [p1, p2] = points;
        if !p1.is_finite() || !p2.is_finite() {
            return Err(Error::Configuration(
                "pin points must have finite coordinates".into(),
            ));
        }
        let dir = (p2 - p1).normalized().ok_or_else(|| {
            Error::Geometry(arcstr::format!(
                "pin points coincide at ({}, {})",
                p1.x,
                p1.y
            ))
        })?;
        let (middle, normal, tangent) = if input_as_norm {
            (p2, dir, Point::new(dir.y, -dir.x))
        } else {
            (p1.midpoint(p2), dir.perp(), dir)
        };
        Ok(Self {
            points,
            middle,
            normal,
            tangent,
            width,
            input_as_norm,
        })
    }

    /// The two points the pin was registered with, in order.
    pub fn points(&self) -> [Point; 2] {
        self.points
    }

    /// `points[1] - points[0]`.
    pub fn direction(&self) -> Point {
        self.points[1] - self.points[0]
    }

    /// The point routes attach to.
    pub fn middle(&self) -> Point {
        self.middle
    }

    /// The unit vector pointing away from the component.
    pub fn normal(&self) -> Point {
        self.normal
    }

    /// The unit vector along the connection edge.
    pub fn tangent(&self) -> Point {
        self.tangent
    }

    /// The trace width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Whether the points were given as a normal vector.
    pub fn input_as_norm(&self) -> bool {
        self.input_as_norm
    }
}
