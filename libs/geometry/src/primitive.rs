//! Primitive shape builders.
//!
//! All builders validate their inputs and return [`Error::Configuration`]
//! for non-finite coordinates or non-positive extents.

use std::f64::consts::TAU;

use geo::{LineString, Polygon};

use crate::error::{check_finite, check_positive, Error, Result};
use crate::path::Path;
use crate::point::Point;
use crate::region::Region;

/// Number of vertices used to approximate a full circle.
///
/// Sixteen segments per quarter circle.
pub const CIRCLE_SEGMENTS: usize = 64;

fn check_point(name: &str, p: Point) -> Result<Point> {
    if p.is_finite() {
        Ok(p)
    } else {
        Err(Error::Configuration(arcstr::format!(
            "`{name}` must have finite coordinates, got ({}, {})",
            p.x,
            p.y
        )))
    }
}

fn closed_ring(points: impl IntoIterator<Item = Point>) -> LineString<f64> {
    // `Polygon::new` closes the ring.
    LineString::new(points.into_iter().map(Into::into).collect())
}

/// An axis-aligned rectangle of the given size centred on `(center_x, center_y)`.
///
/// # Examples
///
/// ```
/// # use geometry::prelude::*;
/// let r = rectangle(4., 2., 1., 1.).unwrap();
/// assert_eq!(r.area(), 8.);
/// assert_eq!(r.bbox(), Some(Rect::from_sides(-1., 0., 3., 2.)));
/// assert!(rectangle(0., 2., 0., 0.).is_err());
/// ```
pub fn rectangle(width: f64, height: f64, center_x: f64, center_y: f64) -> Result<Region> {
    check_positive("width", width)?;
    check_positive("height", height)?;
    check_finite("center_x", center_x)?;
    check_finite("center_y", center_y)?;
    let (hw, hh) = (width / 2., height / 2.);
    rect_box(
        center_x - hw,
        center_y - hh,
        center_x + hw,
        center_y + hh,
    )
}

/// An axis-aligned rectangle given by its extreme coordinates.
pub fn rect_box(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Region> {
    for (name, v) in [
        ("x_min", x_min),
        ("y_min", y_min),
        ("x_max", x_max),
        ("y_max", y_max),
    ] {
        check_finite(name, v)?;
    }
    check_positive("box width", x_max - x_min)?;
    check_positive("box height", y_max - y_min)?;
    let ring = closed_ring([
        Point::new(x_min, y_min),
        Point::new(x_max, y_min),
        Point::new(x_max, y_max),
        Point::new(x_min, y_max),
    ]);
    Ok(Region::from_polygon(Polygon::new(ring, Vec::new())))
}

/// A disc of the given radius, approximated by a regular polygon with
/// [`CIRCLE_SEGMENTS`] vertices.
pub fn disc(center: Point, radius: f64) -> Result<Region> {
    check_point("center", center)?;
    check_positive("radius", radius)?;
    let ring = closed_ring((0..CIRCLE_SEGMENTS).map(|i| {
        let theta = TAU * i as f64 / CIRCLE_SEGMENTS as f64;
        let (sin, cos) = theta.sin_cos();
        Point::new(center.x + radius * cos, center.y + radius * sin)
    }));
    Ok(Region::from_polygon(Polygon::new(ring, Vec::new())))
}

/// A simple polygon with the given vertices, which must number at least three.
pub fn polygon(points: impl IntoIterator<Item = Point>) -> Result<Region> {
    let points = points
        .into_iter()
        .map(|p| check_point("polygon vertex", p))
        .collect::<Result<Vec<_>>>()?;
    if points.len() < 3 {
        return Err(Error::Configuration(arcstr::format!(
            "a polygon needs at least 3 vertices, got {}",
            points.len()
        )));
    }
    Ok(Region::from_polygon(Polygon::new(
        closed_ring(points),
        Vec::new(),
    )))
}

/// An open polyline through the given points, which must number at least two.
pub fn line_string(points: impl IntoIterator<Item = Point>) -> Result<Path> {
    let points = points
        .into_iter()
        .map(|p| check_point("path vertex", p))
        .collect::<Result<Vec<_>>>()?;
    if points.len() < 2 {
        return Err(Error::Configuration(arcstr::format!(
            "a path needs at least 2 points, got {}",
            points.len()
        )));
    }
    Ok(Path::from_points_unchecked(points))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::bbox::Bbox;
    use crate::rect::Rect;

    #[test]
    fn rectangle_is_centered() {
        let r = rectangle(30., 10., 5., -5.).unwrap();
        assert_eq!(r.bbox(), Some(Rect::from_sides(-10., -10., 20., 0.)));
        assert_relative_eq!(r.centroid().unwrap(), Point::new(5., -5.), epsilon = 1e-9);
    }

    #[test]
    fn builders_reject_non_positive_extents() {
        assert!(matches!(
            rectangle(-1., 1., 0., 0.),
            Err(Error::Configuration(_))
        ));
        assert!(rectangle(1., 0., 0., 0.).is_err());
        assert!(rect_box(0., 0., 0., 5.).is_err());
        assert!(rect_box(0., 5., 1., 4.).is_err());
        assert!(disc(Point::zero(), 0.).is_err());
    }

    #[test]
    fn builders_reject_non_finite_inputs() {
        assert!(rectangle(f64::NAN, 1., 0., 0.).is_err());
        assert!(rectangle(1., 1., f64::INFINITY, 0.).is_err());
        assert!(disc(Point::new(f64::NAN, 0.), 1.).is_err());
        assert!(line_string([Point::zero(), Point::new(1., f64::NAN)]).is_err());
    }

    #[test]
    fn disc_area_approaches_circle() {
        let d = disc(Point::new(3., 4.), 10.).unwrap();
        let exact = PI * 100.;
        assert!(d.area() < exact);
        assert_relative_eq!(d.area(), exact, max_relative = 2e-3);
        assert_relative_eq!(d.centroid().unwrap(), Point::new(3., 4.), epsilon = 1e-9);
    }

    #[test]
    fn too_few_points_are_rejected() {
        assert!(line_string([Point::zero()]).is_err());
        assert!(polygon([Point::zero(), Point::new(1., 0.)]).is_err());
        assert!(line_string([Point::zero(), Point::new(0., 1.)]).is_ok());
    }
}
