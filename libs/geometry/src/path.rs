//! Open polylines.

use geo::{Euclidean, Length, LineString, MapCoordsInPlace};

use crate::bbox::Bbox;
use crate::point::Point;
use crate::rect::Rect;
use crate::transform::{TransformMut, Transformation, TranslateMut};

/// An open polyline with at least two vertices.
///
/// Paths describe junctions and coplanar-waveguide centre lines; their
/// drawn width is an attribute of the geometry table entry, not of the path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path(LineString<f64>);

impl Path {
    pub(crate) fn from_points_unchecked(points: impl IntoIterator<Item = Point>) -> Self {
        Self(LineString::new(points.into_iter().map(Into::into).collect()))
    }

    /// The vertices of the path, in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.coords().map(|c| Point::new(c.x, c.y))
    }

    /// The number of vertices.
    pub fn num_points(&self) -> usize {
        self.0 .0.len()
    }

    /// The first vertex.
    pub fn start(&self) -> Point {
        self.0 .0[0].into()
    }

    /// The last vertex.
    pub fn end(&self) -> Point {
        self.0 .0[self.0 .0.len() - 1].into()
    }

    /// The total length of all segments.
    pub fn length(&self) -> f64 {
        Euclidean.length(&self.0)
    }

    /// Returns a reference to the underlying line string.
    pub fn as_line_string(&self) -> &LineString<f64> {
        &self.0
    }
}

impl Bbox for Path {
    fn bbox(&self) -> Option<Rect> {
        Rect::bounding(self.points())
    }
}

impl TranslateMut for Path {
    fn translate_mut(&mut self, p: Point) {
        self.0.map_coords_in_place(|c| geo::Coord {
            x: c.x + p.x,
            y: c.y + p.y,
        });
    }
}

impl TransformMut for Path {
    fn transform_mut(&mut self, trans: Transformation) {
        self.0
            .map_coords_in_place(|c| trans.apply(Point::from(c)).into());
    }
}
