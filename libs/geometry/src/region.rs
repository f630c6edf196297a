//! Filled planar regions.

use geo::{Area, BooleanOps, Centroid, MapCoordsInPlace, MultiPolygon, Polygon};

use crate::bbox::Bbox;
use crate::point::Point;
use crate::rect::Rect;
use crate::transform::{TransformMut, Transformation, TranslateMut};

/// A filled region of the plane, made of zero or more disjoint polygons with holes.
///
/// Regions are produced by [primitives](crate::primitive) and
/// [boolean operations](crate::boolean). The empty region is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Region(MultiPolygon<f64>);

impl Default for Region {
    fn default() -> Self {
        Self::empty()
    }
}

impl Region {
    /// The empty region.
    pub fn empty() -> Self {
        Self(MultiPolygon::new(Vec::new()))
    }

    /// Wraps a single polygon.
    pub fn from_polygon(polygon: Polygon<f64>) -> Self {
        Self(MultiPolygon::new(vec![polygon]))
    }

    /// Returns `true` if the region covers no area.
    pub fn is_empty(&self) -> bool {
        self.0 .0.is_empty() || self.area() == 0.
    }

    /// The area of the region.
    pub fn area(&self) -> f64 {
        self.0.unsigned_area()
    }

    /// The centroid of the region, or [`None`] if the region is empty.
    pub fn centroid(&self) -> Option<Point> {
        self.0.centroid().map(|p| Point::new(p.x(), p.y()))
    }

    /// The number of disjoint polygons making up this region.
    pub fn num_polygons(&self) -> usize {
        self.0 .0.len()
    }

    /// The polygons making up this region.
    pub fn polygons(&self) -> &[Polygon<f64>] {
        &self.0 .0
    }

    /// The union of `self` and `other`.
    pub fn union(&self, other: &Region) -> Region {
        Region(self.0.union(&other.0))
    }

    /// The area of `self` not covered by `other`.
    pub fn subtract(&self, other: &Region) -> Region {
        Region(self.0.difference(&other.0))
    }

    /// The area covered by both `self` and `other`.
    pub fn intersection(&self, other: &Region) -> Region {
        Region(self.0.intersection(&other.0))
    }

    /// Iterates over every vertex of every ring of the region.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.0 .0.iter().flat_map(|poly| {
            poly.exterior()
                .coords()
                .chain(poly.interiors().iter().flat_map(|ring| ring.coords()))
                .map(|c| Point::new(c.x, c.y))
        })
    }

    /// Returns a reference to the underlying multipolygon.
    pub fn as_multi_polygon(&self) -> &MultiPolygon<f64> {
        &self.0
    }
}

impl From<MultiPolygon<f64>> for Region {
    fn from(value: MultiPolygon<f64>) -> Self {
        Self(value)
    }
}

impl From<Polygon<f64>> for Region {
    fn from(value: Polygon<f64>) -> Self {
        Self::from_polygon(value)
    }
}

impl From<Region> for MultiPolygon<f64> {
    fn from(value: Region) -> Self {
        value.0
    }
}

impl Bbox for Region {
    fn bbox(&self) -> Option<Rect> {
        Rect::bounding(self.vertices())
    }
}

impl TranslateMut for Region {
    fn translate_mut(&mut self, p: Point) {
        self.0.map_coords_in_place(|c| geo::Coord {
            x: c.x + p.x,
            y: c.y + p.y,
        });
    }
}

impl TransformMut for Region {
    fn transform_mut(&mut self, trans: Transformation) {
        self.0
            .map_coords_in_place(|c| trans.apply(Point::from(c)).into());
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::prelude::*;

    #[test]
    fn translation_preserves_area_and_moves_centroid() {
        let r = rectangle(10., 20., 0., 0.).unwrap();
        let moved = r.clone().translate(Point::new(5., -5.));
        assert_relative_eq!(moved.area(), r.area());
        assert_relative_eq!(moved.centroid().unwrap(), Point::new(5., -5.), epsilon = 1e-9);
    }

    #[test]
    fn rotation_moves_bbox() {
        let r = rect_box(0., 0., 10., 2.).unwrap();
        let rotated = r.transform(Transformation::rotate(90.));
        assert_eq!(rotated.bbox(), Some(Rect::from_sides(-2., 0., 0., 10.)));
    }

    #[test]
    fn empty_region_has_no_bbox() {
        assert!(Region::empty().is_empty());
        assert_eq!(Region::empty().bbox(), None);
        assert_eq!(Region::empty().centroid(), None);
        assert_eq!(Region::default(), Region::empty());
        assert_eq!(Region::default().area(), 0.);
    }

    #[test]
    fn reflection_keeps_area() {
        let r = polygon([
            Point::new(0., 0.),
            Point::new(4., 0.),
            Point::new(0., 3.),
        ])
        .unwrap();
        let flipped = r.clone().transform(Transformation::reflect_vert());
        assert_relative_eq!(flipped.area(), 6., epsilon = 1e-9);
        assert_relative_eq!(flipped.centroid().unwrap(), Point::new(4. / 3., -1.), epsilon = 1e-9);
    }
}
