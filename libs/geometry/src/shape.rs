//! An enumeration of geometric shapes and their properties.

use crate::{
    bbox::Bbox,
    path::Path,
    point::Point,
    rect::Rect,
    region::Region,
    transform::{TransformMut, Transformation, TranslateMut},
};

/// An enumeration of geometric shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A filled region.
    Region(Region),
    /// An open polyline.
    Path(Path),
}

impl Shape {
    /// If this shape is a region, returns the contained region.
    /// Otherwise, returns [`None`].
    pub fn region(&self) -> Option<&Region> {
        match self {
            Self::Region(r) => Some(r),
            _ => None,
        }
    }

    /// If this shape is a path, returns the contained path.
    /// Otherwise, returns [`None`].
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Path(p) => Some(p),
            _ => None,
        }
    }

    /// The filled area of the shape. Paths have no area.
    pub fn area(&self) -> f64 {
        match self {
            Shape::Region(r) => r.area(),
            Shape::Path(_) => 0.,
        }
    }

    /// A representative point: the region centroid, or the midpoint between
    /// a path's endpoints.
    pub fn anchor(&self) -> Option<Point> {
        match self {
            Shape::Region(r) => r.centroid(),
            Shape::Path(p) => Some(p.start().midpoint(p.end())),
        }
    }
}

impl TranslateMut for Shape {
    fn translate_mut(&mut self, p: Point) {
        match self {
            Shape::Region(r) => r.translate_mut(p),
            Shape::Path(path) => path.translate_mut(p),
        };
    }
}

impl TransformMut for Shape {
    fn transform_mut(&mut self, trans: Transformation) {
        match self {
            Shape::Region(r) => r.transform_mut(trans),
            Shape::Path(path) => path.transform_mut(trans),
        }
    }
}

impl Bbox for Shape {
    fn bbox(&self) -> Option<Rect> {
        match self {
            Shape::Region(r) => r.bbox(),
            Shape::Path(path) => path.bbox(),
        }
    }
}

impl From<Region> for Shape {
    #[inline]
    fn from(value: Region) -> Self {
        Self::Region(value)
    }
}

impl From<Path> for Shape {
    #[inline]
    fn from(value: Path) -> Self {
        Self::Path(value)
    }
}
