//! Axis-aligned rectangles, used as bounding boxes.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// An axis-aligned rectangle, specified by lower-left and upper-right corners.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    /// The lower-left corner.
    p0: Point,
    /// The upper-right corner.
    p1: Point,
}

impl Rect {
    /// Creates a rectangle with points `(left, bot), (right, top)`.
    ///
    /// # Panics
    ///
    /// Panics if `left > right` or `bot > top`.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_sides(10., 20., 30., 40.);
    /// assert_eq!(rect.width(), 20.);
    /// ```
    pub fn from_sides(left: f64, bot: f64, right: f64, top: f64) -> Self {
        Self::from_sides_option(left, bot, right, top).unwrap_or_else(|| {
            panic!("invalid rectangle with left={left}, bot={bot}, right={right}, top={top}")
        })
    }

    /// Creates a rectangle with points `(left, bot), (right, top)`,
    /// returning [`None`] if the sides are out of order or not comparable.
    pub fn from_sides_option(left: f64, bot: f64, right: f64, top: f64) -> Option<Self> {
        if left <= right && bot <= top {
            Some(Self {
                p0: Point::new(left, bot),
                p1: Point::new(right, top),
            })
        } else {
            None
        }
    }

    /// The left edge.
    pub fn left(&self) -> f64 {
        self.p0.x
    }

    /// The bottom edge.
    pub fn bot(&self) -> f64 {
        self.p0.y
    }

    /// The right edge.
    pub fn right(&self) -> f64 {
        self.p1.x
    }

    /// The top edge.
    pub fn top(&self) -> f64 {
        self.p1.y
    }

    /// The horizontal extent.
    pub fn width(&self) -> f64 {
        self.p1.x - self.p0.x
    }

    /// The vertical extent.
    pub fn height(&self) -> f64 {
        self.p1.y - self.p0.y
    }

    /// The center point of the rectangle.
    pub fn center(&self) -> Point {
        self.p0.midpoint(self.p1)
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: Rect) -> Rect {
        Rect {
            p0: Point::new(self.p0.x.min(other.p0.x), self.p0.y.min(other.p0.y)),
            p1: Point::new(self.p1.x.max(other.p1.x), self.p1.y.max(other.p1.y)),
        }
    }

    /// The smallest rectangle containing every point in `points`,
    /// or [`None`] if there are no points.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
        points.into_iter().fold(None, |acc, p| {
            let r = Rect { p0: p, p1: p };
            Some(match acc {
                Some(acc) => r.union(acc),
                None => r,
            })
        })
    }
}

impl approx::AbsDiffEq for Rect {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.p0.abs_diff_eq(&other.p0, epsilon) && self.p1.abs_diff_eq(&other.p1, epsilon)
    }
}

impl approx::RelativeEq for Rect {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.p0.relative_eq(&other.p0, epsilon, max_relative)
            && self.p1.relative_eq(&other.p1, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_rect_of_points() {
        let r = Rect::bounding([
            Point::new(-10., 25.),
            Point::new(0., 16.),
            Point::new(40., -20.),
        ]);
        assert_eq!(r, Some(Rect::from_sides(-10., -20., 40., 25.)));
        assert_eq!(Rect::bounding(Vec::new()), None);
    }

    #[test]
    fn rejects_inverted_sides() {
        assert_eq!(Rect::from_sides_option(5., 0., 4., 1.), None);
        assert_eq!(Rect::from_sides_option(0., f64::NAN, 4., 1.), None);
    }
}
