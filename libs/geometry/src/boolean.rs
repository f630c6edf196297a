//! Boolean combination of regions.

use crate::region::Region;

/// The union of all given regions.
///
/// The result does not depend on the order of the inputs. An empty input
/// yields the empty region.
///
/// # Examples
///
/// ```
/// # use geometry::prelude::*;
/// let a = rect_box(0., 0., 2., 2.).unwrap();
/// let b = rect_box(1., 1., 3., 3.).unwrap();
/// assert!((union([&a, &b]).area() - 7.).abs() < 1e-6);
/// ```
pub fn union<'a>(regions: impl IntoIterator<Item = &'a Region>) -> Region {
    let mut iter = regions.into_iter();
    let Some(first) = iter.next() else {
        return Region::empty();
    };
    iter.fold(first.clone(), |acc, r| acc.union(r))
}

/// Removes the area of `b` from `a`.
///
/// Subtracting a disjoint region leaves `a` unchanged; subtracting a
/// superset of `a` yields the empty region.
pub fn subtract(a: &Region, b: &Region) -> Region {
    a.subtract(b)
}
