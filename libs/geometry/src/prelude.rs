//! An import prelude that re-exports commonly used items.

pub use crate::bbox::Bbox;
pub use crate::boolean::{subtract, union};
pub use crate::path::Path;
pub use crate::point::Point;
pub use crate::primitive::{disc, line_string, polygon, rect_box, rectangle};
pub use crate::rect::Rect;
pub use crate::region::Region;
pub use crate::shape::Shape;
pub use crate::transform::{Transform, TransformMut, Transformation, Translate, TranslateMut};
