//! Square alignment markers for e-beam lithography.
//!
//! Both marker layouts are drawn around `(pos_x / 2, pos_y / 2)`, rotated by
//! `orientation` about the origin, and then translated by
//! `(pos_x / 2, pos_y / 2)`.

use config::units;
use geometry::prelude::*;
use qgeometry::{ComponentBuilder, QGeometry};
use serde::Deserialize;

use crate::component::{positive, Placement, QComponent};
use crate::Result;

/// Four square markers on the corners of a square, in a ground-plane pocket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Placement of the marker group.
    #[serde(flatten)]
    pub placement: Placement,
    /// Offset of each marker from the group centre along x and y.
    #[serde(deserialize_with = "units::de::length")]
    pub marker_sep: f64,
    /// Marker width.
    #[serde(deserialize_with = "units::de::length")]
    pub marker_w: f64,
    /// Marker height.
    #[serde(deserialize_with = "units::de::length")]
    pub marker_h: f64,
    /// Side of the square pocket etched around the markers.
    #[serde(deserialize_with = "units::de::length")]
    pub markers_gap: f64,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            marker_sep: 40.,
            marker_w: 20.,
            marker_h: 20.,
            markers_gap: 200.,
        }
    }
}

/// Five square markers in a horizontal row, in a ground-plane pocket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkersLine {
    /// Placement of the marker row.
    #[serde(flatten)]
    pub placement: Placement,
    /// Gap between neighbouring markers.
    #[serde(deserialize_with = "units::de::length")]
    pub marker_sep: f64,
    /// Marker width.
    #[serde(deserialize_with = "units::de::length")]
    pub marker_w: f64,
    /// Marker height.
    #[serde(deserialize_with = "units::de::length")]
    pub marker_h: f64,
    /// Scale of the pocket, which is `4 * markers_gap` by `1.5 * markers_gap`.
    #[serde(deserialize_with = "units::de::length")]
    pub markers_gap: f64,
}

impl Default for MarkersLine {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            marker_sep: 100.,
            marker_w: 20.,
            marker_h: 20.,
            markers_gap: 200.,
        }
    }
}

fn half_offset(placement: &Placement) -> Point {
    placement.origin() * 0.5
}

fn place(placement: &Placement) -> Result<Transformation> {
    let center = half_offset(placement);
    Ok(Transformation::try_rotate_translate(
        placement.orientation,
        center.x,
        center.y,
    )?)
}

fn add_markers(
    cell: &mut ComponentBuilder,
    trans: Transformation,
    markers: Region,
    pocket: Region,
) -> Result<()> {
    cell.add_qgeometry(QGeometry::poly("markers", markers.transform(trans)))?;
    cell.add_qgeometry(QGeometry::poly("markers_pk", pocket.transform(trans)).subtract(true))
}

impl QComponent for Markers {
    fn kind(&self) -> &'static str {
        "markers"
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn make(&self, cell: &mut ComponentBuilder) -> Result<()> {
        positive([
            ("marker_sep", self.marker_sep),
            ("marker_w", self.marker_w),
            ("marker_h", self.marker_h),
            ("markers_gap", self.markers_gap),
        ])?;
        let trans = place(&self.placement)?;
        let c = half_offset(&self.placement);
        let sep = self.marker_sep;

        let squares = [(-1., 1.), (1., 1.), (-1., -1.), (1., -1.)]
            .into_iter()
            .map(|(sx, sy)| {
                rectangle(
                    self.marker_w,
                    self.marker_h,
                    c.x + sx * sep,
                    c.y + sy * sep,
                )
            })
            .collect::<geometry::error::Result<Vec<_>>>()?;
        let pocket = rectangle(self.markers_gap, self.markers_gap, c.x, c.y)?;

        add_markers(cell, trans, union(&squares), pocket)
    }
}

impl QComponent for MarkersLine {
    fn kind(&self) -> &'static str {
        "markers_line"
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn make(&self, cell: &mut ComponentBuilder) -> Result<()> {
        positive([
            ("marker_sep", self.marker_sep),
            ("marker_w", self.marker_w),
            ("marker_h", self.marker_h),
            ("markers_gap", self.markers_gap),
        ])?;
        let trans = place(&self.placement)?;
        let c = half_offset(&self.placement);
        let pitch = self.marker_sep + self.marker_w;

        let squares = (-2..=2)
            .map(|i| rectangle(self.marker_w, self.marker_h, c.x + i as f64 * pitch, c.y))
            .collect::<geometry::error::Result<Vec<_>>>()?;
        let pocket = rectangle(4. * self.markers_gap, 1.5 * self.markers_gap, c.x, c.y)?;

        add_markers(cell, trans, union(&squares), pocket)
    }
}
