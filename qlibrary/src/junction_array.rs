//! A vertical chain of Josephson junctions for calibration structures.

use arcstr::ArcStr;
use config::units;
use geometry::prelude::*;
use qgeometry::{ComponentBuilder, QGeometry};
use serde::Deserialize;

use crate::component::{non_negative, positive, Placement, QComponent};
use crate::Result;

/// `n_junction + 1` pads stacked along +y, joined by `n_junction` junctions,
/// in a rectangular ground-plane etch.
///
/// The first pad is centred on the component origin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct JunctionArray {
    /// Placement of the first pad.
    #[serde(flatten)]
    pub placement: Placement,
    /// Etch margin left and right of the pads.
    #[serde(deserialize_with = "units::de::length")]
    pub ground_gap_x: f64,
    /// Etch margin below the first pad and above the last.
    #[serde(deserialize_with = "units::de::length")]
    pub ground_gap_y: f64,
    /// The repeated pad and junction.
    pub array_unit: ArrayUnit,
}

/// One pad and the junction above it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArrayUnit {
    /// Pad width.
    #[serde(deserialize_with = "units::de::length")]
    pub array_pad_x: f64,
    /// Pad height.
    #[serde(deserialize_with = "units::de::length")]
    pub array_pad_y: f64,
    /// Vertical gap between pads, spanned by a junction.
    #[serde(deserialize_with = "units::de::length")]
    pub array_gap_y: f64,
    /// Drawn width of each junction.
    #[serde(deserialize_with = "units::de::length")]
    pub junction_thickness: f64,
    /// Number of junctions.
    pub n_junction: u32,
}

impl Default for JunctionArray {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            ground_gap_x: 20.,
            ground_gap_y: 20.,
            array_unit: ArrayUnit::default(),
        }
    }
}

impl Default for ArrayUnit {
    fn default() -> Self {
        Self {
            array_pad_x: 20.,
            array_pad_y: 50.,
            array_gap_y: 10.,
            junction_thickness: 10.,
            n_junction: 10,
        }
    }
}

impl ArrayUnit {
    /// Vertical distance between neighbouring pad centres.
    pub fn pitch(&self) -> f64 {
        self.array_pad_y + self.array_gap_y
    }
}

/// The GDS cell substituted for the `index`th junction.
fn junction_cell(index: u32) -> ArcStr {
    arcstr::format!("FakeJunction_0{}", index + 1)
}

impl JunctionArray {
    fn make_array(&self, cell: &mut ComponentBuilder, trans: Transformation) -> Result<()> {
        let unit = &self.array_unit;
        let (px, py) = (unit.array_pad_x / 2., unit.array_pad_y / 2.);
        let pad = rect_box(-px, -py, px, py)?;
        let junction = line_string([Point::new(0., py), Point::new(0., py + unit.array_gap_y)])?;

        for i in 0..=unit.n_junction {
            let shift = Point::new(0., i as f64 * unit.pitch());
            cell.add_qgeometry(QGeometry::poly(
                arcstr::format!("jj_pad_{i}"),
                pad.clone().translate(shift).transform(trans),
            ))?;
            if i < unit.n_junction {
                cell.add_qgeometry(
                    QGeometry::junction(
                        arcstr::format!("rect_jj_{i}"),
                        junction.clone().translate(shift).transform(trans),
                        unit.junction_thickness,
                    )
                    .gds_cell_name(junction_cell(i)),
                )?;
            }
        }
        Ok(())
    }

    fn make_ground_etch(&self, cell: &mut ComponentBuilder, trans: Transformation) -> Result<()> {
        let unit = &self.array_unit;
        let n = unit.n_junction as f64;
        let width = unit.array_pad_x + 2. * self.ground_gap_x;
        let height = (n + 1.) * unit.array_pad_y + n * unit.array_gap_y + 2. * self.ground_gap_y;
        let bottom = -unit.array_pad_y / 2. - self.ground_gap_y;
        let etch = rect_box(-width / 2., bottom, width / 2., bottom + height)?;

        cell.add_qgeometry(QGeometry::poly("ground_etch", etch.transform(trans)).subtract(true))
    }
}

impl QComponent for JunctionArray {
    fn kind(&self) -> &'static str {
        "junction_array"
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn make(&self, cell: &mut ComponentBuilder) -> Result<()> {
        let unit = &self.array_unit;
        positive([
            ("array_pad_x", unit.array_pad_x),
            ("array_pad_y", unit.array_pad_y),
            ("array_gap_y", unit.array_gap_y),
            ("junction_thickness", unit.junction_thickness),
        ])?;
        non_negative([
            ("ground_gap_x", self.ground_gap_x),
            ("ground_gap_y", self.ground_gap_y),
        ])?;
        let trans = self.placement.transformation()?;

        self.make_array(cell, trans)?;
        self.make_ground_etch(cell, trans)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use qgeometry::{Attributes, Category};

    use super::*;

    #[test]
    fn pads_and_junctions_alternate() {
        let mut cell = ComponentBuilder::new("array");
        JunctionArray::default().make(&mut cell).unwrap();
        let geo = cell.finish();

        assert_eq!(geo.table(Category::Poly).len(), 12);
        assert_eq!(geo.table(Category::Junction).len(), 10);
        assert!(geo.get(Category::Junction, "rect_jj_10").is_none());

        let last = geo.get(Category::Poly, "jj_pad_10").unwrap();
        assert_eq!(
            last.shape().bbox(),
            Some(Rect::from_sides(-10., 575., 10., 625.))
        );
        let jj = geo.get(Category::Junction, "rect_jj_3").unwrap();
        assert_eq!(
            jj.attributes(),
            &Attributes::Junction {
                width: 10.,
                hfss_inductance: None,
                gds_cell_name: Some("FakeJunction_04".into()),
            }
        );
        let path = jj.shape().path().unwrap();
        assert_eq!(path.start(), Point::new(0., 205.));
        assert_eq!(path.end(), Point::new(0., 215.));

        let etch = geo.get(Category::Poly, "ground_etch").unwrap();
        assert!(etch.is_subtract());
        assert_eq!(
            etch.shape().bbox(),
            Some(Rect::from_sides(-30., -45., 30., 645.))
        );
    }

    #[test]
    fn shift_is_applied_before_placement() {
        let array = JunctionArray {
            placement: Placement::at(100., 0.).rotated(90.),
            ..Default::default()
        };
        let mut cell = ComponentBuilder::new("array");
        array.make(&mut cell).unwrap();
        let geo = cell.finish();

        let last = geo.get(Category::Poly, "jj_pad_10").unwrap();
        assert_relative_eq!(
            last.shape().bbox().unwrap().center(),
            Point::new(-500., 0.)
        );
        let etch = geo.get(Category::Poly, "ground_etch").unwrap();
        assert_relative_eq!(
            etch.shape().bbox().unwrap(),
            Rect::from_sides(-545., -30., 145., 30.)
        );
    }

    #[test]
    fn zero_junctions_leaves_one_pad() {
        let array = JunctionArray {
            array_unit: ArrayUnit {
                n_junction: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut cell = ComponentBuilder::new("array");
        array.make(&mut cell).unwrap();
        let geo = cell.finish();
        assert_eq!(geo.table(Category::Poly).len(), 2);
        assert!(geo.table(Category::Junction).is_empty());
    }
}
