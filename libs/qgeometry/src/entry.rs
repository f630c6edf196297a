//! Geometry table entries.

use std::fmt;

use arcstr::ArcStr;
use geometry::prelude::*;
use serde::{Deserialize, Serialize};

/// The geometry table an entry belongs to.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Filled polygons.
    Poly,
    /// Centre lines drawn with a width.
    Path,
    /// Junctions, drawn as a line with a width and simulated as a lumped inductance.
    Junction,
}

impl Category {
    /// All categories, in table order.
    pub const ALL: [Category; 3] = [Category::Poly, Category::Path, Category::Junction];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Poly => write!(f, "poly"),
            Category::Path => write!(f, "path"),
            Category::Junction => write!(f, "junction"),
        }
    }
}

/// Category-specific attributes of a [`QGeometry`].
#[derive(Debug, Clone, PartialEq)]
pub enum Attributes {
    /// Attributes of a polygon.
    Poly {
        /// Whether the polygon is etched from the ground plane.
        subtract: bool,
    },
    /// Attributes of a path.
    Path {
        /// The drawn width.
        width: f64,
        /// Whether the path is etched from the ground plane.
        subtract: bool,
    },
    /// Attributes of a junction.
    Junction {
        /// The drawn width.
        width: f64,
        /// The simulated inductance, in nanohenries.
        hfss_inductance: Option<f64>,
        /// The cell substituted for the junction on GDS export.
        gds_cell_name: Option<ArcStr>,
    },
}

/// A named shape destined for one of a component's geometry tables.
///
/// Layer and chip default to the owning component's values when not set.
#[derive(Debug, Clone, PartialEq)]
pub struct QGeometry {
    pub(crate) name: ArcStr,
    pub(crate) shape: Shape,
    pub(crate) layer: Option<u32>,
    pub(crate) chip: Option<ArcStr>,
    pub(crate) attrs: Attributes,
}

impl QGeometry {
    fn new(name: impl Into<ArcStr>, shape: impl Into<Shape>, attrs: Attributes) -> Self {
        Self {
            name: name.into(),
            shape: shape.into(),
            layer: None,
            chip: None,
            attrs,
        }
    }

    /// A filled polygon that adds metal.
    pub fn poly(name: impl Into<ArcStr>, region: Region) -> Self {
        Self::new(name, region, Attributes::Poly { subtract: false })
    }

    /// A path of the given width that adds metal.
    pub fn path(name: impl Into<ArcStr>, path: Path, width: f64) -> Self {
        Self::new(
            name,
            path,
            Attributes::Path {
                width,
                subtract: false,
            },
        )
    }

    /// A junction line of the given width.
    pub fn junction(name: impl Into<ArcStr>, path: Path, width: f64) -> Self {
        Self::new(
            name,
            path,
            Attributes::Junction {
                width,
                hfss_inductance: None,
                gds_cell_name: None,
            },
        )
    }

    /// Marks a poly or path as etched from the ground plane.
    ///
    /// Has no effect on junctions.
    pub fn subtract(mut self, value: bool) -> Self {
        match &mut self.attrs {
            Attributes::Poly { subtract } | Attributes::Path { subtract, .. } => *subtract = value,
            Attributes::Junction { .. } => {}
        }
        self
    }

    /// Sets the layer.
    pub fn layer(mut self, layer: u32) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Sets the chip.
    pub fn chip(mut self, chip: impl Into<ArcStr>) -> Self {
        self.chip = Some(chip.into());
        self
    }

    /// Sets the simulated inductance of a junction, in nanohenries.
    ///
    /// Has no effect on other categories.
    pub fn hfss_inductance(mut self, nh: f64) -> Self {
        if let Attributes::Junction {
            hfss_inductance, ..
        } = &mut self.attrs
        {
            *hfss_inductance = Some(nh);
        }
        self
    }

    /// Sets the GDS cell substituted for a junction.
    ///
    /// Has no effect on other categories.
    pub fn gds_cell_name(mut self, name: impl Into<ArcStr>) -> Self {
        if let Attributes::Junction { gds_cell_name, .. } = &mut self.attrs {
            *gds_cell_name = Some(name.into());
        }
        self
    }

    /// The entry name.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The table this entry belongs to.
    pub fn category(&self) -> Category {
        match self.attrs {
            Attributes::Poly { .. } => Category::Poly,
            Attributes::Path { .. } => Category::Path,
            Attributes::Junction { .. } => Category::Junction,
        }
    }

    /// The placed shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The category-specific attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    /// The layer, if set.
    pub fn layer_id(&self) -> Option<u32> {
        self.layer
    }

    /// The chip, if set.
    pub fn chip_name(&self) -> Option<&ArcStr> {
        self.chip.as_ref()
    }

    /// Whether the entry is etched from the ground plane.
    pub fn is_subtract(&self) -> bool {
        match self.attrs {
            Attributes::Poly { subtract } | Attributes::Path { subtract, .. } => subtract,
            Attributes::Junction { .. } => false,
        }
    }

    /// The drawn width of a path or junction.
    pub fn width(&self) -> Option<f64> {
        match self.attrs {
            Attributes::Poly { .. } => None,
            Attributes::Path { width, .. } | Attributes::Junction { width, .. } => Some(width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_only_touch_their_category() {
        let line = line_string([Point::new(0., -15.), Point::new(0., 15.)]).unwrap();
        let jj = QGeometry::junction("rect_jj", line.clone(), 10.)
            .subtract(true)
            .hfss_inductance(16.35)
            .gds_cell_name("junction_0");
        assert!(!jj.is_subtract());
        assert_eq!(
            jj.attributes(),
            &Attributes::Junction {
                width: 10.,
                hfss_inductance: Some(16.35),
                gds_cell_name: Some("junction_0".into()),
            }
        );

        let path = QGeometry::path("fbl", line, 10.)
            .hfss_inductance(1.)
            .subtract(true);
        assert_eq!(
            path.attributes(),
            &Attributes::Path {
                width: 10.,
                subtract: true
            }
        );
        assert_eq!(path.category(), Category::Path);
    }

    #[test]
    fn category_names() {
        let names: Vec<_> = Category::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["poly", "path", "junction"]);
    }
}
