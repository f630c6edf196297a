//! A grounded T-shaped transmon.
//!
//! The pad is a half cross: a head along +y joined to a horizontal arm with
//! round palms at both ends. The junction sits in the etch gap above the
//! head, and an optional flux-bias line tapers down towards it from above.

use config::units;
use geometry::prelude::*;
use qgeometry::{ComponentBuilder, QGeometry};
use serde::Deserialize;

use crate::component::{non_negative, positive, Placement, QComponent};
use crate::Result;

/// A T-shaped transmon.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tmon {
    /// Placement of the arm centre.
    #[serde(flatten)]
    pub placement: Placement,
    /// Drawn width of the junction.
    #[serde(deserialize_with = "units::de::length")]
    pub inductor_width: f64,
    /// Length of the junction, and the etch gap above the head.
    #[serde(deserialize_with = "units::de::length")]
    pub jj_gap: f64,
    /// Width of the head along x.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_head_width: f64,
    /// Length of the head along y.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_head_length: f64,
    /// Width of the arm along y.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_arm_width: f64,
    /// Length of the arm along x.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_arm_length: f64,
    /// Diameter of the palms; the etch around them has three times this radius.
    #[serde(deserialize_with = "units::de::length")]
    pub palm_radius: f64,
    /// Etch gap between the pad and the ground plane.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_gap: f64,
    /// Flux-bias line options.
    pub flux_bias_line_options: TmonFluxBiasLineOptions,
}

/// A tapered flux-bias line above the junction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TmonFluxBiasLineOptions {
    /// Whether to draw the line.
    pub make_fbl: bool,
    /// Distance from the top of the head to the wide end of the taper.
    #[serde(deserialize_with = "units::de::length")]
    pub fbl_sep: f64,
    /// Height of the taper.
    #[serde(deserialize_with = "units::de::length")]
    pub fbl_height: f64,
    /// Width of the wide end of the taper.
    #[serde(deserialize_with = "units::de::length")]
    pub fbl_width: f64,
    /// Trace width.
    #[serde(deserialize_with = "units::de::length")]
    pub cpw_width: f64,
    /// Gap to ground on each side of the trace.
    #[serde(deserialize_with = "units::de::length")]
    pub cpw_gap: f64,
}

impl Default for Tmon {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            inductor_width: 10.,
            jj_gap: 30.,
            pad_head_width: 40.,
            pad_head_length: 400.,
            pad_arm_width: 80.,
            pad_arm_length: 1000.,
            palm_radius: 80.,
            pad_gap: 80.,
            flux_bias_line_options: TmonFluxBiasLineOptions::default(),
        }
    }
}

impl Default for TmonFluxBiasLineOptions {
    fn default() -> Self {
        Self {
            make_fbl: false,
            fbl_sep: 60.,
            fbl_height: 80.,
            fbl_width: 30.,
            cpw_width: config::CPW_WIDTH,
            cpw_gap: config::CPW_GAP,
        }
    }
}

impl Tmon {
    fn make_pocket(&self, cell: &mut ComponentBuilder, trans: Transformation) -> Result<()> {
        positive([
            ("inductor_width", self.inductor_width),
            ("jj_gap", self.jj_gap),
            ("pad_head_width", self.pad_head_width),
            ("pad_head_length", self.pad_head_length),
            ("pad_arm_width", self.pad_arm_width),
            ("pad_arm_length", self.pad_arm_length),
            ("palm_radius", self.palm_radius),
            ("pad_gap", self.pad_gap),
        ])?;
        let (hw, hl) = (self.pad_head_width, self.pad_head_length);
        let (aw, al) = (self.pad_arm_width, self.pad_arm_length);
        let (pr, gap) = (self.palm_radius, self.pad_gap);

        let tmon = union(&[
            rectangle(hw, hl, 0., hl / 2.)?,
            rectangle(al, aw, 0., 0.)?,
            disc(Point::new(-al / 2., 0.), pr / 2.)?,
            disc(Point::new(al / 2., 0.), pr / 2.)?,
        ]);
        let pad_etch = union(&[
            rectangle(hw + 2. * gap, hl + 2. * self.jj_gap, 0., hl / 2.)?,
            rectangle(al + 2. * gap, aw + 2. * gap, 0., 0.)?,
            disc(Point::new(-al / 2., 0.), 1.5 * pr)?,
            disc(Point::new(al / 2., 0.), 1.5 * pr)?,
        ]);
        let rect_jj = line_string([Point::new(0., hl + self.jj_gap), Point::new(0., hl)])?;

        cell.add_qgeometries([
            QGeometry::poly("tmon", tmon.transform(trans)),
            QGeometry::poly("pad_etch", pad_etch.transform(trans)).subtract(true),
            QGeometry::junction("rect_jj", rect_jj.transform(trans), self.inductor_width),
        ])
    }

    fn make_flux_bias_line(&self, cell: &mut ComponentBuilder, trans: Transformation) -> Result<()> {
        let pf = &self.flux_bias_line_options;
        positive([
            ("fbl_height", pf.fbl_height),
            ("fbl_width", pf.fbl_width),
            ("cpw_width", pf.cpw_width),
        ])?;
        non_negative([("fbl_sep", pf.fbl_sep), ("cpw_gap", pf.cpw_gap)])?;
        tracing::debug!(component = %cell.name(), "adding flux-bias line");

        let (h, fw, cw, g) = (pf.fbl_height, pf.fbl_width, pf.cpw_width, pf.cpw_gap);
        let base = self.pad_head_length + pf.fbl_sep;

        let line = polygon([
            Point::new(-fw / 2., base),
            Point::new(fw / 2., base),
            Point::new(cw / 2., base + h),
            Point::new(-cw / 2., base + h),
        ])?
        .union(&rectangle(cw, h, 0., base + h)?);
        let gap = union(&[
            polygon([
                Point::new(-2. * fw, base - 2. * g),
                Point::new(2. * fw, base - 2. * g),
                Point::new(4. * g, base + h),
                Point::new(-4. * g, base + h),
            ])?,
            rectangle(cw + 4. * g, h, 0., base + h)?,
        ]);
        let port = [
            Point::new(-h, base + 1.5 * h),
            Point::new(h, base + 1.5 * h),
        ]
        .transform(trans);

        cell.add_qgeometries([
            QGeometry::poly("flux_bias_line", line.transform(trans)),
            QGeometry::poly("flux_bias_line_gap", gap.transform(trans)).subtract(true),
        ])?;
        cell.add_pin("flux_bias_line", port, cw, false)
    }
}

impl QComponent for Tmon {
    fn kind(&self) -> &'static str {
        "tmon"
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn make(&self, cell: &mut ComponentBuilder) -> Result<()> {
        let trans = self.placement.transformation()?;
        self.make_pocket(cell, trans)?;
        if self.flux_bias_line_options.make_fbl {
            self.make_flux_bias_line(cell, trans)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use qgeometry::{Attributes, Category, ComponentGeometry};

    use super::*;
    use crate::Error;

    fn build(qubit: &Tmon) -> ComponentGeometry {
        let mut cell = ComponentBuilder::new("T1");
        qubit.make(&mut cell).unwrap();
        cell.finish()
    }

    fn with_fbl(placement: Placement) -> Tmon {
        Tmon {
            placement,
            flux_bias_line_options: TmonFluxBiasLineOptions {
                make_fbl: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn half_cross_and_etch() {
        let geo = build(&Tmon::default());
        assert!(geo.pins().is_empty());

        let tmon = geo.get(Category::Poly, "tmon").unwrap();
        assert!(!tmon.is_subtract());
        assert_relative_eq!(
            tmon.shape().bbox().unwrap(),
            Rect::from_sides(-540., -40., 540., 400.),
            epsilon = 1e-3
        );
        let etch = geo.get(Category::Poly, "pad_etch").unwrap();
        assert!(etch.is_subtract());
        assert_relative_eq!(
            etch.shape().bbox().unwrap(),
            Rect::from_sides(-620., -120., 620., 430.),
            epsilon = 1e-3
        );

        let jj = geo.get(Category::Junction, "rect_jj").unwrap();
        assert_eq!(
            jj.attributes(),
            &Attributes::Junction {
                width: 10.,
                hfss_inductance: None,
                gds_cell_name: None,
            }
        );
        let path = jj.shape().path().unwrap();
        assert_eq!(path.start(), Point::new(0., 430.));
        assert_eq!(path.end(), Point::new(0., 400.));
    }

    #[test]
    fn flux_bias_line_tapers_to_the_trace() {
        let geo = build(&with_fbl(Placement::default()));
        let line = geo.get(Category::Poly, "flux_bias_line").unwrap().shape();
        // Taper of 1600 plus trace of 800, overlapping over 400.
        assert_relative_eq!(line.area(), 2000., max_relative = 1e-6);
        assert!(geo
            .get(Category::Poly, "flux_bias_line_gap")
            .unwrap()
            .is_subtract());

        let pin = geo.pin("flux_bias_line").unwrap();
        assert_eq!(pin.width(), 10.);
        assert_relative_eq!(pin.middle(), Point::new(0., 580.));
        assert_relative_eq!(pin.normal(), Point::new(0., 1.));
    }

    #[test]
    fn pin_follows_placement() {
        let geo = build(&with_fbl(Placement::at(1000., 0.).rotated(90.)));
        let pin = geo.pin("flux_bias_line").unwrap();
        assert_relative_eq!(pin.middle(), Point::new(420., 0.));
        assert_relative_eq!(pin.normal(), Point::new(-1., 0.));
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut qubit = with_fbl(Placement::default());
        qubit.flux_bias_line_options.fbl_width = 0.;
        let mut cell = ComponentBuilder::new("T1");
        assert!(matches!(qubit.make(&mut cell), Err(Error::Configuration(_))));

        let qubit = Tmon {
            jj_gap: f64::NAN,
            ..Default::default()
        };
        let mut cell = ComponentBuilder::new("T1");
        assert!(qubit.make(&mut cell).is_err());
    }
}
