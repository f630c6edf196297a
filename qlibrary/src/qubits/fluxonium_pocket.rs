//! A fluxonium with a kinetic-inductor shunt, drawn in a rectangular pocket.
//!
//! Two pads with rounded ends face each other across a junction along the
//! local y axis. Thin arms leave the right side of each pad and turn through
//! quarter-circle fillets into the kinetic inductor, a junction line of
//! length `l_inductance * l_width / l_ind_per_square`. A flux-bias line,
//! charge line and readout pad can be added around the pocket.

use config::units;
use geometry::prelude::*;
use qgeometry::{ComponentBuilder, QGeometry};
use serde::Deserialize;

use crate::component::{non_negative, positive, Placement, QComponent};
use crate::{Error, Result};

/// A fluxonium qubit in a pocket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FluxoniumPocket {
    /// Placement of the pocket centre.
    #[serde(flatten)]
    pub placement: Placement,
    /// Width of the cell; outer lines end on its boundary.
    #[serde(deserialize_with = "units::de::length")]
    pub width: f64,
    /// Height of the cell; outer lines end on its boundary.
    #[serde(deserialize_with = "units::de::length")]
    pub height: f64,
    /// Gap between the two pads, spanned by the junction.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_gap: f64,
    /// Drawn width of the junction.
    #[serde(deserialize_with = "units::de::length")]
    pub inductor_width: f64,
    /// Pad width.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_width: f64,
    /// Pad height, including the rounded end.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_height: f64,
    /// Radius of the rounded pad end.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_radius: f64,
    /// Width of the inductor wire and arms.
    #[serde(deserialize_with = "units::de::length")]
    pub l_width: f64,
    /// Length of the arms between pad and fillet.
    #[serde(deserialize_with = "units::de::length")]
    pub l_arm_length: f64,
    /// Inductance of the kinetic inductor.
    #[serde(deserialize_with = "units::de::inductance")]
    pub l_inductance: f64,
    /// Sheet inductance of the inductor film.
    #[serde(deserialize_with = "units::de::inductance")]
    pub l_ind_per_square: f64,
    /// Centre-line radius of the fillets.
    #[serde(deserialize_with = "units::de::length")]
    pub l_fillet: f64,
    /// Junction inductance.
    #[serde(rename = "L_j", deserialize_with = "units::de::inductance")]
    pub l_j: f64,
    /// Width of the pocket etched from the ground plane.
    #[serde(deserialize_with = "units::de::length")]
    pub pocket_width: f64,
    /// Height of the pocket etched from the ground plane.
    #[serde(deserialize_with = "units::de::length")]
    pub pocket_height: f64,
    /// Flux-bias line options.
    pub flux_bias_line_options: FluxBiasLineOptions,
    /// Charge line options.
    pub charge_line_options: ChargeLineOptions,
    /// Readout line options.
    pub readout_line_options: ReadoutLineOptions,
}

/// A flux-bias line that loops past the kinetic inductor and leaves the
/// cell on its right side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FluxBiasLineOptions {
    /// Whether to draw the line.
    pub make_fbl: bool,
    /// Clearance between the inductor arms and the line.
    #[serde(deserialize_with = "units::de::length")]
    pub fbl_sep: f64,
    /// Vertical extent of the loop.
    #[serde(deserialize_with = "units::de::length")]
    pub fbl_height: f64,
    /// Trace width.
    #[serde(deserialize_with = "units::de::length")]
    pub cpw_width: f64,
    /// Gap to ground on each side of the trace.
    #[serde(deserialize_with = "units::de::length")]
    pub cpw_gap: f64,
}

/// A charge line entering the pocket from the top of the cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChargeLineOptions {
    /// Whether to draw the line.
    pub make_cl: bool,
    /// Distance from the pocket edge to the end of the line.
    #[serde(deserialize_with = "units::de::length")]
    pub cl_sep: f64,
    /// Trace width.
    #[serde(deserialize_with = "units::de::length")]
    pub cpw_width: f64,
    /// Extra etch width and the clearance at the end of the line.
    #[serde(deserialize_with = "units::de::length")]
    pub cpw_gap: f64,
}

/// A readout pad below the pocket, fed from the bottom of the cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReadoutLineOptions {
    /// Whether to draw the pad and line.
    pub make_rol: bool,
    /// Distance from the pocket to the pad etch.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_sep: f64,
    /// Pad width.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_width: f64,
    /// Pad height.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_height: f64,
    /// Etch margin around the pad.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_gap: f64,
    /// Trace width.
    #[serde(deserialize_with = "units::de::length")]
    pub cpw_width: f64,
    /// Gap to ground on each side of the trace.
    #[serde(deserialize_with = "units::de::length")]
    pub cpw_gap: f64,
}

impl Default for FluxoniumPocket {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            width: 1200.,
            height: 1200.,
            pad_gap: 30.,
            inductor_width: 10.,
            pad_width: 15.,
            pad_height: 200.,
            pad_radius: 50.,
            l_width: 1.,
            l_arm_length: 50.,
            l_inductance: 200.,
            l_ind_per_square: 2.,
            l_fillet: 5.,
            l_j: 16.35,
            pocket_width: 800.,
            pocket_height: 800.,
            flux_bias_line_options: FluxBiasLineOptions::default(),
            charge_line_options: ChargeLineOptions::default(),
            readout_line_options: ReadoutLineOptions::default(),
        }
    }
}

impl Default for FluxBiasLineOptions {
    fn default() -> Self {
        Self {
            make_fbl: false,
            fbl_sep: 50.,
            fbl_height: 50.,
            cpw_width: 10.,
            cpw_gap: 10.,
        }
    }
}

impl Default for ChargeLineOptions {
    fn default() -> Self {
        Self {
            make_cl: false,
            cl_sep: 15.,
            cpw_width: 10.,
            cpw_gap: 10.,
        }
    }
}

impl Default for ReadoutLineOptions {
    fn default() -> Self {
        Self {
            make_rol: false,
            pad_sep: 20.,
            pad_width: 150.,
            pad_height: 50.,
            pad_gap: 10.,
            cpw_width: 10.,
            cpw_gap: 10.,
        }
    }
}

impl FluxoniumPocket {
    /// The length of the kinetic inductor.
    pub fn inductor_length(&self) -> f64 {
        self.l_inductance * self.l_width / self.l_ind_per_square
    }

    fn validate(&self) -> Result<()> {
        positive([
            ("width", self.width),
            ("height", self.height),
            ("pad_gap", self.pad_gap),
            ("inductor_width", self.inductor_width),
            ("pad_width", self.pad_width),
            ("pad_height", self.pad_height),
            ("pad_radius", self.pad_radius),
            ("l_width", self.l_width),
            ("l_arm_length", self.l_arm_length),
            ("l_inductance", self.l_inductance),
            ("l_ind_per_square", self.l_ind_per_square),
            ("l_fillet", self.l_fillet),
            ("L_j", self.l_j),
            ("pocket_width", self.pocket_width),
            ("pocket_height", self.pocket_height),
        ])?;
        if self.pad_radius >= self.pad_height {
            return Err(Error::Configuration(arcstr::format!(
                "`pad_radius` ({}) must be smaller than `pad_height` ({})",
                self.pad_radius,
                self.pad_height
            )));
        }
        if 2. * self.l_fillet <= self.l_width {
            return Err(Error::Configuration(arcstr::format!(
                "`l_fillet` ({}) must exceed half of `l_width` ({})",
                self.l_fillet,
                self.l_width
            )));
        }
        Ok(())
    }

    fn make_pocket(&self, cell: &mut ComponentBuilder, trans: Transformation) -> Result<()> {
        let rect_jj = line_string([
            Point::new(0., -self.pad_gap / 2.),
            Point::new(0., self.pad_gap / 2.),
        ])?;

        let straight = self.pad_height - self.pad_radius;
        let pad = rectangle(self.pad_width, straight, 0., 0.)?
            .union(&disc(Point::new(0., straight / 2.), self.pad_radius)?);
        let pad_top = pad.translate(Point::new(0., (straight + self.pad_gap) / 2.));
        let pad_bot = pad_top.clone().transform(Transformation::rotate(180.));

        let l_tot = self.inductor_length();
        let fillet = self.fillet()?;
        let corner_x = self.l_arm_length + self.pad_width / 2.;
        let arm_x = (self.pad_width + self.l_arm_length) / 2.;

        let mount_top = rectangle(self.l_arm_length, self.l_width, arm_x, l_tot / 2. + self.l_fillet)?;
        let mount_bot = rectangle(self.l_arm_length, self.l_width, arm_x, -l_tot / 2. - self.l_fillet)?;
        let seg_top = fillet.clone().translate(Point::new(corner_x, l_tot / 2.));
        let seg_bot = fillet
            .transform(Transformation::rotate(-90.))
            .translate(Point::new(corner_x, -l_tot / 2.));
        let poly_wire_top = mount_top.union(&seg_top);
        let poly_wire_bot = seg_bot.union(&mount_bot);

        let inductor_x = corner_x + self.l_fillet;
        let inductor = line_string([
            Point::new(inductor_x, l_tot / 2.),
            Point::new(inductor_x, -l_tot / 2.),
        ])?;

        let rect_pk = rectangle(self.pocket_width, self.pocket_height, 0., 0.)?;

        cell.add_qgeometries([
            QGeometry::poly("pad_top", pad_top.transform(trans)),
            QGeometry::poly("pad_bot", pad_bot.transform(trans)),
            QGeometry::poly("poly_wire_top", poly_wire_top.transform(trans)),
            QGeometry::poly("poly_wire_bot", poly_wire_bot.transform(trans)),
            QGeometry::poly("rect_pk", rect_pk.transform(trans)).subtract(true),
            QGeometry::junction("inductor", inductor.transform(trans), self.l_width)
                .hfss_inductance(self.l_inductance),
            QGeometry::junction("rect_jj", rect_jj.transform(trans), self.inductor_width)
                .hfss_inductance(self.l_j),
        ])
    }

    /// A quarter annulus of centre-line radius `l_fillet` in the first quadrant.
    fn fillet(&self) -> Result<Region> {
        let outer = self.l_fillet + self.l_width / 2.;
        let inner = self.l_fillet - self.l_width / 2.;
        let ring = disc(Point::zero(), outer)?.subtract(&disc(Point::zero(), inner)?);
        let left = rectangle(outer, 2. * outer, -outer / 2., 0.)?;
        let below = rectangle(2. * outer, outer, 0., -outer / 2.)?;
        Ok(ring.subtract(&left).subtract(&below))
    }

    fn make_flux_bias_line(&self, cell: &mut ComponentBuilder, trans: Transformation) -> Result<()> {
        let pf = &self.flux_bias_line_options;
        positive([("fbl_height", pf.fbl_height), ("cpw_width", pf.cpw_width)])?;
        non_negative([("fbl_sep", pf.fbl_sep), ("cpw_gap", pf.cpw_gap)])?;
        if self.width <= self.pocket_width {
            return Err(Error::Configuration(
                "`width` must exceed `pocket_width` to route the flux-bias line".into(),
            ));
        }
        tracing::debug!(component = %cell.name(), "adding flux-bias line");

        let loop_x = self.pad_width / 2.
            + self.l_arm_length
            + pf.fbl_sep
            + (self.l_width + pf.cpw_width) / 2.;
        let half = pf.fbl_height / 2.;
        let [a, b, c, d, e] = [
            Point::new(self.pocket_width / 2., half),
            Point::new(loop_x, half),
            Point::new(loop_x, -half),
            Point::new(self.pocket_width / 2., -half),
            Point::new(self.width / 2., -half),
        ]
        .transform(trans);

        cell.add_qgeometries([
            QGeometry::path("fbl", line_string([a, b, c, d, e])?, pf.cpw_width),
            QGeometry::path(
                "fbl_gap",
                line_string([d, e])?,
                pf.cpw_width + 2. * pf.cpw_gap,
            )
            .subtract(true),
        ])?;
        cell.add_pin("Flux bias line", [d, e], pf.cpw_width, true)
    }

    fn make_charge_line(&self, cell: &mut ComponentBuilder, trans: Transformation) -> Result<()> {
        let pc = &self.charge_line_options;
        positive([("cpw_width", pc.cpw_width)])?;
        non_negative([("cl_sep", pc.cl_sep), ("cpw_gap", pc.cpw_gap)])?;
        let top = self.height / 2.;
        let end = self.pocket_height / 2. + pc.cl_sep;
        if top <= end {
            return Err(Error::Configuration(
                "the charge line must end inside the cell".into(),
            ));
        }
        tracing::debug!(component = %cell.name(), "adding charge line");

        let half_w = pc.cpw_width / 2.;
        let cl = rect_box(-half_w, end, half_w, top)?;
        let cl_gap = rect_box(
            -pc.cpw_gap / 2. - half_w,
            end - pc.cpw_gap,
            pc.cpw_gap / 2. + half_w,
            top,
        )?;
        let [p1, p2] = [Point::new(0., end), Point::new(0., top)].transform(trans);

        cell.add_qgeometries([
            QGeometry::poly("cl", cl.transform(trans)),
            QGeometry::poly("cl_gap", cl_gap.transform(trans)).subtract(true),
        ])?;
        cell.add_pin("Charge line", [p1, p2], pc.cpw_width, true)
    }

    fn make_readout_line(&self, cell: &mut ComponentBuilder, trans: Transformation) -> Result<()> {
        let pr = &self.readout_line_options;
        positive([
            ("pad_width", pr.pad_width),
            ("pad_height", pr.pad_height),
            ("cpw_width", pr.cpw_width),
        ])?;
        non_negative([
            ("pad_sep", pr.pad_sep),
            ("pad_gap", pr.pad_gap),
            ("cpw_gap", pr.cpw_gap),
        ])?;
        let pad_bottom = pr.pad_height + self.pocket_height / 2. + pr.pad_sep + pr.pad_gap;
        if self.height / 2. <= pad_bottom {
            return Err(Error::Configuration(
                "the readout pad must fit inside the cell".into(),
            ));
        }
        tracing::debug!(component = %cell.name(), "adding readout line");

        let pad_y = -(pr.pad_height + self.pocket_height) / 2. - pr.pad_sep - pr.pad_gap;
        let pad = rectangle(pr.pad_width, pr.pad_height, 0., pad_y)?;
        let cutout_pad = rectangle(
            pr.pad_width + 2. * pr.pad_gap,
            pr.pad_height + 2. * pr.pad_gap,
            0.,
            pad_y,
        )?;
        let [a, b] = [Point::new(0., -self.height / 2.), Point::new(0., -pad_bottom)].transform(trans);
        let cpw = line_string([a, b])?;

        cell.add_qgeometries([
            QGeometry::poly("pad", pad.transform(trans)),
            QGeometry::poly("cutout_pad", cutout_pad.transform(trans)).subtract(true),
            QGeometry::path("cpw_readout", cpw.clone(), pr.cpw_width),
            QGeometry::path("cpw_readout_gap", cpw, pr.cpw_width + 2. * pr.cpw_gap)
                .subtract(true),
        ])?;
        cell.add_pin("Readout line", [b, a], pr.cpw_width, true)
    }
}

impl QComponent for FluxoniumPocket {
    fn kind(&self) -> &'static str {
        "fluxonium_pocket"
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn make(&self, cell: &mut ComponentBuilder) -> Result<()> {
        self.validate()?;
        let trans = self.placement.transformation()?;

        self.make_pocket(cell, trans)?;
        if self.flux_bias_line_options.make_fbl {
            self.make_flux_bias_line(cell, trans)?;
        }
        if self.charge_line_options.make_cl {
            self.make_charge_line(cell, trans)?;
        }
        if self.readout_line_options.make_rol {
            self.make_readout_line(cell, trans)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use qgeometry::{Attributes, Category, ComponentGeometry};

    use super::*;

    fn build(qubit: &FluxoniumPocket) -> ComponentGeometry {
        let mut cell = ComponentBuilder::new("Q1");
        qubit.make(&mut cell).unwrap();
        cell.finish()
    }

    fn all_lines() -> FluxoniumPocket {
        FluxoniumPocket {
            flux_bias_line_options: FluxBiasLineOptions {
                make_fbl: true,
                ..Default::default()
            },
            charge_line_options: ChargeLineOptions {
                make_cl: true,
                ..Default::default()
            },
            readout_line_options: ReadoutLineOptions {
                make_rol: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn pocket_tables() {
        let geo = build(&FluxoniumPocket::default());
        let polys: Vec<_> = geo.table(Category::Poly).keys().map(|k| k.as_str()).collect();
        assert_eq!(
            polys,
            ["pad_top", "pad_bot", "poly_wire_top", "poly_wire_bot", "rect_pk"]
        );
        assert!(geo.table(Category::Path).is_empty());
        assert!(geo.pins().is_empty());

        let inductor = geo.get(Category::Junction, "inductor").unwrap();
        assert_eq!(
            inductor.attributes(),
            &Attributes::Junction {
                width: 1.,
                hfss_inductance: Some(200.),
                gds_cell_name: None,
            }
        );
        let path = inductor.shape().path().unwrap();
        // 200 nH of 2 nH/square film, 1 um wide.
        assert_relative_eq!(path.length(), 100.);
        assert_eq!(path.start(), Point::new(62.5, 50.));

        let rect_jj = geo.get(Category::Junction, "rect_jj").unwrap();
        assert_eq!(rect_jj.width(), Some(10.));
        assert_eq!(rect_jj.shape().path().unwrap().length(), 30.);
    }

    #[test]
    fn pads_are_symmetric() {
        let geo = build(&FluxoniumPocket::default());
        let top = geo.get(Category::Poly, "pad_top").unwrap().shape();
        let bot = geo.get(Category::Poly, "pad_bot").unwrap().shape();
        let top_box = top.bbox().unwrap();
        assert_relative_eq!(top_box.bot(), 15., epsilon = 1e-3);
        assert_relative_eq!(top_box.top(), 215., epsilon = 1e-3);
        assert_relative_eq!(top.area(), bot.area(), max_relative = 1e-9);
        assert_relative_eq!(bot.bbox().unwrap().top(), -15., epsilon = 1e-3);
    }

    #[test]
    fn inductor_wires_meet_the_inductor() {
        let geo = build(&FluxoniumPocket::default());
        let top = geo.get(Category::Poly, "poly_wire_top").unwrap().shape();
        let bot = geo.get(Category::Poly, "poly_wire_bot").unwrap().shape();
        // Arm from the pad edge at x = 7.5 to the fillet, which ends at the
        // inductor line x = 62.5 plus half the wire width.
        assert_relative_eq!(
            top.bbox().unwrap(),
            Rect::from_sides(7.5, 50., 63., 55.5),
            epsilon = 1e-3
        );
        assert_relative_eq!(
            bot.bbox().unwrap(),
            Rect::from_sides(7.5, -55.5, 63., -50.),
            epsilon = 1e-3
        );
        assert_relative_eq!(top.area(), bot.area(), max_relative = 1e-6);
    }

    #[test]
    fn lines_and_pins() {
        let geo = build(&all_lines());

        let fbl = geo.get(Category::Path, "fbl").unwrap();
        assert_eq!(fbl.shape().path().unwrap().num_points(), 5);
        let fbl_gap = geo.get(Category::Path, "fbl_gap").unwrap();
        assert!(fbl_gap.is_subtract());
        assert_eq!(fbl_gap.width(), Some(30.));

        let pins: Vec<_> = geo.pins().keys().map(|k| k.as_str()).collect();
        assert_eq!(pins, ["Flux bias line", "Charge line", "Readout line"]);

        let fbl_pin = geo.pin("Flux bias line").unwrap();
        assert_eq!(fbl_pin.middle(), Point::new(600., -25.));
        assert_eq!(fbl_pin.normal(), Point::new(1., 0.));
        assert_eq!(fbl_pin.width(), 10.);

        let cl_pin = geo.pin("Charge line").unwrap();
        assert_eq!(cl_pin.middle(), Point::new(0., 600.));
        assert_eq!(cl_pin.normal(), Point::new(0., 1.));
        assert_relative_eq!(
            geo.get(Category::Poly, "cl").unwrap().shape().bbox().unwrap(),
            Rect::from_sides(-5., 415., 5., 600.)
        );

        let ro_pin = geo.pin("Readout line").unwrap();
        assert_eq!(ro_pin.middle(), Point::new(0., -600.));
        assert_eq!(ro_pin.normal(), Point::new(0., -1.));
        assert_relative_eq!(
            geo.get(Category::Poly, "pad").unwrap().shape().bbox().unwrap(),
            Rect::from_sides(-75., -480., 75., -430.)
        );
        let ro = geo.get(Category::Path, "cpw_readout").unwrap();
        assert_relative_eq!(ro.shape().path().unwrap().length(), 120.);
    }

    #[test]
    fn placement_moves_pins() {
        let qubit = FluxoniumPocket {
            placement: Placement::at(1000., 500.).rotated(90.),
            ..all_lines()
        };
        let geo = build(&qubit);
        let pin = geo.pin("Flux bias line").unwrap();
        assert_relative_eq!(pin.middle(), Point::new(1025., 1100.));
        assert_relative_eq!(pin.normal(), Point::new(0., 1.));
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut cell = ComponentBuilder::new("Q1");
        let bad = FluxoniumPocket {
            pad_radius: 250.,
            ..Default::default()
        };
        assert!(matches!(bad.make(&mut cell), Err(Error::Configuration(_))));

        let bad = FluxoniumPocket {
            l_width: -1.,
            ..Default::default()
        };
        assert!(bad.make(&mut cell).is_err());

        let bad = FluxoniumPocket {
            width: 800.,
            ..all_lines()
        };
        assert!(bad.make(&mut cell).is_err());
    }
}
