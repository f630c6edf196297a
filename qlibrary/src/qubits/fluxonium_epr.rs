//! A fluxonium variant with rounded pads and arms for EPR simulation.
//!
//! The inductor is either a kinetic-inductance nanowire, whose length
//! follows from the film's sheet inductance, or a junction array of fixed
//! length. Charge and readout features sit above or below the pocket
//! depending on `loc_H`; the geometry is drawn for `loc_H = 1` and mirrored
//! about the x axis for negative values.

use arcstr::ArcStr;
use config::units;
use geometry::prelude::*;
use qgeometry::{ComponentBuilder, QGeometry};
use serde::Deserialize;

use crate::component::{finite, non_negative, positive, Placement, QComponent};
use crate::{Error, Result};

/// A fluxonium qubit for EPR analysis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FluxoniumEpr {
    /// Placement of the pocket centre.
    #[serde(flatten)]
    pub placement: Placement,
    /// Gap between the two pads, spanned by the junction.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_gap: f64,
    /// Drawn width of the junction.
    #[serde(deserialize_with = "units::de::length")]
    pub inductor_width: f64,
    /// Direction of a junction-array inductor: `1` runs up, `-1` runs down.
    pub inductor_orientation: f64,
    /// Pad width.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_width: f64,
    /// Height of the straight part of each pad.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_height: f64,
    /// Radius of the disc capping each pad.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_radius: f64,
    /// Width of the nanowire inductor.
    #[serde(deserialize_with = "units::de::length")]
    pub l_width: f64,
    /// Length of a junction-array inductor.
    #[serde(deserialize_with = "units::de::length")]
    pub array_length: f64,
    /// Width of the arms connecting pads and inductor.
    #[serde(deserialize_with = "units::de::length")]
    pub l_arm_width: f64,
    /// The x coordinate where the arms end.
    #[serde(deserialize_with = "units::de::length")]
    pub l_arm_length: f64,
    /// Inductance of the inductor.
    #[serde(deserialize_with = "units::de::inductance")]
    pub l_inductance: f64,
    /// Sheet inductance of the nanowire film.
    #[serde(deserialize_with = "units::de::inductance")]
    pub l_ind_per_square: f64,
    /// Junction inductance.
    #[serde(rename = "L_j", deserialize_with = "units::de::inductance")]
    pub l_j: f64,
    /// Width of the pocket etched from the ground plane.
    #[serde(deserialize_with = "units::de::length")]
    pub pocket_width: f64,
    /// Height of the pocket etched from the ground plane.
    #[serde(deserialize_with = "units::de::length")]
    pub pocket_height: f64,
    /// Draws a nanowire inductor if set, a junction array otherwise.
    pub nanowire_inductor: bool,
    /// The GDS cell substituted for the inductor.
    pub gds_cell_inductor: ArcStr,
    /// Flux-bias line options.
    pub flux_bias_line_options: EprFluxBiasLineOptions,
    /// Charge line options.
    pub charge_line_options: EprChargeLineOptions,
    /// Readout line options.
    pub readout_line_options: EprReadoutLineOptions,
}

/// A flux-bias line with rounded corners on the right of the pocket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EprFluxBiasLineOptions {
    /// Whether to draw the line.
    pub make_fbl: bool,
    /// The x coordinate of the vertical segment's right edge.
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

/// A charge line with a rounded tip, above or below the pocket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EprChargeLineOptions {
    /// Whether to draw the line.
    pub make_cl: bool,
    /// Length of the straight part of the line.
    #[serde(deserialize_with = "units::de::length")]
    pub cl_length: f64,
    /// Distance from the pocket edge to the line; negative values overlap.
    #[serde(deserialize_with = "units::de::length")]
    pub cl_sep: f64,
    /// Trace width.
    #[serde(deserialize_with = "units::de::length")]
    pub cpw_width: f64,
    /// Gap to ground on each side of the trace.
    #[serde(deserialize_with = "units::de::length")]
    pub cpw_gap: f64,
    /// Horizontal location; only `0` is supported.
    #[serde(rename = "loc_W")]
    pub loc_w: f64,
    /// Vertical location: `1` above the pocket, `-1` below.
    #[serde(rename = "loc_H")]
    pub loc_h: f64,
}

/// A stadium-shaped readout pad above or below the pocket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EprReadoutLineOptions {
    /// Whether to draw the pad.
    pub make_rol: bool,
    /// Distance from the pocket edge to the pad centre.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_sep: f64,
    /// Width of the straight part of the pad.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_width: f64,
    /// Pad height.
    #[serde(deserialize_with = "units::de::length")]
    pub pad_height: f64,
    /// Trace width.
    #[serde(deserialize_with = "units::de::length")]
    pub cpw_width: f64,
    /// Gap to ground on each side of the trace.
    #[serde(deserialize_with = "units::de::length")]
    pub cpw_gap: f64,
    /// Horizontal location; only `0` is supported.
    #[serde(rename = "loc_W")]
    pub loc_w: f64,
    /// Vertical location: `1` above the pocket, `-1` below.
    #[serde(rename = "loc_H")]
    pub loc_h: f64,
}

impl Default for FluxoniumEpr {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            pad_gap: 30.,
            inductor_width: 10.,
            inductor_orientation: -1.,
            pad_width: 15.,
            pad_height: 100.,
            pad_radius: 60.,
            l_width: 1.,
            array_length: 130.,
            l_arm_width: 2.,
            l_arm_length: 25.,
            l_inductance: 200.,
            l_ind_per_square: 2.,
            l_j: 34.38,
            pocket_width: 900.,
            pocket_height: 550.,
            nanowire_inductor: true,
            gds_cell_inductor: arcstr::literal!("gds_cell_inductor"),
            flux_bias_line_options: EprFluxBiasLineOptions::default(),
            charge_line_options: EprChargeLineOptions::default(),
            readout_line_options: EprReadoutLineOptions::default(),
        }
    }
}

impl Default for EprFluxBiasLineOptions {
    fn default() -> Self {
        Self {
            make_fbl: false,
            fbl_sep: 85.,
            fbl_height: 50.,
            cpw_width: 10.,
            cpw_gap: 11.233,
        }
    }
}

impl Default for EprChargeLineOptions {
    fn default() -> Self {
        Self {
            make_cl: false,
            cl_length: 100.,
            cl_sep: -15.,
            cpw_width: config::CPW_WIDTH,
            cpw_gap: config::CPW_GAP,
            loc_w: 0.,
            loc_h: 1.,
        }
    }
}

impl Default for EprReadoutLineOptions {
    fn default() -> Self {
        Self {
            make_rol: false,
            pad_sep: 85.,
            pad_width: 400.,
            pad_height: 120.,
            cpw_width: config::CPW_WIDTH,
            cpw_gap: config::CPW_GAP,
            loc_w: 0.,
            loc_h: -1.,
        }
    }
}

/// Validates a `(loc_W, loc_H)` pair, warning about unusual but drawable values.
fn check_location(component: &str, feature: &str, loc_w: f64, loc_h: f64) -> Result<()> {
    finite([("loc_W", loc_w), ("loc_H", loc_h)])?;
    if loc_h == 0. {
        return Err(Error::Configuration(arcstr::format!(
            "`loc_H` of the {feature} must be non-zero"
        )));
    }
    if loc_w != 0. || loc_h.abs() != 1. {
        tracing::warn!(
            component,
            feature,
            loc_w,
            loc_h,
            "unusual location; expected loc_W = 0 and loc_H = +1 or -1"
        );
    }
    Ok(())
}

/// Places geometry drawn above the pocket at `loc_h * offset`, mirrored
/// below the pocket for negative `loc_h`.
fn side_transform(trans: Transformation, loc_h: f64, offset: f64) -> Transformation {
    let local = Transformation::builder()
        .point(Point::new(0., loc_h * offset))
        .reflect_vert(loc_h < 0.)
        .build();
    Transformation::cascade(trans, local)
}

impl FluxoniumEpr {
    /// The length of the inductor line.
    pub fn inductor_length(&self) -> f64 {
        if self.nanowire_inductor {
            self.l_inductance * self.l_width / self.l_ind_per_square
        } else {
            self.array_length
        }
    }

    fn validate(&self) -> Result<()> {
        positive([
            ("pad_gap", self.pad_gap),
            ("inductor_width", self.inductor_width),
            ("pad_width", self.pad_width),
            ("pad_height", self.pad_height),
            ("pad_radius", self.pad_radius),
            ("l_width", self.l_width),
            ("array_length", self.array_length),
            ("l_arm_width", self.l_arm_width),
            ("l_arm_length", self.l_arm_length),
            ("l_inductance", self.l_inductance),
            ("l_ind_per_square", self.l_ind_per_square),
            ("L_j", self.l_j),
            ("pocket_width", self.pocket_width),
            ("pocket_height", self.pocket_height),
        ])?;
        finite([("inductor_orientation", self.inductor_orientation)])?;
        if self.l_arm_length <= self.pad_width / 2. {
            return Err(Error::Configuration(arcstr::format!(
                "`l_arm_length` ({}) must reach past the pad edge at {}",
                self.l_arm_length,
                self.pad_width / 2.
            )));
        }
        if !self.nanowire_inductor && self.inductor_orientation == 0. {
            return Err(Error::Configuration(
                "`inductor_orientation` must be non-zero for a junction array".into(),
            ));
        }
        Ok(())
    }

    /// One pad with its arm and rounded arm end, drawn above the junction.
    fn pad(&self, l_length: f64) -> Result<Region> {
        let (arm_end, arm_y, aw) = (self.l_arm_length, l_length / 2., self.l_arm_width);
        let arm = rect_box(self.pad_width / 2., arm_y, arm_end, arm_y + aw)?;
        let arm_fillet = disc(Point::new(arm_end, arm_y), aw)?
            .intersection(&rect_box(arm_end, arm_y, arm_end + aw, arm_y + aw)?);
        let rect = rectangle(
            self.pad_width,
            self.pad_height,
            0.,
            (self.pad_gap + self.pad_height) / 2.,
        )?;
        let cap = disc(
            Point::new(0., self.pad_radius + self.pad_height),
            self.pad_radius,
        )?;
        Ok(union(&[rect, cap, arm, arm_fillet]))
    }

    fn make_pocket(&self, cell: &mut ComponentBuilder, trans: Transformation) -> Result<()> {
        let l_length = self.inductor_length();
        let inductor = if self.nanowire_inductor {
            line_string([
                Point::new(self.l_arm_length, l_length / 2.),
                Point::new(self.l_arm_length, -l_length / 2.),
            ])?
        } else {
            let x = self.l_arm_length - self.l_arm_width;
            let io = self.inductor_orientation;
            line_string([
                Point::new(x, io * l_length / 2.),
                Point::new(x, -io * l_length / 2.),
            ])?
        };

        let pad_top = self.pad(l_length)?;
        let pad_bot = pad_top.clone().transform(Transformation::reflect_vert());
        let rect_jj = line_string([
            Point::new(0., -self.pad_gap / 2.),
            Point::new(0., self.pad_gap / 2.),
        ])?;
        let rect_pk = rectangle(self.pocket_width, self.pocket_height, 0., 0.)?;

        cell.add_qgeometries([
            QGeometry::poly("pad_top", pad_top.transform(trans)),
            QGeometry::poly("pad_bot", pad_bot.transform(trans)),
            QGeometry::poly("rect_pk", rect_pk.transform(trans)).subtract(true),
            QGeometry::junction("inductor", inductor.transform(trans), self.l_width)
                .hfss_inductance(self.l_inductance)
                .gds_cell_name(self.gds_cell_inductor.clone()),
            QGeometry::junction("rect_jj", rect_jj.transform(trans), self.inductor_width)
                .hfss_inductance(self.l_j),
        ])
    }

    fn make_flux_bias_line(&self, cell: &mut ComponentBuilder, trans: Transformation) -> Result<()> {
        let pf = &self.flux_bias_line_options;
        positive([
            ("fbl_sep", pf.fbl_sep),
            ("fbl_height", pf.fbl_height),
            ("cpw_width", pf.cpw_width),
        ])?;
        non_negative([("cpw_gap", pf.cpw_gap)])?;
        let (s, half, w, g) = (pf.fbl_sep, pf.fbl_height / 2., pf.cpw_width, pf.cpw_gap);
        let d = self.pocket_width / 2.;
        if d <= s {
            return Err(Error::Configuration(
                "`fbl_sep` must lie inside the pocket".into(),
            ));
        }
        tracing::debug!(component = %cell.name(), "adding flux-bias line");

        let top = rect_box(s, half, d, half + w)?;
        let mid = rect_box(s - w, -half, s, half)?;
        let bot = rect_box(s, -half - w, d + s / 2., -half)?;
        let corner_top = disc(Point::new(s, half), w)?.intersection(&rect_box(s - w, half, s, half + w)?);
        let corner_bot =
            disc(Point::new(s, -half), w)?.intersection(&rect_box(s - w, -half - w, s + w, -half)?);
        let line = union(&[top, mid, bot, corner_top, corner_bot]);
        let gap = rectangle(s / 2., w + 2. * g, d + s / 4., -half - w / 2.)?;
        let port = [
            Point::new(d + s / 2., 0.),
            Point::new(d + s / 2., -(2. * half + w)),
        ]
        .transform(trans);

        cell.add_qgeometries([
            QGeometry::poly("flux_bias_line", line.transform(trans)),
            QGeometry::poly("flux_bias_line_gap", gap.transform(trans)).subtract(true),
        ])?;
        cell.add_pin("flux_bias_line", port, w, false)
    }

    fn make_charge_line(&self, cell: &mut ComponentBuilder, trans: Transformation) -> Result<()> {
        let pc = &self.charge_line_options;
        positive([("cl_length", pc.cl_length), ("cpw_width", pc.cpw_width)])?;
        non_negative([("cpw_gap", pc.cpw_gap)])?;
        finite([("cl_sep", pc.cl_sep)])?;
        check_location(cell.name(), "charge line", pc.loc_w, pc.loc_h)?;
        tracing::debug!(component = %cell.name(), "adding charge line");

        let (len, w, g) = (pc.cl_length, pc.cpw_width, pc.cpw_gap);
        let line = rectangle(w, len, 0., 0.)?.union(&disc(Point::new(0., -len / 2.), w)?);
        let gap = rectangle(w + 2. * g, len + g / 2., 0., -g / 4.)?
            .union(&disc(Point::new(0., -(len + g) / 2.2), w + 2. * g)?);
        let place = side_transform(
            trans,
            pc.loc_h,
            self.pocket_height / 2. + pc.cl_sep + len,
        );
        let [p1, p2] = [Point::new(-w / 2., len / 2.), Point::new(w / 2., len / 2.)].transform(place);
        let port = if pc.loc_h < 0. { [p2, p1] } else { [p1, p2] };

        cell.add_qgeometries([
            QGeometry::poly("charge_line", line.transform(place)),
            QGeometry::poly("charge_line_gap", gap.transform(place)).subtract(true),
        ])?;
        cell.add_pin("charge_line", port, w, false)
    }

    fn make_readout_line(&self, cell: &mut ComponentBuilder, trans: Transformation) -> Result<()> {
        let pr = &self.readout_line_options;
        positive([
            ("pad_width", pr.pad_width),
            ("pad_height", pr.pad_height),
            ("cpw_width", pr.cpw_width),
        ])?;
        non_negative([("cpw_gap", pr.cpw_gap)])?;
        finite([("pad_sep", pr.pad_sep)])?;
        check_location(cell.name(), "readout line", pr.loc_w, pr.loc_h)?;
        tracing::debug!(component = %cell.name(), "adding readout line");

        let (pw, ph, w, g) = (pr.pad_width, pr.pad_height, pr.cpw_width, pr.cpw_gap);
        let stadium = |width: f64, height: f64, trace: f64| -> Result<Region> {
            Ok(union(&[
                rectangle(width, height, 0., 0.)?,
                disc(Point::new(-width / 2., 0.), height / 2.)?,
                disc(Point::new(width / 2., 0.), height / 2.)?,
                rectangle(trace, ph, 0., ph)?,
            ]))
        };
        let pad = stadium(pw, ph, w)?;
        let gap = stadium(pw + 2. * g, ph + 2. * g, w + 2. * g)?;
        let place = side_transform(trans, pr.loc_h, self.pocket_height / 2. + pr.pad_sep);
        let [p1, p2] =
            [Point::new(w / 2., 1.5 * ph), Point::new(-w / 2., 1.5 * ph)].transform(place);
        let port = if pr.loc_h < 0. { [p1, p2] } else { [p2, p1] };

        cell.add_qgeometries([
            QGeometry::poly("readout_padNline", pad.transform(place)),
            QGeometry::poly("readout_padNline_gap", gap.transform(place)).subtract(true),
        ])?;
        cell.add_pin("readout_line", port, w, false)
    }
}

impl QComponent for FluxoniumEpr {
    fn kind(&self) -> &'static str {
        "fluxonium_epr"
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

    fn build(qubit: &FluxoniumEpr) -> ComponentGeometry {
        let mut cell = ComponentBuilder::new("Q2");
        qubit.make(&mut cell).unwrap();
        cell.finish()
    }

    fn all_lines() -> FluxoniumEpr {
        FluxoniumEpr {
            flux_bias_line_options: EprFluxBiasLineOptions {
                make_fbl: true,
                ..Default::default()
            },
            charge_line_options: EprChargeLineOptions {
                make_cl: true,
                ..Default::default()
            },
            readout_line_options: EprReadoutLineOptions {
                make_rol: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn nanowire_inductor() {
        let geo = build(&FluxoniumEpr::default());
        let inductor = geo.get(Category::Junction, "inductor").unwrap();
        assert_eq!(
            inductor.attributes(),
            &Attributes::Junction {
                width: 1.,
                hfss_inductance: Some(200.),
                gds_cell_name: Some("gds_cell_inductor".into()),
            }
        );
        let path = inductor.shape().path().unwrap();
        assert_eq!(path.start(), Point::new(25., 50.));
        assert_eq!(path.end(), Point::new(25., -50.));

        let top = geo.get(Category::Poly, "pad_top").unwrap().shape();
        let bot = geo.get(Category::Poly, "pad_bot").unwrap().shape();
        assert_eq!(top.region().unwrap().num_polygons(), 1);
        assert_relative_eq!(top.area(), bot.area(), max_relative = 1e-6);
        // Pad cap reaches pad_height + 2 * pad_radius; the arm fillet ends at x = 27.
        assert_relative_eq!(
            top.bbox().unwrap(),
            Rect::from_sides(-60., 15., 60., 220.),
            epsilon = 1e-3
        );
    }

    #[test]
    fn junction_array_inductor() {
        let qubit = FluxoniumEpr {
            nanowire_inductor: false,
            ..Default::default()
        };
        let geo = build(&qubit);
        let path = geo
            .get(Category::Junction, "inductor")
            .unwrap()
            .shape()
            .path()
            .unwrap();
        assert_eq!(path.start(), Point::new(23., -65.));
        assert_eq!(path.end(), Point::new(23., 65.));
    }

    #[test]
    fn pins_point_away_from_the_pocket() {
        let geo = build(&all_lines());
        let pins: Vec<_> = geo.pins().keys().map(|k| k.as_str()).collect();
        assert_eq!(pins, ["flux_bias_line", "charge_line", "readout_line"]);

        let fbl = geo.pin("flux_bias_line").unwrap();
        assert_relative_eq!(fbl.middle(), Point::new(492.5, -30.));
        assert_relative_eq!(fbl.normal(), Point::new(1., 0.));

        let cl = geo.pin("charge_line").unwrap();
        assert_relative_eq!(cl.middle(), Point::new(0., 410.));
        assert_relative_eq!(cl.normal(), Point::new(0., 1.));

        let ro = geo.pin("readout_line").unwrap();
        assert_relative_eq!(ro.middle(), Point::new(0., -540.));
        assert_relative_eq!(ro.normal(), Point::new(0., -1.));
        assert!(!ro.input_as_norm());
    }

    #[test]
    fn readout_mirrors_with_loc_h() {
        let mut qubit = all_lines();
        qubit.readout_line_options.loc_h = 1.;
        qubit.charge_line_options.loc_h = -1.;
        let geo = build(&qubit);

        let ro = geo.pin("readout_line").unwrap();
        assert_relative_eq!(ro.middle(), Point::new(0., 540.));
        assert_relative_eq!(ro.normal(), Point::new(0., 1.));
        let cl = geo.pin("charge_line").unwrap();
        assert_relative_eq!(cl.middle(), Point::new(0., -410.));
        assert_relative_eq!(cl.normal(), Point::new(0., -1.));

        let pad = geo.get(Category::Poly, "readout_padNline").unwrap().shape();
        assert!(pad.bbox().unwrap().bot() > 275.);
    }

    #[test_log::test]
    fn unusual_location_still_builds() {
        let mut qubit = all_lines();
        qubit.charge_line_options.loc_w = 1.;
        let geo = build(&qubit);
        assert!(geo.pin("charge_line").is_some());

        qubit.charge_line_options.loc_h = 0.;
        let mut cell = ComponentBuilder::new("Q2");
        assert!(matches!(qubit.make(&mut cell), Err(Error::Configuration(_))));
    }

    fn anchor(geo: &ComponentGeometry, name: &str) -> Point {
        geo.get(Category::Poly, name)
            .unwrap()
            .shape()
            .anchor()
            .unwrap()
    }

    #[test_log::test]
    fn loc_h_magnitude_moves_without_stretching() {
        let mut qubit = all_lines();
        qubit.readout_line_options.loc_h = 1.;
        let near = build(&qubit);
        qubit.readout_line_options.loc_h = 2.;
        let far = build(&qubit);

        let pin = far.pin("readout_line").unwrap();
        assert_relative_eq!(pin.middle(), Point::new(0., 900.));
        assert_relative_eq!(pin.normal(), Point::new(0., 1.));

        let near_pad = near.get(Category::Poly, "readout_padNline").unwrap().shape();
        let far_pad = far.get(Category::Poly, "readout_padNline").unwrap().shape();
        assert_relative_eq!(far_pad.area(), near_pad.area(), max_relative = 1e-6);
        let (a, b) = (near_pad.bbox().unwrap(), far_pad.bbox().unwrap());
        assert_relative_eq!(b.height(), a.height(), epsilon = 1e-3);
        assert_relative_eq!(b.bot() - a.bot(), 360., epsilon = 1e-3);
    }

    #[test]
    fn features_follow_the_placement() {
        let mut qubit = all_lines();
        qubit.charge_line_options.loc_h = -1.;
        qubit.readout_line_options.loc_h = 1.;
        let local = build(&qubit);

        for angle in [30., 90., 200.] {
            qubit.placement = Placement::at(-1200., 800.).rotated(angle);
            let geo = build(&qubit);
            let trans = Transformation::rotate_translate(angle, -1200., 800.);

            for name in ["flux_bias_line", "charge_line", "readout_line"] {
                let (placed, expected) = (geo.pin(name).unwrap(), local.pin(name).unwrap());
                assert_relative_eq!(
                    placed.middle(),
                    expected.middle().transform(trans),
                    epsilon = 1e-9
                );
                assert_relative_eq!(
                    placed.normal(),
                    expected.normal().transform(Transformation::rotate(angle)),
                    epsilon = 1e-9
                );
            }
            for name in ["pad_top", "pad_bot", "charge_line", "readout_padNline"] {
                assert_relative_eq!(
                    anchor(&geo, name),
                    anchor(&local, name).transform(trans),
                    epsilon = 1e-3
                );
            }
        }
    }
}
