//! The component trait and options shared by every component.

use arcstr::ArcStr;
use config::units;
use geometry::error::{check_finite, check_non_negative, check_positive};
use geometry::prelude::*;
use qgeometry::{ComponentBuilder, DEFAULT_CHIP, DEFAULT_LAYER};
use serde::Deserialize;

use crate::Result;

/// A parametric component that can be placed in a [`Design`](crate::design::Design).
pub trait QComponent {
    /// The identifier of this component type in design files.
    fn kind(&self) -> &'static str;

    /// Where and on which chip and layer the component is placed.
    fn placement(&self) -> &Placement;

    /// Generates the component's geometry and pins.
    ///
    /// Implementations validate their options, build the geometry in the
    /// component's local frame, and apply
    /// [`Placement::transformation`] exactly once to every shape and pin
    /// point before registering it.
    fn make(&self, cell: &mut ComponentBuilder) -> Result<()>;
}

/// Position, orientation, chip and layer of a component.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Placement {
    /// The x coordinate of the component origin, in micrometres.
    #[serde(deserialize_with = "units::de::length")]
    pub pos_x: f64,
    /// The y coordinate of the component origin, in micrometres.
    #[serde(deserialize_with = "units::de::length")]
    pub pos_y: f64,
    /// Counterclockwise rotation about the component origin, in degrees.
    #[serde(deserialize_with = "units::de::angle")]
    pub orientation: f64,
    /// The chip the geometry is drawn on.
    pub chip: ArcStr,
    /// The layer the geometry is drawn on.
    pub layer: u32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            pos_x: 0.,
            pos_y: 0.,
            orientation: 0.,
            chip: ArcStr::from(DEFAULT_CHIP),
            layer: DEFAULT_LAYER,
        }
    }
}

impl Placement {
    /// A placement at `(pos_x, pos_y)` with no rotation.
    pub fn at(pos_x: f64, pos_y: f64) -> Self {
        Self {
            pos_x,
            pos_y,
            ..Default::default()
        }
    }

    /// Sets the orientation in degrees.
    pub fn rotated(mut self, orientation: f64) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the layer.
    pub fn on_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    /// The component origin.
    pub fn origin(&self) -> Point {
        Point::new(self.pos_x, self.pos_y)
    }

    /// Rotation by `orientation` about the local origin followed by a
    /// translation to `(pos_x, pos_y)`.
    pub fn transformation(&self) -> Result<Transformation> {
        Ok(Transformation::try_rotate_translate(
            self.orientation,
            self.pos_x,
            self.pos_y,
        )?)
    }
}

/// Checks that every named value is finite and strictly positive.
pub(crate) fn positive<const N: usize>(values: [(&str, f64); N]) -> Result<()> {
    for (name, value) in values {
        check_positive(name, value)?;
    }
    Ok(())
}

/// Checks that every named value is finite and not negative.
pub(crate) fn non_negative<const N: usize>(values: [(&str, f64); N]) -> Result<()> {
    for (name, value) in values {
        check_non_negative(name, value)?;
    }
    Ok(())
}

/// Checks that every named value is finite.
pub(crate) fn finite<const N: usize>(values: [(&str, f64); N]) -> Result<()> {
    for (name, value) in values {
        check_finite(name, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::Error;

    #[test]
    fn placement_rotates_then_translates() {
        let trans = Placement::at(100., -50.).rotated(90.).transformation().unwrap();
        assert_relative_eq!(trans.apply(Point::new(10., 0.)), Point::new(100., -40.));
        assert_eq!(trans.offset_point(), Point::new(100., -50.));
    }

    #[test]
    fn non_finite_placement_is_rejected() {
        let p = Placement::at(f64::NAN, 0.);
        assert!(matches!(p.transformation(), Err(Error::Configuration(_))));
        let p = Placement::at(0., 0.).rotated(f64::INFINITY);
        assert!(p.transformation().is_err());
    }

    #[test]
    fn checks_name_the_option() {
        let err = positive([("pad_width", 15.), ("pad_gap", 0.)]).unwrap_err();
        assert!(err.to_string().contains("pad_gap"));
        assert!(non_negative([("fbl_sep", 0.)]).is_ok());
        assert!(finite([("cl_sep", -15.)]).is_ok());
    }
}
