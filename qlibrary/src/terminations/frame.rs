//! A rectangular border around the chip.

use config::units;
use geometry::prelude::*;
use qgeometry::{ComponentBuilder, QGeometry};
use serde::Deserialize;

use crate::component::{positive, Placement, QComponent};
use crate::{Error, Result};

/// A border of width `f_width` whose outline is `frame_w` by `frame_h`,
/// centred on the component origin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Frame {
    /// Placement of the frame centre.
    #[serde(flatten)]
    pub placement: Placement,
    /// Outer width.
    #[serde(deserialize_with = "units::de::length")]
    pub frame_w: f64,
    /// Outer height.
    #[serde(deserialize_with = "units::de::length")]
    pub frame_h: f64,
    /// Border width.
    #[serde(deserialize_with = "units::de::length")]
    pub f_width: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            frame_w: 9000.,
            frame_h: 9000.,
            f_width: 70.,
        }
    }
}

impl Frame {
    fn validate(&self) -> Result<()> {
        positive([
            ("frame_w", self.frame_w),
            ("frame_h", self.frame_h),
            ("f_width", self.f_width),
        ])?;
        if 2. * self.f_width > self.frame_w.min(self.frame_h) {
            return Err(Error::Configuration(arcstr::format!(
                "`f_width` of {} does not fit in a {} by {} frame",
                self.f_width,
                self.frame_w,
                self.frame_h
            )));
        }
        Ok(())
    }
}

impl QComponent for Frame {
    fn kind(&self) -> &'static str {
        "frame"
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn make(&self, cell: &mut ComponentBuilder) -> Result<()> {
        self.validate()?;
        let trans = self.placement.transformation()?;
        let (w, h, fw) = (self.frame_w, self.frame_h, self.f_width);

        let lines = [
            rectangle(w, fw, 0., (h - fw) / 2.)?,
            rectangle(w, fw, 0., -(h - fw) / 2.)?,
            rectangle(fw, h, (w - fw) / 2., 0.)?,
            rectangle(fw, h, -(w - fw) / 2., 0.)?,
        ];
        let frame = union(&lines).transform(trans);

        cell.add_qgeometry(QGeometry::poly("frame", frame))
    }
}
