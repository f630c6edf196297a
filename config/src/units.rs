//! Physical quantities with units.
//!
//! Lengths are normalized to micrometres, inductances to nanohenries and
//! angles to degrees. A bare number is already in the base unit.
//!
//! # Examples
//!
//! ```
//! use config::units::{parse_inductance, parse_length};
//!
//! assert_eq!(parse_length("9mm").unwrap(), 9000.);
//! assert_eq!(parse_length("70 um").unwrap(), 70.);
//! assert_eq!(parse_inductance("16.35nH").unwrap(), 16.35);
//! assert!(parse_length("3 furlongs").is_err());
//! ```

use std::f64::consts::PI;
use std::fmt;

use anyhow::{bail, Result};
use serde::de::{Deserializer, Visitor};

const LENGTH_UNITS: &[(&str, f64)] = &[
    ("um", 1.),
    ("µm", 1.),
    ("nm", 1e-3),
    ("mm", 1e3),
    ("cm", 1e4),
    ("m", 1e6),
];

const INDUCTANCE_UNITS: &[(&str, f64)] = &[
    ("pH", 1e-3),
    ("nH", 1.),
    ("uH", 1e3),
    ("µH", 1e3),
    ("mH", 1e6),
    ("H", 1e9),
];

const ANGLE_UNITS: &[(&str, f64)] = &[("deg", 1.), ("rad", 180. / PI)];

fn parse_with(kind: &str, s: &str, units: &[(&str, f64)]) -> Result<f64> {
    let s = s.trim();
    // Longer suffixes are listed before the suffixes they end with.
    let (number, scale) = units
        .iter()
        .find_map(|&(unit, scale)| s.strip_suffix(unit).map(|rest| (rest.trim_end(), scale)))
        .unwrap_or((s, 1.));
    let value = match number.parse::<f64>() {
        Ok(value) => value * scale,
        Err(_) => bail!("invalid {kind} `{s}`"),
    };
    if !value.is_finite() {
        bail!("{kind} `{s}` is not finite");
    }
    Ok(value)
}

/// Parses a length, returning micrometres.
pub fn parse_length(s: &str) -> Result<f64> {
    parse_with("length", s, LENGTH_UNITS)
}

/// Parses an inductance, returning nanohenries.
pub fn parse_inductance(s: &str) -> Result<f64> {
    parse_with("inductance", s, INDUCTANCE_UNITS)
}

/// Parses an angle, returning degrees.
pub fn parse_angle(s: &str) -> Result<f64> {
    parse_with("angle", s, ANGLE_UNITS)
}

struct QuantityVisitor {
    kind: &'static str,
    parse: fn(&str) -> Result<f64>,
}

impl Visitor<'_> for QuantityVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a number or a {} string with units", self.kind)
    }

    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<f64, E> {
        (self.parse)(v).map_err(E::custom)
    }
}

/// Serde helpers for `deserialize_with`, accepting numbers or unit strings.
pub mod de {
    use super::*;

    /// Deserializes a length in micrometres.
    pub fn length<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        d.deserialize_any(QuantityVisitor {
            kind: "length",
            parse: parse_length,
        })
    }

    /// Deserializes an inductance in nanohenries.
    pub fn inductance<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        d.deserialize_any(QuantityVisitor {
            kind: "inductance",
            parse: parse_inductance,
        })
    }

    /// Deserializes an angle in degrees.
    pub fn angle<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        d.deserialize_any(QuantityVisitor {
            kind: "angle",
            parse: parse_angle,
        })
    }
}
