//! Utilities for parsing design files and physical option values.
#![warn(missing_docs)]

pub mod paths;
pub mod document;
pub mod units;

pub use crate::document::{load, parse_document};

/// The file name searched for by [`paths::find_design_file`].
pub const DESIGN_FILE_NAME: &str = "qlibrary.toml";

/// Design-variable default for coplanar waveguide trace width, in micrometres.
pub const CPW_WIDTH: f64 = 10.;
/// Design-variable default for coplanar waveguide gap, in micrometres.
pub const CPW_GAP: f64 = 6.;
