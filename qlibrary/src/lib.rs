//! Parametric geometry generators for superconducting-qubit chip layouts.
//!
//! Each component turns a set of options into named polygons, paths and
//! junction lines, places them with one rigid transform, and exposes
//! named pins for routing. A [`Design`](crate::design::Design) owns the
//! generated geometry of every component.
//!
//! # Examples
//!
//! ```
//! use qlibrary::prelude::*;
//!
//! let mut design = Design::new();
//! let qubit = FluxoniumPocket {
//!     placement: Placement::at(1000., 0.).rotated(90.),
//!     flux_bias_line_options: FluxBiasLineOptions {
//!         make_fbl: true,
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! let q1 = design.add_component("Q1", &qubit).unwrap();
//! assert!(q1.pin("Flux bias line").is_some());
//! ```
#![warn(missing_docs)]

pub mod component;
pub mod design;
pub mod junction_array;
pub mod prelude;
pub mod qubits;
pub mod terminations;

#[cfg(test)]
mod tests;

#[doc(inline)]
pub use geometry;
#[doc(inline)]
pub use qgeometry;
pub use qgeometry::error::{Error, Result};
