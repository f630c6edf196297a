//! An import prelude that re-exports commonly used items.

pub use crate::component::{Placement, QComponent};
pub use crate::design::Design;
pub use crate::junction_array::{ArrayUnit, JunctionArray};
pub use crate::qubits::fluxonium_epr::{
    FluxoniumEpr, EprChargeLineOptions, EprFluxBiasLineOptions, EprReadoutLineOptions,
};
pub use crate::qubits::fluxonium_pocket::{
    ChargeLineOptions, FluxBiasLineOptions, FluxoniumPocket, ReadoutLineOptions,
};
pub use crate::qubits::tmon::{Tmon, TmonFluxBiasLineOptions};
pub use crate::terminations::frame::Frame;
pub use crate::terminations::markers::{Markers, MarkersLine};
pub use geometry::prelude::*;
pub use qgeometry::{Attributes, Category, ComponentBuilder, ComponentGeometry, Pin, QGeometry};
