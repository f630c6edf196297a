//! Chip-level features that are not qubits: frames and alignment markers.

pub mod frame;
pub mod markers;
