//! Qubits drawn inside a ground-plane pocket.

pub mod fluxonium_epr;
pub mod fluxonium_pocket;
pub mod tmon;
