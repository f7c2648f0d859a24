use serde::Serialize;

use crate::{
    core::Ticks,
    scheduler::{Admission, SIM_QUANTUM_DFL},
};

/// Knobs that are not part of the workload itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimConfig {
    /// Round-robin admission; the other policies always admit on arrival.
    pub admission: Admission,
    /// Quantum used when comparing policies or when none is given.
    pub default_quantum: Ticks,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            admission: Admission::Eager,
            default_quantum: SIM_QUANTUM_DFL,
        }
    }
}
