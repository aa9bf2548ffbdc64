//! Stagnation state carried between nodes.

use sf_core::units::{Pressure, Temperature, kelvin, pa};
use sf_gas::GasModel;

/// Stagnation temperature and pressure of a working fluid.
#[derive(Clone, Copy, Debug)]
pub struct StagnationState {
    pub t: Temperature,
    pub p: Pressure,
    pub gas: GasModel,
}

impl StagnationState {
    pub fn new(t: Temperature, p: Pressure, gas: GasModel) -> Self {
        Self { t, p, gas }
    }

    /// Convenience constructor from plain SI values.
    pub fn from_si(t_kelvin: f64, p_pascal: f64, gas: GasModel) -> Self {
        Self {
            t: kelvin(t_kelvin),
            p: pa(p_pascal),
            gas,
        }
    }

    /// Same state with the pressure scaled by a loss coefficient.
    pub fn with_pressure_loss(self, sigma: f64) -> Self {
        Self {
            p: pa(self.p.value * sigma),
            ..self
        }
    }
}
