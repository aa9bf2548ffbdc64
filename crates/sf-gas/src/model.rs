//! Closed set of working fluids used by the cycle and the staged machines.

use crate::{Air, CombustionProducts, Gas};

/// Dispatching wrapper so states and nodes can carry their working fluid
/// by value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GasModel {
    #[default]
    Air,
    CombustionProducts,
}

impl Gas for GasModel {
    fn r(&self) -> f64 {
        match self {
            GasModel::Air => Air.r(),
            GasModel::CombustionProducts => CombustionProducts.r(),
        }
    }

    fn cp(&self, t: f64) -> f64 {
        match self {
            GasModel::Air => Air.cp(t),
            GasModel::CombustionProducts => CombustionProducts.cp(t),
        }
    }
}
