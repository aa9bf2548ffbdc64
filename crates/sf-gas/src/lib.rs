//! Ideal-gas property models for air and kerosene combustion products.
//!
//! Properties follow the calorically-imperfect ideal gas model: the specific
//! gas constant is fixed per gas, while `cp` varies with temperature through
//! a piecewise-linear table. Mean values over a temperature interval use the
//! endpoint average, which is what the stage-stacking and cycle passes need.
//!
//! All quantities are plain SI `f64` (K, J/(kg K)).

pub mod air;
pub mod model;
pub mod products;

pub use air::Air;
pub use model::GasModel;
pub use products::CombustionProducts;

/// Calorically-imperfect ideal gas.
pub trait Gas {
    /// Specific gas constant, J/(kg K).
    fn r(&self) -> f64;

    /// Specific heat at constant pressure, J/(kg K).
    fn cp(&self, t: f64) -> f64;

    /// Adiabatic index `cp / (cp - R)`.
    fn k(&self, t: f64) -> f64 {
        let cp = self.cp(t);
        cp / (cp - self.r())
    }

    /// Mean cp over `[t1, t2]` (endpoint average; order-insensitive).
    fn cp_mean(&self, t1: f64, t2: f64) -> f64 {
        0.5 * (self.cp(t1) + self.cp(t2))
    }

    /// Adiabatic index from the mean cp over `[t1, t2]`.
    fn k_mean(&self, t1: f64, t2: f64) -> f64 {
        let cp = self.cp_mean(t1, t2);
        cp / (cp - self.r())
    }
}

/// Piecewise-linear interpolation over a (temperature, value) table.
/// Clamps at the table ends.
pub(crate) fn interp_table(table: &[(f64, f64)], t: f64) -> f64 {
    debug_assert!(table.len() >= 2);
    if t <= table[0].0 {
        return table[0].1;
    }
    if t >= table[table.len() - 1].0 {
        return table[table.len() - 1].1;
    }
    for w in table.windows(2) {
        let (t0, v0) = w[0];
        let (t1, v1) = w[1];
        if t <= t1 {
            return v0 + (v1 - v0) * (t - t0) / (t1 - t0);
        }
    }
    table[table.len() - 1].1
}
