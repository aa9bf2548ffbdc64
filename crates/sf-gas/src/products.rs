//! Kerosene combustion products at a lean mixture (excess-air ratio ~3),
//! typical of gas-turbine burner exits.

use crate::{Gas, interp_table};

const R_PRODUCTS: f64 = 287.4;

// cp(T), J/(kg K)
const CP_TABLE: &[(f64, f64)] = &[
    (300.0, 1046.0),
    (400.0, 1058.0),
    (500.0, 1077.0),
    (600.0, 1102.0),
    (700.0, 1129.0),
    (800.0, 1156.0),
    (900.0, 1182.0),
    (1000.0, 1206.0),
    (1100.0, 1228.0),
    (1200.0, 1248.0),
    (1300.0, 1267.0),
    (1400.0, 1284.0),
    (1500.0, 1300.0),
    (1600.0, 1314.0),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombustionProducts;

impl Gas for CombustionProducts {
    fn r(&self) -> f64 {
        R_PRODUCTS
    }

    fn cp(&self, t: f64) -> f64 {
        interp_table(CP_TABLE, t)
    }
}
