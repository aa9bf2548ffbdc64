//! Dry air.

use crate::{Gas, interp_table};

const R_AIR: f64 = 287.05;

// cp(T), J/(kg K), standard-atmosphere composition
const CP_TABLE: &[(f64, f64)] = &[
    (250.0, 1003.0),
    (300.0, 1005.0),
    (400.0, 1013.0),
    (500.0, 1029.0),
    (600.0, 1051.0),
    (700.0, 1075.0),
    (800.0, 1099.0),
    (900.0, 1121.0),
    (1000.0, 1141.0),
    (1100.0, 1159.0),
    (1200.0, 1175.0),
    (1300.0, 1189.0),
    (1400.0, 1207.0),
    (1500.0, 1230.0),
    (1600.0, 1248.0),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Air;

impl Gas for Air {
    fn r(&self) -> f64 {
        R_AIR
    }

    fn cp(&self, t: f64) -> f64 {
        interp_table(CP_TABLE, t)
    }
}
