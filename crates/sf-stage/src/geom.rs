//! Partial per-stage geometry, completed during equilibration.

use crate::error::{StageError, StageResult};

/// Partial geometric descriptor of one blade row. Diameters, blade length
/// and chords are not here: they come out of the stacking pass.
#[derive(Clone, Copy, Debug)]
pub struct BladeRowSpec {
    /// Blade aspect ratio l/b
    pub elongation: f64,
    /// Axial gap behind the row, relative to the chord
    pub gap_rel: f64,
    /// Hub flare angle, rad (positive closes the annulus)
    pub gamma_in: f64,
    /// Tip flare angle, rad (positive opens the annulus)
    pub gamma_out: f64,
    /// Approximate pitch/chord ratio; turbine rows only
    pub t_rel: Option<f64>,
}

impl BladeRowSpec {
    pub(crate) fn validate(&self, stage: usize) -> StageResult<()> {
        if !(self.elongation > 0.0) {
            return Err(StageError::Geometry {
                what: "blade elongation must be positive",
                stage,
            });
        }
        if self.gap_rel < 0.0 {
            return Err(StageError::Geometry {
                what: "relative axial gap must not be negative",
                stage,
            });
        }
        let flare_cap = std::f64::consts::FRAC_PI_3;
        if self.gamma_in.abs() >= flare_cap || self.gamma_out.abs() >= flare_cap {
            return Err(StageError::Geometry {
                what: "flare angle out of range",
                stage,
            });
        }
        if let Some(t_rel) = self.t_rel {
            if !(t_rel > 0.0) {
                return Err(StageError::Geometry {
                    what: "relative pitch must be positive",
                    stage,
                });
            }
        }
        Ok(())
    }

    /// Axial extent of the row for a given blade length: chord from the
    /// aspect ratio, plus the trailing axial gap.
    pub(crate) fn axial_width(&self, blade_length: f64) -> f64 {
        let chord = blade_length / self.elongation;
        chord * (1.0 + self.gap_rel)
    }
}

/// One stage: a rotor row and a stator row.
#[derive(Clone, Copy, Debug)]
pub struct StageGeomSpec {
    pub rotor: BladeRowSpec,
    pub stator: BladeRowSpec,
}

impl StageGeomSpec {
    pub(crate) fn validate(&self, stage: usize) -> StageResult<()> {
        self.rotor.validate(stage)?;
        self.stator.validate(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> BladeRowSpec {
        BladeRowSpec {
            elongation: 4.0,
            gap_rel: 0.1,
            gamma_in: 0.2,
            gamma_out: 0.0,
            t_rel: None,
        }
    }

    #[test]
    fn valid_row_passes() {
        assert!(row().validate(0).is_ok());
    }

    #[test]
    fn zero_elongation_rejected() {
        let bad = BladeRowSpec {
            elongation: 0.0,
            ..row()
        };
        assert!(matches!(
            bad.validate(3),
            Err(StageError::Geometry { stage: 3, .. })
        ));
    }

    #[test]
    fn axial_width_includes_gap() {
        // l = 0.2, elongation 4 -> chord 0.05, gap 10% -> 0.055
        assert!((row().axial_width(0.2) - 0.055).abs() < 1e-12);
    }
}
