//! Distribution shapes over the stage axis.

use crate::error::{LawError, LawResult};

/// A pure shape function `stage coordinate -> value`.
///
/// ## Bi-parabolic shape
///
/// Two parabolic segments joined at `x_peak`, each with zero slope there:
///
/// ```text
/// value(x_peak) = 1
/// value(x0)     = 1 - start_loss
/// value(x1)     = 1 - end_loss
/// ```
///
/// The left segment covers `x < x_peak`, the right one the rest. A peak
/// coincident with a domain boundary simply disables that side's segment,
/// so no division by a zero span occurs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distribution {
    Constant {
        value: f64,
    },
    Linear {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    },
    BiParabolic {
        x0: f64,
        x1: f64,
        x_peak: f64,
        start_loss: f64,
        end_loss: f64,
    },
}

impl Distribution {
    pub fn constant(value: f64) -> Self {
        Distribution::Constant { value }
    }

    /// Affine law through `(x0, y0)` and `(x1, y1)`.
    pub fn linear(x0: f64, y0: f64, x1: f64, y1: f64) -> LawResult<Self> {
        if x0 >= x1 {
            return Err(LawError::InvalidDomain {
                what: "linear law needs x0 < x1",
                x0,
                x1,
            });
        }
        Ok(Distribution::Linear { x0, y0, x1, y1 })
    }

    /// Unit-height bi-parabolic law over `[x0, x1]` peaking at `x_peak`.
    pub fn bi_parabolic(
        x0: f64,
        x1: f64,
        x_peak: f64,
        start_loss: f64,
        end_loss: f64,
    ) -> LawResult<Self> {
        if x0 >= x1 {
            return Err(LawError::InvalidDomain {
                what: "bi-parabolic law needs x0 < x1",
                x0,
                x1,
            });
        }
        if x_peak < x0 || x_peak > x1 {
            return Err(LawError::PeakOutsideDomain { x_peak, x0, x1 });
        }
        Ok(Distribution::BiParabolic {
            x0,
            x1,
            x_peak,
            start_loss,
            end_loss,
        })
    }

    /// Evaluate the shape at a stage coordinate.
    pub fn value_at(&self, x: f64) -> f64 {
        match *self {
            Distribution::Constant { value } => value,
            Distribution::Linear { x0, y0, x1, y1 } => {
                if x0 == x1 {
                    y0
                } else {
                    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
                }
            }
            Distribution::BiParabolic {
                x0,
                x1,
                x_peak,
                start_loss,
                end_loss,
            } => {
                if x < x_peak {
                    let rel = (x - x_peak) / (x0 - x_peak);
                    1.0 - start_loss * rel * rel
                } else if x > x_peak {
                    let rel = (x - x_peak) / (x1 - x_peak);
                    1.0 - end_loss * rel * rel
                } else {
                    1.0
                }
            }
        }
    }
}
