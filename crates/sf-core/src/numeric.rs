use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Settings for [`relaxed_fixed_point`].
#[derive(Clone, Copy, Debug)]
pub struct RelaxSettings {
    /// Under-relaxation factor applied to each update, in (0, 1]
    pub relax_coef: Real,
    /// Absolute tolerance on the update
    pub precision: Real,
    /// Iteration cap
    pub iter_limit: usize,
}

/// Solve `x = f(x)` by relaxed successive substitution:
///
/// ```text
/// x_{k+1} = x_k + relax_coef * (f(x_k) - x_k)
/// ```
///
/// Converges when `|f(x_k) - x_k| < precision`. The map may fail (non-physical
/// intermediate state), which aborts the iteration immediately.
pub fn relaxed_fixed_point<E, F>(
    x0: Real,
    settings: RelaxSettings,
    what: &'static str,
    mut f: F,
) -> Result<Real, E>
where
    E: From<CoreError>,
    F: FnMut(Real) -> Result<Real, E>,
{
    let mut x = x0;
    for _ in 0..settings.iter_limit {
        let x_new = f(x)?;
        ensure_finite(x_new, what)?;
        if (x_new - x).abs() < settings.precision {
            return Ok(x_new);
        }
        x += settings.relax_coef * (x_new - x);
    }
    Err(CoreError::FixedPoint {
        what,
        iterations: settings.iter_limit,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn fixed_point_converges_on_cosine() {
        // x = cos(x) has the Dottie fixed point near 0.739
        let settings = RelaxSettings {
            relax_coef: 1.0,
            precision: 1e-10,
            iter_limit: 200,
        };
        let x =
            relaxed_fixed_point::<CoreError, _>(0.5, settings, "cosine", |x| Ok(x.cos())).unwrap();
        assert!((x - 0.739_085).abs() < 1e-5);
    }

    #[test]
    fn fixed_point_reports_cap() {
        // x = 2x diverges from any nonzero start
        let settings = RelaxSettings {
            relax_coef: 1.0,
            precision: 1e-12,
            iter_limit: 10,
        };
        let err = relaxed_fixed_point::<CoreError, _>(1.0, settings, "doubling", |x| Ok(2.0 * x))
            .unwrap_err();
        assert!(matches!(err, CoreError::FixedPoint { iterations: 10, .. }));
    }
}
