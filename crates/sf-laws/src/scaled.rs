//! Scalable, optionally capped law — the object the cycle fit mutates.

use crate::distribution::Distribution;

/// A [`Distribution`] with a fixed base multiplier (the configured peak
/// value), a mutable fit scale and an optional ceiling on the effective
/// value:
///
/// ```text
/// value(x) = min(scale * base * shape(x), cap)
/// ```
///
/// The two cycle-fit unknowns are `scale` factors on laws of this type.
/// The ceiling realizes the configured limit up to which the fit may raise
/// a per-stage coefficient; values are clamped, never the shape.
#[derive(Clone, Copy, Debug)]
pub struct ScaledLaw {
    dist: Distribution,
    base: f64,
    scale: f64,
    cap: Option<f64>,
}

impl ScaledLaw {
    pub fn new(dist: Distribution, base: f64) -> Self {
        Self {
            dist,
            base,
            scale: 1.0,
            cap: None,
        }
    }

    pub fn with_cap(dist: Distribution, base: f64, cap: f64) -> Self {
        Self {
            dist,
            base,
            scale: 1.0,
            cap: Some(cap),
        }
    }

    /// Unit-base law without a ceiling.
    pub fn unscaled(dist: Distribution) -> Self {
        Self::new(dist, 1.0)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Negative trial scales from the root-finder are truncated to zero.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.max(0.0);
    }

    pub fn cap(&self) -> Option<f64> {
        self.cap
    }

    /// Effective value at a stage coordinate.
    pub fn value_at(&self, x: f64) -> f64 {
        let v = self.scale * self.base * self.dist.value_at(x);
        match self.cap {
            Some(cap) => v.min(cap),
            None => v,
        }
    }

    pub fn distribution(&self) -> &Distribution {
        &self.dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_scales_shape() {
        let law = ScaledLaw::new(
            Distribution::bi_parabolic(0.0, 2.0, 1.0, 0.1, 0.02).unwrap(),
            0.2,
        );
        assert!((law.value_at(0.0) - 0.18).abs() < 1e-12);
        assert!((law.value_at(1.0) - 0.2).abs() < 1e-12);
        assert!((law.value_at(2.0) - 0.196).abs() < 1e-12);
    }

    #[test]
    fn fit_scale_multiplies_base() {
        let mut law = ScaledLaw::new(Distribution::constant(1.0), 0.2);
        law.set_scale(2.0);
        assert!((law.value_at(0.0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn cap_saturates_values() {
        let mut law = ScaledLaw::with_cap(Distribution::constant(1.0), 1.0, 0.5);
        assert!((law.value_at(0.0) - 0.5).abs() < 1e-12);
        law.set_scale(0.3);
        assert!((law.value_at(0.0) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn negative_scale_truncated() {
        let mut law = ScaledLaw::unscaled(Distribution::constant(2.0));
        law.set_scale(-1.0);
        assert!(law.value_at(0.0).abs() < 1e-12);
    }
}
