//! Maps normalized model outputs and targets back to price units.

use crate::analysis::forecast_prep::ScaleParameters;
use crate::config::RescaleMode;

impl ScaleParameters {
    /// Normalized value back to price units under `mode`.
    pub fn rescale_value(&self, normalized: f64, mode: RescaleMode) -> f64 {
        match mode {
            RescaleMode::ScaleOnly => normalized * self.scale_factor(),
            RescaleMode::Affine => normalized * self.scale_factor() + self.min,
        }
    }
}

/// Applies the same transform to every element. Used for both predictions and targets.
pub fn rescale(values: &[f64], scale: &ScaleParameters, mode: RescaleMode) -> Vec<f64> {
    values.iter().map(|&v| scale.rescale_value(v, mode)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    const PARAMS: ScaleParameters = ScaleParameters { min: 10.0, max: 30.0 };

    #[test]
    fn golden_values_for_both_modes() {
        let normalized = PARAMS.normalize(20.0);
        assert!(approx_eq(normalized, 0.5));
        assert!(approx_eq(PARAMS.scale(), 0.05));
        assert!(approx_eq(PARAMS.scale_factor(), 20.0));

        assert!(approx_eq(PARAMS.rescale_value(normalized, RescaleMode::ScaleOnly), 10.0));
        assert!(approx_eq(PARAMS.rescale_value(normalized, RescaleMode::Affine), 20.0));
    }

    #[test]
    fn affine_inverts_normalization() {
        let prices = [10.0, 12.5, 30.0, 41.0];
        let normalized: Vec<f64> = prices.iter().map(|&p| PARAMS.normalize(p)).collect();
        let back = rescale(&normalized, &PARAMS, RescaleMode::Affine);
        assert!(prices.iter().zip(&back).all(|(a, b)| approx_eq(*a, *b)));
    }

    #[test]
    fn scale_only_drops_the_minimum_offset() {
        let out = rescale(&[0.0, 1.0], &PARAMS, RescaleMode::ScaleOnly);
        assert_eq!(out, vec![0.0, 20.0]);
    }
}
