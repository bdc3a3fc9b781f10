use argminmax::ArgMinMax;
use statrs::statistics::Statistics;

/// Returns `None` for an empty slice; NaNs are ignored by `argminmax`.
pub fn get_min_max(vec: &[f64]) -> Option<(f64, f64)> {
    if vec.is_empty() {
        return None;
    }
    let (min_index, max_index): (usize, usize) = vec.argminmax();
    Some((vec[min_index], vec[max_index]))
}

pub fn mean(vec: &[f64]) -> f64 {
    vec.iter().mean()
}

/// Sample (n - 1) standard deviation. NaN for fewer than two values.
pub fn sample_std_dev(vec: &[f64]) -> f64 {
    vec.iter().std_dev()
}

/// Quantile of already-sorted data using linear interpolation between the two
/// closest ranks (position `q * (n - 1)`).
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            let frac = pos - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn min_max_of_unsorted_values() {
        assert_eq!(get_min_max(&[3.0, -1.5, 8.25, 0.0]), Some((-1.5, 8.25)));
        assert_eq!(get_min_max(&[]), None);
    }

    #[test]
    fn quantiles_interpolate_between_ranks() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!(approx_eq(quantile_sorted(&sorted, 0.25), 1.75));
        assert!(approx_eq(quantile_sorted(&sorted, 0.5), 2.5));
        assert!(approx_eq(quantile_sorted(&sorted, 0.75), 3.25));
        assert!(approx_eq(quantile_sorted(&sorted, 1.0), 4.0));
    }

    #[test]
    fn std_dev_uses_sample_denominator() {
        // Var = ((−1.5)² + (−0.5)² + 0.5² + 1.5²) / 3 = 5/3
        assert!(approx_eq(sample_std_dev(&[1.0, 2.0, 3.0, 4.0]), (5.0f64 / 3.0).sqrt()));
        assert!(approx_eq(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5));
    }
}
