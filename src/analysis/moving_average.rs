//! Rolling-window means over a closing-price series (chart overlays).

/// Position `i` holds the mean of `values[i + 1 - window ..= i]` once a full
/// window is available and `None` before that. The output always has the same
/// length as the input; a series shorter than `window` is all `None`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            (i + 1 >= window).then(|| {
                let slice = &values[i + 1 - window..=i];
                slice.iter().sum::<f64>() / window as f64
            })
        })
        .collect()
}
