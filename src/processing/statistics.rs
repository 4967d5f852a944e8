use std::cmp::Ordering;

/// Sort a copy of `values` ascending, dropping NaN. Infinities are kept.
pub fn sorted_non_nan(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Quantile of already-sorted values by linear interpolation between the
/// two order statistics around rank `q * (n - 1)`.
///
/// Returns `None` for an empty slice or a fraction outside [0, 1].
/// Infinite neighbours give an infinite or NaN cut rather than a
/// substituted order statistic.
pub fn interpolated_quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let rank = q * (sorted.len() - 1) as f64;
    let lower_index = rank.floor() as usize;
    let upper_index = (lower_index + 1).min(sorted.len() - 1);

    let lower = sorted[lower_index];
    let upper = sorted[upper_index];
    let fraction = rank - lower_index as f64;

    if fraction == 0.0 {
        return Some(lower);
    }

    let span = upper - lower;
    let value = if span.is_finite() {
        lower + fraction * span
    } else {
        // span overflowed or an end is infinite
        lower * (1.0 - fraction) + upper * fraction
    };

    if lower.is_finite() && upper.is_finite() {
        // Keep cuts inside their bracket so they stay ordered under rounding.
        Some(value.clamp(lower, upper))
    } else {
        Some(value)
    }
}

/// Minimum and maximum of `values`, ignoring NaN.
pub fn extrema(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
