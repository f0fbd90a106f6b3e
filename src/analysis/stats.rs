//! Cross-sample statistics
//!
//! Reductions used by session aggregation. All of them take the complete
//! sequence; none is incremental.

/// Numerical stability epsilon
const EPSILON: f32 = 1e-6;

/// Coefficient of variation used when a metric has spread but a zero mean
const UNBOUNDED_CV: f32 = 0.5;

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f32>() / values.len() as f32)
}

/// Population standard deviation, `None` for an empty slice
pub fn std_dev(values: &[f32]) -> Option<f32> {
    let mu = mean(values)?;
    let variance = values.iter().map(|&v| (v - mu) * (v - mu)).sum::<f32>() / values.len() as f32;
    Some(variance.sqrt())
}

/// Coefficient of variation (`std_dev / |mean|`)
///
/// Uses the magnitude of the mean so that metrics measured on a negative
/// scale (dBFS) do not report negative variation. When the mean is zero the
/// result is 0 for a constant sequence and `0.5` otherwise.
pub fn coefficient_of_variation(values: &[f32]) -> Option<f32> {
    let mu = mean(values)?;
    let sigma = std_dev(values)?;

    if mu.abs() < EPSILON {
        return Some(if sigma < EPSILON { 0.0 } else { UNBOUNDED_CV });
    }
    Some(sigma / mu.abs())
}

/// Most frequent item, ties going to the item seen first
pub fn mode<T: PartialEq + Copy>(items: &[T]) -> Option<T> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for &item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }

    // Strict comparison keeps the earliest item on ties
    let mut best: Option<(T, usize)> = None;
    for (item, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((item, count));
        }
    }
    best.map(|(item, _)| item)
}
