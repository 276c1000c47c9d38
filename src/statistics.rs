//! Summary statistics over discrete distributions.

/// The Shannon entropy of the distribution given by (unnormalized) `frequencies`,
/// using a logarithm of the given `base` (e.g. `2.0` for bits).
///
/// Zero frequencies do not contribute. An empty or all-zero distribution has zero entropy.
/// The `base` should be positive and different from one.
pub fn shannon_entropy(frequencies: &[usize], base: f64) -> f64 {
    let total: usize = frequencies.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    let entropy: f64 = frequencies
        .iter()
        .filter(|it| **it > 0)
        .map(|it| {
            let p = *it as f64 / total;
            -p * p.ln()
        })
        .sum();

    entropy / base.ln()
}
