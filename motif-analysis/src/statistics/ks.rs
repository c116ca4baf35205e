//! Two-sample Kolmogorov–Smirnov comparison.
//!
//! The statistic is the supremum distance between the two empirical
//! CDFs; the p-value uses the asymptotic Kolmogorov distribution with
//! the effective sample size correction.

/// Supremum distance between the empirical CDFs of two samples.
///
/// Returns a value in [0, 1]; 0 when either sample is empty.
pub fn ks_statistic(first: &[f64], second: &[f64]) -> f64 {
    if first.is_empty() || second.is_empty() {
        return 0.0;
    }
    let mut a = first.to_vec();
    let mut b = second.to_vec();
    a.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
    b.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));

    let n = a.len() as f64;
    let m = b.len() as f64;
    let (mut i, mut j) = (0usize, 0usize);
    let mut statistic = 0.0f64;

    while i < a.len() && j < b.len() {
        // Step past ties on both sides before measuring.
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        let difference = (i as f64 / n - j as f64 / m).abs();
        if difference > statistic {
            statistic = difference;
        }
    }
    statistic.min(1.0)
}

/// Asymptotic two-sided p-value for a two-sample KS statistic with
/// sample sizes `n` and `m`.
pub fn ks_p_value(statistic: f64, n: usize, m: usize) -> f64 {
    if n == 0 || m == 0 || statistic <= 0.0 {
        return 1.0;
    }
    let effective = (n * m) as f64 / (n + m) as f64;
    let lambda = (effective.sqrt() + 0.12 + 0.11 / effective.sqrt()) * statistic;
    if lambda < 1e-3 {
        return 1.0;
    }

    let mut sum = 0.0f64;
    let mut sign = 1.0f64;
    for j in 1..=100 {
        let term = sign * (-2.0 * (j as f64) * (j as f64) * lambda * lambda).exp();
        sum += term;
        if term.abs() < 1e-12 {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}
