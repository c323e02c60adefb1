//! Factorials and binomial coefficients for Bernstein bases.
//!
//! Everything here is exact integer arithmetic in `u64`. Inputs must stay small
//! enough that `n!` fits (n ≤ 20); larger values overflow, which debug builds
//! report as a panic.

/// Computes `n!`.
#[must_use]
pub fn factorial(n: u64) -> u64 {
    (2..=n).product()
}

/// Computes `C(n, i) = n! / (i! (n - i)!)`.
///
/// Returns 0 when `i < 0` or `i > n`.
#[must_use]
pub fn binomial_coefficient(n: i64, i: i64) -> u64 {
    if i < 0 || i > n {
        return 0;
    }
    let n = n.unsigned_abs();
    let i = i.unsigned_abs();
    let k = i.min(n - i);

    // Each partial product is itself a binomial coefficient, so the division is exact.
    (1..=k).fold(1u64, |acc, j| acc * (n - k + j) / j)
}

/// Computes the trinomial coefficient `n! / (i! j! k!)`.
///
/// Returns 0 unless `i + j + k == n`.
#[must_use]
pub fn trinomial_coefficient(n: usize, i: usize, j: usize, k: usize) -> u64 {
    if index_sum(i, j, k) != Some(n) {
        return 0;
    }
    binomial_coefficient(to_i64(n), to_i64(i)) * binomial_coefficient(to_i64(n - i), to_i64(j))
}

/// Binomial coefficient for `usize` degree/index pairs, as a float weight.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn binomial_weight(n: usize, i: usize) -> f64 {
    binomial_coefficient(to_i64(n), to_i64(i)) as f64
}

/// `i + j + k`, or `None` if the sum overflows.
pub(crate) fn index_sum(i: usize, j: usize, k: usize) -> Option<usize> {
    i.checked_add(j)?.checked_add(k)
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
