//! Responsibility and availability updates.
//!
//! Both updates recompute every cell from the previous messages and blend the raw value
//! into the old one:
//!
//! ```text
//! m_new(i, k) = λ · m_old(i, k) + (1 − λ) · m_raw(i, k)
//! ```
//!
//! With `λ = 1` nothing ever moves; with `λ = 0` the raw values are taken as-is.

use super::matrix::SquareMatrix;

/// Blend a freshly computed message into its previous value.
#[inline]
fn damp(old: f64, raw: f64, damping: f64) -> f64 {
    damping * old + (1.0 - damping) * raw
}

/// Update responsibilities in place.
///
/// ```text
/// r(i, k) = s(i, k) − max_{k' ≠ k} [ a(i, k') + s(i, k') ]
/// ```
///
/// The max over `k' != k` is taken from the two largest values of each row, so a full
/// update is O(n²). A lone item has no competitors and the max term is zero.
pub(crate) fn update_responsibility(
    similarity: &SquareMatrix,
    availability: &SquareMatrix,
    responsibility: &mut SquareMatrix,
    damping: f64,
) {
    let n = similarity.dim();
    debug_assert_eq!(availability.dim(), n);
    debug_assert_eq!(responsibility.dim(), n);

    for i in 0..n {
        let s_row = similarity.row(i);
        let a_row = availability.row(i);

        let mut best = f64::NEG_INFINITY;
        let mut second = f64::NEG_INFINITY;
        let mut best_k = 0;
        for k in 0..n {
            let v = a_row[k] + s_row[k];
            if v > best {
                second = best;
                best = v;
                best_k = k;
            } else if v > second {
                second = v;
            }
        }

        let r_row = responsibility.row_mut(i);
        for k in 0..n {
            let rival = if n == 1 {
                0.0
            } else if k == best_k {
                second
            } else {
                best
            };
            r_row[k] = damp(r_row[k], s_row[k] - rival, damping);
        }
    }
}

/// Update availabilities in place from the current responsibilities.
///
/// ```text
/// a(i, k) = min(0, r(k, k) + Σ_{j ∉ {i, k}} max(0, r(j, k)))    i != k
/// a(k, k) = Σ_{j != k} max(0, r(j, k))
/// ```
///
/// Each column keeps one running sum of positive responsibilities; excluding `i` is a
/// subtraction, so a full update is O(n²).
pub(crate) fn update_availability(
    responsibility: &SquareMatrix,
    availability: &mut SquareMatrix,
    damping: f64,
) {
    let n = responsibility.dim();
    debug_assert_eq!(availability.dim(), n);

    let mut positive = vec![0.0; n];
    for k in 0..n {
        let mut sum = 0.0;
        for j in 0..n {
            positive[j] = responsibility[(j, k)].max(0.0);
            if j != k {
                sum += positive[j];
            }
        }

        let self_r = responsibility[(k, k)];
        for i in 0..n {
            let raw = if i == k {
                sum
            } else {
                (self_r + sum - positive[i]).min(0.0)
            };
            let cell = &mut availability[(i, k)];
            *cell = damp(*cell, raw, damping);
        }
    }
}
