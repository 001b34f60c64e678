//! Similarity matrix construction and preference (self-divergence) helpers.

use super::matrix::SquareMatrix;
use crate::divergence::Divergence;
use crate::error::{Error, Result};

/// Build the `n x n` similarity matrix for `data`.
///
/// Off-diagonal cells hold `-divergence(data[i], data[j])`. Every diagonal cell holds
/// `-self_divergence`; the divergence function is never called on a self-pair.
///
/// Fails with [`Error::EmptyInput`] for an empty slice and with
/// [`Error::NonFiniteDivergence`] when the divergence yields NaN or an infinity.
pub fn similarity_matrix<T, D>(
    data: &[T],
    divergence: &D,
    self_divergence: f64,
) -> Result<SquareMatrix>
where
    D: Divergence<T> + ?Sized,
{
    let n = data.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if !self_divergence.is_finite() {
        return Err(Error::InvalidParameter {
            name: "self_divergence",
            message: "must be finite",
        });
    }

    let mut s = SquareMatrix::zeros(n);
    for i in 0..n {
        for j in 0..n {
            if i == j {
                s[(i, j)] = -self_divergence;
                continue;
            }
            let value = divergence.divergence(&data[i], &data[j]);
            if !value.is_finite() {
                return Err(Error::NonFiniteDivergence { i, j, value });
            }
            s[(i, j)] = -value;
        }
    }
    Ok(s)
}

/// Median divergence over all ordered pairs `(i, j)` with `i != j`.
///
/// The usual starting point for `self_divergence`: it yields a moderate number of
/// clusters. Returns `0.0` for a single item (there are no pairs).
pub fn median_divergence<T, D>(data: &[T], divergence: &D) -> Result<f64>
where
    D: Divergence<T> + ?Sized,
{
    let mut values = pairwise(data, divergence)?;
    if values.is_empty() {
        return Ok(0.0);
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Ok((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Ok(values[mid])
    }
}

/// Mean divergence over all ordered pairs `(i, j)` with `i != j`.
pub fn mean_divergence<T, D>(data: &[T], divergence: &D) -> Result<f64>
where
    D: Divergence<T> + ?Sized,
{
    let values = pairwise(data, divergence)?;
    if values.is_empty() {
        return Ok(0.0);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Smallest divergence over all ordered pairs. Tends toward many clusters.
pub fn min_divergence<T, D>(data: &[T], divergence: &D) -> Result<f64>
where
    D: Divergence<T> + ?Sized,
{
    let values = pairwise(data, divergence)?;
    Ok(values.into_iter().reduce(f64::min).unwrap_or(0.0))
}

/// Largest divergence over all ordered pairs. Tends toward few clusters.
pub fn max_divergence<T, D>(data: &[T], divergence: &D) -> Result<f64>
where
    D: Divergence<T> + ?Sized,
{
    let values = pairwise(data, divergence)?;
    Ok(values.into_iter().reduce(f64::max).unwrap_or(0.0))
}

fn pairwise<T, D>(data: &[T], divergence: &D) -> Result<Vec<f64>>
where
    D: Divergence<T> + ?Sized,
{
    let n = data.len();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    let mut values = Vec::with_capacity(n * (n - 1));
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let value = divergence.divergence(&data[i], &data[j]);
            if !value.is_finite() {
                return Err(Error::NonFiniteDivergence { i, j, value });
            }
            values.push(value);
        }
    }
    Ok(values)
}
