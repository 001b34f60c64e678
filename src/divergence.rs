//! Pairwise divergences between items.
//!
//! Affinity propagation never looks inside the items it clusters. All it needs is a
//! [`Divergence`]: a non-negative "how far apart" score for an ordered pair of items.
//! The similarity matrix is the negation of these scores.
//!
//! Three dense-vector divergences are provided. Any closure `Fn(&T, &T) -> f64` is also
//! a divergence, which is the usual way to cluster strings, graphs, or other opaque items.
//!
//! ```rust
//! use exemplar::divergence::{Divergence, Euclidean};
//!
//! let d = Euclidean.divergence(&vec![0.0f32, 0.0], &vec![3.0, 4.0]);
//! assert_eq!(d, 5.0);
//!
//! let by_len = |a: &&str, b: &&str| (a.len() as f64 - b.len() as f64).abs();
//! assert_eq!(by_len.divergence(&"abc", &"a"), 2.0);
//! ```

/// A divergence (dissimilarity) between two items of type `T`.
///
/// Implementations should return finite values. Symmetry is not required, but the
/// similarity matrix is only symmetric when the divergence is.
pub trait Divergence<T> {
    /// Divergence from `a` to `b`.
    fn divergence(&self, a: &T, b: &T) -> f64;
}

impl<T, F> Divergence<T> for F
where
    F: Fn(&T, &T) -> f64,
{
    #[inline]
    fn divergence(&self, a: &T, b: &T) -> f64 {
        self(a, b)
    }
}

/// Euclidean (L2) distance between dense vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

/// Squared Euclidean distance between dense vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquaredEuclidean;

/// Manhattan (L1) distance between dense vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl<V: AsRef<[f32]>> Divergence<V> for Euclidean {
    #[inline]
    fn divergence(&self, a: &V, b: &V) -> f64 {
        squared_euclidean(a.as_ref(), b.as_ref()).sqrt()
    }
}

impl<V: AsRef<[f32]>> Divergence<V> for SquaredEuclidean {
    #[inline]
    fn divergence(&self, a: &V, b: &V) -> f64 {
        squared_euclidean(a.as_ref(), b.as_ref())
    }
}

impl<V: AsRef<[f32]>> Divergence<V> for Manhattan {
    #[inline]
    fn divergence(&self, a: &V, b: &V) -> f64 {
        let (a, b) = (a.as_ref(), b.as_ref());
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (f64::from(x) - f64::from(y)).abs())
            .sum()
    }
}

// Accumulate in f64: the message-passing updates subtract nearly equal similarities.
#[inline]
fn squared_euclidean(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum()
}
