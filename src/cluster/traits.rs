use crate::error::Result;

/// Common interface for hard clustering of dense vectors (one label per point).
pub trait Clustering {
    /// Fit the model and return one cluster label per input point.
    ///
    /// Labels are dense: `0..k` for `k` discovered clusters.
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;

    /// The configured number of clusters, or 0 when the algorithm discovers it
    /// (as affinity propagation does).
    fn n_clusters(&self) -> usize;
}
