//! Exemplar-based clustering.
//!
//! ## Exemplars vs Centroids
//!
//! **Centroid** methods (k-means) summarize a cluster by a synthetic point, the mean of
//! its members. That needs a vector space: you cannot average two strings.
//!
//! **Exemplar** methods pick an actual input item as the representative of each
//! cluster. They only need a pairwise [`Divergence`](crate::divergence::Divergence), so
//! they work on anything you can compare: vectors, strings, graphs, documents.
//!
//! ## Affinity Propagation
//!
//! Affinity propagation treats every point as a potential exemplar and lets points
//! "vote" by exchanging two kinds of messages over the full similarity matrix:
//!
//! ```text
//! r(i, k) = s(i, k) − max_{k' ≠ k} [ a(i, k') + s(i, k') ]
//! a(i, k) = min(0, r(k, k) + Σ_{j ∉ {i, k}} max(0, r(j, k)))      i ≠ k
//! a(k, k) = Σ_{j ≠ k} max(0, r(j, k))
//! ```
//!
//! Both messages are damped between iterations. Point `i` picks
//! `argmax_k [a(i, k) + r(i, k)]` as its exemplar.
//!
//! **Assumptions**:
//! - The divergence is finite for every pair
//! - A single global self-divergence is adequate for every point
//! - n² memory is affordable (three dense matrices)
//!
//! **When to use**: you don't know the number of clusters, you need an actual item to
//! represent each cluster, or your items only admit a pairwise divergence.
//!
//! ## Usage
//!
//! ```rust
//! use exemplar::cluster::{median_divergence, AffinityPropagation, Clustering};
//! use exemplar::divergence::Euclidean;
//!
//! let data: Vec<Vec<f32>> = vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![10.0, 0.0],
//!     vec![10.0, 1.0],
//! ];
//!
//! let preference = median_divergence(&data, &Euclidean).unwrap();
//! let model = AffinityPropagation::new(Euclidean)
//!     .with_self_divergence(preference)
//!     .unwrap();
//!
//! let fit = model.fit(&data).unwrap();
//! assert!(fit.converged());
//! assert_eq!(fit.n_clusters(), 2);
//!
//! // Or through the common trait.
//! let labels = model.fit_predict(&data).unwrap();
//! assert_eq!(labels, vec![0, 0, 1, 1]);
//! ```

mod affinity;
mod assign;
mod matrix;
mod messages;
mod similarity;
mod traits;

pub use affinity::{AffinityParams, AffinityPropagation, Cluster, Fit, Run, RunState};
pub use matrix::SquareMatrix;
pub use similarity::{
    max_divergence, mean_divergence, median_divergence, min_divergence, similarity_matrix,
};
pub use traits::Clustering;
