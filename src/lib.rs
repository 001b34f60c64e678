//! Exemplar-based clustering.
//!
//! `exemplar` implements affinity propagation over items of any type: give it a slice of
//! items and a [`Divergence`](divergence::Divergence) between them, and it picks a set of
//! representative items (exemplars) and assigns every item to one of them.
//!
//! The primary public API is under [`cluster`], which provides:
//! - [`AffinityPropagation`]: the configured clusterer
//! - [`Run`]: a stepwise run, for progress reporting or caller-side time limits
//! - [`Fit`]: the finished clustering, with exemplars, members, and convergence status

#![forbid(unsafe_code)]

pub mod cluster;
pub mod divergence;
pub mod error;

pub use cluster::{
    median_divergence, AffinityParams, AffinityPropagation, Cluster, Clustering, Fit, Run,
    RunState, SquareMatrix,
};
pub use divergence::{Divergence, Euclidean, Manhattan, SquaredEuclidean};
pub use error::{Error, Result};
