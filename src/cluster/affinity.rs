//! Affinity propagation (Frey & Dueck, 2007).
//!
//! # The Algorithm
//!
//! Every item is a candidate exemplar. Two kinds of messages are exchanged between all
//! pairs of items until the choice of exemplars settles:
//!
//! - **Responsibility** `r(i, k)`: how well-suited `k` is to be the exemplar of `i`,
//!   compared with the best other candidate for `i`.
//! - **Availability** `a(i, k)`: how appropriate it would be for `i` to pick `k`, given
//!   the support `k` receives from other points.
//!
//! Each point's exemplar is `argmax_k [a(i, k) + r(i, k)]`. The run stops once no point
//! has changed exemplar for `convergence_iter` consecutive iterations, or when
//! `max_iter` iterations have been spent.
//!
//! ## Parameters
//!
//! - **Self-divergence** (the negated "preference"): the price of making a point its own
//!   exemplar. Larger values yield fewer clusters. The median pairwise divergence
//!   ([`median_divergence`](super::median_divergence)) is the usual start.
//! - **Damping** `λ ∈ [0, 1]`: how much of the previous message survives each update.
//!   Higher values oscillate less and converge more slowly.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) per iteration.
//! - **Space**: three dense `n x n` matrices of `f64`.
//!
//! ## References
//!
//! Frey, B. J., Dueck, D. (2007). "Clustering by Passing Messages Between Data Points."
//! Science 315(5814).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::assign::Assignment;
use super::matrix::SquareMatrix;
use super::messages::{update_availability, update_responsibility};
use super::similarity::similarity_matrix;
use super::traits::Clustering;
use crate::divergence::Divergence;
use crate::error::{Error, Result};

/// Affinity propagation parameters.
///
/// Deserializes from partial documents; missing fields take their defaults. Call
/// [`AffinityParams::validate`] (or go through [`AffinityPropagation::from_params`])
/// before use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffinityParams {
    /// Diagonal of the divergence matrix. Larger values yield fewer clusters.
    pub self_divergence: f64,

    /// Damping factor in \[0, 1\].
    pub damping: f64,

    /// Iteration budget.
    pub max_iter: usize,

    /// Consecutive iterations without a changed assignment required to converge.
    pub convergence_iter: usize,
}

impl Default for AffinityParams {
    fn default() -> Self {
        Self {
            self_divergence: 1.0,
            damping: 0.5,
            max_iter: 200,
            convergence_iter: 1,
        }
    }
}

impl AffinityParams {
    /// Check every parameter against its valid range.
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        check_self_divergence(self.self_divergence)?;
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if self.convergence_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "convergence_iter",
                message: "must be at least 1",
            });
        }
        Ok(())
    }
}

fn check_damping(damping: f64) -> Result<()> {
    // NaN fails the range check too.
    if !(0.0..=1.0).contains(&damping) {
        return Err(Error::InvalidParameter {
            name: "damping",
            message: "must be within [0, 1]",
        });
    }
    Ok(())
}

fn check_self_divergence(self_divergence: f64) -> Result<()> {
    if !self_divergence.is_finite() {
        return Err(Error::InvalidParameter {
            name: "self_divergence",
            message: "must be finite",
        });
    }
    Ok(())
}

/// Affinity propagation clusterer: a divergence plus validated parameters.
///
/// The clusterer holds no run state. Each [`fit`](Self::fit) or [`start`](Self::start)
/// allocates its own matrices, so clones and concurrent runs never share anything.
#[derive(Clone, Debug)]
pub struct AffinityPropagation<D> {
    divergence: D,
    params: AffinityParams,
}

impl<D> AffinityPropagation<D> {
    /// Create a clusterer with default parameters.
    ///
    /// The default self-divergence of `1.0` is rarely what you want; set it from the
    /// data (see [`median_divergence`](super::median_divergence)).
    pub fn new(divergence: D) -> Self {
        Self {
            divergence,
            params: AffinityParams::default(),
        }
    }

    /// Create a clusterer from a parameter set, rejecting invalid values.
    pub fn from_params(divergence: D, params: AffinityParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { divergence, params })
    }

    /// Set the self-divergence (must be finite).
    pub fn with_self_divergence(mut self, self_divergence: f64) -> Result<Self> {
        check_self_divergence(self_divergence)?;
        self.params.self_divergence = self_divergence;
        Ok(self)
    }

    /// Set the damping factor (must be within \[0, 1\]).
    pub fn with_damping(mut self, damping: f64) -> Result<Self> {
        check_damping(damping)?;
        self.params.damping = damping;
        Ok(self)
    }

    /// Set the iteration budget (must be at least 1).
    pub fn with_max_iter(mut self, max_iter: usize) -> Result<Self> {
        if max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        self.params.max_iter = max_iter;
        Ok(self)
    }

    /// Set how many consecutive unchanged iterations count as converged (at least 1).
    pub fn with_convergence_iter(mut self, convergence_iter: usize) -> Result<Self> {
        if convergence_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "convergence_iter",
                message: "must be at least 1",
            });
        }
        self.params.convergence_iter = convergence_iter;
        Ok(self)
    }

    /// Current parameters.
    pub fn params(&self) -> &AffinityParams {
        &self.params
    }

    /// The divergence in use.
    pub fn divergence(&self) -> &D {
        &self.divergence
    }

    /// Build the similarity matrix and return a run in the [`RunState::Ready`] state.
    pub fn start<'a, T>(&self, data: &'a [T]) -> Result<Run<'a, T>>
    where
        D: Divergence<T>,
    {
        let similarity = similarity_matrix(data, &self.divergence, self.params.self_divergence)?;
        let n = data.len();
        debug!(
            n_items = n,
            self_divergence = self.params.self_divergence,
            damping = self.params.damping,
            "affinity propagation initialized"
        );
        Ok(Run {
            data,
            params: self.params.clone(),
            similarity,
            responsibility: SquareMatrix::zeros(n),
            availability: SquareMatrix::zeros(n),
            assignment: Assignment::unassigned(n),
            state: RunState::Ready,
            iteration: 0,
            changed: 0,
            stable: 0,
        })
    }

    /// Run to completion and return the fitted clusters.
    pub fn fit<'a, T>(&self, data: &'a [T]) -> Result<Fit<'a, T>>
    where
        D: Divergence<T>,
    {
        let mut run = self.start(data)?;
        run.run();
        Ok(run.finish())
    }
}

/// Progress of a [`Run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Similarity matrix built, no iteration performed yet.
    Ready,
    /// At least one iteration done, still stepping.
    Iterating,
    /// No assignment changed for `convergence_iter` consecutive iterations.
    Converged,
    /// The iteration budget ran out before convergence.
    MaxIterationsReached,
}

impl RunState {
    /// Whether further steps are no-ops.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converged | Self::MaxIterationsReached)
    }
}

/// One affinity propagation run over a borrowed dataset.
///
/// A step is atomic: responsibility update, availability update, then assignment update.
/// Callers that need a wall-clock limit can check it between [`step`](Self::step) calls.
#[derive(Debug)]
pub struct Run<'a, T> {
    data: &'a [T],
    params: AffinityParams,
    similarity: SquareMatrix,
    responsibility: SquareMatrix,
    availability: SquareMatrix,
    assignment: Assignment,
    state: RunState,
    iteration: usize,
    changed: usize,
    stable: usize,
}

impl<'a, T> Run<'a, T> {
    /// Perform one iteration and return the number of points that changed exemplar.
    ///
    /// In a terminal state nothing is recomputed: a converged run reports 0 and an
    /// exhausted run repeats its last count.
    pub fn step(&mut self) -> usize {
        if self.state.is_terminal() {
            return self.changed;
        }

        update_responsibility(
            &self.similarity,
            &self.availability,
            &mut self.responsibility,
            self.params.damping,
        );
        update_availability(
            &self.responsibility,
            &mut self.availability,
            self.params.damping,
        );
        let changed = self
            .assignment
            .update(&self.responsibility, &self.availability);

        self.iteration += 1;
        self.changed = changed;
        self.stable = if changed == 0 { self.stable + 1 } else { 0 };

        debug!(
            iteration = self.iteration,
            changed,
            clusters = self.assignment.clusters.len(),
            "affinity propagation step"
        );

        self.state = if self.stable >= self.params.convergence_iter {
            info!(
                iterations = self.iteration,
                clusters = self.assignment.clusters.len(),
                "affinity propagation converged"
            );
            RunState::Converged
        } else if self.iteration >= self.params.max_iter {
            warn!(
                iterations = self.iteration,
                changed,
                "affinity propagation did not converge within max_iter"
            );
            RunState::MaxIterationsReached
        } else {
            RunState::Iterating
        };

        changed
    }

    /// Step until the run reaches a terminal state.
    pub fn run(&mut self) -> RunState {
        while !self.state.is_terminal() {
            self.step();
        }
        self.state
    }

    /// Drop the message matrices and keep the assignments.
    pub fn finish(self) -> Fit<'a, T> {
        let assignments = self
            .assignment
            .exemplars
            .iter()
            .enumerate()
            .map(|(i, e)| e.unwrap_or(i))
            .collect();
        let clusters = if self.iteration == 0 {
            // Never stepped: every point stands alone.
            (0..self.data.len()).map(|i| (i, vec![i])).collect()
        } else {
            self.assignment.clusters
        };
        Fit {
            data: self.data,
            assignments,
            clusters,
            state: self.state,
            iterations: self.iteration,
            changed: self.changed,
        }
    }

    /// Current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Iterations performed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Points that changed exemplar on the most recent iteration.
    pub fn changed(&self) -> usize {
        self.changed
    }

    /// Current exemplar of each point (`None` before the first step).
    pub fn assignments(&self) -> &[Option<usize>] {
        &self.assignment.exemplars
    }

    /// Number of distinct exemplars after the most recent step.
    pub fn n_clusters(&self) -> usize {
        self.assignment.clusters.len()
    }

    /// Similarity matrix (negated divergences, `-self_divergence` on the diagonal).
    pub fn similarity(&self) -> &SquareMatrix {
        &self.similarity
    }

    /// Responsibility matrix.
    pub fn responsibility(&self) -> &SquareMatrix {
        &self.responsibility
    }

    /// Availability matrix.
    pub fn availability(&self) -> &SquareMatrix {
        &self.availability
    }
}

/// Result of a finished run.
#[derive(Clone, Debug)]
pub struct Fit<'a, T> {
    data: &'a [T],
    assignments: Vec<usize>,
    clusters: BTreeMap<usize, Vec<usize>>,
    state: RunState,
    iterations: usize,
    changed: usize,
}

impl<'a, T> Fit<'a, T> {
    /// Exemplar index of every point.
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Dense cluster label of every point, numbered in ascending exemplar order.
    pub fn labels(&self) -> Vec<usize> {
        let ordinal: BTreeMap<usize, usize> = self
            .clusters
            .keys()
            .enumerate()
            .map(|(label, &exemplar)| (exemplar, label))
            .collect();
        self.assignments.iter().map(|e| ordinal[e]).collect()
    }

    /// Exemplar indices in ascending order.
    pub fn exemplars(&self) -> Vec<usize> {
        self.clusters.keys().copied().collect()
    }

    /// Clusters in ascending exemplar order.
    pub fn clusters(&self) -> impl Iterator<Item = Cluster<'a, '_, T>> + '_ {
        let data = self.data;
        self.clusters
            .iter()
            .map(move |(&exemplar, members)| Cluster {
                data,
                exemplar,
                members,
            })
    }

    /// Number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Iterations performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Points that changed exemplar on the last iteration.
    pub fn changed(&self) -> usize {
        self.changed
    }

    /// How the run ended.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Whether the assignments settled before the iteration budget ran out.
    pub fn converged(&self) -> bool {
        self.state == RunState::Converged
    }

    /// Index of the exemplar closest to `item`; ties go to the smaller exemplar index.
    pub fn nearest_exemplar<D>(&self, item: &T, divergence: &D) -> usize
    where
        D: Divergence<T> + ?Sized,
    {
        let mut best = f64::INFINITY;
        let mut best_exemplar = 0;
        for (pos, &exemplar) in self.clusters.keys().enumerate() {
            let d = divergence.divergence(item, &self.data[exemplar]);
            if pos == 0 || d < best {
                best = d;
                best_exemplar = exemplar;
            }
        }
        best_exemplar
    }
}

/// A borrowed view of one cluster.
#[derive(Clone, Copy, Debug)]
pub struct Cluster<'a, 'f, T> {
    data: &'a [T],
    exemplar: usize,
    members: &'f [usize],
}

impl<'a, 'f, T> Cluster<'a, 'f, T> {
    /// The exemplar item.
    pub fn exemplar(&self) -> &'a T {
        &self.data[self.exemplar]
    }

    /// Index of the exemplar item.
    pub fn exemplar_index(&self) -> usize {
        self.exemplar
    }

    /// Member indices in ascending order (the exemplar included).
    pub fn member_indices(&self) -> &'f [usize] {
        self.members
    }

    /// Member items in ascending index order.
    pub fn members(&self) -> impl Iterator<Item = &'a T> + 'f
    where
        'a: 'f,
    {
        let data = self.data;
        self.members.iter().map(move |&i| &data[i])
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: a cluster holds at least its exemplar.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<D: Divergence<Vec<f32>>> Clustering for AffinityPropagation<D> {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels())
    }

    /// Affinity propagation discovers the number of clusters, so this returns 0.
    fn n_clusters(&self) -> usize {
        0
    }
}
