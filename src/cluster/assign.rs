//! Exemplar assignment and cluster bookkeeping.

use std::collections::BTreeMap;

use super::matrix::SquareMatrix;

/// Per-point exemplar choices and the clusters they induce.
///
/// `exemplars[i]` is `None` until the first assignment update. `clusters` maps an
/// exemplar index to its members in ascending index order and is rebuilt from scratch
/// on every update.
#[derive(Clone, Debug, Default)]
pub(crate) struct Assignment {
    pub(crate) exemplars: Vec<Option<usize>>,
    pub(crate) clusters: BTreeMap<usize, Vec<usize>>,
}

impl Assignment {
    pub(crate) fn unassigned(n: usize) -> Self {
        Self {
            exemplars: vec![None; n],
            clusters: BTreeMap::new(),
        }
    }

    /// Reassign every point from the current messages and return how many points
    /// changed exemplar.
    pub(crate) fn update(
        &mut self,
        responsibility: &SquareMatrix,
        availability: &SquareMatrix,
    ) -> usize {
        let choices = choose(responsibility, availability);
        let resolved = resolve(&choices);

        let changed = self
            .exemplars
            .iter()
            .zip(resolved.iter())
            .filter(|(old, &new)| **old != Some(new))
            .count();

        self.clusters.clear();
        for (i, &exemplar) in resolved.iter().enumerate() {
            self.clusters.entry(exemplar).or_default().push(i);
        }
        for (slot, exemplar) in self.exemplars.iter_mut().zip(resolved) {
            *slot = Some(exemplar);
        }
        changed
    }
}

/// `argmax_k [a(i, k) + r(i, k)]` for every point.
///
/// Scans left to right and only a strict improvement replaces the current best, so
/// ties go to the smallest `k`.
pub(crate) fn choose(responsibility: &SquareMatrix, availability: &SquareMatrix) -> Vec<usize> {
    let n = responsibility.dim();
    (0..n)
        .map(|i| {
            let r_row = responsibility.row(i);
            let a_row = availability.row(i);
            let mut best_k = 0;
            let mut best = f64::NEG_INFINITY;
            for k in 0..n {
                let evidence = a_row[k] + r_row[k];
                if k == 0 || evidence > best {
                    best = evidence;
                    best_k = k;
                }
            }
            best_k
        })
        .collect()
}

/// Follow each point's chain of choices to its exemplar.
///
/// A point that chose itself is an exemplar. A chain that loops without reaching one
/// (e.g. two points that picked each other) resolves to the smallest index on the loop.
pub(crate) fn resolve(choices: &[usize]) -> Vec<usize> {
    let n = choices.len();
    let mut resolved: Vec<Option<usize>> = vec![None; n];
    let mut on_path = vec![usize::MAX; n];

    for start in 0..n {
        if resolved[start].is_some() {
            continue;
        }

        // Walk until we hit a resolved point, a self-choice, or our own path.
        let mut path = Vec::new();
        let mut cur = start;
        let root = loop {
            if let Some(root) = resolved[cur] {
                break root;
            }
            if on_path[cur] == start {
                let cycle_start = path.iter().position(|&p| p == cur).unwrap_or(0);
                break path[cycle_start..].iter().copied().min().unwrap_or(cur);
            }
            on_path[cur] = start;
            path.push(cur);
            let next = choices[cur];
            if next == cur {
                break cur;
            }
            cur = next;
        };

        for p in path {
            resolved[p] = Some(root);
        }
    }

    resolved
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.unwrap_or(i))
        .collect()
}
