use exemplar::cluster::{AffinityPropagation, Clustering, RunState};
use exemplar::divergence::Euclidean;
use proptest::prelude::*;

fn points() -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-10.0f32..10.0, 2), 1..20)
}

fn model(self_divergence: f64, damping: f64) -> AffinityPropagation<Euclidean> {
    AffinityPropagation::new(Euclidean)
        .with_self_divergence(self_divergence)
        .unwrap()
        .with_damping(damping)
        .unwrap()
        .with_max_iter(50)
        .unwrap()
}

proptest! {
    #[test]
    fn prop_similarity_symmetric_with_fixed_diagonal(
        data in points(),
        self_divergence in 0.0f64..20.0
    ) {
        let run = model(self_divergence, 0.5).start(&data).unwrap();
        let s = run.similarity();
        let n = data.len();
        for i in 0..n {
            prop_assert_eq!(s[(i, i)], -self_divergence);
            for j in 0..n {
                prop_assert_eq!(s[(i, j)], s[(j, i)]);
            }
        }
    }

    #[test]
    fn prop_clusters_partition_the_input(
        data in points(),
        self_divergence in 0.0f64..20.0,
        damping in 0.5f64..0.95
    ) {
        let fit = model(self_divergence, damping).fit(&data).unwrap();

        let mut seen = vec![0usize; data.len()];
        for cluster in fit.clusters() {
            prop_assert!(cluster.member_indices().contains(&cluster.exemplar_index()));
            for &i in cluster.member_indices() {
                seen[i] += 1;
                prop_assert_eq!(fit.assignments()[i], cluster.exemplar_index());
            }
        }
        prop_assert!(seen.iter().all(|&c| c == 1));

        let labels = fit.labels();
        prop_assert_eq!(labels.len(), data.len());
        for &l in &labels {
            prop_assert!(l < fit.n_clusters());
        }
    }

    #[test]
    fn prop_converged_runs_stay_put(
        data in points(),
        self_divergence in 0.0f64..20.0
    ) {
        let model = model(self_divergence, 0.5);
        let mut run = model.start(&data).unwrap();
        if run.run() == RunState::Converged {
            let before = run.assignments().to_vec();
            prop_assert_eq!(run.step(), 0);
            prop_assert_eq!(run.assignments(), &before[..]);
        } else {
            prop_assert_eq!(run.state(), RunState::MaxIterationsReached);
            prop_assert_eq!(run.iteration(), 50);
        }
    }

    #[test]
    fn prop_runs_are_deterministic(
        data in points(),
        self_divergence in 0.0f64..20.0,
        damping in 0.0f64..=1.0
    ) {
        let model = model(self_divergence, damping);
        let a = model.fit(&data).unwrap();
        let b = model.clone().fit(&data).unwrap();

        prop_assert_eq!(a.assignments(), b.assignments());
        prop_assert_eq!(a.iterations(), b.iterations());
        let members_a: Vec<Vec<usize>> = a.clusters().map(|c| c.member_indices().to_vec()).collect();
        let members_b: Vec<Vec<usize>> = b.clusters().map(|c| c.member_indices().to_vec()).collect();
        prop_assert_eq!(members_a, members_b);
        prop_assert_eq!(model.fit_predict(&data).unwrap(), a.labels());
    }
}
