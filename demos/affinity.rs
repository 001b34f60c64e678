//! Affinity propagation on a simple 2D dataset and on strings.
//!
//! Run with `RUST_LOG=exemplar=debug` to watch the iterations.

use exemplar::cluster::{median_divergence, AffinityPropagation, RunState};
use exemplar::divergence::Euclidean;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three well-separated clusters in 2D.
    let data: Vec<Vec<f32>> = vec![
        // Cluster A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // Cluster B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Cluster C (near (10, 0))
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
    ];

    let preference = median_divergence(&data, &Euclidean).unwrap();
    let model = AffinityPropagation::new(Euclidean)
        .with_self_divergence(preference)
        .unwrap()
        .with_damping(0.7)
        .unwrap()
        .with_convergence_iter(10)
        .unwrap();

    // --- Stepwise, reporting progress ---
    let mut run = model.start(&data).unwrap();
    println!("=== Affinity propagation (self_divergence={preference:.3}, damping=0.7) ===");
    while !run.state().is_terminal() {
        let changed = run.step();
        println!("  iteration {:3}: {} changed", run.iteration(), changed);
    }
    let fit = run.finish();
    match fit.state() {
        RunState::Converged => println!("  converged after {} iterations", fit.iterations()),
        _ => println!("  stopped after {} iterations (not converged)", fit.iterations()),
    }
    for cluster in fit.clusters() {
        let e = cluster.exemplar();
        println!(
            "  exemplar {:2} ({:5.1}, {:5.1}) => members {:?}",
            cluster.exemplar_index(),
            e[0],
            e[1],
            cluster.member_indices()
        );
    }

    // --- Strings, with a closure divergence ---
    let words = ["cat", "cart", "car", "elephant", "elephants"];
    let len_gap = |a: &&str, b: &&str| (a.len() as f64 - b.len() as f64).abs();
    let fit = AffinityPropagation::new(len_gap)
        .with_self_divergence(5.0)
        .unwrap()
        .with_damping(0.9)
        .unwrap()
        .with_convergence_iter(5)
        .unwrap()
        .fit(&words)
        .unwrap();
    println!("\n=== Words by length ===");
    for cluster in fit.clusters() {
        let members: Vec<&str> = cluster.members().copied().collect();
        println!("  {:10} => {:?}", cluster.exemplar(), members);
    }
}
