use criterion::{black_box, criterion_group, criterion_main, Criterion};
use exemplar::cluster::{median_divergence, AffinityPropagation};
use exemplar::divergence::Euclidean;
use rand::prelude::*;

fn bench_affinity(c: &mut Criterion) {
    let mut group = c.benchmark_group("affinity_propagation");

    // Generate synthetic data
    let mut rng = StdRng::seed_from_u64(42);
    let n = 200;
    let d = 16;

    let data: Vec<Vec<f32>> = (0..n)
        .map(|_| (0..d).map(|_| rng.random::<f32>()).collect())
        .collect();
    let preference = median_divergence(&data, &Euclidean).unwrap();

    group.bench_function("fit_n200_d16_iter50", |b| {
        b.iter(|| {
            let model = AffinityPropagation::new(Euclidean)
                .with_self_divergence(preference)
                .unwrap()
                .with_max_iter(50)
                .unwrap()
                .with_convergence_iter(50)
                .unwrap();
            model.fit(black_box(&data)).unwrap();
        })
    });

    group.bench_function("similarity_matrix_n200_d16", |b| {
        b.iter(|| {
            let model = AffinityPropagation::new(Euclidean)
                .with_self_divergence(preference)
                .unwrap();
            model.start(black_box(&data)).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_affinity);
criterion_main!(benches);
