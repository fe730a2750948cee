use criterion::{BatchSize::SmallInput, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tsp_core::instance::{InstanceMetadata, TSPInstance, distance::Distance, matrix::EdgeDataMatrix};
use tsp_core::tsp_lib_spec::{EdgeWeightType, ProblemType};
use tsp_solvers::one_tree::min_one_tree;

fn random_instance(dimension: usize, seed: u64) -> TSPInstance {
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..dimension)
        .map(|_| (rng.r#gen::<f64>() * 1000.0, rng.r#gen::<f64>() * 1000.0))
        .collect();

    let mut data = Vec::with_capacity(dimension * dimension);
    for i in 0..dimension {
        for j in 0..dimension {
            let (xi, yi) = points[i];
            let (xj, yj) = points[j];
            let dist = ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt().round() as i32;
            data.push(Distance(dist));
        }
    }

    let matrix = EdgeDataMatrix::new(data, dimension);
    let mut metadata = InstanceMetadata::new("random".to_string(), ProblemType::TSP, dimension);
    metadata.edge_weight_type = EdgeWeightType::EXPLICIT;
    TSPInstance::new(matrix, metadata)
}

fn min_one_tree_benchmark(c: &mut Criterion) {
    let instance = random_instance(280, 1);
    let pi = vec![Distance::ZERO; instance.dimension()];

    c.bench_function("compute min one tree", |b| {
        b.iter_batched_ref(|| pi.clone(), |pi| min_one_tree(&instance, pi), SmallInput)
    });
}

criterion_group!(one_tree, min_one_tree_benchmark);
criterion_main!(one_tree);
