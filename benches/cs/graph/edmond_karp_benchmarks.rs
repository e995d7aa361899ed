use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use maxflow::graph::{FlowNetwork, MaxFlowConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_network(n: u32, density: f64, seed: u64) -> FlowNetwork<u32, i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut network = FlowNetwork::new();
    for v in 0..n {
        network.add_vertex(v);
    }
    for u in 0..n {
        for v in 0..n {
            if u != v && rng.gen_bool(density) {
                network.add_edge(u, v, rng.gen_range(1..=100)).unwrap();
            }
        }
    }
    network
}

/// Layered network: source, `layers` full layers of `width` vertices, sink.
fn layered_network(layers: u32, width: u32) -> FlowNetwork<u32, i64> {
    let mut network = FlowNetwork::new();
    let sink = layers * width + 1;
    for i in 0..width {
        network.add_edge(0, 1 + i, 10).unwrap();
        network.add_edge(1 + (layers - 1) * width + i, sink, 10).unwrap();
    }
    for layer in 0..layers - 1 {
        for i in 0..width {
            for j in 0..width {
                let u = 1 + layer * width + i;
                let v = 1 + (layer + 1) * width + j;
                network.add_edge(u, v, 1 + (i + j) as i64 % 7).unwrap();
            }
        }
    }
    network
}

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("edmond_karp_random");
    for &n in &[16u32, 64, 128] {
        let network = random_network(n, 0.2, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &network, |b, network| {
            b.iter(|| {
                maxflow::graph::max_flow(
                    black_box(network),
                    &0,
                    &(n - 1),
                    &MaxFlowConfig::default(),
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_layered(c: &mut Criterion) {
    let mut group = c.benchmark_group("edmond_karp_layered");
    for &(layers, width) in &[(4u32, 4u32), (8, 8), (16, 8)] {
        let network = layered_network(layers, width);
        let sink = layers * width + 1;
        group.bench_with_input(
            BenchmarkId::new("layers_x_width", format!("{}x{}", layers, width)),
            &network,
            |b, network| b.iter(|| network.max_flow(black_box(&0), black_box(&sink)).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_random, bench_layered);
criterion_main!(benches);
