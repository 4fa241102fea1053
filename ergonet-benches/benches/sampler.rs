//! Sampler throughput: proposals per second for the three schemes over a
//! mid-sized directed graph with triadic effects in the model.

use criterion::{Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use ergonet_benches::erdos_renyi_directed;
use ergonet_core::{Effect, Model, SamplerConfig, SamplerKind, run_sampler};

const NODES: u32 = 1_000;
const DENSITY: f64 = 0.005;
const PROPOSALS: u64 = 10_000;

fn model() -> Model {
    Model::new(
        vec![
            Effect::Arc,
            Effect::Reciprocity,
            Effect::AltInStars { lambda: 2.0 },
            Effect::AltKTrianglesT { lambda: 2.0 },
        ],
        vec![-2.0, 1.0, 0.5, 0.25],
    )
}

fn bench_samplers(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampler_proposals");
    let cases = [
        (
            "basic",
            SamplerKind::Basic {
                forbid_reciprocity: false,
            },
        ),
        ("ifd", SamplerKind::Ifd { gain: 0.1 }),
        ("tnt", SamplerKind::Tnt),
    ];
    for (name, kind) in cases {
        group.bench_function(name, |b| {
            let template = erdos_renyi_directed(NODES, DENSITY, 42);
            let model = model();
            b.iter(|| {
                let mut graph = template.clone();
                let mut rng = SmallRng::seed_from_u64(7);
                let config = SamplerConfig::basic(PROPOSALS).with_kind(kind);
                run_sampler(&mut graph, &model, &config, &mut rng)
                    .expect("bench run must succeed")
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_samplers);
criterion_main!(benches);
