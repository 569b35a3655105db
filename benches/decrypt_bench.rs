use criterion::{criterion_group, criterion_main, Criterion};
use fastrand::Rng;
use m209::rules::{LugRules, Version};
use m209::scorer::{EvalType, Stats};
use m209::simulation::Simulation;
use std::hint::black_box;

fn setup_key() -> m209::key::Key {
    let rules = LugRules::for_version(Version::V1947).expect("Failed to build rules");
    let mut rng = Rng::with_seed(1947);
    let sim = Simulation::generate(&rules, &Stats::english(), &mut rng, 1500, 0, 0)
        .expect("Failed to generate message");
    let mut key = sim.attack_key().expect("Failed to build attack key");
    key.update_decryption();
    key
}

fn criterion_benchmark(c: &mut Criterion) {
    let stats = Stats::english();
    let mut key = setup_key();

    c.bench_function("full decryption (1500 letters)", |b| {
        b.iter(|| {
            key.invalidate_decryption();
            key.update_decryption();
        })
    });

    c.bench_function("toggle pin + mono eval", |b| {
        b.iter(|| {
            key.toggle_pin(black_box(0), black_box(7));
            key.eval(EvalType::Mono, &stats)
        })
    });

    c.bench_function("wheel inversion + mono eval", |b| {
        b.iter(|| {
            key.inverse_wheel(black_box(3));
            key.eval(EvalType::Mono, &stats)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
