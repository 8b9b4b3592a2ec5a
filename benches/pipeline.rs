use ark_std::rand::{rngs::StdRng, SeedableRng};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use polymorphic_encryption::{
    authority::KeyAuthority,
    roles::{Endpoint, Issuer, Relay},
    Cryptogram,
};

fn setup() -> (Issuer, Relay, Endpoint) {
    let mut rng = StdRng::seed_from_u64(0);
    let mut kma = KeyAuthority::with_rng(&mut rng).unwrap();

    let mut issuer = Issuer::new("AS1");
    let mut relay = Relay::new("AP1");
    let mut endpoint = Endpoint::new("SP1");

    kma.register_issuer(&mut issuer);
    kma.register_relay(&mut relay).unwrap();
    kma.register_endpoint(&mut endpoint).unwrap();

    (issuer, relay, endpoint)
}

fn bench_pipeline(c: &mut Criterion) {
    let (issuer, relay, endpoint) = setup();
    let pi = issuer.activate(b"BSN1234", "AP1").unwrap();
    let ei = relay.transform(&pi, "SP1").unwrap();

    let mut group = c.benchmark_group("pipeline");
    group.bench_function("activate", |b| {
        b.iter(|| issuer.activate(b"BSN1234", "AP1"));
    });
    group.bench_function("transform", |b| {
        b.iter(|| relay.transform(&pi, "SP1"));
    });
    group.bench_function("decrypt", |b| {
        b.iter(|| endpoint.decrypt(&ei));
    });
    group.finish();
}

fn bench_transform_batch(c: &mut Criterion) {
    let (issuer, relay, _) = setup();
    let mut group = c.benchmark_group("transform_batch");

    for size in 4..=8 {
        let n = 1 << size;
        let cts: Vec<Cryptogram> = (0..n)
            .map(|i: u32| issuer.activate(&i.to_le_bytes(), "AP1").unwrap())
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &cts, |b, inp| {
            b.iter(|| relay.transform_batch(inp, "SP1"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_transform_batch);
criterion_main!(benches);
