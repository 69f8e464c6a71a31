use criterion::{Criterion, black_box, criterion_group, criterion_main};
use http::Method;
use taskhub_routing::{Capabilities, RegistryBuilder};

fn resolve_benchmarks(c: &mut Criterion) {
    let mut builder = RegistryBuilder::new();
    for i in 0..32 {
        builder
            .register(format!("res{i}"), format!("/api/res{i}"), Capabilities::crud())
            .unwrap();
    }
    let registry = builder.build();

    c.bench_function("resolve_collection", |b| {
        b.iter(|| registry.resolve(&Method::GET, black_box("/api/res31/")))
    });

    c.bench_function("resolve_item", |b| {
        b.iter(|| registry.resolve(&Method::DELETE, black_box("/api/res31/42/")))
    });

    c.bench_function("resolve_miss", |b| {
        b.iter(|| registry.resolve(&Method::GET, black_box("/api/nope/")))
    });
}

criterion_group!(benches, resolve_benchmarks);
criterion_main!(benches);
