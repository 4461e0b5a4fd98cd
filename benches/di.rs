use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nexus_di::*;
use std::sync::Arc;

// ===== Micro Benchmarks =====

#[derive(Default)]
struct Leaf;

managed_type!(Leaf => ManagedType::builder::<Leaf>()
    .component()
    .constructor(Leaf::default)
    .build());

#[derive(Default)]
struct Branch {
    leaf: Inject<Leaf>,
}

managed_type!(Branch => ManagedType::builder::<Branch>()
    .component()
    .constructor(Branch::default)
    .autowired_field::<Leaf, _>("leaf", Autowired::new(), |b: &Branch, l| b.leaf.set(l))
    .build());

#[derive(Default)]
struct BenchConfig;

fn container() -> Container {
    let mut catalog = TypeCatalog::new();
    catalog.add::<Leaf>("bench").add::<Branch>("bench");
    let config = ManagedType::builder::<BenchConfig>()
        .configuration()
        .component_scan(["bench"])
        .constructor(BenchConfig::default)
        .build();
    Container::builder(vec![config])
        .scanner(Arc::new(catalog))
        .build()
        .unwrap()
}

fn bench_singleton_hit(c: &mut Criterion) {
    let container = container();
    // Prime the singleton
    let _ = container.get("branch").unwrap();

    c.bench_function("singleton_hit", |b| {
        b.iter(|| {
            let v = container.get(black_box("branch")).unwrap();
            black_box(v);
        })
    });
}

fn bench_singleton_cold(c: &mut Criterion) {
    c.bench_function("singleton_cold_with_dependency", |b| {
        b.iter_batched(
            container,
            |container| {
                let v = container.get_as::<Branch>("branch").unwrap();
                black_box(v.leaf.is_set());
                container
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_transient(c: &mut Criterion) {
    let container = container();
    c.bench_function("transient_with_singleton_dependency", |b| {
        b.iter(|| {
            let v = container.get_with("branch", Lifetime::Transient).unwrap();
            black_box(v);
        })
    });
    container.destroy().unwrap();
}

fn bench_discovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("discovery");
    for count in [1usize, 10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut catalog = TypeCatalog::new();
                for i in 0..count {
                    catalog.insert(&format!("bench.n{}", i), Leaf::managed_type());
                }
                let config = ManagedType::builder::<BenchConfig>()
                    .configuration()
                    .component_scan(["bench"])
                    .constructor(BenchConfig::default)
                    .build();
                let container = Container::builder(vec![config])
                    .scanner(Arc::new(catalog))
                    .build()
                    .unwrap();
                black_box(container.bean_names().len());
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_singleton_hit,
    bench_singleton_cold,
    bench_transient,
    bench_discovery
);
criterion_main!(benches);
