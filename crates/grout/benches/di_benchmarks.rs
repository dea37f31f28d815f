//! Performance benchmarks for the container

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grout::{
    args, capability, Args, CapabilityDecl, Container, Dependency, Injectable, ResolutionError,
};

/// Simple test service for benchmarking
#[derive(Debug, Clone)]
struct Payload {
    id: u32,
    data: Vec<u8>,
}

trait Tagged: Send + Sync {
    fn id(&self) -> u32;
}

impl Tagged for Payload {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Injectable for Payload {
    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::with_default::<u32, _>("id", || 42)]
    }

    fn capabilities() -> Vec<CapabilityDecl> {
        vec![capability!(Payload => dyn Tagged)]
    }

    fn construct(args: &mut Args) -> Result<Self, ResolutionError> {
        Ok(Self {
            id: args.get("id")?,
            data: vec![0; 1024], // 1KB of data
        })
    }
}

struct Leaf;

impl Injectable for Leaf {
    fn construct(_args: &mut Args) -> Result<Self, ResolutionError> {
        Ok(Leaf)
    }
}

struct Branch {
    leaf: Arc<Leaf>,
}

impl Injectable for Branch {
    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::required::<Leaf>("leaf")]
    }

    fn construct(args: &mut Args) -> Result<Self, ResolutionError> {
        Ok(Self {
            leaf: args.get_arc("leaf")?,
        })
    }
}

struct Trunk {
    branch: Arc<Branch>,
}

impl Injectable for Trunk {
    fn dependencies() -> Vec<Dependency> {
        vec![Dependency::required::<Branch>("branch")]
    }

    fn construct(args: &mut Args) -> Result<Self, ResolutionError> {
        Ok(Self {
            branch: args.get_arc("branch")?,
        })
    }
}

fn benchmark_registration(c: &mut Criterion) {
    c.bench_function("register_type", |b| {
        b.iter(|| {
            let container = Container::new();
            let result = container.register::<Payload>();
            black_box(result.is_ok())
        })
    });

    c.bench_function("register_with_pinned_kwargs", |b| {
        b.iter(|| {
            let container = Container::new();
            let result = container
                .register::<Payload>()
                .unwrap()
                .with_kwargs(args! { "id" => black_box(42u32) });
            black_box(result.is_ok())
        })
    });
}

fn benchmark_resolution(c: &mut Criterion) {
    let constructed = Container::new();
    constructed.register::<Payload>().unwrap();

    let pinned = Container::new();
    pinned
        .register::<Payload>()
        .unwrap()
        .with_instance(Payload {
            id: 42,
            data: vec![0; 1024],
        })
        .unwrap();

    let transient = Container::new();
    transient
        .register::<Payload>()
        .unwrap()
        .transient()
        .unwrap();

    c.bench_function("resolve_constructed", |b| {
        b.iter(|| black_box(constructed.resolve::<Payload>()))
    });

    c.bench_function("resolve_pinned_instance", |b| {
        b.iter(|| black_box(pinned.resolve::<Payload>()))
    });

    c.bench_function("resolve_transient", |b| {
        b.iter(|| black_box(transient.resolve::<Payload>()))
    });

    c.bench_function("resolve_through_alias", |b| {
        let container = Container::new();
        container
            .register::<Payload>()
            .unwrap()
            .with_alias::<dyn Tagged>()
            .unwrap();

        b.iter(|| black_box(container.resolve::<dyn Tagged>()))
    });

    c.bench_function("resolve_with_override", |b| {
        b.iter(|| {
            black_box(
                constructed.resolve_with::<Payload>(Args::new().with("id", black_box(7u32))),
            )
        })
    });
}

fn benchmark_dependency_chain(c: &mut Criterion) {
    let container = Container::new();
    container.register::<Leaf>().unwrap();
    container.register::<Branch>().unwrap();
    container.register::<Trunk>().unwrap();

    c.bench_function("resolve_dependency_chain", |b| {
        b.iter(|| black_box(container.resolve::<Trunk>()))
    });
}

fn benchmark_container_operations(c: &mut Criterion) {
    c.bench_function("create_container", |b| {
        b.iter(|| {
            let container = Container::new();
            black_box(container)
        })
    });

    c.bench_function("contains_check", |b| {
        let container = Container::new();
        container.register::<Payload>().unwrap();

        b.iter(|| black_box(container.contains::<Payload>()))
    });

    c.bench_function("snapshot", |b| {
        let container = Container::new();
        container.register::<Leaf>().unwrap();
        container.register::<Branch>().unwrap();
        container.register::<Trunk>().unwrap();

        b.iter(|| black_box(container.snapshot().len()))
    });
}

criterion_group!(
    benches,
    benchmark_registration,
    benchmark_resolution,
    benchmark_dependency_chain,
    benchmark_container_operations
);
criterion_main!(benches);
