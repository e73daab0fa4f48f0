//! Benchmarks for pipeline assembly and execution
//!
//! Run with: cargo bench

use calc_graph::calcs::{reference_pipeline, Calc1, Calc2, Calc3, Calc4};
use calc_graph::pipeline::PipelineBuilder;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");

    group.bench_function("reference", |b| {
        b.iter(|| reference_pipeline(black_box(10.0)).unwrap())
    });

    group.bench_function("re_add_present", |b| {
        b.iter(|| {
            PipelineBuilder::new(black_box(10.0))
                .add::<Calc3, (Calc1, Calc2)>()
                .unwrap()
                .add::<Calc3, (Calc1, Calc2)>()
                .unwrap()
                .add::<Calc4, (Calc1, Calc2)>()
                .unwrap()
        })
    });

    group.finish();
}

fn bench_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("execution");

    group.bench_function("assemble_and_run", |b| {
        b.iter(|| {
            let mut pipeline = reference_pipeline(black_box(10.0)).unwrap();
            pipeline.run_all().unwrap();
            black_box(pipeline.get::<Calc4>().unwrap().v);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_assembly, bench_execution);
criterion_main!(benches);
