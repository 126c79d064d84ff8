//! Compilation scheduler benchmarks: growing rule sets at fixed variable counts.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use state_algebra::Engine;
use std::time::Duration;

fn var_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("x{i}")).collect()
}

fn build_engine(n_vars: usize, n_rules: usize) -> Engine {
    let mut engine = Engine::new(var_names(n_vars)).expect("variable names are distinct");
    for i in 0..n_rules {
        let a = i % n_vars;
        let b = (i + 1) % n_vars;
        let rule = format!("x{a} => x{b}");
        engine.add_rule(&rule).expect("rule parses against declared variables");
    }
    engine
}

fn bench_compile_small(c: &mut Criterion) {
    c.bench_function("compile_20_vars_20_rules", |b| {
        b.iter(|| {
            let mut engine = build_engine(20, 20);
            engine.compile();
        });
    });
}

fn bench_compile_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_scaling");
    for &n_rules in &[10usize, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n_rules), &n_rules, |b, &n_rules| {
            b.iter(|| {
                let mut engine = build_engine(30, n_rules);
                engine.compile();
            });
        });
    }
    group.finish();
}

fn bench_predict_after_compile(c: &mut Criterion) {
    let mut engine = build_engine(20, 20);
    engine.compile();

    c.bench_function("predict_after_compile", |b| {
        b.iter(|| engine.predict(vec![("x0", true)]).expect("x0 is declared"));
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .warm_up_time(Duration::from_secs(3));
    targets = bench_compile_small, bench_compile_scaling, bench_predict_after_compile
}
criterion_main!(benches);
