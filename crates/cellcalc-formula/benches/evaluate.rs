//! Benchmarks for formula construction and evaluation

use cellcalc_formula::{Formula, Variables};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const FORMULA: &str = "(x1 + 2.5e3) * y / (z - 4) + 17 * (x1 - y) / 3 - (((z)))";

fn bench_construct(c: &mut Criterion) {
    c.bench_function("construct", |b| {
        b.iter(|| Formula::new(black_box(FORMULA)))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let formula = Formula::new(FORMULA).expect("benchmark formula is valid");
    let vars = Variables::new().with("x1", 1.5).with("y", 2.0).with("z", 8.0);

    c.bench_function("evaluate", |b| {
        b.iter(|| black_box(&formula).evaluate(black_box(&vars)))
    });
}

criterion_group!(benches, bench_construct, bench_evaluate);
criterion_main!(benches);
