//! Benchmarks for the end-to-end sorting pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradus::core::ExprArena;
use gradus::{sort_strs, Notation};

const FIFTEEN: &[&str] = &[
    "5*n",
    "4*log(n)",
    "4*log(log(n))",
    "n**4",
    "n**(1/2)*log(n)**4",
    "log(n)**(5*log(n))",
    "n**log(n)",
    "5**n",
    "4**(n**4)",
    "4**(4**n)",
    "5**(5**n)",
    "5**(5*n)",
    "n**(n**(1/5))",
    "n**(n/4)",
    "(n/4)**(n/4)",
];

fn bench_sort_fifteen(c: &mut Criterion) {
    c.bench_function("sort_fifteen_growth_classes", |b| {
        b.iter(|| {
            let mut arena = ExprArena::new();
            let sorted = sort_strs(
                black_box(&mut arena),
                black_box(FIFTEEN),
                Notation::Algebraic,
                None,
            )
            .unwrap();
            black_box(sorted)
        })
    });
}

fn bench_sort_polynomials(c: &mut Criterion) {
    let items: Vec<String> = (1..=24).map(|k| format!("n**{k}")).collect();
    c.bench_function("sort_polynomial_ladder", |b| {
        b.iter(|| {
            let mut arena = ExprArena::new();
            let refs: Vec<&str> = items.iter().map(String::as_str).collect();
            let sorted =
                sort_strs(black_box(&mut arena), &refs, Notation::Algebraic, None).unwrap();
            black_box(sorted)
        })
    });
}

criterion_group!(benches, bench_sort_fifteen, bench_sort_polynomials);
criterion_main!(benches);
