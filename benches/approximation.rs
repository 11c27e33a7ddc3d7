//! Benchmarks for evaluation, mutation and encoding of both backends.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tabfn::codec::{binary, text};
use tabfn::{BackendKind, MathFunction, TabulatedFunction};

const SAMPLES: usize = 1_000;

fn create(kind: BackendKind) -> Box<dyn TabulatedFunction> {
    kind.factory()
        .create_from_function(&|x: f64| x.sin(), 0.0, 100.0, SAMPLES)
        .expect("valid sampling")
}

fn bench_apply(c: &mut Criterion) {
    for kind in [BackendKind::Array, BackendKind::LinkedList] {
        let f = create(kind);
        c.bench_function(&format!("apply_interpolate_{}", kind), |b| {
            b.iter(|| f.apply(black_box(73.21)))
        });
        c.bench_function(&format!("apply_extrapolate_{}", kind), |b| {
            b.iter(|| f.apply(black_box(150.0)))
        });
    }
}

fn bench_insert_remove(c: &mut Criterion) {
    for kind in [BackendKind::Array, BackendKind::LinkedList] {
        let mut f = create(kind);
        c.bench_function(&format!("insert_remove_{}", kind), |b| {
            b.iter(|| {
                f.insert(black_box(50.05), 0.0).expect("insert");
                let index = f.index_of_x(50.05).expect("inserted");
                f.remove(index).expect("remove");
            })
        });
    }
}

fn bench_codecs(c: &mut Criterion) {
    let f = create(BackendKind::Array);
    let factory = BackendKind::Array.factory();
    let bytes = binary::to_bytes(f.as_ref()).expect("encode");
    let mut encoded_text = Vec::new();
    text::write_text(f.as_ref(), &mut encoded_text).expect("encode");

    c.bench_function("binary_encode", |b| b.iter(|| binary::to_bytes(black_box(f.as_ref()))));
    c.bench_function("binary_decode", |b| {
        b.iter(|| binary::read_binary(black_box(bytes.as_slice()), factory.as_ref()))
    });
    c.bench_function("text_decode", |b| {
        b.iter(|| text::read_text(black_box(encoded_text.as_slice()), factory.as_ref()))
    });
}

criterion_group!(benches, bench_apply, bench_insert_remove, bench_codecs);
criterion_main!(benches);
