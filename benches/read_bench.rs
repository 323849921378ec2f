use binform::{bin_union, BinType, Bool, Record, Schema, Sink, Struct, Tuple, F64};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

bin_union! {
    pub enum Inner {
        B(Bool),
        S(Tuple<(Bool, F64)>),
        Color(Tuple<(F64, F64, F64)>),
    }
}

#[derive(Record, Debug, Clone, PartialEq)]
pub struct Message {
    vec: Vec<(bool, i32)>,
    nums: Vec<f64>,
    unions: Vec<Inner>,
}

binform::lazy_static! {
    static ref ENCODED: Vec<u8> = Struct::<Message>::new().to_bytes(&Message {
        vec: (0..100).map(|i| (i % 2 == 0, i * 7 - 300)).collect(),
        nums: (0..100).map(|i| f64::from(i) * 0.125).collect(),
        unions: (0..100)
            .map(|i| match i % 3 {
                0 => Inner::B(i % 2 == 0),
                1 => Inner::S((true, f64::from(i))),
                _ => Inner::Color((0.1, 0.2, f64::from(i))),
            })
            .collect(),
    });
    static ref SCHEMA: Schema = Struct::<Message>::new().schema();
}

fn read_static_bench(c: &mut Criterion) {
    let bt = Struct::<Message>::new();
    let mut sink = Sink::from_bytes(ENCODED.as_slice());

    c.bench_function("read_static", |b| {
        b.iter(|| {
            sink.rewind();
            black_box(bt.read(&mut sink).unwrap())
        })
    });
}

fn read_dynamic_bench(c: &mut Criterion) {
    let mut sink = Sink::from_bytes(ENCODED.as_slice());

    c.bench_function("read_dynamic", |b| {
        b.iter(|| {
            sink.rewind();
            black_box(SCHEMA.read(&mut sink).unwrap())
        })
    });
}

criterion_group!(benches, read_static_bench, read_dynamic_bench);
criterion_main!(benches);
