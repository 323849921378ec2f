use binform::{bin_union, BinType, Bool, Record, Sink, Struct, Tuple, F64};
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

fn sample() -> Message {
    Message {
        vec: (0..100).map(|i| (i % 2 == 0, i * 7 - 300)).collect(),
        nums: (0..100).map(|i| f64::from(i) * 0.125).collect(),
        unions: (0..100)
            .map(|i| match i % 3 {
                0 => Inner::B(i % 2 == 0),
                1 => Inner::S((true, f64::from(i))),
                _ => Inner::Color((0.1, 0.2, f64::from(i))),
            })
            .collect(),
    }
}

fn write_small_sink_bench(c: &mut Criterion) {
    let msg = sample();
    let bt = Struct::<Message>::new();

    c.bench_function("write_grow_from_1", |b| {
        b.iter(|| {
            let mut sink = Sink::new(1);
            black_box(bt.write(&mut sink, black_box(&msg)))
        })
    });
}

fn write_presized_bench(c: &mut Criterion) {
    let msg = sample();
    let bt = Struct::<Message>::new();

    c.bench_function("to_bytes", |b| b.iter(|| black_box(bt.to_bytes(black_box(&msg)))));
}

fn write_reused_sink_bench(c: &mut Criterion) {
    let msg = sample();
    let bt = Struct::<Message>::new();
    let mut sink = Sink::new(bt.encoded_len(&msg));

    c.bench_function("write_reused", |b| {
        b.iter(|| {
            sink.reset();
            black_box(bt.write(&mut sink, black_box(&msg)))
        })
    });
}

criterion_group!(
    benches,
    write_small_sink_bench,
    write_presized_bench,
    write_reused_sink_bench
);
criterion_main!(benches);
