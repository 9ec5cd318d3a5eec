use criterion::{black_box, criterion_group, criterion_main, Criterion};
use takt::{clock, emit, fork, repeat, track, wait, Flow};

fn pattern(voices: usize) -> Flow<(), u32> {
    fork((0..voices).map(|v| {
        repeat(usize::MAX, track(vec![emit(vec![v as u32]), wait(0.25)]))
    }))
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("fork(16).run(1 beat)", |b| {
        b.iter(|| {
            let step = pattern(16).run(1.0, clock(1.0, 1.0 / 64.0, 0.0), ());
            black_box(step.events.len())
        })
    });

    c.bench_function("Clock.tick()", |b| {
        let mut clk = clock(1.0, 512.0, 0.0);
        b.iter(|| {
            clk = black_box(clk).tick();
            clk
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
