use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    sequencer_bench::bench_completion_orders,
    sequencer_bench::bench_concurrent_completions
);
criterion_main!(benches);
