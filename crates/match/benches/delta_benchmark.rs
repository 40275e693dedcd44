//! Benchmarks for delta construction and reconstruction.
//!
//! Run with: `cargo bench -p matching --bench delta_benchmark`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use matching::{DeltaBuilder, MatchPolicy, apply_delta, serialize_delta};

/// Deterministic prose-like text so runs are comparable.
fn corpus(len: usize) -> Vec<u8> {
    const WORDS: [&[u8]; 8] = [
        b"rolling ", b"window ", b"hash ", b"delta ", b"text ", b"record ", b"start ", b"edit ",
    ];
    let mut text = Vec::with_capacity(len + 8);
    let mut state = 0x2545_f491_u32;
    while text.len() < len {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        text.extend_from_slice(WORDS[(state % 8) as usize]);
    }
    text.truncate(len);
    text
}

/// Copies `text` and rewrites one byte in every `stride`.
fn scatter_edits(text: &[u8], stride: usize) -> Vec<u8> {
    let mut updated = text.to_vec();
    for index in (stride / 2..updated.len()).step_by(stride) {
        updated[index] = updated[index].wrapping_add(1);
    }
    updated
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("delta_build");

    for len in [1024, 16 * 1024] {
        let old = corpus(len);
        let updated = scatter_edits(&old, 97);
        group.throughput(Throughput::Bytes(len as u64));

        for window in [1, 4, 16] {
            for (label, policy) in [
                ("verified", MatchPolicy::Verified),
                ("hash_only", MatchPolicy::HashOnly),
            ] {
                let builder = DeltaBuilder::new()
                    .with_window_size(window)
                    .with_policy(policy);
                group.bench_function(BenchmarkId::new(format!("{label}_w{window}"), len), |b| {
                    b.iter(|| black_box(builder.build(&old, &updated).len()));
                });
            }
        }
    }

    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("delta_apply");
    let old = corpus(16 * 1024);
    let updated = scatter_edits(&old, 97);
    let text = serialize_delta(&DeltaBuilder::new().with_window_size(4).build(&old, &updated));

    group.throughput(Throughput::Bytes(old.len() as u64));
    group.bench_function("parse_and_apply", |b| {
        b.iter(|| black_box(apply_delta(black_box(&old), black_box(&text))));
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_apply);
criterion_main!(benches);
