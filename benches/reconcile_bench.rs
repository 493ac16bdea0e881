use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use envsync::core::domain::{Entry, EntrySet, RemoteEntry, Subject, Target};
use envsync::core::fingerprint::{Fingerprint, FingerprintStore, Memory};
use envsync::core::reconcile::{correlate, reconcile, DriftDetector};
use std::time::Duration;

/// Declared, recorded and live views of `n` variables.
///
/// Every third variable has a new value and every fifth was recreated out
/// of band, so the plan exercises each path.
fn fixture(n: usize) -> (Subject, EntrySet, EntrySet, Vec<RemoteEntry>, Memory) {
    let subject = Subject::new("prj_bench");
    let store = Memory::new();
    let mut declared = EntrySet::new();
    let mut prior = EntrySet::new();
    let mut live = Vec::with_capacity(n);

    for i in 0..n {
        let key = format!("VAR_{i:05}");
        let value = format!("value-{i}");
        let entry = Entry::new(key.as_str())
            .with_value(value.as_str())
            .with_targets([Target::Production, Target::Preview]);

        let stored = if i % 3 == 0 { "stale".to_string() } else { value };
        store
            .set(&subject, &key, Fingerprint::of(&stored.into()).as_bytes())
            .unwrap();

        let recorded_id = format!("env_{i:05}");
        let live_id = if i % 5 == 0 {
            format!("env_new_{i:05}")
        } else {
            recorded_id.clone()
        };
        live.push(RemoteEntry::from_entry(live_id, &entry));
        prior.insert(entry.clone().with_remote_id(recorded_id));
        declared.insert(entry);
    }

    (subject, declared, prior, live, store)
}

/// Benchmark correlation of recorded and live entries.
fn bench_correlate(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlate");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for size in [10, 100, 1000] {
        let (_, _, prior, live, _) = fixture(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(correlate(black_box(&prior), black_box(&live))));
        });
    }

    group.finish();
}

/// Benchmark a full plan computation.
fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for size in [10, 100, 1000] {
        let (subject, declared, prior, live, store) = fixture(size);
        let drift = DriftDetector::new(&store);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let plan = reconcile(
                    &subject,
                    black_box(&declared),
                    black_box(&prior),
                    black_box(&live),
                    &drift,
                )
                .unwrap();
                black_box(plan);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_correlate, bench_reconcile);
criterion_main!(benches);
