use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use jobgeo_core::{resolve_all, resolve_record, Gazetteer, RawRecord, Resolver};

fn bench_resolve(c: &mut Criterion) {
    let gazetteer = Gazetteer::load().expect("bundled gazetteer");
    let resolver = Resolver::default();

    let record = RawRecord::new()
        .with_field("Job Title", "Data Engineer")
        .with_location("Berlin / Muenchen, Frankfurt a.M.");
    c.bench_function("resolve_record_compound", |b| {
        b.iter(|| resolve_record(black_box(&record), gazetteer, &resolver))
    });

    let batch: Vec<RawRecord> = ["Hamburg", "Koeln / Bonn", "Remote", "Stuttgart, Ulm", "Dusseldorf"]
        .iter()
        .cycle()
        .take(1_000)
        .map(|loc| RawRecord::new().with_location(*loc))
        .collect();
    c.bench_function("resolve_all_1000", |b| {
        b.iter(|| resolve_all(black_box(&batch), gazetteer, &resolver))
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
