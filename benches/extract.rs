// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use profile_sync::{
    merge,
    profile::ProfileRecord,
    scrape::{Extractor, SequenceIds},
    specs::PROFILE_PAGE,
    Document,
};

fn load_sample() -> String {
    std::fs::read_to_string("tests/fixtures/profile.html")
        .expect("read tests/fixtures/profile.html")
}

fn bench_extract(c: &mut Criterion) {
    let html = load_sample();
    let extractor = Extractor::new(
        PROFILE_PAGE.compile().expect("built-in rules compile"),
        Box::new(SequenceIds::starting_at(1)),
        "Technical Skills",
    );

    c.bench_function("parse_document", |b| {
        b.iter(|| {
            let doc = Document::parse(black_box(&html));
            black_box(doc.len())
        })
    });

    let doc = Document::parse(&html);
    c.bench_function("extract_parsed", |b| {
        b.iter(|| {
            let snap = extractor.extract(black_box(&doc));
            black_box(snap.experience.len())
        })
    });

    let snap = extractor.extract(&doc);
    let stored = ProfileRecord::skeleton();
    c.bench_function("merge", |b| {
        b.iter(|| black_box(merge(black_box(&snap), Some(&stored))))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
