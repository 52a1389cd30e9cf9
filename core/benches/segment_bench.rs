use criterion::{criterion_group, criterion_main, Criterion};
use sift_core::{SearchSegmenter, Segmenter, SegmenterConfig};

fn bench_segment(c: &mut Criterion) {
    let segmenter = SearchSegmenter::new(&SegmenterConfig::default()).unwrap();
    let text = "The boost_filesystem library provides portable facilities to \
                query and manipulate paths, files, and directories. "
        .repeat(50);
    c.bench_function("segment_search_mode", |b| b.iter(|| segmenter.segment(&text)));
}

criterion_group!(benches, bench_segment);
criterion_main!(benches);
