//! Benchmarks for dirseek-probe
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fs;

fn scratch_dir(entries: usize) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..entries {
        fs::write(dir.path().join(format!("bench_{:05}", i)), b"").unwrap();
    }
    dir
}

fn benchmark_stream_read(c: &mut Criterion) {
    use dirseek_probe::dir::DirStream;

    let dir = scratch_dir(1000);
    let path = dir.path().to_str().unwrap().to_string();

    c.bench_function("readdir_telldir_1000", |b| {
        b.iter(|| {
            let mut stream = DirStream::open(&path).unwrap();
            let mut count = 0usize;
            while let Some(pair) = stream.read_with_position().unwrap() {
                black_box(pair);
                count += 1;
            }
            stream.close().unwrap();
            black_box(count);
        })
    });
}

fn benchmark_full_walk(c: &mut Criterion) {
    use dirseek_probe::config::WalkConfig;
    use dirseek_probe::trace::TraceWriter;
    use dirseek_probe::walker::DirectoryWalker;

    let dir = scratch_dir(1000);
    let path = dir.path().to_str().unwrap().to_string();

    c.bench_function("probe_walk_1000", |b| {
        b.iter(|| {
            let mut config = WalkConfig::for_path(path.clone());
            config.mark_after = 500;
            let mut walker = DirectoryWalker::new(config);
            let mut trace = TraceWriter::new(std::io::sink());
            let report = walker.walk(&path, &mut trace).unwrap();
            black_box(report);
        })
    });
}

criterion_group!(benches, benchmark_stream_read, benchmark_full_walk);
criterion_main!(benches);
