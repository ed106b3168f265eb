use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tempfile::tempdir;
use wsconf_fs::{NormalizedPath, io};

fn write_atomic_benchmark(c: &mut Criterion) {
    c.bench_function("io::write_atomic", |b| {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("config.toml"));
        let content = "space_suffix = \"_release\"\n".as_bytes();

        b.iter(|| {
            io::write_atomic(black_box(&path), black_box(content)).unwrap();
        })
    });
}

fn normalize_benchmark(c: &mut Criterion) {
    c.bench_function("NormalizedPath::new (dotted)", |b| {
        b.iter(|| NormalizedPath::new(black_box("/ws/./build/../devel//pkg/../lib")))
    });
}

criterion_group!(benches, write_atomic_benchmark, normalize_benchmark);
criterion_main!(benches);
