use criterion::{Criterion, black_box, criterion_group, criterion_main};
use wsconf_core::{Context, Overrides, WorkspaceLocator};
use wsconf_test_utils::TestWorkspace;

fn locate_benchmark(c: &mut Criterion) {
    c.bench_function("WorkspaceLocator::locate (nested start)", |b| {
        let ws = TestWorkspace::new();
        ws.write_record("default", "space_suffix = \"_bench\"\n");
        let start = ws.mkdir("src/a/b/c/d");

        b.iter(|| WorkspaceLocator::locate(black_box(&start)).unwrap())
    });
}

fn load_benchmark(c: &mut Criterion) {
    c.bench_function("Context::load (persisted profile)", |b| {
        let ws = TestWorkspace::new();
        ws.write_record(
            "default",
            "build_space = \"/custom/build\"\ncmake_args = [\"-DX=1\"]\n",
        );
        let overrides = Overrides {
            workspace_hint: Some(ws.root().to_path_buf()),
            ..Default::default()
        };

        b.iter(|| Context::load(black_box(&overrides)).unwrap())
    });
}

criterion_group!(benches, locate_benchmark, load_benchmark);
criterion_main!(benches);
