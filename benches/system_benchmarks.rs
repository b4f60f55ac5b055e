use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use device_hal::{
    config::SensorSource, hardware::memory::MemInfo, BackendConfig, HardwareBackend, PcBackend,
    TelemetrySnapshot,
};
use std::fs;
use std::hint::black_box;
use std::path::Path;
use tempfile::TempDir;

const MEMINFO: &str = "\
MemTotal:       13196996 kB
MemFree:         9876543 kB
MemAvailable:   11451184 kB
Buffers:          123456 kB
Cached:          1987654 kB
SwapCached:            0 kB
Active:          1234567 kB
Inactive:         876543 kB
";

/// Build a fake hwmon tree with `zones` sensors.
fn fake_tree(zones: usize) -> (TempDir, PcBackend) {
    let dir = TempDir::new().expect("Should create temp dir");
    fs::write(dir.path().join("meminfo"), MEMINFO).expect("Should write meminfo");
    for i in 0..zones {
        let hwmon = dir.path().join(format!("hwmon{}", i));
        fs::create_dir_all(&hwmon).expect("Should create hwmon dir");
        fs::write(hwmon.join("temp1_input"), "45000").expect("Should write sensor");
        fs::write(hwmon.join("temp1_label"), format!("Core {}", i)).expect("Should write label");
    }

    let config = BackendConfig::default()
        .with_meminfo_path(dir.path().join("meminfo"))
        .with_thermal_sources(vec![SensorSource::millidegrees(format!(
            "{}/hwmon*/temp*_input",
            dir.path().display()
        ))]);
    let backend = PcBackend::with_config(config).expect("Should accept config");
    (dir, backend)
}

/// Benchmark meminfo parsing
fn bench_meminfo_parse(c: &mut Criterion) {
    c.bench_function("meminfo_parse", |b| {
        b.iter(|| MemInfo::parse(black_box(MEMINFO), Path::new("/proc/meminfo")))
    });
}

/// Benchmark thermal discovery against the number of sensors
fn bench_thermal_discovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("thermal_discovery");

    for zones in [1, 8, 32] {
        let (_dir, backend) = fake_tree(zones);
        group.bench_with_input(BenchmarkId::from_parameter(zones), &backend, |b, backend| {
            b.iter(|| backend.get_thermal_config())
        });
    }

    group.finish();
}

/// Benchmark re-reading already discovered zones
fn bench_thermal_sampling(c: &mut Criterion) {
    let (_dir, backend) = fake_tree(8);
    let config = backend.get_thermal_config();

    c.bench_function("thermal_readings", |b| b.iter(|| config.readings()));
}

/// Benchmark a whole-contract snapshot
fn bench_snapshot(c: &mut Criterion) {
    let (_dir, backend) = fake_tree(4);

    c.bench_function("telemetry_snapshot", |b| {
        b.iter(|| TelemetrySnapshot::collect(&backend))
    });

    let snapshot = TelemetrySnapshot::collect(&backend);
    c.bench_function("snapshot_json_serialization", |b| {
        b.iter(|| serde_json::to_string(black_box(&snapshot)).expect("Should serialize"))
    });
}

criterion_group!(
    benches,
    bench_meminfo_parse,
    bench_thermal_discovery,
    bench_thermal_sampling,
    bench_snapshot
);
criterion_main!(benches);
