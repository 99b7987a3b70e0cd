use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hostinfo::{
    metrics::procfs::{parse_cpu_name, parse_cpu_sample},
    CpuLoad, CpuSample, Response, Route,
};

const STAT: &str = "cpu  2255 34 2290 22625563 6290 127 456 0 0 0\n\
cpu0 1132 34 1441 11311718 3675 127 438 0 0 0\n\
cpu1 1123 0 849 11313845 2614 0 18 0 0 0\n\
intr 114930548 113199788 3 0 5 263 0 4 [... lots more numbers ...]\n";

const CPUINFO: &str = "processor\t: 0\n\
vendor_id\t: AuthenticAMD\n\
cpu family\t: 25\n\
model\t\t: 80\n\
model name\t: AMD Ryzen 7 5800U with Radeon Graphics\n\
stepping\t: 0\n";

/// Benchmark request line routing
fn bench_route_resolution(c: &mut Criterion) {
    let request = b"GET /cpu-name HTTP/1.1\r\nHost: localhost:12345\r\nUser-Agent: curl/8.5.0\r\nAccept: */*\r\n\r\n";

    c.bench_function("route_resolution", |b| {
        b.iter(|| Route::resolve(black_box(request)))
    });

    c.bench_function("route_no_match", |b| {
        b.iter(|| Route::resolve(black_box(b"PUT /upload HTTP/1.1\r\n\r\n")))
    });
}

/// Benchmark /proc text parsing
fn bench_procfs_parsing(c: &mut Criterion) {
    c.bench_function("parse_cpu_sample", |b| {
        b.iter(|| parse_cpu_sample(black_box(STAT)).expect("Should parse stat"))
    });

    c.bench_function("parse_cpu_name", |b| {
        b.iter(|| parse_cpu_name(black_box(CPUINFO)).expect("Should parse cpuinfo"))
    });
}

/// Benchmark load computation and response serialization
fn bench_response(c: &mut Criterion) {
    let first = CpuSample::new(22_625_563, 22_637_265);
    let second = CpuSample::new(22_625_613, 22_637_465);

    c.bench_function("load_response", |b| {
        b.iter(|| {
            let load = CpuLoad::between(black_box(first), black_box(second))
                .expect("Should compute load");
            Response::ok(load.to_string()).to_bytes()
        })
    });
}

criterion_group!(
    benches,
    bench_route_resolution,
    bench_procfs_parsing,
    bench_response
);
criterion_main!(benches);
