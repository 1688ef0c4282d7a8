use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vtrelay_parser::scan;

fn generate_plain_text(size: usize) -> Vec<u8> {
    let text = "Hello, World! This is a test of plain text scanning. ";
    text.as_bytes().iter().cycle().take(size).copied().collect()
}

fn generate_colored_text(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let colors = [
        "\x1b[31m", "\x1b[32m", "\x1b[33m", "\x1b[34m", "\x1b[35m", "\x1b[36m", "\x1b[0m",
    ];
    let text = "Colored text ";

    let mut i = 0;
    while data.len() < size {
        data.extend_from_slice(colors[i % colors.len()].as_bytes());
        data.extend_from_slice(text.as_bytes());
        i += 1;
    }
    data.truncate(size);
    data
}

fn scan_all(buf: &[u8]) -> usize {
    let mut sequences = 0;
    let mut read = 0;
    while let Some(head) = scan::find_head(buf, read) {
        match scan::find_terminator(buf, head.params) {
            Some(term) => {
                sequences += 1;
                read = term.index + 1;
            }
            None => break,
        }
    }
    sequences
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(64 * 1024));

    let plain = generate_plain_text(64 * 1024);
    group.bench_function("plain_text", |b| b.iter(|| scan_all(black_box(&plain))));

    let colored = generate_colored_text(64 * 1024);
    group.bench_function("colored_text", |b| b.iter(|| scan_all(black_box(&colored))));

    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
