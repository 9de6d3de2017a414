use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flatcsv::{num, row, rows_from_str, rows_to_string, CsvOptions, CsvValue};

fn options() -> CsvOptions {
    CsvOptions::new().with_line_terminator("\n")
}

fn benchmark_fast_int_parse(c: &mut Criterion) {
    c.bench_function("parse_int_fast_path", |b| {
        b.iter(|| num::parse_int(black_box("123456789")))
    });

    c.bench_function("parse_int_std", |b| {
        b.iter(|| black_box("123456789").parse::<i32>())
    });

    c.bench_function("parse_long_split_path", |b| {
        b.iter(|| num::parse_long_digits(black_box(b"123456789012345")))
    });

    c.bench_function("in_long_range_check", |b| {
        b.iter(|| num::in_long_range(black_box(b"9223372036854775807"), false))
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_rows");

    for size in [10, 100, 1000].iter() {
        let rows: Vec<Vec<CsvValue>> = (0..*size)
            .map(|i| row![i, format!("name-{i}"), i % 2 == 0, "plain text, quoted"])
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| rows_to_string(black_box(rows), options()))
        });
    }

    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_rows");

    for size in [10, 100, 1000].iter() {
        let rows: Vec<Vec<CsvValue>> = (0..*size)
            .map(|i| row![i, format!("name-{i}"), 2.5f64, "say \"hi\""])
            .collect();
        let text = rows_to_string(&rows, options()).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| rows_from_str(black_box(text), options()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_fast_int_parse,
    benchmark_encode,
    benchmark_decode
);
criterion_main!(benches);
