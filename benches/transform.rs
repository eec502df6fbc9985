use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use daily_sales_etl::extract::{ExtractOptions, extract_csv_from_reader};
use daily_sales_etl::transform::transform;
use daily_sales_etl::types::DataSet;

fn sales_csv(rows: usize) -> String {
    let mut out = String::from("Transaction ID,Product ID,Quantity,Price,Transaction Date\n");
    for i in 0..rows {
        // Every tenth price is missing so the filter has work to do.
        let price = if i % 10 == 0 {
            String::new()
        } else {
            format!("{}.{:02}", i % 500, i % 100)
        };
        out.push_str(&format!(
            "TX-{i:07},P-{},{},{price},2024-06-{:02}\n",
            i % 97,
            i % 9 + 1,
            i % 28 + 1
        ));
    }
    out
}

fn dataset(rows: usize) -> DataSet {
    let input = sales_csv(rows);
    let mut rdr = csv::ReaderBuilder::new().from_reader(input.as_bytes());
    extract_csv_from_reader(&mut rdr, &ExtractOptions::default()).expect("bench input parses")
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_csv");
    for rows in [1_000usize, 50_000] {
        let input = sales_csv(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &input, |b, input| {
            b.iter(|| {
                let mut rdr = csv::ReaderBuilder::new().from_reader(input.as_bytes());
                black_box(extract_csv_from_reader(&mut rdr, &ExtractOptions::default()).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    for rows in [1_000usize, 50_000] {
        let ds = dataset(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &ds, |b, ds| {
            b.iter(|| black_box(transform(black_box(ds)).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract, bench_transform);
criterion_main!(benches);
