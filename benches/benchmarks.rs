use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fx_volatility::currency::{Currency, CurrencyConfig};
use fx_volatility::data::RateTable;
use fx_volatility::pipeline::{analyze_table, VolatilityPipeline};
use fx_volatility::types::RateSeries;

fn synthetic_rates(n: usize, base: f64) -> Vec<Option<f64>> {
    (0..n)
        .map(|i| {
            if i % 11 == 0 {
                None
            } else {
                Some(base + (i as f64 * 0.05).sin() + i as f64 * 0.001)
            }
        })
        .collect()
}

fn benchmark_pipeline(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let series = RateSeries::daily(start, &synthetic_rates(5_000, 15.0)).unwrap();
    let pipeline = VolatilityPipeline::new(CurrencyConfig::preset(Currency::ZAR)).unwrap();

    c.bench_function("pipeline_5000_days", |b| {
        b.iter(|| pipeline.run(black_box(&series)).unwrap());
    });
}

fn benchmark_table(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let n = 5_000;
    let dates = (0..n)
        .map(|i| start + chrono::Duration::days(i as i64))
        .collect();
    let columns = Currency::all()
        .into_iter()
        .enumerate()
        .map(|(i, c)| (c.column_key().to_string(), synthetic_rates(n, 5.0 + i as f64 * 10.0)))
        .collect();
    let table = RateTable::from_columns(dates, columns).unwrap();
    let currencies = CurrencyConfig::presets();

    c.bench_function("analyze_table_5_currencies", |b| {
        b.iter(|| analyze_table(black_box(&table), &currencies, 252.0));
    });
}

criterion_group!(benches, benchmark_pipeline, benchmark_table);
criterion_main!(benches);
