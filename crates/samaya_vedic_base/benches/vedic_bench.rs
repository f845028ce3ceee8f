use chrono::{TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use samaya_vedic_base::{
    ChartRecord, calculate_dasha_position, get_dasha_timeline, get_significators_for_house,
    get_sub_lord, sub_lord_table,
};

fn sublord_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("kp");
    group.bench_function("get_sub_lord", |b| {
        b.iter(|| get_sub_lord(black_box(135.0)))
    });
    group.bench_function("sub_lord_table", |b| b.iter(sub_lord_table));

    let chart = ChartRecord::default();
    group.bench_function("significators_house_7", |b| {
        b.iter(|| {
            get_significators_for_house(
                black_box(7),
                &chart.planet_positions,
                &chart.house_cusps,
            )
        })
    });
    group.finish();
}

fn dasha_bench(c: &mut Criterion) {
    let birth = Utc.with_ymd_and_hms(1990, 6, 15, 8, 0, 0).unwrap();
    let query = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let mut group = c.benchmark_group("dasha");
    group.bench_function("calculate_dasha_position", |b| {
        b.iter(|| calculate_dasha_position(birth, black_box(199.5), black_box(67.3), query))
    });
    group.bench_function("timeline_120y", |b| {
        b.iter(|| get_dasha_timeline(birth, black_box(67.3), black_box(120.0)))
    });
    group.finish();
}

criterion_group!(benches, sublord_bench, dasha_bench);
criterion_main!(benches);
