use criterion::{black_box, criterion_group, criterion_main, Criterion};
use failsight_model::{AssetId, AssetRecord, GlobalSummary, ProblematicAssetRecord};
use failsight_query::{apply, run_query, AggregateReport, FilterSelection};
use std::collections::{BTreeMap, BTreeSet};

const BUCKETS: [&str; 6] = ["January", "February", "March", "April", "May", "June"];
const REASONS: [&str; 5] = ["Wear", "Corrosion", "Leak", "Overheating", "Vibration"];
const LEVELS: [&str; 3] = ["High", "Medium", "Low"];

fn sample_summary(asset_count: usize) -> GlobalSummary {
    let asset_details: Vec<AssetRecord> = (0..asset_count)
        .map(|i| {
            let reasons: Vec<String> = REASONS
                .iter()
                .take(i % REASONS.len())
                .map(|r| r.to_string())
                .collect();
            AssetRecord {
                asset_id: AssetId::parse(&format!("A{i}")).expect("asset id"),
                asset_name: format!("Asset {}", i % 50),
                average_days_to_fail: (i % 365) as f64,
                no_of_issues: reasons.len() as u64,
                reasons_to_fail: reasons,
                time_bucket: BUCKETS[i % BUCKETS.len()].to_string(),
            }
        })
        .collect();

    let problematic_assets: Vec<ProblematicAssetRecord> = (0..asset_count / 2)
        .map(|i| ProblematicAssetRecord {
            asset_no: AssetId::parse(&format!("A{}", i * 2)).expect("asset_no"),
            criticality: LEVELS[i % LEVELS.len()].to_string(),
            average_days_to_fail: None,
        })
        .collect();

    let critical_asset_summary: BTreeMap<String, serde_json::Value> = LEVELS
        .iter()
        .map(|level| (level.to_string(), serde_json::json!({})))
        .collect();

    GlobalSummary {
        asset_details,
        problematic_assets,
        critical_asset_summary,
        most_common_reason_to_fail: "Wear".to_string(),
    }
}

fn sample_selection() -> FilterSelection {
    FilterSelection {
        criticality_levels: Some(
            ["High", "Medium"]
                .iter()
                .map(|s| s.to_string())
                .collect::<BTreeSet<String>>(),
        ),
        time_bucket: Some("March".to_string()),
        ..Default::default()
    }
}

fn bench_query_stages(c: &mut Criterion) {
    let summary = sample_summary(2_000);
    let selection = sample_selection();
    let vocabulary: Vec<String> = LEVELS.iter().map(|s| s.to_string()).collect();

    c.bench_function("filter_apply_2k", |b| {
        b.iter(|| {
            apply(
                black_box(&summary.asset_details),
                black_box(&summary.problematic_assets),
                black_box(&selection),
            )
        });
    });

    let filtered = apply(
        &summary.asset_details,
        &summary.problematic_assets,
        &selection,
    );
    c.bench_function("aggregate_report_2k", |b| {
        b.iter(|| {
            AggregateReport::compute(
                black_box(&filtered),
                black_box(&summary.problematic_assets),
                black_box(&vocabulary),
            )
        });
    });

    c.bench_function("run_query_2k", |b| {
        b.iter(|| run_query(black_box(&summary), black_box(&selection)));
    });
}

criterion_group!(benches, bench_query_stages);
criterion_main!(benches);
