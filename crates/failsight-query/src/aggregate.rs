// SPDX-License-Identifier: Apache-2.0

use failsight_model::{AssetRecord, ProblematicAssetRecord};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AggregateError {
    EmptyInput,
}

impl std::fmt::Display for AggregateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("aggregate over an empty collection is undefined"),
        }
    }
}

impl std::error::Error for AggregateError {}

/// Occurrence counts per key, sorted by descending count. Ties keep
/// first-seen key order, so the output is deterministic for a given input
/// ordering. The counts always total the input length.
pub fn count_by<T, K, F>(items: &[T], key_fn: F) -> Vec<(K, u64)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    weighted_counts(items, key_fn, |_| 1)
}

/// The key with the largest summed weight, or `EmptyInput` when there is
/// nothing to rank. Callers that want a "no data" value instead of an error
/// check emptiness first (or use `.ok()`).
pub fn top_by<T, K, F, W>(items: &[T], key_fn: F, count_fn: W) -> Result<(K, u64), AggregateError>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
    W: Fn(&T) -> u64,
{
    weighted_counts(items, key_fn, count_fn)
        .into_iter()
        .next()
        .ok_or(AggregateError::EmptyInput)
}

pub(crate) fn weighted_counts<T, K, F, W>(items: &[T], key_fn: F, weight_fn: W) -> Vec<(K, u64)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
    W: Fn(&T) -> u64,
{
    let mut counts: Vec<(K, u64)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();
    for item in items {
        let key = key_fn(item);
        let weight = weight_fn(item);
        match index.entry(key) {
            Entry::Occupied(slot) => counts[*slot.get()].1 += weight,
            Entry::Vacant(slot) => {
                let key = slot.key().clone();
                slot.insert(counts.len());
                counts.push((key, weight));
            }
        }
    }
    // Stable sort: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Dense row × column contingency table. Missing combinations are stored as
/// explicit zeros, never absent cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTab<R, C> {
    pub rows: Vec<R>,
    pub cols: Vec<C>,
    pub cells: Vec<Vec<u64>>,
}

impl<R, C> CrossTab<R, C> {
    #[must_use]
    pub fn row_sums(&self) -> Vec<u64> {
        self.cells
            .iter()
            .map(|row| row.iter().copied().sum())
            .collect()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.row_sums().iter().copied().sum()
    }
}

/// Cross-tabulates a collection along two key dimensions. Row and column
/// labels keep first-seen order.
pub fn cross_tabulate<T, R, C, F, G>(items: &[T], row_key_fn: F, col_key_fn: G) -> CrossTab<R, C>
where
    R: Eq + Hash + Clone,
    C: Eq + Hash + Clone,
    F: Fn(&T) -> R,
    G: Fn(&T) -> C,
{
    let mut rows: Vec<R> = Vec::new();
    let mut cols: Vec<C> = Vec::new();
    let mut row_index: HashMap<R, usize> = HashMap::new();
    let mut col_index: HashMap<C, usize> = HashMap::new();
    let mut hits: Vec<(usize, usize)> = Vec::with_capacity(items.len());

    for item in items {
        let row_key = row_key_fn(item);
        let col_key = col_key_fn(item);
        let r = *row_index.entry(row_key.clone()).or_insert_with(|| {
            rows.push(row_key.clone());
            rows.len() - 1
        });
        let c = *col_index.entry(col_key.clone()).or_insert_with(|| {
            cols.push(col_key.clone());
            cols.len() - 1
        });
        hits.push((r, c));
    }

    let mut cells = vec![vec![0_u64; cols.len()]; rows.len()];
    for (r, c) in hits {
        cells[r][c] += 1;
    }

    CrossTab { rows, cols, cells }
}

/// Count and unweighted arithmetic mean for one group. `mean` is `None`
/// when no member carried the metric: an undefined statistic is reported
/// explicitly, never as `0.0` or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct GroupStats {
    pub count: u64,
    pub mean: Option<f64>,
}

/// Per-group member counts and metric means. Groups appear in key order;
/// members whose metric is absent still count toward `count` but not the
/// mean.
pub fn group_stats<T, K, F, M>(
    items: &[T],
    group_key_fn: F,
    metric_fn: M,
) -> BTreeMap<K, GroupStats>
where
    K: Ord + Clone,
    F: Fn(&T) -> K,
    M: Fn(&T) -> Option<f64>,
{
    let mut sums: BTreeMap<K, (u64, u64, f64)> = BTreeMap::new();
    for item in items {
        let slot = sums.entry(group_key_fn(item)).or_insert((0, 0, 0.0));
        slot.0 += 1;
        if let Some(value) = metric_fn(item) {
            slot.1 += 1;
            slot.2 += value;
        }
    }
    sums.into_iter()
        .map(|(key, (count, n, sum))| {
            let mean = if n > 0 { Some(sum / n as f64) } else { None };
            (key, GroupStats { count, mean })
        })
        .collect()
}

/// Every derived statistic the presentation layer consumes, computed in one
/// pass over one filtered set. Chart data, table data, and narrative text
/// all read from the same report, so they cannot disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub total_assets: u64,
    pub total_issues: u64,
    /// Issue count per asset id, descending, ties first-seen.
    pub issue_counts: Vec<(String, u64)>,
    /// Failure-reason frequency across the filtered set, descending.
    pub reason_counts: Vec<(String, u64)>,
    /// Criticality distribution over the full vocabulary; levels with no
    /// observations are explicit zeros after the observed levels.
    pub criticality_counts: Vec<(String, u64)>,
    /// Asset id × time bucket contingency table.
    pub time_crosstab: CrossTab<String, String>,
    /// Days-to-fail stats per criticality level over the full vocabulary.
    pub criticality_stats: BTreeMap<String, GroupStats>,
    /// Mean `average_days_to_fail` across the filtered set.
    pub mean_days_to_fail: Option<f64>,
    /// Asset with the most issues, if any assets matched.
    pub top_asset: Option<(String, u64)>,
}

impl AggregateReport {
    /// Computes the report for a filtered set. `problematic` is the full
    /// (unfiltered) collection; criticality aggregates restrict it to the
    /// filtered asset ids. `vocabulary` is the criticality level list from
    /// the loaded summary.
    #[must_use]
    pub fn compute(
        filtered: &[AssetRecord],
        problematic: &[ProblematicAssetRecord],
        vocabulary: &[String],
    ) -> Self {
        let issue_counts: Vec<(String, u64)> = weighted_counts(
            filtered,
            |a| a.asset_id.as_str().to_string(),
            |a| a.no_of_issues,
        );
        let total_issues = issue_counts.iter().map(|(_, n)| n).sum();
        let top_asset = issue_counts.first().cloned();

        let all_reasons: Vec<String> = filtered
            .iter()
            .flat_map(|a| a.reasons_to_fail.iter().cloned())
            .collect();
        let reason_counts = count_by(&all_reasons, Clone::clone);

        let filtered_ids: std::collections::BTreeSet<&str> =
            filtered.iter().map(|a| a.asset_id.as_str()).collect();
        let scoped: Vec<&ProblematicAssetRecord> = problematic
            .iter()
            .filter(|p| filtered_ids.contains(p.asset_no.as_str()))
            .collect();

        let mut criticality_counts = count_by(&scoped, |p| p.criticality.clone());
        for level in vocabulary {
            if !criticality_counts.iter().any(|(k, _)| k == level) {
                criticality_counts.push((level.clone(), 0));
            }
        }

        let days_by_id: HashMap<&str, f64> = filtered
            .iter()
            .map(|a| (a.asset_id.as_str(), a.average_days_to_fail))
            .collect();
        let mut criticality_stats = group_stats(
            &scoped,
            |p| p.criticality.clone(),
            |p| {
                p.average_days_to_fail
                    .or_else(|| days_by_id.get(p.asset_no.as_str()).copied())
            },
        );
        for level in vocabulary {
            criticality_stats
                .entry(level.clone())
                .or_insert_with(GroupStats::default);
        }

        let time_crosstab = cross_tabulate(
            filtered,
            |a| a.asset_id.as_str().to_string(),
            |a| a.time_bucket.clone(),
        );

        let mean_days_to_fail = if filtered.is_empty() {
            None
        } else {
            let sum: f64 = filtered.iter().map(|a| a.average_days_to_fail).sum();
            Some(sum / filtered.len() as f64)
        };

        Self {
            total_assets: filtered.len() as u64,
            total_issues,
            issue_counts,
            reason_counts,
            criticality_counts,
            time_crosstab,
            criticality_stats,
            mean_days_to_fail,
            top_asset,
        }
    }
}
