// SPDX-License-Identifier: Apache-2.0

use failsight_model::{AssetRecord, GlobalSummary, ProblematicAssetRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

/// Sentinel a sink may pass for "no restriction on this dimension".
pub const ALL_SENTINEL: &str = "All";

/// One filter selection: an immutable value describing which slice of the
/// dataset a query should see. Every dimension is independently optional;
/// `None` (or the `"All"` sentinel, or an empty set) leaves that dimension
/// unrestricted. Dimensions combine with AND semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterSelection {
    #[serde(default)]
    pub asset_ids: Option<BTreeSet<String>>,
    #[serde(default)]
    pub asset_names: Option<BTreeSet<String>>,
    #[serde(default)]
    pub criticality_levels: Option<BTreeSet<String>>,
    #[serde(default)]
    pub time_bucket: Option<String>,
}

/// Casefold used for asset-name matching only: names are display labels
/// typed by humans, so matching is NFKC + lowercase. Ids, criticality
/// labels, and time buckets stay exact.
#[must_use]
pub fn fold_name(input: &str) -> String {
    input.trim().nfkc().collect::<String>().to_lowercase()
}

/// Canonicalizes a selection: trims labels, folds asset names, collapses
/// empty sets and the `"All"` sentinel to `None`. Idempotent, so callers
/// may normalize eagerly or leave it to [`apply`].
#[must_use]
pub fn normalize_selection(selection: &FilterSelection) -> FilterSelection {
    FilterSelection {
        asset_ids: normalize_set(selection.asset_ids.as_ref(), |s| s.trim().to_string()),
        asset_names: normalize_set(selection.asset_names.as_ref(), |s| fold_name(s)),
        criticality_levels: normalize_set(selection.criticality_levels.as_ref(), |s| {
            s.trim().to_string()
        }),
        time_bucket: selection.time_bucket.as_deref().and_then(|label| {
            let label = label.trim();
            if label.is_empty() || label.eq_ignore_ascii_case(ALL_SENTINEL) {
                None
            } else {
                Some(label.to_string())
            }
        }),
    }
}

fn normalize_set(
    values: Option<&BTreeSet<String>>,
    canon: impl Fn(&str) -> String,
) -> Option<BTreeSet<String>> {
    let values = values?;
    if values
        .iter()
        .any(|v| v.trim().eq_ignore_ascii_case(ALL_SENTINEL))
    {
        return None;
    }
    let cleaned: BTreeSet<String> = values
        .iter()
        .map(|v| canon(v))
        .filter(|v| !v.is_empty())
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Applies a selection to the full dataset and returns the matching assets.
///
/// Always computes from the full collections, never from a previously
/// filtered result, which makes the operation idempotent and independent of
/// the order dimensions are evaluated in. An empty result is an ordinary
/// value. The criticality dimension resolves through the `asset_no` join;
/// dangling references simply never match, and when `problematic` is empty
/// the dimension is a no-op rather than excluding every row.
#[must_use]
pub fn apply(
    assets: &[AssetRecord],
    problematic: &[ProblematicAssetRecord],
    selection: &FilterSelection,
) -> Vec<AssetRecord> {
    let selection = normalize_selection(selection);

    let criticality_ids: Option<BTreeSet<&str>> = match &selection.criticality_levels {
        Some(levels) if !problematic.is_empty() => Some(
            problematic
                .iter()
                .filter(|p| levels.contains(p.criticality.as_str()))
                .map(|p| p.asset_no.as_str())
                .collect(),
        ),
        // Empty join = unrestricted: with no criticality observations at
        // all, the dimension must not exclude every row.
        _ => None,
    };

    assets
        .iter()
        .filter(|asset| {
            selection
                .asset_ids
                .as_ref()
                .map_or(true, |ids| ids.contains(asset.asset_id.as_str()))
                && selection
                    .asset_names
                    .as_ref()
                    .map_or(true, |names| names.contains(&fold_name(&asset.asset_name)))
                && criticality_ids
                    .as_ref()
                    .map_or(true, |ids| ids.contains(asset.asset_id.as_str()))
                && selection
                    .time_bucket
                    .as_ref()
                    .map_or(true, |bucket| asset.time_bucket == *bucket)
        })
        .cloned()
        .collect()
}

/// Distinct values a sink may offer per filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionDomains {
    pub asset_ids: Vec<String>,
    pub asset_names: Vec<String>,
    pub criticality_levels: Vec<String>,
    pub time_buckets: Vec<String>,
}

/// Lists the filterable values present in a loaded summary. Asset ids,
/// names, and time buckets keep first-seen dataset order; the criticality
/// vocabulary comes from `critical_asset_summary` keys, extended with any
/// label that only occurs in `problematic_assets`.
#[must_use]
pub fn dimension_domains(summary: &GlobalSummary) -> DimensionDomains {
    let mut asset_ids = Vec::new();
    let mut asset_names = Vec::new();
    let mut time_buckets = Vec::new();
    for asset in &summary.asset_details {
        push_unique(&mut asset_ids, asset.asset_id.as_str());
        push_unique(&mut asset_names, &asset.asset_name);
        push_unique(&mut time_buckets, &asset.time_bucket);
    }

    let mut criticality_levels: Vec<String> =
        summary.critical_asset_summary.keys().cloned().collect();
    for record in &summary.problematic_assets {
        push_unique(&mut criticality_levels, &record.criticality);
    }

    DimensionDomains {
        asset_ids,
        asset_names,
        criticality_levels,
        time_buckets,
    }
}

fn push_unique(values: &mut Vec<String>, candidate: &str) {
    if !values.iter().any(|v| v == candidate) {
        values.push(candidate.to_string());
    }
}
