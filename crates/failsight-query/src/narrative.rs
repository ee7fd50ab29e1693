// SPDX-License-Identifier: Apache-2.0

use crate::aggregate::AggregateReport;
use failsight_model::{AssetRecord, GlobalSummary};
use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetHighlight {
    pub asset_id: String,
    pub issue_count: u64,
}

/// Structured narrative summary of one query result. Purely composed from
/// [`AggregateReport`] values plus the precomputed most-common-reason field,
/// so the narrative can never disagree with chart or table data derived
/// from the same report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Narrative {
    pub total_assets: u64,
    pub total_issues: u64,
    pub most_frequent_asset: Option<AssetHighlight>,
    pub most_common_reason: String,
    pub mean_days_to_fail: Option<f64>,
}

/// Composes the narrative for a filtered set. No statistic is recomputed
/// here; everything comes from `report` or straight from the store.
#[must_use]
pub fn summarize(
    summary: &GlobalSummary,
    filtered: &[AssetRecord],
    report: &AggregateReport,
) -> Narrative {
    let most_frequent_asset = if filtered.is_empty() {
        None
    } else {
        report
            .top_asset
            .clone()
            .map(|(asset_id, issue_count)| AssetHighlight {
                asset_id,
                issue_count,
            })
    };
    Narrative {
        total_assets: report.total_assets,
        total_issues: report.total_issues,
        most_frequent_asset,
        most_common_reason: summary.most_common_reason_to_fail.clone(),
        mean_days_to_fail: report.mean_days_to_fail,
    }
}

impl Display for Narrative {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.total_assets == 0 {
            return f.write_str("No assets match the current selection.");
        }
        write!(
            f,
            "{} asset{} match the current selection, with {} recorded issue{}.",
            self.total_assets,
            if self.total_assets == 1 { "" } else { "s" },
            self.total_issues,
            if self.total_issues == 1 { "" } else { "s" },
        )?;
        if let Some(top) = &self.most_frequent_asset {
            write!(
                f,
                " Asset {} has the most issues ({}).",
                top.asset_id, top.issue_count
            )?;
        }
        write!(f, " Most common reason to fail: {}.", self.most_common_reason)?;
        match self.mean_days_to_fail {
            Some(mean) => write!(f, " Mean days to fail: {mean:.2}."),
            None => f.write_str(" Mean days to fail: no data."),
        }
    }
}

/// One deterministic detail line per filtered asset, in result order.
#[must_use]
pub fn asset_lines(filtered: &[AssetRecord]) -> Vec<String> {
    filtered
        .iter()
        .map(|asset| {
            let reasons = if asset.reasons_to_fail.is_empty() {
                "no recorded reasons".to_string()
            } else {
                format!("reasons: {}", asset.reasons_to_fail.join(", "))
            };
            format!(
                "Asset {} ({}): {:.1} days to fail on average; {} issue{}; {}",
                asset.asset_id,
                asset.asset_name,
                asset.average_days_to_fail,
                asset.no_of_issues,
                if asset.no_of_issues == 1 { "" } else { "s" },
                reasons,
            )
        })
        .collect()
}
