// SPDX-License-Identifier: Apache-2.0

use crate::aggregate::AggregateReport;
use crate::filters::{self, FilterSelection};
use crate::narrative::{self, Narrative};
use failsight_model::{AssetRecord, GlobalSummary};
use serde::Serialize;

/// Everything one query produces, as plain data for the presentation sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutput {
    pub rows: Vec<AssetRecord>,
    pub report: AggregateReport,
    pub narrative: Narrative,
}

impl QueryOutput {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Runs one full Filter → Aggregate → Narrative pass against the loaded
/// summary. Stateless: every selection change recomputes from the full
/// dataset.
#[must_use]
pub fn run_query(summary: &GlobalSummary, selection: &FilterSelection) -> QueryOutput {
    let rows = filters::apply(
        &summary.asset_details,
        &summary.problematic_assets,
        selection,
    );
    let domains = filters::dimension_domains(summary);
    let report = AggregateReport::compute(
        &rows,
        &summary.problematic_assets,
        &domains.criticality_levels,
    );
    let narrative = narrative::summarize(summary, &rows, &report);
    QueryOutput {
        rows,
        report,
        narrative,
    }
}
