// SPDX-License-Identifier: Apache-2.0

use crate::asset::{
    AssetId, AssetRecord, ProblematicAssetRecord, UNSPECIFIED_TIME_BUCKET,
};
use crate::serde_helpers;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Errors raised while loading the summary artifact. All of them are fatal:
/// a session never starts with a partially loaded artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    Io(String),
    Json(String),
    AssetRecord { index: usize, message: String },
    DuplicateAssetId(String),
    ProblematicRecord { index: usize, message: String },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "artifact read failed: {msg}"),
            Self::Json(msg) => write!(f, "artifact is not a valid summary document: {msg}"),
            Self::AssetRecord { index, message } => {
                write!(f, "asset_details_summary[{index}]: {message}")
            }
            Self::DuplicateAssetId(id) => {
                write!(f, "asset_details_summary contains duplicate asset_id {id}")
            }
            Self::ProblematicRecord { index, message } => {
                write!(f, "problematic_assets[{index}]: {message}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Wire shape of the summary artifact, exactly as the upstream pipeline
/// writes it. Unknown top-level fields are rejected; row-level extras are
/// tolerated because the upstream schema grows columns without notice.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawArtifact {
    asset_details_summary: Vec<RawAssetRow>,
    problematic_assets: Vec<RawProblematicRow>,
    critical_asset_summary: BTreeMap<String, serde_json::Value>,
    most_common_reason_to_fail: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawAssetRow {
    #[serde(with = "serde_helpers::flexible_id")]
    asset_id: String,
    asset_name: String,
    average_days_to_fail: f64,
    #[serde(default, with = "serde_helpers::string_or_seq")]
    reasons_to_fail: Vec<String>,
    #[serde(default)]
    no_of_issues: Option<u64>,
    #[serde(default)]
    time_bucket: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawProblematicRow {
    #[serde(with = "serde_helpers::flexible_id")]
    asset_no: String,
    criticality: String,
    #[serde(default)]
    average_days_to_fail: Option<f64>,
}

/// The loaded, validated dataset for one session. Immutable after load;
/// every query recomputes from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalSummary {
    pub asset_details: Vec<AssetRecord>,
    pub problematic_assets: Vec<ProblematicAssetRecord>,
    pub critical_asset_summary: BTreeMap<String, serde_json::Value>,
    pub most_common_reason_to_fail: String,
}

impl GlobalSummary {
    /// Parses and validates an artifact document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let raw: RawArtifact =
            serde_json::from_slice(bytes).map_err(|e| LoadError::Json(e.to_string()))?;
        validate(raw)
    }
}

/// Reads and validates the summary artifact at `path`.
pub fn load_artifact(path: &Path) -> Result<GlobalSummary, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::Io(e.to_string()))?;
    GlobalSummary::from_slice(&bytes)
}

fn validate(raw: RawArtifact) -> Result<GlobalSummary, LoadError> {
    let mut seen_ids: BTreeSet<AssetId> = BTreeSet::new();
    let mut asset_details = Vec::with_capacity(raw.asset_details_summary.len());

    for (index, row) in raw.asset_details_summary.into_iter().enumerate() {
        let asset_id = AssetId::parse(row.asset_id.trim()).map_err(|e| {
            LoadError::AssetRecord {
                index,
                message: e.to_string(),
            }
        })?;
        if !seen_ids.insert(asset_id.clone()) {
            return Err(LoadError::DuplicateAssetId(asset_id.into_inner()));
        }
        if !row.average_days_to_fail.is_finite() || row.average_days_to_fail < 0.0 {
            return Err(LoadError::AssetRecord {
                index,
                message: format!(
                    "average_days_to_fail must be a non-negative number, got {}",
                    row.average_days_to_fail
                ),
            });
        }
        let reasons_to_fail: Vec<String> = row
            .reasons_to_fail
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        let no_of_issues = row.no_of_issues.unwrap_or(reasons_to_fail.len() as u64);
        let time_bucket = match row.time_bucket {
            Some(label) if !label.trim().is_empty() => label.trim().to_string(),
            _ => UNSPECIFIED_TIME_BUCKET.to_string(),
        };
        asset_details.push(AssetRecord {
            asset_id,
            asset_name: row.asset_name.trim().to_string(),
            average_days_to_fail: row.average_days_to_fail,
            reasons_to_fail,
            no_of_issues,
            time_bucket,
        });
    }

    let mut problematic_assets = Vec::with_capacity(raw.problematic_assets.len());
    for (index, row) in raw.problematic_assets.into_iter().enumerate() {
        // Dangling asset_no references are legal here; only shape is checked.
        let asset_no = AssetId::parse(row.asset_no.trim()).map_err(|e| {
            LoadError::ProblematicRecord {
                index,
                message: e.to_string(),
            }
        })?;
        let criticality = row.criticality.trim().to_string();
        if criticality.is_empty() {
            return Err(LoadError::ProblematicRecord {
                index,
                message: "criticality label must not be empty".to_string(),
            });
        }
        if let Some(days) = row.average_days_to_fail {
            if !days.is_finite() || days < 0.0 {
                return Err(LoadError::ProblematicRecord {
                    index,
                    message: format!(
                        "average_days_to_fail must be a non-negative number, got {days}"
                    ),
                });
            }
        }
        problematic_assets.push(ProblematicAssetRecord {
            asset_no,
            criticality,
            average_days_to_fail: row.average_days_to_fail,
        });
    }

    Ok(GlobalSummary {
        asset_details,
        problematic_assets,
        critical_asset_summary: raw.critical_asset_summary,
        most_common_reason_to_fail: raw.most_common_reason_to_fail,
    })
}
