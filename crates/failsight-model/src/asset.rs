// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const ID_MAX_LEN: usize = 128;

/// Label assigned to assets whose source row carried no time bucket.
pub const UNSPECIFIED_TIME_BUCKET: &str = "unspecified";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Stable key of an asset. Integer ids from the source artifact are
/// canonicalized to their decimal string form at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("asset_id"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("asset_id"));
        }
        if input.len() > ID_MAX_LEN {
            return Err(ParseError::TooLong("asset_id", ID_MAX_LEN));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for AssetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One asset in canonical shape. Every field is fully normalized at load
/// time; downstream components never re-check shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub asset_id: AssetId,
    pub asset_name: String,
    pub average_days_to_fail: f64,
    pub reasons_to_fail: Vec<String>,
    pub no_of_issues: u64,
    pub time_bucket: String,
}

/// One (asset, criticality-issue) observation. The `asset_no` field name
/// differs from `AssetRecord::asset_id` on purpose: that is how the source
/// artifact spells the foreign key, and the mismatch is kept visible rather
/// than silently unified. The reference is not guaranteed to resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblematicAssetRecord {
    pub asset_no: AssetId,
    pub criticality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_days_to_fail: Option<f64>,
}
