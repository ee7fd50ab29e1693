// SPDX-License-Identifier: Apache-2.0

//! Data model for the asset-failure summary artifact.
//!
//! The artifact is produced upstream; this crate owns its wire schema, the
//! one-time validation/normalization pass, and the canonical record types
//! every other failsight crate consumes. After [`load_artifact`] succeeds,
//! downstream code may assume fully typed, shape-normalized records.

#![forbid(unsafe_code)]

mod artifact;
mod asset;
pub mod serde_helpers;

pub use artifact::{load_artifact, GlobalSummary, LoadError};
pub use asset::{
    AssetId, AssetRecord, ParseError, ProblematicAssetRecord, ID_MAX_LEN,
    UNSPECIFIED_TIME_BUCKET,
};

pub const CRATE_NAME: &str = "failsight-model";
