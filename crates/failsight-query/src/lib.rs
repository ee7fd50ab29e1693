// SPDX-License-Identifier: Apache-2.0

//! The filtering, aggregation, and narrative engine.
//!
//! Everything here is a pure function of (loaded summary, filter selection):
//! no ambient state, no I/O, no logging. The dataset flows one way through
//! [`filters::apply`], [`aggregate::AggregateReport::compute`], and
//! [`narrative::summarize`]; [`run_query`] is the one-pass composition of
//! the three that sinks are expected to call.

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod engine;
pub mod filters;
pub mod narrative;

pub use aggregate::{
    count_by, cross_tabulate, group_stats, top_by, AggregateError, AggregateReport, CrossTab,
    GroupStats,
};
pub use engine::{run_query, QueryOutput};
pub use filters::{
    apply, dimension_domains, normalize_selection, DimensionDomains, FilterSelection, ALL_SENTINEL,
};
pub use narrative::{asset_lines, summarize, AssetHighlight, Narrative};

pub const CRATE_NAME: &str = "failsight-query";
