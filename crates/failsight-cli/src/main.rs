// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use clap::{ArgAction, Args, Parser, Subcommand};
use failsight_model::{load_artifact, GlobalSummary, LoadError};
use failsight_query::{
    asset_lines, dimension_domains, normalize_selection, run_query, FilterSelection,
};
use serde_json::json;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const EXIT_SUCCESS: u8 = 0;
const EXIT_VALIDATION: u8 = 3;

#[derive(Parser)]
#[command(name = "failsight")]
#[command(about = "Asset-failure analytics over a precomputed summary artifact")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long = "asset-id")]
    asset_ids: Vec<String>,
    #[arg(long = "asset-name")]
    asset_names: Vec<String>,
    #[arg(long = "criticality")]
    criticality_levels: Vec<String>,
    #[arg(long = "time-bucket")]
    time_bucket: Option<String>,
}

impl FilterArgs {
    fn to_selection(&self) -> FilterSelection {
        let to_set = |values: &[String]| -> Option<BTreeSet<String>> {
            if values.is_empty() {
                None
            } else {
                Some(values.iter().cloned().collect())
            }
        };
        normalize_selection(&FilterSelection {
            asset_ids: to_set(&self.asset_ids),
            asset_names: to_set(&self.asset_names),
            criticality_levels: to_set(&self.criticality_levels),
            time_bucket: self.time_bucket.clone(),
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate an artifact, reporting ok or the load error.
    Validate {
        #[arg(long)]
        artifact: PathBuf,
    },
    /// Artifact statistics and the filterable value domains.
    Inspect {
        #[arg(long)]
        artifact: PathBuf,
    },
    /// Filtered rows plus the full aggregate report.
    Query {
        #[arg(long)]
        artifact: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Narrative summary of the filtered set.
    Summary {
        #[arg(long)]
        artifact: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_env("FAILSIGHT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load(path: &PathBuf) -> Result<GlobalSummary, LoadError> {
    let summary = load_artifact(path)?;
    tracing::info!(
        assets = summary.asset_details.len(),
        problematic = summary.problematic_assets.len(),
        "artifact loaded"
    );
    Ok(summary)
}

fn cmd_validate(path: &PathBuf, json: bool) -> Result<(), LoadError> {
    let summary = load(path)?;
    if json {
        println!(
            "{}",
            json!({
                "status": "ok",
                "assets": summary.asset_details.len(),
                "problematic_assets": summary.problematic_assets.len(),
            })
        );
    } else {
        println!(
            "ok: {} assets, {} problematic records",
            summary.asset_details.len(),
            summary.problematic_assets.len()
        );
    }
    Ok(())
}

fn cmd_inspect(path: &PathBuf, json: bool) -> Result<(), LoadError> {
    let summary = load(path)?;
    let domains = dimension_domains(&summary);
    if json {
        println!(
            "{}",
            json!({
                "assets": summary.asset_details.len(),
                "problematic_assets": summary.problematic_assets.len(),
                "most_common_reason_to_fail": summary.most_common_reason_to_fail,
                "dimension_domains": domains,
            })
        );
    } else {
        println!("assets: {}", summary.asset_details.len());
        println!("problematic records: {}", summary.problematic_assets.len());
        println!("criticality levels: {}", domains.criticality_levels.join(", "));
        println!("time buckets: {}", domains.time_buckets.join(", "));
        println!(
            "most common reason to fail: {}",
            summary.most_common_reason_to_fail
        );
    }
    Ok(())
}

fn cmd_query(path: &PathBuf, filters: &FilterArgs, json: bool) -> Result<(), LoadError> {
    let summary = load(path)?;
    let selection = filters.to_selection();
    let output = run_query(&summary, &selection);
    tracing::info!(rows = output.rows.len(), "query executed");
    if json {
        println!(
            "{}",
            json!({
                "selection": selection,
                "empty": output.is_empty(),
                "rows": output.rows,
                "report": output.report,
            })
        );
    } else if output.is_empty() {
        println!("No data matches the selected filters.");
    } else {
        for line in asset_lines(&output.rows) {
            println!("{line}");
        }
    }
    Ok(())
}

fn cmd_summary(path: &PathBuf, filters: &FilterArgs, json: bool) -> Result<(), LoadError> {
    let summary = load(path)?;
    let selection = filters.to_selection();
    let output = run_query(&summary, &selection);
    if json {
        println!(
            "{}",
            json!({
                "selection": selection,
                "empty": output.is_empty(),
                "narrative": output.narrative,
                "text": output.narrative.to_string(),
            })
        );
    } else {
        println!("{}", output.narrative);
    }
    Ok(())
}

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Validate { artifact } => cmd_validate(artifact, cli.json),
        Commands::Inspect { artifact } => cmd_inspect(artifact, cli.json),
        Commands::Query { artifact, filters } => cmd_query(artifact, filters, cli.json),
        Commands::Summary { artifact, filters } => cmd_summary(artifact, filters, cli.json),
    };

    match result {
        Ok(()) => ProcessExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            if cli.json {
                println!("{}", json!({ "status": "error", "error": err.to_string() }));
            } else {
                eprintln!("error: {err}");
            }
            ProcessExitCode::from(EXIT_VALIDATION)
        }
    }
}
