use assert_cmd::Command;
use std::path::PathBuf;

fn write_artifact(dir: &tempfile::TempDir) -> PathBuf {
    let doc = serde_json::json!({
        "asset_details_summary": [
            {
                "asset_id": 1,
                "asset_name": "Pump",
                "average_days_to_fail": 10.0,
                "reasons_to_fail": ["Wear"],
                "time_bucket": "January"
            },
            {
                "asset_id": 2,
                "asset_name": "Valve",
                "average_days_to_fail": 30.0,
                "reasons_to_fail": ["Corrosion", "Wear"],
                "time_bucket": "February"
            }
        ],
        "problematic_assets": [
            { "asset_no": 1, "criticality": "High" }
        ],
        "critical_asset_summary": { "High": {}, "Low": {} },
        "most_common_reason_to_fail": "Wear"
    });
    let path = dir.path().join("final_summary.json");
    std::fs::write(&path, doc.to_string()).expect("write artifact");
    path
}

fn failsight() -> Command {
    Command::new(env!("CARGO_BIN_EXE_failsight"))
}

#[test]
fn validate_reports_ok_for_a_well_formed_artifact() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let artifact = write_artifact(&tmp);

    let output = failsight()
        .args(["--json", "validate", "--artifact"])
        .arg(&artifact)
        .output()
        .expect("run validate");
    assert!(output.status.success());
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("validate output json");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["assets"], 2);
}

#[test]
fn validate_fails_with_exit_code_3_on_a_malformed_artifact() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("broken.json");
    std::fs::write(&path, r#"{"asset_details_summary": []}"#).expect("write artifact");

    let output = failsight()
        .args(["--json", "validate", "--artifact"])
        .arg(&path)
        .output()
        .expect("run validate");
    assert_eq!(output.status.code(), Some(3));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("error output json");
    assert_eq!(payload["status"], "error");
}

#[test]
fn inspect_lists_dimension_domains() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let artifact = write_artifact(&tmp);

    let output = failsight()
        .args(["--json", "inspect", "--artifact"])
        .arg(&artifact)
        .output()
        .expect("run inspect");
    assert!(output.status.success());
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("inspect output json");
    assert_eq!(
        payload["dimension_domains"]["criticality_levels"],
        serde_json::json!(["High", "Low"])
    );
    assert_eq!(
        payload["dimension_domains"]["time_buckets"],
        serde_json::json!(["January", "February"])
    );
}

#[test]
fn query_by_criticality_returns_the_joined_asset() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let artifact = write_artifact(&tmp);

    let output = failsight()
        .args(["--json", "query", "--criticality", "High", "--artifact"])
        .arg(&artifact)
        .output()
        .expect("run query");
    assert!(output.status.success());
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("query output json");
    assert_eq!(payload["empty"], false);
    let rows = payload["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["asset_id"], "1");
}

#[test]
fn query_with_no_match_is_an_empty_result_not_a_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let artifact = write_artifact(&tmp);

    let output = failsight()
        .args(["--json", "query", "--criticality", "Low", "--artifact"])
        .arg(&artifact)
        .output()
        .expect("run query");
    assert!(output.status.success());
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("query output json");
    assert_eq!(payload["empty"], true);
    assert_eq!(payload["rows"].as_array().expect("rows").len(), 0);
}

#[test]
fn query_text_mode_prints_per_asset_lines() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let artifact = write_artifact(&tmp);

    let output = failsight()
        .args(["query", "--asset-id", "2", "--artifact"])
        .arg(&artifact)
        .output()
        .expect("run query");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.contains("Asset 2 (Valve)"));
    assert!(text.contains("reasons: Corrosion, Wear"));
}

#[test]
fn summary_renders_the_narrative_sentences() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let artifact = write_artifact(&tmp);

    let output = failsight()
        .args(["summary", "--artifact"])
        .arg(&artifact)
        .output()
        .expect("run summary");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.contains("2 assets match the current selection"));
    assert!(text.contains("Most common reason to fail: Wear."));
}

#[test]
fn summary_for_an_empty_selection_prints_the_no_data_sentence() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let artifact = write_artifact(&tmp);

    let output = failsight()
        .args(["summary", "--asset-id", "nope", "--artifact"])
        .arg(&artifact)
        .output()
        .expect("run summary");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(text.trim(), "No assets match the current selection.");
}
