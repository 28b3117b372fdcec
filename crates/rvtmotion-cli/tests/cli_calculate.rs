use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rvtmotion"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("rvtmotion should start")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir should be created");
    }
    fs::write(path, content).expect("file should be written");
}

#[test]
fn calculate_prints_tables_for_default_scenario() {
    let output = run_cli(&["calculate"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.starts_with("# Source Theory\n"));
    assert!(stdout.contains("# source model = WUS"));
    assert!(stdout.contains("period_s"));
    assert!(stdout.contains("freq_hz"));
}

#[test]
fn calculate_writes_json_report_to_file() {
    let temp = TempDir::new().expect("tempdir should be created");
    let report_path = temp.path().join("reports/motion.json");

    let output = run_cli(&[
        "calculate",
        "--magnitude",
        "7.0",
        "--distance",
        "30",
        "--format",
        "json",
        "--output",
        report_path.to_str().expect("utf-8 path"),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let report: Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("report should exist"))
            .expect("report should be valid json");
    assert_eq!(report["parameters"]["momentMag"], 7.0);
    assert_eq!(report["parameters"]["distance"], 30.0);
    let sa = report["response"]["sa"].as_array().expect("sa array");
    assert_eq!(sa.len(), 91);
    assert!(sa.iter().all(|value| value.as_f64().is_some_and(|sa| sa >= 0.0)));
    assert!(report["pga"].as_f64().is_some_and(|pga| pga > 0.0));
}

#[test]
fn scenario_file_selects_region_and_axes() {
    let temp = TempDir::new().expect("tempdir should be created");
    let scenario = temp.path().join("scenario.json");
    write_file(
        &scenario,
        r#"
        {
          "name": "CEUS check",
          "sourceModel": "CEUS",
          "parameters": { "momentMag": 5.5, "distance": 10.0 },
          "period": { "spacing": "Custom", "values": [0.1, 0.2, 0.5, 1.0] },
          "peakFactor": "Vanmarcke"
        }
        "#,
    );

    let output = run_cli(&[
        "calculate",
        "--scenario",
        scenario.to_str().expect("utf-8 path"),
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(report["name"], "CEUS check");
    assert_eq!(report["sourceModel"], "CEUS");
    assert_eq!(report["parameters"]["stressDrop"], 150.0);
    assert_eq!(report["response"]["period"].as_array().map(Vec::len), Some(4));
}

#[test]
fn locked_parameter_override_is_an_input_error() {
    let output = run_cli(&["calculate", "--stress-drop", "50"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: [INPUT.CLI_PARAMETER]"), "stderr: {stderr}");
    assert!(stderr.contains("FATAL EXIT CODE: 2"));

    let output = run_cli(&["calculate", "--region", "custom", "--stress-drop", "50"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn missing_scenario_file_is_an_io_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let missing = temp.path().join("missing.json");
    let output = run_cli(&["calculate", "--scenario", missing.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[IO.CONFIG_READ]"));
}

#[test]
fn malformed_scenario_and_unknown_region_are_input_errors() {
    let temp = TempDir::new().expect("tempdir should be created");
    let scenario = temp.path().join("broken.json");
    write_file(&scenario, "{ \"sourceModel\": ");

    let output = run_cli(&["calculate", "--scenario", scenario.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[INPUT.CONFIG_PARSE]"));

    let output = run_cli(&["calculate", "--region", "mars"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[INPUT.CLI_USAGE]"));
}

#[test]
fn empty_frequency_axis_is_fatal() {
    let temp = TempDir::new().expect("tempdir should be created");
    let scenario = temp.path().join("empty-axis.json");
    write_file(
        &scenario,
        r#"{ "frequency": { "spacing": "Custom", "values": [] } }"#,
    );

    let output = run_cli(&["calculate", "--scenario", scenario.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[INPUT.FREQUENCY_AXIS]"));
}

#[test]
fn verbose_flag_logs_calculation_summary() {
    let output = run_cli(&["calculate", "--verbose"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("motion calculated"));
}

#[test]
fn regions_lists_presets_in_selection_order() {
    let output = run_cli(&["regions"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    let wus = stdout.find("0: WUS").expect("WUS listed");
    let ceus = stdout.find("1: CEUS").expect("CEUS listed");
    let custom = stdout.find("2: Custom").expect("Custom listed");
    assert!(wus < ceus && ceus < custom);
    assert!(stdout.contains("all parameters editable"));
}
