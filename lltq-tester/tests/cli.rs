use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "lltq-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_lltq-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("bounds"));
}

#[test]
fn cli_runs_all_scenarios_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_lltq-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args(["--scenarios", "all", "--seeds", "1,2", "--report", "json", "--output"])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("LLTQ Replay Tester"));

    let content = std::fs::read_to_string(output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let results = report.as_array().expect("array of results");
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r["passed"] == true && r["iterations_run"] == 2));
}

#[test]
fn cli_replays_a_plan_file() {
    let exe = env!("CARGO_BIN_EXE_lltq-tester");
    let plan_path = temp_path("plan");
    std::fs::write(
        &plan_path,
        r#"{"1": {"morning": "dance", "evening": "voice", "weekend": "charlotte"},
            "2": {"picks": {"1": 3}, "weekend": "julianna"}}"#,
    )
    .expect("write plan");
    let output_path = temp_path("plan-report");
    let output = Command::new(exe)
        .args(["--scenarios", "smoke,invalidation", "--report", "markdown", "--plan"])
        .arg(&plan_path)
        .arg("--output")
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("# LLTQ Replay Test Results"));
    assert!(content.contains("- **Failed**: 0"));
}

#[test]
fn cli_fails_on_a_plan_with_unknown_slots() {
    let exe = env!("CARGO_BIN_EXE_lltq-tester");
    let plan_path = temp_path("bad-plan");
    std::fs::write(&plan_path, r#"{"4": {"picks": {"1": 1}}}"#).expect("write plan");
    let status = Command::new(exe)
        .args(["--report", "json", "--plan"])
        .arg(&plan_path)
        .arg("--output")
        .arg(temp_path("bad-report"))
        .status()
        .expect("run cli");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn cli_rejects_an_invalid_config() {
    let exe = env!("CARGO_BIN_EXE_lltq-tester");
    let config_path = temp_path("config");
    std::fs::write(
        &config_path,
        r#"{"final_week": 40, "weekly_drain": {"resource": "G", "amount": -1.0},
            "skip_trigger": {"flag": "Tremors", "week": 36}}"#,
    )
    .expect("write config");
    let output = Command::new(exe)
        .arg("--config")
        .arg(&config_path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"));
}
