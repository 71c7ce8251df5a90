use std::process::Command;

fn xtask() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xtask"))
}

#[test]
fn xtask_help_runs() {
    let output = xtask().arg("help").output().expect("run xtask");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
}

#[test]
fn print_schema_ids_lists_report_and_ruleset() {
    let output = xtask().arg("print-schema-ids").output().expect("run xtask");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("akashi.report.v1"));
    assert!(stdout.contains("akashi.ruleset.v1"));
}

#[test]
fn explain_coverage_passes() {
    let output = xtask().arg("explain-coverage").output().expect("run xtask");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn fixtures_are_complete() {
    let output = xtask().arg("check-fixtures").output().expect("run xtask");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn normalize_report_replaces_timestamps() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("report.json");
    let output = dir.path().join("normalized.json");
    std::fs::write(
        &input,
        r#"{"schema":"akashi.report.v1","tool":{"name":"akashi","version":"9.9.9"},"started_at":"2024-01-01T00:00:00Z","finished_at":"2024-01-01T00:00:00Z","verdict":"pass","resources":[],"findings":[],"data":{}}"#,
    )
    .expect("write report");

    let status = xtask()
        .arg("normalize-report")
        .arg(&input)
        .arg(&output)
        .status()
        .expect("run xtask");
    assert!(status.success());

    let text = std::fs::read_to_string(&output).expect("read normalized");
    assert!(text.contains("__TIMESTAMP__"));
    assert!(text.contains("__VERSION__"));
    assert!(!text.contains("9.9.9"));
}

#[test]
fn unknown_command_fails() {
    let output = xtask().arg("nope").output().expect("run xtask");
    assert!(!output.status.success());
}
