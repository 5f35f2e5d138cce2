use assert_cmd::Command;
use predicates::prelude::*;

fn billcalc() -> Command {
    let mut cmd = Command::cargo_bin("billcalc").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_progress_note_text_report() {
    billcalc()
        .arg("09:00-09:45")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("09:00-09:45, 4 calls\n"))
        .stdout(predicate::str::contains("Duration: 45 minutes"))
        .stdout(predicate::str::contains("Billing Table (Progress Note):"))
        .stdout(predicate::str::contains(">>> 45"));
}

#[test]
fn test_consult_twelve_hour_input() {
    billcalc()
        .args(["--category", "consult", "9:00 AM to 10:05 AM"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("09:00-10:05, 1 calls\n"))
        .stdout(predicate::str::contains("Matched Tier: 61-71 min"));
}

#[test]
fn test_json_output() {
    let output = billcalc()
        .args(["--format", "json", "0900-1030"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["calls"], 7);
    assert_eq!(value["duration"], 90);
    assert_eq!(value["start"], "09:00");
    assert_eq!(value["end"], "10:30");
    assert_eq!(value["category"], "progress-note");
}

#[test]
fn test_invalid_input_fails_with_message() {
    billcalc()
        .arg("invalid")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: Invalid format"));
}

#[test]
fn test_start_after_end_json_error() {
    let output = billcalc()
        .args(["--format", "json", "10:00-09:00"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["error"]["kind"], "start_after_end");
    assert_eq!(
        value["error"]["message"],
        "Start time 10:00 must be before end time 09:00"
    );
}

#[test]
fn test_warnings_are_listed() {
    billcalc()
        .arg("09:10-09:40")
        .assert()
        .success()
        .stdout(predicate::str::contains("warning: Start Time Not Aligned:"))
        .stdout(predicate::str::contains("warning: Near Next Tier:"))
        .stdout(predicate::str::contains("Suggested Time Range: 09:00-09:40"));
}

#[test]
fn test_apply_suggestions() {
    // 09:10-09:40 → aligned to 09:00-09:40 (40 min, 4 calls, 8 short of
    // 48) → extended to 09:00-09:48 (5 calls).
    billcalc()
        .args(["--apply-suggestions", "09:10-09:40"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("09:00-09:48, 5 calls\n"));
}

#[test]
fn test_table_only() {
    billcalc()
        .args(["--table", "-c", "consult"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Billing Table (Consult):"))
        .stdout(predicate::str::contains("Min Minutes"))
        .stdout(predicate::str::contains(">>>").not());
}

#[test]
fn test_table_json() {
    let output = billcalc()
        .args(["--table", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0]["kind"], "progress_note");
    assert_eq!(rows[0]["billing_max_minutes"], 30);
}

#[test]
fn test_batch_mode() {
    billcalc()
        .arg("--stdin")
        .write_stdin("09:00-09:45\n\n0900-1030\nnot a range\n")
        .assert()
        .failure()
        .stdout("09:00-09:45, 4 calls\n09:00-10:30, 7 calls\nerror: Invalid format. Use HH:MM-HH:MM or HH:MM to HH:MM, or 12h format (e.g., 09:00-10:30, 09:00 to 10:30, 9:00 AM to 10:30 AM)\n");
}

#[test]
fn test_batch_json_lines() {
    let output = billcalc()
        .args(["--stdin", "--format", "json", "-c", "consult"])
        .write_stdin("09:00-10:05\n09:00-12:00\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let calls: Vec<u64> = stdout
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap()["calls"]
            .as_u64()
            .unwrap())
        .collect();
    assert_eq!(calls, vec![1, 9]);
}

#[test]
fn test_missing_range_is_usage_error() {
    billcalc().assert().failure().code(2);
}
