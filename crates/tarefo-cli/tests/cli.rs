//! Integration tests for the `tarefo-compliance` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("tarefo-compliance").unwrap();
    cmd.env_remove("TAREFO_DATA").env_remove("TAREFO_CONFIG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn selftest_prints_sample_evaluation() {
    let value = stdout_json(cli().arg("selftest"));
    assert_eq!(value["compliant"], false);
    assert_eq!(value["operation"], "store");
    assert_eq!(value["sensitive_types"], serde_json::json!(["cpf"]));
    assert_eq!(value["recommendations"].as_array().unwrap().len(), 2);
}

#[test]
fn check_with_flags() {
    let value = stdout_json(cli().args([
        "check",
        "--operation",
        "process",
        "--data",
        r#"{"consent_obtained": true, "legitimate_purpose": true, "necessary_data_only": true, "data_minimization": true, "access_controls": true}"#,
    ]));
    assert_eq!(value["compliant"], true);
    assert_eq!(value["recommendations"], serde_json::json!([]));
}

#[test]
fn check_reads_envelope_from_environment() {
    let value = stdout_json(
        cli()
            .arg("check")
            .env(
                "TAREFO_DATA",
                r#"{"operation":"share","data":{},"timestamp":"2026-10-16T10:00:00Z"}"#,
            ),
    );
    assert_eq!(value["operation"], "share");
    assert_eq!(value["checks"].as_array().unwrap().len(), 5);
}

#[test]
fn check_without_recommendations_omits_key() {
    let value = stdout_json(cli().args([
        "check",
        "--operation",
        "delete",
        "--no-recommendations",
    ]));
    assert!(value.get("recommendations").is_none());
    assert_eq!(value["compliant"], false);
}

#[test]
fn check_unknown_operation_still_succeeds() {
    let value = stdout_json(cli().args(["check", "--operation", "archive"]));
    assert_eq!(value["reason"], "Unknown operation: archive");
}

#[test]
fn check_malformed_envelope_prints_fault_object() {
    let value = stdout_json(cli().arg("check").env("TAREFO_DATA", "{oops"));
    assert_eq!(value["compliant"], false);
    assert!(value["error"].as_str().is_some());
}

#[test]
fn check_requires_some_input() {
    cli()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TAREFO_DATA"));
}

#[test]
fn batch_reports_results_and_recent_audit() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for op in ["store", "process", "bogus", "share", "delete", "store"] {
        writeln!(file, r#"{{"operation":"{}","data":{{}}}}"#, op).unwrap();
    }
    writeln!(file, "not json").unwrap();

    let value = stdout_json(cli().args([
        "batch",
        "--input",
        file.path().to_str().unwrap(),
        "--audit-limit",
        "2",
    ]));

    assert_eq!(value["results"].as_array().unwrap().len(), 7);
    let audit = value["audit"].as_array().unwrap();
    assert_eq!(audit.len(), 2);
    assert_eq!(audit[0]["operation"], "store");
    assert_eq!(audit[1]["operation"], "delete");
}

#[test]
fn batch_reads_stdin() {
    let value = stdout_json(
        cli()
            .arg("batch")
            .write_stdin("{\"operation\":\"store\",\"data\":{\"cpf\":\"1\"}}\n"),
    );
    assert_eq!(value["results"][0]["sensitive_data"], true);
    assert_eq!(value["audit"].as_array().unwrap().len(), 1);
}

#[test]
fn rules_lists_operation() {
    let value = stdout_json(cli().args(["rules", "--operation", "delete"]));
    let rules: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["rule"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        rules,
        vec!["identity_verified", "complete_erasure", "third_party_notification"]
    );
}

#[test]
fn rules_rejects_unknown_operation() {
    cli()
        .args(["rules", "--operation", "archive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown operation: archive"));
}

#[test]
fn config_file_overrides_markers() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[compliance]\nsensitive_fields = [\"email\"]").unwrap();

    let value = stdout_json(cli().args([
        "--config",
        file.path().to_str().unwrap(),
        "check",
        "--operation",
        "store",
        "--data",
        r#"{"email": "a@b.c", "cpf": "1"}"#,
    ]));
    assert_eq!(value["sensitive_types"], serde_json::json!(["email"]));
}

#[test]
fn table_output_shows_verdict() {
    cli()
        .args(["--output", "table", "selftest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NOT COMPLIANT"))
        .stdout(predicate::str::contains("data_retention_policy"));
}

#[test]
fn environment_overrides_compliance_settings() {
    let value = stdout_json(
        cli()
            .arg("batch")
            .env("TAREFO_COMPLIANCE__SENSITIVE_FIELDS", "iban,ssn")
            .env("TAREFO_COMPLIANCE__LOG_AUDITS", "false")
            .write_stdin("{\"operation\":\"share\",\"data\":{\"iban\":\"DE00\",\"cpf\":\"1\"}}\n"),
    );
    assert_eq!(value["results"][0]["sensitive_types"], serde_json::json!(["iban"]));
    assert_eq!(value["audit"], serde_json::json!([]));
}

#[test]
fn envelope_variable_does_not_disturb_config_loading() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[compliance]\naudit_log_limit = 3").unwrap();

    let value = stdout_json(
        cli()
            .args(["--config", file.path().to_str().unwrap(), "check"])
            .env(
                "TAREFO_DATA",
                r#"{"operation":"store","data":{"consent_obtained":true}}"#,
            ),
    );
    assert_eq!(value["operation"], "store");
    assert_eq!(value["checks"][0]["passed"], true);

    let config = stdout_json(
        cli()
            .args(["--config", file.path().to_str().unwrap(), "config"])
            .env("TAREFO_DATA", r#"{"operation":"store","data":{}}"#),
    );
    assert_eq!(config["compliance"]["audit_log_limit"], 3);
}

#[test]
fn table_batch_reports_malformed_lines() {
    cli()
        .args(["--output", "table", "batch"])
        .write_stdin("{\"operation\":\"store\",\"data\":{}}\nnot json\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("NOT COMPLIANT"))
        .stdout(predicate::str::contains("line 2: malformed payload"));
}
