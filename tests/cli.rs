// ============================================================================
// File: packages/ecr-cleanup/tests/cli.rs
// ----------------------------------------------------------------------------
// Local invocation through the binary, without callbacks or AWS access
// ============================================================================

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn request(request_type: &str) -> String {
    serde_json::json!({
        "RequestType": request_type,
        "ResponseURL": "https://example.invalid/response",
        "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/repo/guid",
        "RequestId": "cli-request",
        "LogicalResourceId": "REMOVEREPOSITORY",
        "ResourceType": "AWS::CloudFormation::CustomResource",
        "ResourceProperties": { "RepositoryName": "elasticsearch" }
    })
    .to_string()
}

fn cleanup_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ecr-cleanup").expect("binary should build");
    cmd.env("RUST_LOG", "info")
        .env_remove("ECR_CLEANUP_ENVELOPE_POLICY")
        .env_remove("ECR_CLEANUP_PHYSICAL_RESOURCE_ID");
    cmd
}

#[test]
fn create_prints_unknown_response() {
    let dir = assert_fs::TempDir::new().expect("temp dir");
    let event = dir.child("create.json");
    event.write_str(&request("Create")).expect("write event");

    cleanup_cmd()
        .args(["invoke", "--no-callback", "--log-stream", "cli-stream", "--event"])
        .arg(event.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Status\": \"SUCCESS\""))
        .stdout(predicate::str::contains("\"Response\": \"UNKNOWN\""))
        .stdout(predicate::str::contains(
            "See the details in CloudWatch Log Stream: cli-stream",
        ))
        .stderr(predicate::str::contains("CREATE"));
}

#[test]
fn unrecognized_phase_prints_failed_marker() {
    let dir = assert_fs::TempDir::new().expect("temp dir");
    let event = dir.child("unknown.json");
    event.write_str(&request("")).expect("write event");

    cleanup_cmd()
        .args(["invoke", "--no-callback", "--event"])
        .arg(event.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Status\": \"SUCCESS\""))
        .stdout(predicate::str::contains("\"Response\": \"FAILED\""));
}

#[test]
fn propagate_policy_fails_unrecognized_phase() {
    let dir = assert_fs::TempDir::new().expect("temp dir");
    let event = dir.child("unknown.json");
    event.write_str(&request("Replace")).expect("write event");

    cleanup_cmd()
        .env("ECR_CLEANUP_ENVELOPE_POLICY", "propagate")
        .args(["invoke", "--no-callback", "--event"])
        .arg(event.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Status\": \"FAILED\""))
        .stdout(predicate::str::contains("\"Response\": \"FAILED\""));
}

#[test]
fn invalid_configuration_fails_startup() {
    let dir = assert_fs::TempDir::new().expect("temp dir");
    let event = dir.child("create.json");
    event.write_str(&request("Create")).expect("write event");

    cleanup_cmd()
        .env("ECR_CLEANUP_ENVELOPE_POLICY", "sometimes")
        .args(["invoke", "--no-callback", "--event"])
        .arg(event.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ECR_CLEANUP_ENVELOPE_POLICY"));
}

#[test]
fn missing_event_file_is_reported() {
    cleanup_cmd()
        .args(["invoke", "--no-callback", "--event", "/nonexistent/event.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read event file"));
}

#[test]
fn request_without_response_url_is_rejected() {
    let dir = assert_fs::TempDir::new().expect("temp dir");
    let event = dir.child("broken.json");
    event
        .write_str(r#"{ "RequestType": "Delete" }"#)
        .expect("write event");

    cleanup_cmd()
        .args(["invoke", "--no-callback", "--event"])
        .arg(event.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid custom resource request"));
}

#[test]
fn wrongly_typed_request_type_is_answered() {
    let dir = assert_fs::TempDir::new().expect("temp dir");
    let event = dir.child("numeric.json");
    event
        .write_str(r#"{ "RequestType": 5, "ResponseURL": "https://example.invalid/r", "StackId": null }"#)
        .expect("write event");

    cleanup_cmd()
        .args(["invoke", "--no-callback", "--event"])
        .arg(event.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Status\": \"SUCCESS\""))
        .stdout(predicate::str::contains(
            "invalid value for 'RequestType': expected a string, got 5",
        ));
}
