/*!
 * Kill Tests
 * OS refusals are reported as status data, malformed PIDs as errors
 */

use pretty_assertions::assert_eq;
use process_calls::{process_registry, CallConfig, ErrorKind, OP_KILL_BY_PID, OP_SPAWN};
use serde_json::{json, Value};
use std::process::Command;
use tempfile::TempDir;

fn kill_payload(pid: i64) -> Vec<u8> {
    json!({ "pid": pid }).to_string().into_bytes()
}

#[test]
fn test_kill_absent_process_reports_status() {
    let registry = process_registry(&CallConfig::default()).unwrap();
    let pid = i64::from(i32::MAX);

    let first = registry.invoke(OP_KILL_BY_PID, &kill_payload(pid)).unwrap();
    let second = registry.invoke(OP_KILL_BY_PID, &kill_payload(pid)).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_kill_spawned_child() {
    let registry = process_registry(&CallConfig::default()).unwrap();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("victim.log");

    let data = registry
        .invoke(
            OP_SPAWN,
            json!({
                "executable": "sleep",
                "args": ["30"],
                "outputFile": output.to_str().unwrap(),
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap();
    let pid = serde_json::from_slice::<Value>(&data).unwrap()["pid"]
        .as_i64()
        .unwrap();

    let status = registry.invoke(OP_KILL_BY_PID, &kill_payload(pid)).unwrap();
    assert!(status.is_empty());
}

#[test]
fn test_kill_external_child() {
    let registry = process_registry(&CallConfig::default()).unwrap();
    let mut child = Command::new("sleep").arg("30").spawn().unwrap();

    let status = registry
        .invoke(OP_KILL_BY_PID, &kill_payload(i64::from(child.id())))
        .unwrap();
    assert!(status.is_empty());

    let exit = child.wait().unwrap();
    assert!(!exit.success());
}

#[test]
fn test_kill_rejects_non_positive_pids() {
    let registry = process_registry(&CallConfig::default()).unwrap();

    for pid in [0, -1] {
        let response = registry.dispatch(OP_KILL_BY_PID, &kill_payload(pid));
        let failure = response.failure().unwrap();
        assert_eq!(failure.kind, ErrorKind::InvalidArgument);
        assert!(failure.message.contains(&format!("[{}]", pid)));
    }
}

#[test]
fn test_kill_rejects_pid_beyond_signed_range() {
    let registry = process_registry(&CallConfig::default()).unwrap();
    let response = registry.dispatch(OP_KILL_BY_PID, &kill_payload(i64::from(i32::MAX) + 1));
    assert_eq!(response.failure().unwrap().kind, ErrorKind::InvalidArgument);
}
