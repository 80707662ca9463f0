/*!
 * Spawn Tests
 * Detached and awaited spawns, redirection, argument passing and directories
 */

use pretty_assertions::assert_eq;
use process_calls::{process_registry, CallConfig, CallRegistry, ErrorKind, OP_KILL_BY_PID, OP_SPAWN};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn registry() -> CallRegistry {
    process_registry(&CallConfig::default()).unwrap()
}

fn spawn(registry: &CallRegistry, payload: Value) -> u32 {
    let data = registry
        .invoke(OP_SPAWN, payload.to_string().as_bytes())
        .unwrap();
    let response: Value = serde_json::from_slice(&data).unwrap();
    response["pid"].as_u64().unwrap() as u32
}

fn canonical(path: &Path) -> String {
    path.canonicalize().unwrap().display().to_string()
}

#[test]
fn test_detached_spawn_returns_child_pid() {
    let registry = registry();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("sleep.log");

    let started = Instant::now();
    let pid = spawn(
        &registry,
        json!({
            "executable": "sleep",
            "args": ["5"],
            "outputFile": output.to_str().unwrap(),
        }),
    );

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_ne!(pid, std::process::id());
    assert!(output.exists());

    let status = registry
        .invoke(OP_KILL_BY_PID, json!({ "pid": pid }).to_string().as_bytes())
        .unwrap();
    assert!(status.is_empty());
}

#[test]
fn test_awaited_spawn_blocks_and_merges_streams() {
    let registry = registry();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("streams.log");

    let started = Instant::now();
    let pid = spawn(
        &registry,
        json!({
            "executable": "sh",
            "args": ["-c", "sleep 0.3; echo out; echo err 1>&2"],
            "outputFile": output.to_str().unwrap(),
            "awaitExit": true,
        }),
    );

    assert!(started.elapsed() >= Duration::from_millis(300));
    assert!(pid > 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "out\nerr\n");
}

#[test]
fn test_arguments_keep_embedded_spaces() {
    let registry = registry();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("args.log");

    spawn(
        &registry,
        json!({
            "executable": "sh",
            "args": ["-c", "printf '[%s]\\n' \"$@\"", "sh", "a", "b c", "d"],
            "outputFile": output.to_str().unwrap(),
            "awaitExit": true,
        }),
    );

    assert_eq!(fs::read_to_string(&output).unwrap(), "[a]\n[b c]\n[d]\n");
}

#[test]
fn test_output_file_is_truncated() {
    let registry = registry();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("truncate.log");
    fs::write(&output, "stale contents that are longer than the new output\n").unwrap();

    spawn(
        &registry,
        json!({
            "executable": "echo",
            "args": ["fresh"],
            "outputFile": output.to_str().unwrap(),
            "awaitExit": true,
        }),
    );

    assert_eq!(fs::read_to_string(&output).unwrap(), "fresh\n");
}

#[test]
fn test_directory_sets_child_cwd() {
    let registry = registry();
    let work = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let output = logs.path().join("pwd.log");

    spawn(
        &registry,
        json!({
            "executable": "pwd",
            "args": [],
            "outputFile": output.to_str().unwrap(),
            "directory": work.path().to_str().unwrap(),
            "awaitExit": true,
        }),
    );

    assert_eq!(
        fs::read_to_string(&output).unwrap().trim_end(),
        canonical(work.path())
    );
}

#[test]
fn test_empty_directory_inherits_cwd() {
    let registry = registry();
    let logs = TempDir::new().unwrap();
    let output = logs.path().join("pwd.log");

    spawn(
        &registry,
        json!({
            "executable": "pwd",
            "args": [],
            "outputFile": output.to_str().unwrap(),
            "directory": "",
            "awaitExit": true,
        }),
    );

    let cwd = std::env::current_dir().unwrap();
    assert_eq!(
        fs::read_to_string(&output).unwrap().trim_end(),
        canonical(&cwd)
    );
}

#[test]
fn test_unknown_field_spawns_nothing() {
    let registry = registry();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("never.log");

    let payload = json!({
        "executable": "touch",
        "args": [],
        "outputFile": output.to_str().unwrap(),
        "foo": 1,
    });
    let response = registry.dispatch(OP_SPAWN, payload.to_string().as_bytes());

    let failure = response.failure().unwrap();
    assert_eq!(failure.kind, ErrorKind::UnknownField);
    assert_eq!(failure.message, "Unknown data field: [foo]");
    assert!(!output.exists());
}

#[test]
fn test_missing_executable_is_execution_failure() {
    let registry = registry();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("ghost.log");

    let payload = json!({
        "executable": "definitely-not-a-real-binary-4711",
        "args": [],
        "outputFile": output.to_str().unwrap(),
        "awaitExit": true,
    });
    let response = registry.dispatch(OP_SPAWN, payload.to_string().as_bytes());

    let failure = response.failure().unwrap();
    assert_eq!(failure.kind, ErrorKind::ExecutionFailure);
    assert!(failure
        .message
        .contains("executable: [definitely-not-a-real-binary-4711]"));
}

#[test]
fn test_missing_output_file_is_reported() {
    let response = registry().dispatch(
        OP_SPAWN,
        json!({ "executable": "true", "args": [] }).to_string().as_bytes(),
    );

    let failure = response.failure().unwrap();
    assert_eq!(failure.kind, ErrorKind::MissingRequiredParameter);
    assert_eq!(failure.message, "Required parameter 'outputFile' not specified");
}
