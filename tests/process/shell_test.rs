/*!
 * Shell and Current-PID Tests
 */

use pretty_assertions::assert_eq;
use process_calls::{
    process_registry, CallConfig, ErrorKind, ResponseShape, OP_CURRENT_PID, OP_SPAWN_SHELL,
};

#[test]
fn test_shell_exit_code() {
    let registry = process_registry(&CallConfig::default()).unwrap();
    let data = registry
        .invoke(OP_SPAWN_SHELL, br#"{"command": "exit 7"}"#)
        .unwrap();
    assert_eq!(data.as_ref(), br#"{"code":7}"#);
}

#[test]
fn test_shell_exit_code_legacy_shape() {
    let config = CallConfig::default().with_response_shape(ResponseShape::Legacy);
    let registry = process_registry(&config).unwrap();
    let data = registry
        .invoke(OP_SPAWN_SHELL, br#"{"command": "exit 7"}"#)
        .unwrap();
    assert_eq!(data.as_ref(), b"7");
}

#[test]
fn test_shell_interprets_command() {
    let registry = process_registry(&CallConfig::default()).unwrap();
    let data = registry
        .invoke(
            OP_SPAWN_SHELL,
            br#"{"command": "test \"$(echo a b | wc -w | tr -d ' ')\" = 2"}"#,
        )
        .unwrap();
    assert_eq!(data.as_ref(), br#"{"code":0}"#);
}

#[test]
fn test_signal_death_maps_to_shell_convention() {
    let registry = process_registry(&CallConfig::default()).unwrap();
    let data = registry
        .invoke(OP_SPAWN_SHELL, br#"{"command": "kill -9 $$"}"#)
        .unwrap();
    assert_eq!(data.as_ref(), br#"{"code":137}"#);
}

#[test]
fn test_empty_command_rejected() {
    let registry = process_registry(&CallConfig::default()).unwrap();
    let response = registry.dispatch(OP_SPAWN_SHELL, br#"{"command": ""}"#);
    assert_eq!(response.failure().unwrap().kind, ErrorKind::InvalidArgument);
}

#[test]
fn test_current_pid_is_stable() {
    let registry = process_registry(&CallConfig::default()).unwrap();
    let expected = format!(r#"{{"pid":{}}}"#, std::process::id());

    for payload in [&b""[..], &b"{}"[..], &b"null"[..]] {
        let data = registry.invoke(OP_CURRENT_PID, payload).unwrap();
        assert_eq!(std::str::from_utf8(&data).unwrap(), expected);
    }
}

#[test]
fn test_current_pid_rejects_fields() {
    let registry = process_registry(&CallConfig::default()).unwrap();
    let response = registry.dispatch(OP_CURRENT_PID, br#"{"pid": 1}"#);
    assert_eq!(response.failure().unwrap().kind, ErrorKind::UnknownField);
}
