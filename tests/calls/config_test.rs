/*!
 * Environment Configuration Tests
 * Mutates process environment; every test is serialized
 */

use pretty_assertions::assert_eq;
use process_calls::core::config::{ENV_MAX_PARAM_LEN, ENV_RESPONSE_SHAPE, ENV_TRACE_JSON};
use process_calls::core::limits::DEFAULT_MAX_PARAM_LEN;
use process_calls::{process_registry, CallConfig, ErrorKind, ResponseShape, OP_SPAWN_SHELL};
use serial_test::serial;
use std::env;

fn clear_env() {
    env::remove_var(ENV_RESPONSE_SHAPE);
    env::remove_var(ENV_MAX_PARAM_LEN);
    env::remove_var(ENV_TRACE_JSON);
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    assert_eq!(CallConfig::from_env(), CallConfig::default());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var(ENV_RESPONSE_SHAPE, "legacy");
    env::set_var(ENV_MAX_PARAM_LEN, "128");
    env::set_var(ENV_TRACE_JSON, "true");

    let config = CallConfig::from_env();
    clear_env();

    assert_eq!(config.response_shape, ResponseShape::Legacy);
    assert_eq!(config.max_param_len, 128);
    assert!(config.trace_json);
}

#[test]
#[serial]
fn test_invalid_values_keep_defaults() {
    clear_env();
    env::set_var(ENV_RESPONSE_SHAPE, "tabular");
    env::set_var(ENV_MAX_PARAM_LEN, "0");

    let config = CallConfig::from_env();
    clear_env();

    assert_eq!(config.response_shape, ResponseShape::Structured);
    assert_eq!(config.max_param_len, DEFAULT_MAX_PARAM_LEN);
}

#[test]
#[serial]
fn test_configured_bound_reaches_registry() {
    clear_env();
    env::set_var(ENV_MAX_PARAM_LEN, "8");
    let config = CallConfig::from_env();
    clear_env();

    let registry = process_registry(&config).unwrap();
    let response = registry.dispatch(OP_SPAWN_SHELL, br#"{"command": "echo far too long"}"#);

    let failure = response.failure().unwrap();
    assert_eq!(failure.kind, ErrorKind::InvalidArgument);
    assert_eq!(
        failure.message,
        "Invalid 'command_len' parameter specified: [17]"
    );
}
