/*!
 * Call Layer Configuration
 *
 * Environment variables:
 * - PROCESS_CALLS_RESPONSE_SHAPE: `structured` (default) or `legacy`
 * - PROCESS_CALLS_MAX_PARAM_LEN: raw string parameter bound (default: 65535)
 * - PROCESS_CALLS_TRACE_JSON: JSON log output (default: false)
 */

use super::limits::{DEFAULT_MAX_PARAM_LEN, MAX_PARAM_LEN_CEILING};
use std::str::FromStr;
use tracing::warn;

pub const ENV_RESPONSE_SHAPE: &str = "PROCESS_CALLS_RESPONSE_SHAPE";
pub const ENV_MAX_PARAM_LEN: &str = "PROCESS_CALLS_MAX_PARAM_LEN";
pub const ENV_TRACE_JSON: &str = "PROCESS_CALLS_TRACE_JSON";

/// Shape of spawn and spawn-shell success payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseShape {
    /// `{"pid": n}` / `{"code": n}`
    #[default]
    Structured,
    /// Bare integers
    Legacy,
}

impl FromStr for ResponseShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured" => Ok(Self::Structured),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("unknown response shape: [{}]", other)),
        }
    }
}

/// Configuration for the call layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallConfig {
    /// Success payload shape for spawn and spawn-shell
    pub response_shape: ResponseShape,

    /// Maximum accepted length of a raw string parameter
    pub max_param_len: usize,

    /// Emit JSON-formatted logs
    pub trace_json: bool,
}

impl CallConfig {
    pub fn new() -> Self {
        Self {
            response_shape: ResponseShape::Structured,
            max_param_len: DEFAULT_MAX_PARAM_LEN,
            trace_json: false,
        }
    }

    /// Build configuration from the process environment
    ///
    /// Invalid values are logged and the default is kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(raw) = lookup(ENV_RESPONSE_SHAPE) {
            match raw.parse::<ResponseShape>() {
                Ok(shape) => config.response_shape = shape,
                Err(e) => warn!(variable = ENV_RESPONSE_SHAPE, error = %e, "Ignoring invalid value"),
            }
        }

        if let Some(raw) = lookup(ENV_MAX_PARAM_LEN) {
            match raw.trim().parse::<usize>() {
                Ok(len) if (1..=MAX_PARAM_LEN_CEILING).contains(&len) => config.max_param_len = len,
                _ => warn!(variable = ENV_MAX_PARAM_LEN, value = %raw, "Ignoring invalid value"),
            }
        }

        if let Some(raw) = lookup(ENV_TRACE_JSON) {
            config.trace_json = raw == "1" || raw.eq_ignore_ascii_case("true");
        }

        config
    }

    pub fn with_response_shape(mut self, shape: ResponseShape) -> Self {
        self.response_shape = shape;
        self
    }

    /// Set the raw parameter bound, clamped to `1..=i32::MAX`
    pub fn with_max_param_len(mut self, len: usize) -> Self {
        self.max_param_len = len.clamp(1, MAX_PARAM_LEN_CEILING);
        self
    }

    pub fn with_trace_json(mut self, enabled: bool) -> Self {
        self.trace_json = enabled;
        self
    }
}

impl Default for CallConfig {
    fn default() -> Self {
        Self::new()
    }
}
