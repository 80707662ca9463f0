/*!
 * Structured Tracing
 * Tracing initialization and per-operation spans
 *
 * Every call gets a span with a generated trace ID so the debug events emitted
 * by validation, dispatch and the primitives can be correlated.
 */

use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Operations slower than this are logged at info level
const SLOW_OPERATION_MS: u128 = 1_000;

/// Initialize structured tracing
///
/// Logs go to stderr so stdout stays free for call results.
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - PROCESS_CALLS_TRACE_JSON (via `json`): JSON output
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    match result {
        Ok(()) => debug!(json, "Structured tracing initialized"),
        Err(e) => warn!(error = %e, "Tracing subscriber already installed"),
    }
}

/// Generate a unique trace ID for request correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering a single call-layer operation
pub struct OperationSpan {
    span: tracing::Span,
    start: Instant,
    operation: &'static str,
    trace_id: String,
}

impl OperationSpan {
    pub fn new(operation: &'static str) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::DEBUG,
            "operation",
            trace_id = %trace_id,
            operation = operation,
            pid = tracing::field::Empty,
            code = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            operation,
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Record the PID an operation produced or targeted
    pub fn record_pid(&self, pid: u32) {
        self.span.record("pid", pid);
    }

    /// Record a shell exit code
    pub fn record_code(&self, code: i32) {
        self.span.record("code", code);
    }

    pub fn record_result(&self, success: bool) {
        self.span
            .record("result", if success { "success" } else { "error" });
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
        self.span.record("result", "error");
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for OperationSpan {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed().as_millis();
        self.span.record("duration_ms", elapsed);
        let _entered = self.span.enter();

        if elapsed > SLOW_OPERATION_MS {
            info!(
                trace_id = %self.trace_id,
                operation = self.operation,
                duration_ms = elapsed,
                "long-running operation completed"
            );
        } else {
            debug!(
                trace_id = %self.trace_id,
                operation = self.operation,
                duration_ms = elapsed,
                "operation completed"
            );
        }
    }
}

/// Helper to create an operation span
#[inline]
pub fn span_operation(name: &'static str) -> OperationSpan {
    OperationSpan::new(name)
}
