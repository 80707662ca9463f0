/*!
 * Process Call Tool - Main Entry Point
 *
 * Usage: process-call <operation> [payload-json]
 *
 * Dispatches one named operation through the process call registry and
 * writes the response bytes to stdout.
 */

use miette::{miette, IntoDiagnostic, Result};
use process_calls::{init_tracing, process_registry, CallConfig, CallResponse};
use std::io::Write;
use tracing::{debug, info};

const USAGE: &str = "usage: process-call <operation> [payload-json]";

fn main() -> Result<()> {
    let config = CallConfig::from_env();
    init_tracing(config.trace_json);

    let mut args = std::env::args().skip(1);
    let operation = args.next().ok_or_else(|| miette!("{}", USAGE))?;
    let payload = args.next().unwrap_or_else(|| "{}".to_string());
    if args.next().is_some() {
        return Err(miette!("{}", USAGE));
    }

    let registry = process_registry(&config)?;

    if operation == "--list" {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    debug!(operation = %operation, payload = %payload, "Dispatching call");
    match registry.dispatch(&operation, payload.as_bytes()) {
        CallResponse::Success { data } => {
            info!(operation = %operation, bytes = data.len(), "Call succeeded");
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&data).into_diagnostic()?;
            stdout.write_all(b"\n").into_diagnostic()?;
            Ok(())
        }
        CallResponse::Failure(failure) => Err(miette!(
            code = failure.kind.to_string(),
            "{}",
            failure.message
        )),
    }
}
