//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `scriptlet_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use scriptlet_core::{EvalSession, FunctionRegistry, Value, FUNCTION_ECHO, FUNCTION_SUM};
use std::sync::Arc;

fn main() {
    println!("scriptlet_core ping={}", scriptlet_core::ping());
    println!("scriptlet_core version={}", scriptlet_core::core_version());

    let mut session = EvalSession::new(Arc::new(FunctionRegistry::with_builtins()));
    match session.evaluate(FUNCTION_ECHO, Value::Int(42)) {
        Ok(result) => println!("echo(42)={result}"),
        Err(err) => println!("echo(42) failed: {err}"),
    }
    match session.evaluate(FUNCTION_SUM, Value::Int(42)) {
        Ok(result) => println!("sum(42)={result}"),
        Err(err) => println!("sum(42) failed: {err}"),
    }
}
