//! Core snippet-function logic for the scriptlet plugin.
//! This crate is the single source of truth for the host call contract.

pub mod function;
pub mod logging;
pub mod model;

pub use function::echo::{Echo, ECHO_MARKER, ECHO_MARKER_VALUE, ECHO_TEXT_PREFIX};
pub use function::registry::{
    FunctionHandle, FunctionRegistry, RegistryError, RegistryResult, FUNCTION_ECHO, FUNCTION_SUM,
};
pub use function::session::{EvalSession, SessionId};
pub use function::sum::RunningSum;
pub use function::{AggregateFunction, FunctionKind, SnippetFunction};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::number::Number;
pub use model::record::{Record, RecordShapeError};
pub use model::value::Value;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
