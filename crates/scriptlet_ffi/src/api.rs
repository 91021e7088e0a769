//! Bridge API for embedding-host calls.
//!
//! # Responsibility
//! - Expose the snippet call contract (`evaluate`/`exclude`/`clear`) to the
//!   host as stable sync functions.
//! - Marshal host values through the JSON wire shape of `Value`.
//!
//! # Invariants
//! - Exported functions must not panic across the bridge boundary.
//! - All host calls are serialized through one process-wide session lock,
//!   keeping accumulator updates atomic.
//! - Malformed input degrades to a failure envelope, never an error raise.

use scriptlet_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    ping as ping_inner, EvalSession, FunctionRegistry, Value,
};
use std::sync::{Arc, Mutex, OnceLock};

const LOG_LEVEL_ENV: &str = "SCRIPTLET_LOG_LEVEL";
static RESOLVED_LOG_LEVEL: OnceLock<String> = OnceLock::new();
static SESSION: OnceLock<Mutex<EvalSession>> = OnceLock::new();

/// Minimal health-check API for bridge smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through the bridge.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes plugin logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive); an
///   empty value resolves from `SCRIPTLET_LOG_LEVEL` or the build default.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for a repeated identical configuration.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = resolve_log_level(&level);
    match init_logging_inner(&level, &log_dir) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Call envelope returned by every snippet bridge function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetCallResponse {
    /// Whether the call was dispatched.
    pub ok: bool,
    /// JSON-encoded result value, when the call produces one.
    pub value_json: Option<String>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

impl SnippetCallResponse {
    fn success(message: impl Into<String>, value_json: Option<String>) -> Self {
        Self {
            ok: true,
            value_json,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            value_json: None,
            message: message.into(),
        }
    }
}

/// Evaluates one JSON-encoded value through the named snippet function.
///
/// # FFI contract
/// - Sync call under the process-wide session lock.
/// - Never panics; malformed JSON and unknown names return failure
///   envelopes.
#[flutter_rust_bridge::frb(sync)]
pub fn snippet_evaluate(name: String, value_json: String) -> SnippetCallResponse {
    let value = match decode_value(&value_json) {
        Ok(value) => value,
        Err(message) => return SnippetCallResponse::failure(message),
    };
    match with_session(|session| session.evaluate(name.trim(), value)) {
        Ok(Ok(result)) => encode_result("Evaluated.", &result),
        Ok(Err(err)) => SnippetCallResponse::failure(format!("snippet_evaluate failed: {err}")),
        Err(message) => SnippetCallResponse::failure(message),
    }
}

/// Excludes one JSON-encoded value through the named snippet function.
///
/// # FFI contract
/// - Sync call under the process-wide session lock.
/// - Scalar functions return a null result value; unknown names fail.
#[flutter_rust_bridge::frb(sync)]
pub fn snippet_exclude(name: String, value_json: String) -> SnippetCallResponse {
    let value = match decode_value(&value_json) {
        Ok(value) => value,
        Err(message) => return SnippetCallResponse::failure(message),
    };
    match with_session(|session| session.exclude(name.trim(), value)) {
        Ok(Ok(result)) => encode_result("Excluded.", &result),
        Ok(Err(err)) => SnippetCallResponse::failure(format!("snippet_exclude failed: {err}")),
        Err(message) => SnippetCallResponse::failure(message),
    }
}

/// Clears the named snippet function's session state.
///
/// # FFI contract
/// - Sync call under the process-wide session lock.
/// - A no-op for scalar functions; unknown names fail.
#[flutter_rust_bridge::frb(sync)]
pub fn snippet_clear(name: String) -> SnippetCallResponse {
    match with_session(|session| session.clear(name.trim())) {
        Ok(Ok(())) => SnippetCallResponse::success("Cleared.", None),
        Ok(Err(err)) => SnippetCallResponse::failure(format!("snippet_clear failed: {err}")),
        Err(message) => SnippetCallResponse::failure(message),
    }
}

/// Drops all session function state and rotates the session identity.
///
/// # FFI contract
/// - Sync call under the process-wide session lock.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_reset() -> SnippetCallResponse {
    match with_session(|session| session.reset()) {
        Ok(()) => SnippetCallResponse::success("Session reset.", None),
        Err(message) => SnippetCallResponse::failure(message),
    }
}

/// Returns the current session identity.
///
/// # FFI contract
/// - Sync call under the process-wide session lock.
/// - Never panics; returns an empty string only when the lock is poisoned.
#[flutter_rust_bridge::frb(sync)]
pub fn session_id() -> String {
    with_session(|session| session.id().to_string()).unwrap_or_default()
}

fn resolve_log_level(requested: &str) -> String {
    if !requested.trim().is_empty() {
        return requested.to_string();
    }
    RESOLVED_LOG_LEVEL
        .get_or_init(|| {
            std::env::var(LOG_LEVEL_ENV)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default_log_level().to_string())
        })
        .clone()
}

fn with_session<T>(f: impl FnOnce(&mut EvalSession) -> T) -> Result<T, String> {
    let session = SESSION
        .get_or_init(|| Mutex::new(EvalSession::new(Arc::new(FunctionRegistry::with_builtins()))));
    match session.lock() {
        Ok(mut guard) => Ok(f(&mut guard)),
        Err(_) => {
            log::error!("event=session_lock_poisoned module=bridge status=error");
            Err("session lock poisoned".to_string())
        }
    }
}

fn decode_value(value_json: &str) -> Result<Value, String> {
    serde_json::from_str::<Value>(value_json)
        .map_err(|err| format!("invalid value payload: {err}"))
}

fn encode_result(message: &str, value: &Value) -> SnippetCallResponse {
    match serde_json::to_string(value) {
        Ok(encoded) => SnippetCallResponse::success(message, Some(encoded)),
        Err(err) => SnippetCallResponse::failure(format!("result encoding failed: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, session_id, session_reset, snippet_clear,
        snippet_evaluate, snippet_exclude,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn echo_round_trips_scalar_through_json() {
        let response = snippet_evaluate("echo".to_string(), r#"{"int":42}"#.to_string());
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.value_json.as_deref(), Some(r#"{"text":"py 1:42"}"#));
    }

    #[test]
    fn echo_appends_marker_to_json_sequences() {
        let response = snippet_evaluate(
            "echo".to_string(),
            r#"{"seq":[{"text":"abc"},{"text":"def"}]}"#.to_string(),
        );
        assert!(response.ok, "{}", response.message);
        assert_eq!(
            response.value_json.as_deref(),
            Some(r#"{"seq":[{"text":"abc"},{"text":"def"},{"text":"py"}]}"#)
        );
    }

    #[test]
    fn malformed_payload_returns_failure_envelope() {
        let response = snippet_evaluate("echo".to_string(), "not json".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid value payload"));
        assert_eq!(response.value_json, None);
    }

    #[test]
    fn unknown_function_returns_failure_envelope() {
        let response = snippet_evaluate("missing".to_string(), r#"{"int":1}"#.to_string());
        assert!(!response.ok);
        assert!(response.message.contains("function not found"));
    }

    #[test]
    fn accumulator_flow_spans_bridge_calls() {
        let reset = session_reset();
        assert!(reset.ok, "{}", reset.message);
        let id_before = session_id();
        assert_eq!(id_before.len(), 36);

        let response = snippet_evaluate("sum".to_string(), r#"{"int":5}"#.to_string());
        assert_eq!(response.value_json.as_deref(), Some(r#"{"int":5}"#));

        let response = snippet_evaluate("sum".to_string(), r#"{"float":3.5}"#.to_string());
        assert_eq!(response.value_json.as_deref(), Some(r#"{"float":8.5}"#));

        let response = snippet_exclude("sum".to_string(), r#"{"int":2}"#.to_string());
        assert_eq!(response.value_json.as_deref(), Some(r#"{"float":6.5}"#));

        let response = snippet_evaluate("sum".to_string(), "\"null\"".to_string());
        assert_eq!(response.value_json.as_deref(), Some(r#"{"float":6.5}"#));

        let response = snippet_evaluate("sum".to_string(), r#"{"text":"x"}"#.to_string());
        assert_eq!(response.value_json.as_deref(), Some(r#"{"float":6.5}"#));

        let cleared = snippet_clear("sum".to_string());
        assert!(cleared.ok, "{}", cleared.message);
        let response = snippet_evaluate("sum".to_string(), r#"{"int":1}"#.to_string());
        assert_eq!(response.value_json.as_deref(), Some(r#"{"int":1}"#));

        let reset = session_reset();
        assert!(reset.ok, "{}", reset.message);
        assert_ne!(session_id(), id_before);
        let response = snippet_evaluate("sum".to_string(), r#"{"int":2}"#.to_string());
        assert_eq!(response.value_json.as_deref(), Some(r#"{"int":2}"#));
    }
}
