use scriptlet_core::{
    EvalSession, FunctionKind, FunctionRegistry, RegistryError, Value, FUNCTION_ECHO, FUNCTION_SUM,
};
use std::sync::Arc;

#[test]
fn builtin_registry_declares_expected_kinds() {
    let registry = FunctionRegistry::with_builtins();
    assert_eq!(registry.kind_of(FUNCTION_ECHO), Some(FunctionKind::Scalar));
    assert_eq!(registry.kind_of(FUNCTION_SUM), Some(FunctionKind::Aggregate));
    assert_eq!(registry.kind_of("missing"), None);
}

#[test]
fn unknown_names_error_on_every_entry_point() {
    let mut session = EvalSession::new(Arc::new(FunctionRegistry::with_builtins()));
    let expected = RegistryError::FunctionNotFound("missing".to_string());

    assert_eq!(
        session.evaluate("missing", Value::Int(1)).expect_err("evaluate"),
        expected
    );
    assert_eq!(
        session.exclude("missing", Value::Int(1)).expect_err("exclude"),
        expected
    );
    assert_eq!(session.clear("missing").expect_err("clear"), expected);
}

#[test]
fn scalar_function_ignores_aggregate_entry_points() {
    let mut session = EvalSession::new(Arc::new(FunctionRegistry::with_builtins()));

    assert_eq!(
        session
            .exclude(FUNCTION_ECHO, Value::Int(5))
            .expect("exclude dispatch"),
        Value::Null
    );
    session.clear(FUNCTION_ECHO).expect("clear dispatch");

    assert_eq!(
        session
            .evaluate(FUNCTION_ECHO, Value::Int(5))
            .expect("echo still evaluates"),
        Value::text("py 1:5")
    );
}

#[test]
fn one_session_serves_both_builtins_independently() {
    let mut session = EvalSession::new(Arc::new(FunctionRegistry::with_builtins()));

    session
        .evaluate(FUNCTION_SUM, Value::Int(5))
        .expect("sum add");
    let echoed = session
        .evaluate(FUNCTION_ECHO, Value::Int(5))
        .expect("echo dispatch");
    assert_eq!(echoed, Value::text("py 1:5"));

    assert_eq!(
        session.evaluate(FUNCTION_SUM, Value::Int(1)).expect("sum add"),
        Value::Int(6)
    );
    assert_eq!(session.active_function_names(), vec!["echo", "sum"]);
}

#[test]
fn custom_registrations_join_builtin_dispatch() {
    let mut registry = FunctionRegistry::with_builtins();
    registry
        .register_scalar("echo_twice", || {
            Box::new(scriptlet_core::Echo::new())
        })
        .expect("custom registration");

    let mut session = EvalSession::new(Arc::new(registry));
    let result = session
        .evaluate("echo_twice", Value::Int(9))
        .expect("custom dispatch");
    assert_eq!(result, Value::text("py 1:9"));
}
