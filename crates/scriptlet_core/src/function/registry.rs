//! In-process snippet function registry and handle dispatch.
//!
//! # Responsibility
//! - Hold named factories for scalar and aggregate snippet functions.
//! - Instantiate per-session function handles on demand.
//!
//! # Invariants
//! - Function names are validated before registration and never duplicated.
//! - Handles own their instance state; two handles never share a total.
//! - Aggregate-only entry points on scalar handles degrade silently to a
//!   null result instead of failing the host call.

use crate::function::echo::Echo;
use crate::function::sum::RunningSum;
use crate::function::{AggregateFunction, FunctionKind, SnippetFunction};
use crate::model::value::Value;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Registered name of the first-party echo transformer.
pub const FUNCTION_ECHO: &str = "echo";
/// Registered name of the first-party running-sum aggregate.
pub const FUNCTION_SUM: &str = "sum";

static FUNCTION_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)*$").expect("valid function name regex")
});

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry lookup/registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidFunctionName(String),
    DuplicateFunctionName(String),
    FunctionNotFound(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFunctionName(value) => write!(f, "function name is invalid: {value}"),
            Self::DuplicateFunctionName(value) => {
                write!(f, "function name already registered: {value}")
            }
            Self::FunctionNotFound(value) => write!(f, "function not found: {value}"),
        }
    }
}

impl Error for RegistryError {}

type ScalarFactory = Box<dyn Fn() -> Box<dyn SnippetFunction> + Send + Sync>;
type AggregateFactory = Box<dyn Fn() -> Box<dyn AggregateFunction> + Send + Sync>;

enum FunctionFactory {
    Scalar(ScalarFactory),
    Aggregate(AggregateFactory),
}

impl FunctionFactory {
    fn kind(&self) -> FunctionKind {
        match self {
            Self::Scalar(_) => FunctionKind::Scalar,
            Self::Aggregate(_) => FunctionKind::Aggregate,
        }
    }
}

/// Named snippet function registry.
#[derive(Default)]
pub struct FunctionRegistry {
    entries: BTreeMap<String, FunctionFactory>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry preloaded with the first-party snippet functions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Registers the first-party `echo` and `sum` functions.
    ///
    /// Registration of the fixed builtin set cannot collide, so this does
    /// not surface a result.
    pub fn register_builtins(&mut self) {
        let _ = self.register_scalar(FUNCTION_ECHO, || Box::new(Echo::new()));
        let _ = self.register_aggregate(FUNCTION_SUM, || Box::new(RunningSum::new()));
        info!(
            "event=builtins_registered module=function status=ok count={}",
            self.entries.len()
        );
    }

    /// Registers one scalar function factory under a validated name.
    pub fn register_scalar(
        &mut self,
        name: &str,
        factory: impl Fn() -> Box<dyn SnippetFunction> + Send + Sync + 'static,
    ) -> RegistryResult<()> {
        let name = self.admit_name(name)?;
        self.entries
            .insert(name, FunctionFactory::Scalar(Box::new(factory)));
        Ok(())
    }

    /// Registers one aggregate function factory under a validated name.
    pub fn register_aggregate(
        &mut self,
        name: &str,
        factory: impl Fn() -> Box<dyn AggregateFunction> + Send + Sync + 'static,
    ) -> RegistryResult<()> {
        let name = self.admit_name(name)?;
        self.entries
            .insert(name, FunctionFactory::Aggregate(Box::new(factory)));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns sorted registered function names.
    pub fn function_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Returns the declared kind of one registered function.
    pub fn kind_of(&self, name: &str) -> Option<FunctionKind> {
        self.entries.get(name).map(FunctionFactory::kind)
    }

    /// Instantiates a fresh handle for one registered function.
    pub fn instantiate(&self, name: &str) -> RegistryResult<FunctionHandle> {
        let factory = self
            .entries
            .get(name)
            .ok_or_else(|| RegistryError::FunctionNotFound(name.to_string()))?;
        let instance = match factory {
            FunctionFactory::Scalar(make) => FunctionInstance::Scalar(make()),
            FunctionFactory::Aggregate(make) => FunctionInstance::Aggregate(make()),
        };
        Ok(FunctionHandle {
            name: name.to_string(),
            instance,
        })
    }

    fn admit_name(&self, name: &str) -> RegistryResult<String> {
        let normalized = name.trim();
        if !FUNCTION_NAME_RE.is_match(normalized) {
            return Err(RegistryError::InvalidFunctionName(name.to_string()));
        }
        if self.entries.contains_key(normalized) {
            return Err(RegistryError::DuplicateFunctionName(normalized.to_string()));
        }
        Ok(normalized.to_string())
    }
}

enum FunctionInstance {
    Scalar(Box<dyn SnippetFunction>),
    Aggregate(Box<dyn AggregateFunction>),
}

/// One instantiated snippet function with session-scoped state.
pub struct FunctionHandle {
    name: String,
    instance: FunctionInstance,
}

impl std::fmt::Debug for FunctionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionHandle")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .finish()
    }
}

impl FunctionHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FunctionKind {
        match &self.instance {
            FunctionInstance::Scalar(_) => FunctionKind::Scalar,
            FunctionInstance::Aggregate(_) => FunctionKind::Aggregate,
        }
    }

    /// Dispatches one per-value evaluation.
    pub fn evaluate(&mut self, value: Value) -> Value {
        match &mut self.instance {
            FunctionInstance::Scalar(function) => function.evaluate(value),
            FunctionInstance::Aggregate(function) => function.evaluate(value),
        }
    }

    /// Dispatches one exclusion; scalar handles return null unchanged.
    pub fn exclude(&mut self, value: Value) -> Value {
        match &mut self.instance {
            FunctionInstance::Aggregate(function) => function.exclude(value),
            FunctionInstance::Scalar(_) => {
                warn!(
                    "event=unsupported_op module=function status=ignored name={} op=exclude",
                    self.name
                );
                Value::Null
            }
        }
    }

    /// Dispatches one reset; scalar handles have no state to reset.
    pub fn clear(&mut self) {
        match &mut self.instance {
            FunctionInstance::Aggregate(function) => function.clear(),
            FunctionInstance::Scalar(_) => {
                warn!(
                    "event=unsupported_op module=function status=ignored name={} op=clear",
                    self.name
                );
            }
        }
    }
}
