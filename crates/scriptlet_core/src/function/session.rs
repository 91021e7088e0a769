//! Host evaluation session owning instantiated function state.
//!
//! # Responsibility
//! - Cache one live handle per function name for the session lifetime.
//! - Route host `evaluate`/`exclude`/`clear` calls to those handles.
//!
//! # Invariants
//! - Aggregate state persists across calls until `reset`.
//! - A session is owned by one execution context; callers that allow
//!   concurrent host calls must serialize access through a single lock.

use crate::function::registry::{FunctionHandle, FunctionRegistry, RegistryResult};
use crate::model::value::Value;
use log::info;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// Stable identifier for one host session.
pub type SessionId = Uuid;

/// One host session over a shared function registry.
pub struct EvalSession {
    id: SessionId,
    registry: Arc<FunctionRegistry>,
    active: BTreeMap<String, FunctionHandle>,
}

impl EvalSession {
    /// Opens a session with a fresh identity and no instantiated functions.
    pub fn new(registry: Arc<FunctionRegistry>) -> Self {
        let id = Uuid::new_v4();
        info!("event=session_open module=session status=ok id={id}");
        Self {
            id,
            registry,
            active: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Sorted names of functions instantiated so far.
    pub fn active_function_names(&self) -> Vec<String> {
        self.active.keys().cloned().collect()
    }

    /// Evaluates one value through the named function.
    ///
    /// # Errors
    /// - Returns [`crate::RegistryError::FunctionNotFound`] for unknown names.
    pub fn evaluate(&mut self, name: &str, value: Value) -> RegistryResult<Value> {
        Ok(self.handle_mut(name)?.evaluate(value))
    }

    /// Excludes one value through the named function.
    ///
    /// Scalar functions return null unchanged; unknown names error.
    pub fn exclude(&mut self, name: &str, value: Value) -> RegistryResult<Value> {
        Ok(self.handle_mut(name)?.exclude(value))
    }

    /// Clears the named function's state; a no-op for scalar functions.
    pub fn clear(&mut self, name: &str) -> RegistryResult<()> {
        self.handle_mut(name)?.clear();
        Ok(())
    }

    /// Drops all instantiated state and assigns a fresh session identity.
    pub fn reset(&mut self) {
        self.active.clear();
        self.id = Uuid::new_v4();
        info!("event=session_reset module=session status=ok id={}", self.id);
    }

    fn handle_mut(&mut self, name: &str) -> RegistryResult<&mut FunctionHandle> {
        match self.active.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(slot) => {
                let handle = self.registry.instantiate(name)?;
                Ok(slot.insert(handle))
            }
        }
    }
}
