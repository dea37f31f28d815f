//! Named argument sets.
//!
//! [`Args`] is the one shape shared by registration-time pinned kwargs,
//! call-site overrides, and the resolved set handed to constructors and
//! factories. Values are type-erased; every stored value is an `Arc<V>`
//! behind the erased pointer, so plain values and trait-object views read
//! back through the same accessors.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::ResolutionError;
use crate::types::ErasedArg;

#[derive(Clone, Default)]
pub struct Args {
    values: HashMap<String, ErasedArg>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of an owned value.
    pub fn with<V: Send + Sync + 'static>(mut self, name: impl Into<String>, value: V) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style insert of a shared value; accepts trait objects.
    pub fn with_arc<V: ?Sized + Send + Sync + 'static>(
        mut self,
        name: impl Into<String>,
        value: Arc<V>,
    ) -> Self {
        self.values.insert(name.into(), Arc::new(value) as ErasedArg);
        self
    }

    pub fn set<V: Send + Sync + 'static>(&mut self, name: impl Into<String>, value: V) {
        self.values
            .insert(name.into(), Arc::new(Arc::new(value)) as ErasedArg);
    }

    /// Clone a value out by name.
    pub fn get<V: Clone + Send + Sync + 'static>(&self, name: &str) -> Result<V, ResolutionError> {
        let shared: Arc<V> = self.get_arc(name)?;
        Ok((*shared).clone())
    }

    /// Shared view of a value by name; `V` may be a trait object.
    pub fn get_arc<V: ?Sized + Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> Result<Arc<V>, ResolutionError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| ResolutionError::MissingArgument {
                name: name.to_string(),
                expected: std::any::type_name::<V>(),
            })?;

        value
            .downcast_ref::<Arc<V>>()
            .cloned()
            .ok_or_else(|| ResolutionError::ArgumentType {
                name: name.to_string(),
                expected: std::any::type_name::<V>(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert_erased(&mut self, name: &str, value: ErasedArg) {
        self.values.insert(name.to_string(), value);
    }

    pub(crate) fn get_erased(&self, name: &str) -> Option<&ErasedArg> {
        self.values.get(name)
    }

    /// Later entries win, matching dict-update semantics for repeated pins.
    pub(crate) fn merge(&mut self, other: Args) {
        self.values.extend(other.values);
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}
