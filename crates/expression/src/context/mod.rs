//! Expression context
//!
//! Binds `#variable` names to a declared type and, optionally, to the JSON
//! data that reads resolve against.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A bound variable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variable {
    /// Declared type name, used for completion and validation
    pub type_name: Option<String>,
    /// Data used by reads
    pub value: Option<Arc<Value>>,
}

/// Variables visible to expressions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionContext {
    variables: BTreeMap<String, Variable>,
}

impl ExpressionContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for constructing contexts
    pub fn builder() -> ExpressionContextBuilder {
        ExpressionContextBuilder::new()
    }

    /// Declare `#name` with a type
    pub fn declare(&mut self, name: impl Into<String>, type_name: impl Into<String>) {
        self.variables.entry(name.into()).or_default().type_name = Some(type_name.into());
    }

    /// Bind data to `#name`
    pub fn set_value(&mut self, name: impl Into<String>, value: Value) {
        self.variables.entry(name.into()).or_default().value = Some(Arc::new(value));
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Declared type of `#name`
    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.variables.get(name)?.type_name.as_deref()
    }

    /// Data bound to `#name`
    pub fn value_of(&self, name: &str) -> Option<Arc<Value>> {
        self.variables.get(name)?.value.clone()
    }

    /// Whether `#name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Variable names, sorted
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Variables and their declared types, sorted by name
    pub fn variables(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(name, var)| (name.as_str(), var))
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether no variables are bound
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Builder for creating expression contexts
#[derive(Debug, Clone, Default)]
pub struct ExpressionContextBuilder {
    context: ExpressionContext,
}

impl ExpressionContextBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a typed variable
    pub fn variable(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.context.declare(name, type_name);
        self
    }

    /// Bind data to a variable
    pub fn value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.context.set_value(name, value);
        self
    }

    /// Build the context
    pub fn build(self) -> ExpressionContext {
        self.context
    }
}
