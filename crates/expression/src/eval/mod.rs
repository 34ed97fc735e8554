//! Data reads
//!
//! Resolves a reference chain against the JSON bound to its root variable.
//! When the variable has a declared type, each step is checked against the
//! registry first, so hidden members are refused even if the data has them.

use std::sync::Arc;

use nebula_introspect::TypeRegistry;
use serde_json::Value;

use crate::context::ExpressionContext;
use crate::error::{ExpressionError, ExpressionResult};
use crate::reference::{Reference, Segment};
use crate::resolve::{self, Step};
use crate::value;

/// Reads values through reference chains
#[derive(Debug, Clone)]
pub struct Evaluator {
    registry: Arc<TypeRegistry>,
}

impl Evaluator {
    /// Create a new evaluator over the given registry
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    /// Parse `reference` and read the value it points to
    pub fn read(&self, reference: &str, context: &ExpressionContext) -> ExpressionResult<Value> {
        let reference = Reference::parse(reference)?;
        self.read_reference(&reference, context)
    }

    /// Read the value a parsed reference points to
    pub fn read_reference(
        &self,
        reference: &Reference,
        context: &ExpressionContext,
    ) -> ExpressionResult<Value> {
        let variable = context.get(&reference.variable).ok_or_else(|| {
            ExpressionError::UnknownVariable {
                name: reference.variable.clone(),
                span: reference.variable_span,
            }
        })?;
        let root = variable
            .value
            .as_ref()
            .ok_or_else(|| ExpressionError::MissingValue {
                path: format!("#{}", reference.variable),
                span: reference.variable_span,
            })?;

        let mut current_type = variable.type_name.clone();
        let mut current: &Value = root;

        for (index, segment) in reference.segments.iter().enumerate() {
            if segment.is_call() {
                return Err(ExpressionError::MethodInvocation {
                    member: segment.name.clone(),
                    span: segment.span,
                });
            }

            if let Some(owner) = current_type.take() {
                current_type = match resolve::step(&self.registry, &owner, segment)? {
                    Step::Member(member) => Some(member.type_name().to_string()),
                    Step::Opaque => None,
                };
            }

            current = self.access_property(current, segment, || reference.path_to(index))?;
        }

        Ok(current.clone())
    }

    /// Access a property of an object
    fn access_property<'v>(
        &self,
        obj: &'v Value,
        segment: &Segment,
        path: impl FnOnce() -> String,
    ) -> ExpressionResult<&'v Value> {
        value::member(obj, &segment.name).ok_or_else(|| {
            tracing::trace!(
                member = %segment.name,
                found = value::json_kind(obj),
                "no value for member"
            );
            ExpressionError::MissingValue {
                path: path(),
                span: segment.span,
            }
        })
    }
}
