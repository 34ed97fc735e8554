//! Reference validation

use std::sync::Arc;

use nebula_introspect::TypeRegistry;

use crate::context::ExpressionContext;
use crate::error::{ExpressionError, ExpressionResult};
use crate::reference::{Reference, references};
use crate::resolve;

/// Every problem found in one expression, in input order
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} invalid reference(s)", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<ExpressionError>,
}

impl ValidationErrors {
    /// The individual errors
    pub fn errors(&self) -> &[ExpressionError] {
        &self.errors
    }

    /// Number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether there are no errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ExpressionError;
    type IntoIter = std::vec::IntoIter<ExpressionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl From<ExpressionError> for ValidationErrors {
    fn from(error: ExpressionError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// Checks every reference of an expression against the registry
#[derive(Debug, Clone)]
pub struct ExpressionValidator {
    registry: Arc<TypeRegistry>,
    context: ExpressionContext,
}

impl ExpressionValidator {
    /// Create a validator
    pub fn new(registry: Arc<TypeRegistry>, context: ExpressionContext) -> Self {
        Self { registry, context }
    }

    /// Validate all references in `input`.
    ///
    /// Members of types that are not registered are not checked.
    pub fn validate(&self, input: &str) -> Result<(), ValidationErrors> {
        let errors: Vec<ExpressionError> = references(input)?
            .iter()
            .filter_map(|reference| self.check(reference).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = errors.len(), "expression failed validation");
            Err(ValidationErrors { errors })
        }
    }

    /// Validate a single reference chain
    pub fn check(&self, reference: &Reference) -> ExpressionResult<()> {
        if !self.context.contains(&reference.variable) {
            return Err(ExpressionError::UnknownVariable {
                name: reference.variable.clone(),
                span: reference.variable_span,
            });
        }
        let Some(root_type) = self.context.type_of(&reference.variable) else {
            return Ok(());
        };
        resolve::walk(&self.registry, root_type, &reference.segments).map(|_| ())
    }
}
