//! Member resolution against the type registry
//!
//! Shared by completion, validation and data reads: every step checks the
//! hidden marker before anything else.

use nebula_introspect::{MemberDescriptor, MemberKind, TypeRegistry};

use crate::error::{ExpressionError, ExpressionResult};
use crate::reference::Segment;

/// Outcome of resolving one segment
#[derive(Debug, Clone, Copy)]
pub(crate) enum Step<'r> {
    /// The member the segment refers to
    Member(&'r MemberDescriptor),
    /// The owner type is not registered; nothing further can be checked
    Opaque,
}

/// Resolve `segment` on `owner`.
pub(crate) fn step<'r>(
    registry: &'r TypeRegistry,
    owner: &str,
    segment: &Segment,
) -> ExpressionResult<Step<'r>> {
    let Some(descriptor) = registry.resolve(owner) else {
        tracing::trace!(owner, member = %segment.name, "owner type not registered");
        return Ok(Step::Opaque);
    };
    let type_name = descriptor.name();
    let name = segment.name.as_str();

    if descriptor.is_hidden(name) {
        tracing::debug!(type_name, member = name, "refusing hidden member");
        return Err(ExpressionError::HiddenMember {
            type_name: type_name.to_string(),
            member: name.to_string(),
            span: segment.span,
        });
    }

    let unknown = || ExpressionError::UnknownMember {
        type_name: type_name.to_string(),
        member: name.to_string(),
        span: segment.span,
    };

    match segment.call {
        Some(found) => {
            let Some(method) = descriptor.member(name, MemberKind::Method) else {
                return Err(if descriptor.contains(name) {
                    ExpressionError::NotCallable {
                        type_name: type_name.to_string(),
                        member: name.to_string(),
                        span: segment.span,
                    }
                } else {
                    unknown()
                });
            };
            if method.parameters.len() != found {
                return Err(ExpressionError::ArgumentCount {
                    type_name: type_name.to_string(),
                    member: name.to_string(),
                    expected: method.parameters.len(),
                    found,
                    span: segment.span,
                });
            }
            Ok(Step::Member(method))
        }
        None => {
            if let Some(field) = descriptor.member(name, MemberKind::Field) {
                return Ok(Step::Member(field));
            }
            match descriptor.member(name, MemberKind::Method) {
                Some(method) if method.is_readable_as_property() => Ok(Step::Member(method)),
                Some(method) => Err(ExpressionError::MissingCall {
                    type_name: type_name.to_string(),
                    member: name.to_string(),
                    expected: method.parameters.len(),
                    span: segment.span,
                }),
                None => Err(unknown()),
            }
        }
    }
}

/// Resolve `segments` in order starting from `root_type`, returning the type
/// reached, or `None` once an unregistered type is crossed.
pub(crate) fn walk<'s>(
    registry: &TypeRegistry,
    root_type: &str,
    segments: impl IntoIterator<Item = &'s Segment>,
) -> ExpressionResult<Option<String>> {
    let mut current = root_type.to_string();
    for segment in segments {
        match step(registry, &current, segment)? {
            Step::Member(member) => current = member.type_name().to_string(),
            Step::Opaque => return Ok(None),
        }
    }
    Ok(Some(current))
}
