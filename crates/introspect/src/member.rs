//! Member descriptors
//!
//! A [`MemberDescriptor`] is the run-time record of one field or accessor
//! method, including whether it carries the hidden marker. Descriptors are
//! const-constructible so that generated code can keep them in statics.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Declaration kind of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    /// A struct field.
    Field,
    /// A method taking `&self`.
    Method,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.write_str("field"),
            Self::Method => f.write_str("method"),
        }
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name.
    pub name: Cow<'static, str>,
    /// Rendered parameter type.
    pub type_name: Cow<'static, str>,
}

impl ParameterDescriptor {
    /// Create a parameter from static strings.
    pub const fn new(name: &'static str, type_name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            type_name: Cow::Borrowed(type_name),
        }
    }
}

/// Run-time description of a field or accessor method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    /// Member name as seen by expressions.
    pub name: Cow<'static, str>,
    /// Field or method.
    pub kind: MemberKind,
    /// Field type, or return type for methods.
    pub type_name: Cow<'static, str>,
    /// Human-readable description, usually taken from doc comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Cow<'static, str>>,
    /// Method parameters; always empty for fields.
    #[serde(default, skip_serializing_if = "<[ParameterDescriptor]>::is_empty")]
    pub parameters: Cow<'static, [ParameterDescriptor]>,
    /// Whether the member carries the hidden marker.
    #[serde(default)]
    pub hidden: bool,
}

impl MemberDescriptor {
    /// Describe a field.
    pub const fn field(
        name: &'static str,
        type_name: &'static str,
        description: Option<&'static str>,
        hidden: bool,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: MemberKind::Field,
            type_name: Cow::Borrowed(type_name),
            description: borrowed(description),
            parameters: Cow::Borrowed(&[]),
            hidden,
        }
    }

    /// Describe a method; `return_type` becomes the member type.
    pub const fn method(
        name: &'static str,
        return_type: &'static str,
        description: Option<&'static str>,
        parameters: &'static [ParameterDescriptor],
        hidden: bool,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: MemberKind::Method,
            type_name: Cow::Borrowed(return_type),
            description: borrowed(description),
            parameters: Cow::Borrowed(parameters),
            hidden,
        }
    }

    /// Create an owned descriptor, e.g. for types assembled at run time.
    pub fn new(name: impl Into<String>, kind: MemberKind, type_name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            kind,
            type_name: Cow::Owned(type_name.into()),
            description: None,
            parameters: Cow::Borrowed(&[]),
            hidden: false,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Cow::Owned(description.into()));
        self
    }

    /// Append a parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.to_mut().push(ParameterDescriptor {
            name: Cow::Owned(name.into()),
            type_name: Cow::Owned(type_name.into()),
        });
        self
    }

    /// Attach the hidden marker. Attaching it again has no further effect.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member type (return type for methods).
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Whether the hidden marker is present on this declaration.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether this member is a method.
    pub fn is_method(&self) -> bool {
        self.kind == MemberKind::Method
    }

    /// Whether expressions can read the member without call parentheses:
    /// fields, and accessors that take no arguments.
    pub fn is_readable_as_property(&self) -> bool {
        match self.kind {
            MemberKind::Field => true,
            MemberKind::Method => self.parameters.is_empty(),
        }
    }
}

const fn borrowed(value: Option<&'static str>) -> Option<Cow<'static, str>> {
    match value {
        Some(value) => Some(Cow::Borrowed(value)),
        None => None,
    }
}
