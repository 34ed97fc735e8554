//! Type descriptors and the [`Introspect`] trait

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::IntrospectError;
use crate::member::{MemberDescriptor, MemberKind};
use crate::registration;

/// Types whose members are visible to the expression surface.
///
/// Usually implemented with `#[derive(Introspect)]`; accessor methods are
/// added with `#[introspect_methods]` on an inherent impl block.
pub trait Introspect {
    /// Type name seen by expressions.
    const TYPE_NAME: &'static str;

    /// Type description, usually the doc comment.
    const DESCRIPTION: Option<&'static str> = None;

    /// Field descriptors in declaration order.
    const FIELDS: &'static [MemberDescriptor];

    /// Fields plus every method registered for [`Self::TYPE_NAME`].
    fn descriptor() -> TypeDescriptor {
        let mut descriptor = TypeDescriptor::from_static(Self::TYPE_NAME, Self::DESCRIPTION);
        descriptor.members.extend(Self::FIELDS.iter().cloned());
        for methods in registration::methods_for(Self::TYPE_NAME) {
            descriptor.members.extend(methods.iter().cloned());
        }
        descriptor
    }
}

/// Whether member `name` of `T` carries the hidden marker, on the field or on
/// its accessor. Unknown members are not hidden.
pub fn is_hidden<T: Introspect>(name: &str) -> bool {
    T::FIELDS.iter().any(|m| m.name == name && m.hidden)
        || registration::methods_for(T::TYPE_NAME)
            .flat_map(|methods| methods.iter())
            .any(|m| m.name == name && m.hidden)
}

/// Run-time description of a type: its name and its members.
///
/// A name may appear twice, once as a field and once as its accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type name seen by expressions.
    pub name: Cow<'static, str>,
    /// Type description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Cow<'static, str>>,
    /// Members in declaration order, fields first.
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    /// Create an empty descriptor.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            description: None,
            members: Vec::new(),
        }
    }

    pub(crate) fn from_static(name: &'static str, description: Option<&'static str>) -> Self {
        Self {
            name: Cow::Borrowed(name),
            description: description.map(Cow::Borrowed),
            members: Vec::new(),
        }
    }

    /// Describe `T` through its [`Introspect`] implementation.
    pub fn of<T: Introspect>() -> Self {
        T::descriptor()
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Cow::Owned(description.into()));
        self
    }

    /// Append a member.
    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declarations carrying `name`.
    pub fn members_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a MemberDescriptor> + use<'a, 'n> {
        self.members.iter().filter(move |m| m.name == name)
    }

    /// The declaration of `name` with the given kind.
    pub fn member(&self, name: &str, kind: MemberKind) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name && m.kind == kind)
    }

    /// Whether any declaration of `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.members_named(name).next().is_some()
    }

    /// Whether `name` is hidden: the marker on the field or on its accessor
    /// hides the name as a whole.
    pub fn is_hidden(&self, name: &str) -> bool {
        self.members_named(name).any(MemberDescriptor::is_hidden)
    }

    /// Members whose name is not hidden, in declaration order.
    pub fn visible_members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members.iter().filter(|m| !self.is_hidden(&m.name))
    }

    /// A copy of this descriptor with hidden members removed.
    pub fn visible(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            members: self.visible_members().cloned().collect(),
        }
    }

    /// Merge the members of `other` into `self`.
    ///
    /// A declaration already present with the same name, kind and type is
    /// folded in: the hidden marker of either side is kept. A declaration
    /// with the same name and kind but a different type is a conflict.
    pub fn merge(&mut self, other: TypeDescriptor) -> Result<(), IntrospectError> {
        if self.description.is_none() {
            self.description = other.description;
        }
        for member in other.members {
            self.merge_member(member)?;
        }
        Ok(())
    }

    fn merge_member(&mut self, member: MemberDescriptor) -> Result<(), IntrospectError> {
        let existing = self
            .members
            .iter_mut()
            .find(|m| m.name == member.name && m.kind == member.kind);

        match existing {
            None => {
                self.members.push(member);
                Ok(())
            }
            Some(existing) if existing.type_name == member.type_name => {
                existing.hidden |= member.hidden;
                if existing.description.is_none() {
                    existing.description = member.description;
                }
                Ok(())
            }
            Some(existing) => Err(IntrospectError::ConflictingMember {
                type_name: self.name.to_string(),
                member: member.name.to_string(),
                kind: member.kind,
                existing: existing.type_name.to_string(),
                incoming: member.type_name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point() -> TypeDescriptor {
        TypeDescriptor::new("Point")
            .with_member(MemberDescriptor::new("x", MemberKind::Field, "i32"))
            .with_member(MemberDescriptor::new("y", MemberKind::Field, "i32"))
            .with_member(MemberDescriptor::new("x", MemberKind::Method, "i32").hidden())
    }

    #[test]
    fn accessor_marker_hides_field_of_same_name() {
        let point = point();

        assert!(point.is_hidden("x"));
        assert!(!point.is_hidden("y"));
        assert!(!point.is_hidden("z"));

        let visible: Vec<&str> = point.visible_members().map(MemberDescriptor::name).collect();
        assert_eq!(visible, vec!["y"]);
    }

    #[test]
    fn member_outlives_the_queried_name() {
        let point = point();
        let found = {
            let name = String::from("x");
            point.member(&name, MemberKind::Method)
        };

        assert!(found.is_some_and(MemberDescriptor::is_hidden));
        assert!(point.member("y", MemberKind::Method).is_none());
    }

    #[test]
    fn visible_copy_drops_hidden_members() {
        let visible = point().visible();
        assert_eq!(visible.members.len(), 1);
        assert!(!visible.contains("x"));
    }

    #[test]
    fn merge_is_idempotent_and_keeps_marker() {
        let mut base = TypeDescriptor::new("Point")
            .with_member(MemberDescriptor::new("x", MemberKind::Field, "i32"));
        base.merge(point()).unwrap();
        base.merge(point()).unwrap();

        assert_eq!(base.members.len(), 3);
        assert!(base.is_hidden("x"));
    }

    #[test]
    fn merge_rejects_type_conflicts() {
        let mut base = point();
        let other = TypeDescriptor::new("Point")
            .with_member(MemberDescriptor::new("y", MemberKind::Field, "String"));

        let err = base.merge(other).unwrap_err();
        assert!(matches!(err, IntrospectError::ConflictingMember { ref member, .. } if member == "y"));
    }
}
