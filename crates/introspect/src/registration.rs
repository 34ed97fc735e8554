//! Link-time registration records
//!
//! `#[derive(Introspect)]` and `#[introspect_methods]` submit these records
//! through `inventory`, so that [`TypeRegistry::discover`] can find every
//! introspectable type without a hand-written list.
//!
//! [`TypeRegistry::discover`]: crate::TypeRegistry::discover

use crate::descriptor::{Introspect, TypeDescriptor};
use crate::member::MemberDescriptor;

/// Fields of one introspectable type.
#[derive(Debug)]
pub struct TypeRegistration {
    /// Type name seen by expressions.
    pub type_name: &'static str,
    /// Type description.
    pub description: Option<&'static str>,
    /// Field descriptors.
    pub fields: &'static [MemberDescriptor],
}

impl TypeRegistration {
    /// Registration record for `T`.
    pub const fn of<T: Introspect>() -> Self {
        Self {
            type_name: T::TYPE_NAME,
            description: T::DESCRIPTION,
            fields: T::FIELDS,
        }
    }

    pub(crate) fn descriptor(&self) -> TypeDescriptor {
        let mut descriptor = TypeDescriptor::from_static(self.type_name, self.description);
        descriptor.members.extend(self.fields.iter().cloned());
        descriptor
    }
}

/// Methods registered for a type by one `#[introspect_methods]` impl block.
#[derive(Debug)]
pub struct MethodRegistration {
    /// Name of the owning type.
    pub owner: &'static str,
    /// Method descriptors.
    pub methods: &'static [MemberDescriptor],
}

impl MethodRegistration {
    /// Registration record for methods of `owner`.
    pub const fn new(owner: &'static str, methods: &'static [MemberDescriptor]) -> Self {
        Self { owner, methods }
    }
}

inventory::collect!(TypeRegistration);
inventory::collect!(MethodRegistration);

/// Every type registered at link time.
pub fn types() -> impl Iterator<Item = &'static TypeRegistration> {
    inventory::iter::<TypeRegistration>.into_iter()
}

/// Every method table registered at link time.
pub fn method_tables() -> impl Iterator<Item = &'static MethodRegistration> {
    inventory::iter::<MethodRegistration>.into_iter()
}

/// Method tables registered for `owner`, one per impl block.
pub(crate) fn methods_for(owner: &str) -> impl Iterator<Item = &'static [MemberDescriptor]> + '_ {
    method_tables()
        .filter(move |table| table.owner == owner)
        .map(|table| table.methods)
}
