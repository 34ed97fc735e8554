//! In-memory type registry.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::descriptor::{Introspect, TypeDescriptor};
use crate::error::IntrospectError;
use crate::member::MemberDescriptor;
use crate::registration;

/// Wrappers that expressions see through when navigating member types.
const TRANSPARENT_WRAPPERS: &[&str] = &["Option", "Box", "Arc", "Rc", "Cow"];

/// Registry mapping type names to [`TypeDescriptor`]s.
///
/// Built once at startup, then only read. Share it behind an `Arc`, or use
/// [`TypeRegistry::global`] for the process-wide registry of every derived
/// type.
///
/// ```
/// use nebula_introspect::{MemberDescriptor, MemberKind, TypeDescriptor, TypeRegistry};
///
/// let mut registry = TypeRegistry::new();
/// registry
///     .insert(
///         TypeDescriptor::new("Point")
///             .with_member(MemberDescriptor::new("x", MemberKind::Field, "i32").hidden())
///             .with_member(MemberDescriptor::new("y", MemberKind::Field, "i32")),
///     )
///     .unwrap();
///
/// assert!(registry.is_hidden("Point", "x"));
/// assert!(!registry.is_hidden("Point", "y"));
/// ```
#[derive(Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every type and method table registered at link
    /// time by the derive and attribute macros.
    ///
    /// Conflicting declarations are skipped with a warning.
    pub fn discover() -> Self {
        let mut registry = Self::new();

        for registration in registration::types() {
            if let Err(error) = registry.insert(registration.descriptor()) {
                tracing::warn!(%error, type_name = registration.type_name, "skipping type registration");
            }
        }

        for table in registration::method_tables() {
            let mut descriptor = TypeDescriptor::new(table.owner);
            descriptor.members.extend(table.methods.iter().cloned());
            if let Err(error) = registry.insert(descriptor) {
                tracing::warn!(%error, owner = table.owner, "skipping method registration");
            }
        }

        tracing::debug!(types = registry.len(), "discovered introspectable types");
        registry
    }

    /// Process-wide registry, discovered on first use.
    pub fn global() -> &'static TypeRegistry {
        static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::discover)
    }

    /// Register `T` with its fields and registered methods.
    pub fn register<T: Introspect>(&mut self) -> Result<(), IntrospectError> {
        self.insert(T::descriptor())
    }

    /// Insert a descriptor, merging it into an existing one of the same name.
    ///
    /// A new type goes through the same merge, so duplicate declarations
    /// within one descriptor are folded or rejected exactly as they would be
    /// across two inserts. On error the registry is left unchanged.
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> Result<(), IntrospectError> {
        match self.types.get_mut(descriptor.name()) {
            Some(existing) => {
                tracing::trace!(type_name = descriptor.name(), "merging type descriptor");
                let mut merged = existing.clone();
                merged.merge(descriptor)?;
                *existing = merged;
                Ok(())
            }
            None => {
                tracing::trace!(type_name = descriptor.name(), "registering type descriptor");
                let mut fresh = TypeDescriptor {
                    name: descriptor.name.clone(),
                    description: None,
                    members: Vec::new(),
                };
                fresh.merge(descriptor)?;
                self.types.insert(fresh.name().to_string(), fresh);
                Ok(())
            }
        }
    }

    /// Load a registry from the JSON produced by [`TypeRegistry::to_json`].
    pub fn from_json(json: &str) -> Result<Self, IntrospectError> {
        let definitions: Vec<TypeDescriptor> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// Build a registry from descriptors.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Result<Self, IntrospectError> {
        let mut registry = Self::new();
        for descriptor in definitions {
            registry.insert(descriptor)?;
        }
        Ok(registry)
    }

    /// Serialize [`TypeRegistry::definitions`] as pretty JSON.
    pub fn to_json(&self) -> Result<String, IntrospectError> {
        Ok(serde_json::to_string_pretty(&self.definitions())?)
    }

    /// Look up a type by its exact name.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Look up a member type, seeing through `Option<..>`, `Box<..>`,
    /// `Arc<..>`, `Rc<..>`, `Cow<..>` and references.
    pub fn resolve(&self, type_name: &str) -> Option<&TypeDescriptor> {
        let mut current = type_name.trim();
        loop {
            if let Some(descriptor) = self.types.get(current) {
                return Some(descriptor);
            }
            current = unwrap_transparent(current)?;
        }
    }

    /// Whether a type is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Whether `member` of `type_name` is hidden. Unknown types and members
    /// are not hidden.
    pub fn is_hidden(&self, type_name: &str, member: &str) -> bool {
        self.get(type_name).is_some_and(|t| t.is_hidden(member))
    }

    /// Members of `type_name` that expressions may see.
    pub fn visible_members<'a>(
        &'a self,
        type_name: &str,
    ) -> impl Iterator<Item = &'a MemberDescriptor> + use<'a> {
        self.get(type_name)
            .into_iter()
            .flat_map(|descriptor| descriptor.visible_members())
    }

    /// Every type with hidden members removed, sorted by name.
    ///
    /// This is the payload handed to editors for completion.
    pub fn types_information(&self) -> Vec<TypeDescriptor> {
        self.types.values().map(TypeDescriptor::visible).collect()
    }

    /// Every type including hidden members, sorted by name.
    pub fn definitions(&self) -> Vec<TypeDescriptor> {
        self.types.values().cloned().collect()
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("count", &self.types.len())
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn unwrap_transparent(type_name: &str) -> Option<&str> {
    if let Some(inner) = type_name.strip_prefix('&') {
        return Some(inner.trim_start_matches("mut ").trim());
    }
    let (wrapper, rest) = type_name.split_once('<')?;
    if !TRANSPARENT_WRAPPERS.contains(&wrapper.trim()) {
        return None;
    }
    Some(rest.strip_suffix('>')?.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::MemberKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn registry() -> TypeRegistry {
        let point = TypeDescriptor::new("Point")
            .with_member(MemberDescriptor::new("x", MemberKind::Field, "i32"))
            .with_member(MemberDescriptor::new("y", MemberKind::Field, "i32"))
            .with_member(MemberDescriptor::new("x", MemberKind::Method, "i32").hidden());
        let shape = TypeDescriptor::new("Shape")
            .with_member(MemberDescriptor::new("origin", MemberKind::Field, "Option<Point>"));

        TypeRegistry::from_definitions([point, shape]).unwrap()
    }

    #[test]
    fn is_hidden_reflects_marker() {
        let registry = registry();

        assert!(registry.is_hidden("Point", "x"));
        assert!(!registry.is_hidden("Point", "y"));
        assert!(!registry.is_hidden("Point", "missing"));
        assert!(!registry.is_hidden("Missing", "x"));
    }

    #[test]
    fn visible_members_exclude_hidden_names() {
        let registry = registry();
        let names: Vec<&str> = registry
            .visible_members("Point")
            .map(MemberDescriptor::name)
            .collect();

        assert_eq!(names, vec!["y"]);
        assert_eq!(registry.visible_members("Missing").count(), 0);
    }

    #[rstest]
    #[case("Point", Some("Point"))]
    #[case("Option<Point>", Some("Point"))]
    #[case("Arc<Box<Point>>", Some("Point"))]
    #[case("&Point", Some("Point"))]
    #[case("Vec<Point>", None)]
    #[case("i32", None)]
    fn resolves_through_wrappers(#[case] type_name: &str, #[case] expected: Option<&str>) {
        let registry = registry();
        assert_eq!(registry.resolve(type_name).map(TypeDescriptor::name), expected);
    }

    #[test]
    fn types_information_drops_hidden_members() {
        let registry = registry();
        let info = registry.types_information();

        assert_eq!(info.len(), 2);
        assert_eq!(info[0].name(), "Point");
        assert_eq!(info[0].members.len(), 1);

        let full = registry.definitions();
        assert_eq!(full[0].members.len(), 3);
    }

    #[test]
    fn json_round_trip_keeps_marker() {
        let registry = registry();
        let json = registry.to_json().unwrap();
        let loaded = TypeRegistry::from_json(&json).unwrap();

        assert!(loaded.is_hidden("Point", "x"));
        assert_eq!(loaded.definitions(), registry.definitions());
    }

    #[test]
    fn insert_merges_same_type() {
        let mut registry = registry();
        registry
            .insert(
                TypeDescriptor::new("Point")
                    .with_member(MemberDescriptor::new("y", MemberKind::Field, "i32").hidden()),
            )
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.is_hidden("Point", "y"));
    }

    #[test]
    fn conflicting_duplicate_in_one_descriptor_is_rejected() {
        let json = r#"[{ "name": "Point", "members": [
            { "name": "x", "kind": "field", "type_name": "i32" },
            { "name": "x", "kind": "field", "type_name": "String" }
        ] }]"#;

        let err = TypeRegistry::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            IntrospectError::ConflictingMember { ref member, ref existing, ref incoming, .. }
                if member == "x" && existing == "i32" && incoming == "String"
        ));
    }

    #[test]
    fn identical_duplicate_in_one_descriptor_is_folded() {
        let point = TypeDescriptor::new("Point")
            .with_description("A point")
            .with_member(MemberDescriptor::new("x", MemberKind::Field, "i32"))
            .with_member(MemberDescriptor::new("x", MemberKind::Field, "i32").hidden());

        let mut registry = TypeRegistry::from_definitions([point]).unwrap();
        let stored = registry.get("Point").unwrap().clone();
        assert_eq!(stored.members.len(), 1);
        assert_eq!(stored.description.as_deref(), Some("A point"));
        assert!(registry.is_hidden("Point", "x"));

        registry.insert(stored.clone()).unwrap();
        assert_eq!(registry.get("Point"), Some(&stored));
    }

    #[test]
    fn failed_merge_leaves_type_unchanged() {
        let mut registry = registry();
        let before = registry.get("Point").unwrap().clone();

        let err = registry.insert(
            TypeDescriptor::new("Point")
                .with_member(MemberDescriptor::new("z", MemberKind::Field, "i32"))
                .with_member(MemberDescriptor::new("y", MemberKind::Field, "String")),
        );

        assert!(err.is_err());
        assert_eq!(registry.get("Point"), Some(&before));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            TypeRegistry::from_json("{ not json"),
            Err(IntrospectError::Json(_))
        ));
    }
}
