use std::any::TypeId;
use uuid::Uuid;

/// Opaque handle identifying a class declaration
///
/// Handles are issued by [`MetadataRegistry`](crate::MetadataRegistry) and
/// stay valid for the lifetime of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(Uuid);

impl ClassId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry-side record of a declared class
#[derive(Debug, Clone)]
pub struct ClassDeclaration {
    pub id: ClassId,
    pub name: String,
    /// Rust type backing the declaration, when declared through `class_of`
    pub type_id: Option<TypeId>,
}

impl ClassDeclaration {
    pub(crate) fn new(name: impl Into<String>, type_id: Option<TypeId>) -> Self {
        Self {
            id: ClassId::new(),
            name: name.into(),
            type_id,
        }
    }
}
