use serde::{Serialize, Serializer};
use std::any::TypeId;
use std::borrow::Cow;

/// Opaque description of a constructor parameter type
///
/// Descriptors are produced outside of this crate (by a type source or a
/// [`ConstructorSignature`] impl) and stored as given. Two descriptors are
/// equal only when both the name and the backing `TypeId` (or its absence)
/// match, so a named descriptor never equals one built with [`of`](Self::of).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    type_id: Option<TypeId>,
}

impl TypeDescriptor {
    /// Descriptor for a Rust type
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            name: Cow::Borrowed(std::any::type_name::<T>()),
            type_id: Some(TypeId::of::<T>()),
        }
    }

    /// Descriptor known only by name
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            type_id: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    /// Check if this descriptor refers to `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == Some(TypeId::of::<T>())
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

/// Types that can describe their own constructor parameter list
pub trait ConstructorSignature: 'static {
    /// Parameter types in constructor argument order
    fn param_types() -> Vec<TypeDescriptor>;
}
