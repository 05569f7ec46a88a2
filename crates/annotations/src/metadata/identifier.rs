//! Hashable tokens used as metadata keys and property names
//!
//! An [`Identifier`] is either a plain string name or a [`Symbol`]. Symbols
//! compare by identity: two symbols created with the same description are
//! still different keys.

use serde::{Serialize, Serializer};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// Unique token with a human readable description
#[derive(Clone)]
pub struct Symbol {
    id: Uuid,
    description: Arc<str>,
}

impl Symbol {
    /// Create a new, globally unique symbol
    pub fn new(description: impl AsRef<str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: Arc::from(description.as_ref()),
        }
    }

    /// Get the symbol description
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/// Metadata key or injection point name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Name(String),
    Symbol(Symbol),
}

impl Identifier {
    /// Create a string identifier
    pub fn name(name: impl Into<String>) -> Self {
        Identifier::Name(name.into())
    }

    /// Identifier of a constructor parameter position
    pub fn index(index: usize) -> Self {
        Identifier::Name(index.to_string())
    }

    /// Get the string name, if this is not a symbol
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Identifier::Name(name) => Some(name),
            Identifier::Symbol(_) => None,
        }
    }

    /// Check if this identifier is a symbol
    pub fn is_symbol(&self) -> bool {
        matches!(self, Identifier::Symbol(_))
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identifier::Name(name) => write!(f, "{}", name),
            Identifier::Symbol(symbol) => write!(f, "{}", symbol),
        }
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Name(name.to_string())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Name(name)
    }
}

impl From<Symbol> for Identifier {
    fn from(symbol: Symbol) -> Self {
        Identifier::Symbol(symbol)
    }
}

impl From<&Symbol> for Identifier {
    fn from(symbol: &Symbol) -> Self {
        Identifier::Symbol(symbol.clone())
    }
}
