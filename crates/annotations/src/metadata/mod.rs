//! Metadata value types shared by the store, the tag engine and annotations

pub mod entry;
pub mod identifier;
pub mod keys;
pub mod types;

pub use entry::{MetadataBatch, MetadataEntry};
pub use identifier::{Identifier, Symbol};
pub use types::{ConstructorSignature, TypeDescriptor};
