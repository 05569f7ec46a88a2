//! Injection-point metadata for the elif.rs dependency injection container
//!
//! Classes are tagged at declaration time: constructor arguments and instance
//! fields receive key/value metadata, and classes are registered as injection
//! targets together with their constructor parameter types. A resolver reads
//! the result back through [`MetadataRegistry::get`] and
//! [`MetadataRegistry::param_types`].

pub mod annotation;
pub mod class;
pub mod config;
pub mod decorate;
pub mod engine;
pub mod errors;
pub mod injectable;
pub mod metadata;
pub mod registry;
pub mod site;
pub mod snapshot;
pub mod store;

pub use annotation::{
    create_tagged, inject, multi_inject, named, optional, tagged, target_name, unmanaged,
    Annotation, TaggedAnnotation,
};
pub use class::{ClassDeclaration, ClassId};
pub use config::{ConfigError, ConfigSource, Environment, RegistryConfig, RegistryConfigTrait};
pub use decorate::{decorate, decorate_all, DecoratePoint};
pub use errors::{AnnotationError, InvalidOperation};
pub use injectable::{injectable, injectable_signature, Injectable, NoParamTypes, ParamTypeSource};
pub use metadata::{
    ConstructorSignature, Identifier, MetadataBatch, MetadataEntry, Symbol, TypeDescriptor,
};
pub use registry::MetadataRegistry;
pub use site::{classify, AnnotationSite, Classification, DeclarationTarget, SiteKind};
pub use snapshot::{ClassMetadata, PointMetadata};
pub use store::{MetadataStore, TagCategory, TagMap};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
