//! Annotations and the tagging annotation factory
//!
//! ## Usage
//!
//! ```rust
//! use elif_annotations::{named, optional, Annotation, AnnotationSite, MetadataRegistry};
//!
//! let registry = MetadataRegistry::new();
//! let service = registry.declare_class("UserService").unwrap();
//!
//! // constructor argument 0 and field `cache`
//! named("primary")
//!     .apply(&registry, &AnnotationSite::constructor_parameter(service, 0))
//!     .unwrap();
//! optional()
//!     .apply(&registry, &AnnotationSite::property(service, "cache"))
//!     .unwrap();
//!
//! assert!(registry.parameter_tags(service, 0).is_some());
//! ```

use crate::errors::AnnotationError;
use crate::metadata::{keys, Identifier, MetadataBatch, MetadataEntry};
use crate::registry::MetadataRegistry;
use crate::site::{classify, AnnotationSite, Classification};
use crate::store::TagCategory;
use serde_json::Value;

/// Something that can be applied at an annotation site
pub trait Annotation {
    /// Record this annotation's metadata for `site`
    fn apply(&self, registry: &MetadataRegistry, site: &AnnotationSite)
        -> Result<(), AnnotationError>;
}

impl<F> Annotation for F
where
    F: Fn(&MetadataRegistry, &AnnotationSite) -> Result<(), AnnotationError>,
{
    fn apply(&self, registry: &MetadataRegistry, site: &AnnotationSite) -> Result<(), AnnotationError> {
        self(registry, site)
    }
}

/// Annotation attaching a fixed metadata payload to parameters or fields
///
/// The same annotation can be applied to any number of sites; each
/// application validates and merges independently.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedAnnotation {
    metadata: MetadataBatch,
}

impl TaggedAnnotation {
    pub fn metadata(&self) -> &MetadataBatch {
        &self.metadata
    }
}

impl Annotation for TaggedAnnotation {
    fn apply(&self, registry: &MetadataRegistry, site: &AnnotationSite) -> Result<(), AnnotationError> {
        match classify(site) {
            Classification::Parameter { class, index } => registry.tag(
                TagCategory::ParamTags,
                class,
                &Identifier::index(index),
                &self.metadata,
            ),
            Classification::Property { class, name } => {
                registry.tag(TagCategory::PropertyTags, class, &name, &self.metadata)
            }
            Classification::Invalid(reason) => {
                tracing::warn!(?site, %reason, "rejected annotation site");
                Err(AnnotationError::invalid_operation(reason))
            }
        }
    }
}

/// Build an annotation from a metadata payload
pub fn create_tagged(metadata: impl Into<MetadataBatch>) -> TaggedAnnotation {
    TaggedAnnotation {
        metadata: metadata.into(),
    }
}

/// Inject the service bound to `service`
pub fn inject(service: impl Into<Identifier>) -> TaggedAnnotation {
    create_tagged(MetadataEntry::new(
        keys::INJECT_TAG,
        service.into().to_string(),
    ))
}

/// Inject every service bound to `service`
pub fn multi_inject(service: impl Into<Identifier>) -> TaggedAnnotation {
    create_tagged(MetadataEntry::new(
        keys::MULTI_INJECT_TAG,
        service.into().to_string(),
    ))
}

/// Constrain resolution to the binding named `name`
pub fn named(name: impl Into<String>) -> TaggedAnnotation {
    create_tagged(MetadataEntry::new(keys::NAMED_TAG, name.into()))
}

/// Attach an arbitrary tag
pub fn tagged(key: impl Into<Identifier>, value: impl Into<Value>) -> TaggedAnnotation {
    create_tagged(MetadataEntry::new(key, value))
}

/// Allow resolution to produce nothing for this point
pub fn optional() -> TaggedAnnotation {
    create_tagged(MetadataEntry::new(keys::OPTIONAL_TAG, true))
}

/// Leave this parameter to the caller
pub fn unmanaged() -> TaggedAnnotation {
    create_tagged(MetadataEntry::new(keys::UNMANAGED_TAG, true))
}

/// Record the target's own name
pub fn target_name(name: impl Into<String>) -> TaggedAnnotation {
    create_tagged(MetadataEntry::new(keys::NAME_TAG, name.into()))
}
