//! Marking classes as injection targets
//!
//! Registration records the ordered constructor parameter types of a class.
//! The list itself comes from outside this crate, through a
//! [`ParamTypeSource`] or a [`ConstructorSignature`] impl, and is stored
//! without inspection.

use crate::annotation::Annotation;
use crate::class::ClassId;
use crate::errors::{AnnotationError, InvalidOperation};
use crate::metadata::{ConstructorSignature, TypeDescriptor};
use crate::registry::MetadataRegistry;
use crate::site::{AnnotationSite, DeclarationTarget, SiteKind};
use crate::store::MetadataStore;
use std::collections::HashMap;
use std::marker::PhantomData;

/// External supplier of constructor parameter types
pub trait ParamTypeSource {
    /// Parameter types of `class` in argument order, if the source knows it
    fn param_types(&self, class: ClassId) -> Option<Vec<TypeDescriptor>>;
}

impl<F> ParamTypeSource for F
where
    F: Fn(ClassId) -> Option<Vec<TypeDescriptor>>,
{
    fn param_types(&self, class: ClassId) -> Option<Vec<TypeDescriptor>> {
        self(class)
    }
}

impl ParamTypeSource for HashMap<ClassId, Vec<TypeDescriptor>> {
    fn param_types(&self, class: ClassId) -> Option<Vec<TypeDescriptor>> {
        self.get(&class).cloned()
    }
}

/// Source that never knows any parameter types
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParamTypes;

impl ParamTypeSource for NoParamTypes {
    fn param_types(&self, _class: ClassId) -> Option<Vec<TypeDescriptor>> {
        None
    }
}

/// Source backed by a Rust type's [`ConstructorSignature`]
pub struct SignatureSource<T>(PhantomData<fn() -> T>);

impl<T: ConstructorSignature> ParamTypeSource for SignatureSource<T> {
    fn param_types(&self, _class: ClassId) -> Option<Vec<TypeDescriptor>> {
        Some(T::param_types())
    }
}

pub(crate) fn register(
    store: &mut MetadataStore,
    class: ClassId,
    class_name: &str,
    supplied: Option<Vec<TypeDescriptor>>,
) -> Result<ClassId, AnnotationError> {
    if store.has_param_types(class) {
        return Err(AnnotationError::duplicate_injectable(class_name));
    }

    store.insert_param_types(class, supplied.unwrap_or_default());
    Ok(class)
}

/// Class-level annotation that registers the class as injectable
#[derive(Debug, Clone)]
pub struct Injectable<S> {
    source: S,
}

impl<S: ParamTypeSource> Injectable<S> {
    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Build an injectable annotation reading parameter types from `source`
pub fn injectable<S: ParamTypeSource>(source: S) -> Injectable<S> {
    Injectable { source }
}

/// Build an injectable annotation for a type with a known signature
pub fn injectable_signature<T: ConstructorSignature>() -> Injectable<SignatureSource<T>> {
    injectable(SignatureSource(PhantomData))
}

impl<S: ParamTypeSource> Annotation for Injectable<S> {
    fn apply(&self, registry: &MetadataRegistry, site: &AnnotationSite) -> Result<(), AnnotationError> {
        match (&site.target, &site.kind) {
            (DeclarationTarget::Constructor(class), SiteKind::Class) => {
                registry.register_injectable(*class, self.source.param_types(*class))?;
                Ok(())
            }
            _ => Err(AnnotationError::invalid_operation(
                InvalidOperation::ClassLevelOnly,
            )),
        }
    }
}
