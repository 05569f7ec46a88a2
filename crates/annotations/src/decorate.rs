//! Applying annotations without attribute syntax
//!
//! ```rust
//! use elif_annotations::{decorate, injectable, named, DeclarationTarget, MetadataRegistry, NoParamTypes};
//!
//! let registry = MetadataRegistry::new();
//! let foo = registry.declare_class("FooBar").unwrap();
//! let target = DeclarationTarget::Constructor(foo);
//!
//! decorate(&injectable(NoParamTypes), &registry, target, None).unwrap();
//! decorate(&named("foo"), &registry, target, Some(0usize.into())).unwrap();
//! ```

use crate::annotation::Annotation;
use crate::errors::AnnotationError;
use crate::metadata::{Identifier, Symbol};
use crate::registry::MetadataRegistry;
use crate::site::{AnnotationSite, DeclarationTarget, SiteKind};

/// Member of the target an annotation is applied to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoratePoint {
    /// Argument position
    Parameter(usize),
    /// Field name
    Property(Identifier),
}

impl From<usize> for DecoratePoint {
    fn from(index: usize) -> Self {
        DecoratePoint::Parameter(index)
    }
}

impl From<&str> for DecoratePoint {
    fn from(name: &str) -> Self {
        DecoratePoint::Property(Identifier::from(name))
    }
}

impl From<String> for DecoratePoint {
    fn from(name: String) -> Self {
        DecoratePoint::Property(Identifier::from(name))
    }
}

impl From<Symbol> for DecoratePoint {
    fn from(symbol: Symbol) -> Self {
        DecoratePoint::Property(Identifier::from(symbol))
    }
}

impl From<Identifier> for DecoratePoint {
    fn from(identifier: Identifier) -> Self {
        DecoratePoint::Property(identifier)
    }
}

/// Site an annotation sees when applied through [`decorate`]
pub fn decorate_site(target: DeclarationTarget, point: Option<DecoratePoint>) -> AnnotationSite {
    let kind = match point {
        Some(DecoratePoint::Parameter(index)) => SiteKind::Parameter {
            index,
            method: None,
        },
        Some(DecoratePoint::Property(name)) => SiteKind::Property(name),
        None => SiteKind::Class,
    };
    AnnotationSite::new(target, kind)
}

/// Apply `annotation` to `target` as if it had been written on it
///
/// A parameter point emulates a constructor argument annotation, a property
/// point emulates a field annotation and no point emulates a class
/// annotation. Validation is left entirely to the annotation.
pub fn decorate<A>(
    annotation: &A,
    registry: &MetadataRegistry,
    target: DeclarationTarget,
    point: Option<DecoratePoint>,
) -> Result<(), AnnotationError>
where
    A: Annotation + ?Sized,
{
    annotation.apply(registry, &decorate_site(target, point))
}

/// Apply a stack of annotations to one point
///
/// Annotations run bottom-up, the last one listed first, the way stacked
/// attributes on a declaration are evaluated. The first failure stops the
/// stack; annotations already applied stay applied.
pub fn decorate_all(
    annotations: &[&dyn Annotation],
    registry: &MetadataRegistry,
    target: DeclarationTarget,
    point: Option<DecoratePoint>,
) -> Result<(), AnnotationError> {
    let site = decorate_site(target, point);
    annotations
        .iter()
        .rev()
        .try_for_each(|annotation| annotation.apply(registry, &site))
}
