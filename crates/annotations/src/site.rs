//! Annotation sites and the injection-point classifier
//!
//! The host declaration syntax (or the legacy [`decorate`](crate::decorate())
//! adapter) translates every annotation application into an
//! [`AnnotationSite`]. Whether the site is the constructor declaration or an
//! instance-level declaration is carried explicitly by [`DeclarationTarget`].
//! [`classify`] then decides, by pattern matching alone, which injection point
//! the site refers to.

use crate::class::ClassId;
use crate::errors::{AnnotationError, InvalidOperation};
use crate::metadata::Identifier;

/// The declaration an annotation is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationTarget {
    /// The class constructor itself
    Constructor(ClassId),
    /// An instance-level declaration of the class (its prototype)
    Instance(ClassId),
}

impl DeclarationTarget {
    /// The class this declaration belongs to
    pub fn class(&self) -> ClassId {
        match self {
            DeclarationTarget::Constructor(class) | DeclarationTarget::Instance(class) => *class,
        }
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self, DeclarationTarget::Constructor(_))
    }
}

/// Shape of an annotation application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteKind {
    /// Applied to a parameter; `method` is set when the parameter belongs to a
    /// named member rather than the constructor
    Parameter {
        index: usize,
        method: Option<Identifier>,
    },
    /// Applied to a named field
    Property(Identifier),
    /// Applied to the declaration as a whole
    Class,
}

/// Where an annotation is being applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSite {
    pub target: DeclarationTarget,
    pub kind: SiteKind,
}

impl AnnotationSite {
    pub fn new(target: DeclarationTarget, kind: SiteKind) -> Self {
        Self { target, kind }
    }

    /// Constructor argument at `index`
    pub fn constructor_parameter(class: ClassId, index: usize) -> Self {
        Self::new(
            DeclarationTarget::Constructor(class),
            SiteKind::Parameter {
                index,
                method: None,
            },
        )
    }

    /// Argument at `index` of the instance method `method`
    pub fn method_parameter(class: ClassId, method: impl Into<Identifier>, index: usize) -> Self {
        Self::new(
            DeclarationTarget::Instance(class),
            SiteKind::Parameter {
                index,
                method: Some(method.into()),
            },
        )
    }

    /// Instance field `name`
    pub fn property(class: ClassId, name: impl Into<Identifier>) -> Self {
        Self::new(DeclarationTarget::Instance(class), SiteKind::Property(name.into()))
    }

    /// The class declaration itself
    pub fn class(class: ClassId) -> Self {
        Self::new(DeclarationTarget::Constructor(class), SiteKind::Class)
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self.kind, SiteKind::Parameter { .. })
    }
}

/// Result of classifying an annotation site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Parameter { class: ClassId, index: usize },
    Property { class: ClassId, name: Identifier },
    Invalid(InvalidOperation),
}

impl Classification {
    /// Convert to a result, turning `Invalid` into an error
    pub fn into_result(self) -> Result<Self, AnnotationError> {
        match self {
            Classification::Invalid(reason) => Err(AnnotationError::invalid_operation(reason)),
            valid => Ok(valid),
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Classification::Invalid(_))
    }
}

/// Decide which injection point a site refers to
pub fn classify(site: &AnnotationSite) -> Classification {
    match (&site.target, &site.kind) {
        (DeclarationTarget::Constructor(class), SiteKind::Parameter { index, method: None }) => {
            Classification::Parameter {
                class: *class,
                index: *index,
            }
        }
        (_, SiteKind::Parameter { .. }) => Classification::Invalid(InvalidOperation::MethodParameter),
        (DeclarationTarget::Constructor(_), _) => {
            Classification::Invalid(InvalidOperation::StaticMember)
        }
        (DeclarationTarget::Instance(class), SiteKind::Property(name)) => Classification::Property {
            class: *class,
            name: name.clone(),
        },
        (DeclarationTarget::Instance(_), SiteKind::Class) => {
            Classification::Invalid(InvalidOperation::MissingPropertyName)
        }
    }
}
