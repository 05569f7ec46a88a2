use crate::metadata::Identifier;
use thiserror::Error;

/// Why an annotation site cannot carry injection metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOperation {
    /// Parameter tagging on anything other than the constructor
    MethodParameter,
    /// Property or class-level tagging against the constructor declaration
    StaticMember,
    /// Property-style tagging on an instance declaration without a field name
    MissingPropertyName,
    /// Class-level annotation applied to a parameter, field or instance declaration
    ClassLevelOnly,
}

impl InvalidOperation {
    /// Human readable description used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidOperation::MethodParameter => {
                "parameter metadata can only be attached to constructor arguments"
            }
            InvalidOperation::StaticMember => {
                "property metadata cannot be attached to the constructor declaration"
            }
            InvalidOperation::MissingPropertyName => {
                "property metadata requires a field name"
            }
            InvalidOperation::ClassLevelOnly => {
                "class annotations can only be applied to the class declaration"
            }
        }
    }
}

impl std::fmt::Display for InvalidOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors raised while tagging classes or registering injectables
#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Invalid annotation operation: {reason}")]
    InvalidAnnotationOperation { reason: InvalidOperation },

    #[error("Metadata key was used more than once on the same injection point: {key}")]
    DuplicateMetadataKey { key: Identifier },

    #[error("Cannot mark '{class}' as injectable more than once")]
    DuplicateInjectableRegistration { class: String },

    #[error("Lock error on resource: {resource}")]
    LockError { resource: String },
}

impl AnnotationError {
    /// Create an invalid annotation operation error
    pub fn invalid_operation(reason: InvalidOperation) -> Self {
        Self::InvalidAnnotationOperation { reason }
    }

    /// Create a duplicate metadata key error
    pub fn duplicate_key(key: Identifier) -> Self {
        Self::DuplicateMetadataKey { key }
    }

    /// Create a duplicate injectable registration error
    pub fn duplicate_injectable(class: impl Into<String>) -> Self {
        Self::DuplicateInjectableRegistration {
            class: class.into(),
        }
    }

    pub fn lock(resource: impl Into<String>) -> Self {
        Self::LockError {
            resource: resource.into(),
        }
    }

    /// Check if the error came from an unsupported annotation site
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidAnnotationOperation { .. })
    }

    /// Check if the error is a duplicate metadata key
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateMetadataKey { .. })
    }

    /// Check if the error is a repeated injectable registration
    pub fn is_duplicate_injectable(&self) -> bool {
        matches!(self, Self::DuplicateInjectableRegistration { .. })
    }

    /// The offending key, for duplicate key errors
    pub fn duplicate_key_name(&self) -> Option<&Identifier> {
        match self {
            Self::DuplicateMetadataKey { key } => Some(key),
            _ => None,
        }
    }
}
