use crate::class::{ClassDeclaration, ClassId};
use crate::config::{RegistryConfig, RegistryConfigTrait};
use crate::engine;
use crate::errors::AnnotationError;
use crate::injectable;
use crate::metadata::{ConstructorSignature, Identifier, MetadataBatch, MetadataEntry, TypeDescriptor};
use crate::snapshot::ClassMetadata;
use crate::store::{MetadataStore, TagCategory, TagMap};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct ClassTable {
    declarations: HashMap<ClassId, ClassDeclaration>,
    by_type: HashMap<TypeId, ClassId>,
}

/// Owner of all injection metadata
///
/// Issues [`ClassId`] handles and holds the per-class tag and parameter type
/// stores. Every write validates completely before it mutates anything and
/// runs under a single write lock, so readers never observe a partially
/// applied batch.
#[derive(Debug)]
pub struct MetadataRegistry {
    store: RwLock<MetadataStore>,
    classes: RwLock<ClassTable>,
    config: RegistryConfig,
}

impl MetadataRegistry {
    /// Create a registry with the default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let capacity = config.initial_class_capacity;
        for (field, source) in config.config_sources() {
            tracing::trace!(field = %field, source = %source, "registry config value");
        }

        Self {
            store: RwLock::new(MetadataStore::with_capacity(capacity)),
            classes: RwLock::new(ClassTable {
                declarations: HashMap::with_capacity(capacity),
                by_type: HashMap::new(),
            }),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // Writes never leave the store half-updated, so reads may go through a
    // poisoned lock. Writes after a panic are refused.
    fn read_store(&self) -> RwLockReadGuard<'_, MetadataStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> Result<RwLockWriteGuard<'_, MetadataStore>, AnnotationError> {
        self.store
            .write()
            .map_err(|_| AnnotationError::lock("metadata_store"))
    }

    fn read_classes(&self) -> RwLockReadGuard<'_, ClassTable> {
        self.classes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_classes(&self) -> Result<RwLockWriteGuard<'_, ClassTable>, AnnotationError> {
        self.classes
            .write()
            .map_err(|_| AnnotationError::lock("class_table"))
    }

    /// Declare a new class and get its handle
    ///
    /// Every call issues a fresh handle, even for a name seen before.
    pub fn declare_class(&self, name: impl Into<String>) -> Result<ClassId, AnnotationError> {
        let declaration = ClassDeclaration::new(name, None);
        let id = declaration.id;

        tracing::debug!(class = %declaration.name, %id, "declared class");
        self.write_classes()?.declarations.insert(id, declaration);
        Ok(id)
    }

    /// Stable handle for the Rust type `T`, declared on first use
    pub fn class_of<T: ?Sized + 'static>(&self) -> Result<ClassId, AnnotationError> {
        let type_id = TypeId::of::<T>();
        if let Some(id) = self.read_classes().by_type.get(&type_id) {
            return Ok(*id);
        }

        let mut classes = self.write_classes()?;
        // Another writer may have declared it between the two locks
        if let Some(id) = classes.by_type.get(&type_id) {
            return Ok(*id);
        }

        let declaration = ClassDeclaration::new(std::any::type_name::<T>(), Some(type_id));
        let id = declaration.id;
        tracing::debug!(class = %declaration.name, %id, "declared class for type");
        classes.by_type.insert(type_id, id);
        classes.declarations.insert(id, declaration);
        Ok(id)
    }

    /// Name recorded when the class was declared
    pub fn class_name(&self, class: ClassId) -> Option<String> {
        self.read_classes()
            .declarations
            .get(&class)
            .map(|declaration| declaration.name.clone())
    }

    pub fn class_declaration(&self, class: ClassId) -> Option<ClassDeclaration> {
        self.read_classes().declarations.get(&class).cloned()
    }

    /// Name for log and error output; falls back to the handle itself
    fn display_name(&self, class: ClassId) -> String {
        self.class_name(class).unwrap_or_else(|| class.to_string())
    }

    /// Merge metadata into one injection point
    ///
    /// Fails with [`AnnotationError::DuplicateMetadataKey`] when the batch
    /// repeats a key or reuses a key already stored at `point`; the store is
    /// unchanged in that case.
    pub fn tag(
        &self,
        category: TagCategory,
        class: ClassId,
        point: &Identifier,
        batch: &MetadataBatch,
    ) -> Result<(), AnnotationError> {
        let result = {
            let mut store = self.write_store()?;
            engine::apply(&mut store, category, class, point, batch)
        };

        match &result {
            Ok(()) if self.config.log_writes => {
                tracing::debug!(
                    category = %category,
                    class = %self.display_name(class),
                    point = %point,
                    entries = batch.len(),
                    "tagged injection point"
                );
            }
            Ok(()) => {}
            Err(error) => {
                tracing::warn!(
                    category = %category,
                    class = %self.display_name(class),
                    point = %point,
                    %error,
                    "rejected metadata"
                );
            }
        }
        result
    }

    /// Mark a class as an injection target
    ///
    /// `supplied` is the ordered constructor parameter type list from the
    /// external type source; `None` stores an empty list. A class can only be
    /// registered once.
    pub fn register_injectable(
        &self,
        class: ClassId,
        supplied: Option<Vec<TypeDescriptor>>,
    ) -> Result<ClassId, AnnotationError> {
        let name = self.display_name(class);
        let result = {
            let mut store = self.write_store()?;
            injectable::register(&mut store, class, &name, supplied)
        };

        match &result {
            Ok(_) => tracing::debug!(class = %name, "registered injectable"),
            Err(error) => tracing::warn!(class = %name, %error, "rejected injectable registration"),
        }
        result
    }

    /// Register `T` with the parameter types from its [`ConstructorSignature`]
    pub fn register_signature<T: ConstructorSignature>(&self) -> Result<ClassId, AnnotationError> {
        let class = self.class_of::<T>()?;
        self.register_injectable(class, Some(T::param_types()))
    }

    /// All tagged points of a class in one category, if it has any
    pub fn get(&self, category: TagCategory, class: ClassId) -> Option<TagMap> {
        self.read_store().tags(category, class).cloned()
    }

    /// Registered constructor parameter types of a class
    pub fn param_types(&self, class: ClassId) -> Option<Vec<TypeDescriptor>> {
        self.read_store().param_types(class).map(<[TypeDescriptor]>::to_vec)
    }

    /// Check if the class has been registered as an injection target
    ///
    /// A class registered with zero parameters is injectable; a class never
    /// registered is not.
    pub fn is_injectable(&self, class: ClassId) -> bool {
        self.read_store().has_param_types(class)
    }

    /// Tags of one constructor parameter
    pub fn parameter_tags(&self, class: ClassId, index: usize) -> Option<Vec<MetadataEntry>> {
        self.read_store()
            .point(TagCategory::ParamTags, class, &Identifier::index(index))
            .map(<[MetadataEntry]>::to_vec)
    }

    /// Tags of one instance field
    pub fn property_tags(
        &self,
        class: ClassId,
        name: impl Into<Identifier>,
    ) -> Option<Vec<MetadataEntry>> {
        self.read_store()
            .point(TagCategory::PropertyTags, class, &name.into())
            .map(<[MetadataEntry]>::to_vec)
    }

    /// Everything recorded for a class, or `None` for an unknown handle
    pub fn snapshot(&self, class: ClassId) -> Option<ClassMetadata> {
        let name = self.class_name(class)?;
        let store = self.read_store();
        Some(ClassMetadata::collect(&store, class, name))
    }

    /// Number of classes registered as injection targets
    pub fn injectable_count(&self) -> usize {
        self.read_store().injectable_count()
    }
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Logger;

    fn registry() -> MetadataRegistry {
        MetadataRegistry::with_config(RegistryConfig::testing())
    }

    #[test]
    fn test_declare_class_issues_distinct_handles() {
        let registry = registry();
        let a = registry.declare_class("Foo").unwrap();
        let b = registry.declare_class("Foo").unwrap();

        assert_ne!(a, b);
        assert_eq!(registry.class_name(a).as_deref(), Some("Foo"));
    }

    #[test]
    fn test_class_of_is_stable() {
        let registry = registry();
        let first = registry.class_of::<Logger>().unwrap();
        let second = registry.class_of::<Logger>().unwrap();

        assert_eq!(first, second);
        let declaration = registry.class_declaration(first).unwrap();
        assert_eq!(declaration.type_id, Some(TypeId::of::<Logger>()));
    }

    #[test]
    fn test_get_returns_absent_for_untagged_class() {
        let registry = registry();
        let class = registry.declare_class("Foo").unwrap();
        assert!(registry.get(TagCategory::ParamTags, class).is_none());
        assert!(registry.parameter_tags(class, 0).is_none());
    }

    #[test]
    fn test_tag_and_read_back() {
        let registry = registry();
        let class = registry.declare_class("Foo").unwrap();

        registry
            .tag(
                TagCategory::PropertyTags,
                class,
                &Identifier::from("logger"),
                &MetadataEntry::new("inject", "Logger").into(),
            )
            .unwrap();

        let tags = registry.get(TagCategory::PropertyTags, class).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(
            registry.property_tags(class, "logger").unwrap(),
            vec![MetadataEntry::new("inject", "Logger")]
        );
    }

    #[test]
    fn test_zero_parameter_registration_is_distinct_from_none() {
        let registry = registry();
        let registered = registry.declare_class("Registered").unwrap();
        let unregistered = registry.declare_class("Unregistered").unwrap();

        registry.register_injectable(registered, None).unwrap();

        assert!(registry.is_injectable(registered));
        assert_eq!(registry.param_types(registered), Some(Vec::new()));
        assert!(!registry.is_injectable(unregistered));
        assert_eq!(registry.param_types(unregistered), None);
    }

    #[test]
    fn test_register_signature_uses_type_handle() {
        impl ConstructorSignature for Logger {
            fn param_types() -> Vec<TypeDescriptor> {
                vec![TypeDescriptor::of::<String>()]
            }
        }

        let registry = registry();
        let class = registry.register_signature::<Logger>().unwrap();

        assert_eq!(class, registry.class_of::<Logger>().unwrap());
        assert!(registry.param_types(class).unwrap()[0].is::<String>());
        assert!(registry.register_signature::<Logger>().is_err());
        assert_eq!(registry.injectable_count(), 1);
    }

    #[test]
    fn test_snapshot_of_unknown_class() {
        let registry = registry();
        let other = MetadataRegistry::new();
        let foreign = other.declare_class("Foreign").unwrap();
        assert!(registry.snapshot(foreign).is_none());
    }
}
