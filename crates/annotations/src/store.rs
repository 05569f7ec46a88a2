//! In-memory metadata store
//!
//! Layout: `TagCategory -> ClassId -> injection point -> [MetadataEntry]` for
//! tags, and `ClassId -> [TypeDescriptor]` for constructor parameter types.
//! Per-class maps are created on first write and never removed.

use crate::class::ClassId;
use crate::metadata::{keys, Identifier, MetadataEntry, TypeDescriptor};
use std::collections::HashMap;

/// Tags of every injection point of one class in one category
pub type TagMap = HashMap<Identifier, Vec<MetadataEntry>>;

/// Independent tag spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    /// Constructor parameters, keyed by stringified position
    ParamTags,
    /// Instance fields, keyed by field name
    PropertyTags,
}

impl TagCategory {
    /// Metadata key name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            TagCategory::ParamTags => keys::PARAM_TAGS,
            TagCategory::PropertyTags => keys::PROPERTY_TAGS,
        }
    }
}

impl std::fmt::Display for TagCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Backing storage of a [`MetadataRegistry`](crate::MetadataRegistry)
///
/// Reads are public. Writes are crate-private so that every mutation passes
/// the duplicate-key and single-registration checks:
///
/// ```compile_fail
/// use elif_annotations::{Identifier, MetadataEntry, MetadataRegistry, MetadataStore, TagCategory};
///
/// let registry = MetadataRegistry::new();
/// let class = registry.declare_class("Foo").unwrap();
/// let mut store = MetadataStore::new();
/// store.append(
///     TagCategory::ParamTags,
///     class,
///     Identifier::index(0),
///     vec![MetadataEntry::new("scope", "singleton")],
/// );
/// ```
///
/// ```compile_fail
/// use elif_annotations::{MetadataRegistry, MetadataStore};
///
/// let registry = MetadataRegistry::new();
/// let class = registry.declare_class("Foo").unwrap();
/// let mut store = MetadataStore::new();
/// store.insert_param_types(class, Vec::new());
/// ```
#[derive(Debug, Default)]
pub struct MetadataStore {
    param_tags: HashMap<ClassId, TagMap>,
    property_tags: HashMap<ClassId, TagMap>,
    param_types: HashMap<ClassId, Vec<TypeDescriptor>>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store sized for `classes` tagged classes
    pub fn with_capacity(classes: usize) -> Self {
        Self {
            param_tags: HashMap::with_capacity(classes),
            property_tags: HashMap::with_capacity(classes),
            param_types: HashMap::with_capacity(classes),
        }
    }

    fn category(&self, category: TagCategory) -> &HashMap<ClassId, TagMap> {
        match category {
            TagCategory::ParamTags => &self.param_tags,
            TagCategory::PropertyTags => &self.property_tags,
        }
    }

    fn category_mut(&mut self, category: TagCategory) -> &mut HashMap<ClassId, TagMap> {
        match category {
            TagCategory::ParamTags => &mut self.param_tags,
            TagCategory::PropertyTags => &mut self.property_tags,
        }
    }

    /// All tagged points of a class in a category
    pub fn tags(&self, category: TagCategory, class: ClassId) -> Option<&TagMap> {
        self.category(category).get(&class)
    }

    /// Entries stored at one injection point
    pub fn point(
        &self,
        category: TagCategory,
        class: ClassId,
        point: &Identifier,
    ) -> Option<&[MetadataEntry]> {
        self.tags(category, class)
            .and_then(|points| points.get(point))
            .map(Vec::as_slice)
    }

    /// Append entries to an injection point, creating it if needed
    ///
    /// Performs no key checks; callers validate before writing.
    pub(crate) fn append<I>(&mut self, category: TagCategory, class: ClassId, point: Identifier, entries: I)
    where
        I: IntoIterator<Item = MetadataEntry>,
    {
        self.category_mut(category)
            .entry(class)
            .or_default()
            .entry(point)
            .or_default()
            .extend(entries);
    }

    pub fn param_types(&self, class: ClassId) -> Option<&[TypeDescriptor]> {
        self.param_types.get(&class).map(Vec::as_slice)
    }

    pub fn has_param_types(&self, class: ClassId) -> bool {
        self.param_types.contains_key(&class)
    }

    /// Store the parameter type list of a class, replacing any previous one
    pub(crate) fn insert_param_types(&mut self, class: ClassId, types: Vec<TypeDescriptor>) {
        self.param_types.insert(class, types);
    }

    /// Number of classes with tags in a category
    pub fn tagged_class_count(&self, category: TagCategory) -> usize {
        self.category(category).len()
    }

    /// Number of classes with a parameter type list
    pub fn injectable_count(&self) -> usize {
        self.param_types.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_creates_class_and_point_lazily() {
        let mut store = MetadataStore::new();
        let class = ClassId::new();
        assert!(store.tags(TagCategory::ParamTags, class).is_none());

        store.append(
            TagCategory::ParamTags,
            class,
            Identifier::index(0),
            vec![MetadataEntry::new("scope", "singleton")],
        );

        let entries = store
            .point(TagCategory::ParamTags, class, &Identifier::index(0))
            .unwrap();
        assert_eq!(entries, &[MetadataEntry::new("scope", "singleton")]);
        assert_eq!(store.tagged_class_count(TagCategory::ParamTags), 1);
    }

    #[test]
    fn test_categories_are_separate() {
        let mut store = MetadataStore::new();
        let class = ClassId::new();
        store.append(
            TagCategory::ParamTags,
            class,
            Identifier::from("0"),
            vec![MetadataEntry::new("a", 1)],
        );

        assert!(store.tags(TagCategory::PropertyTags, class).is_none());
        assert!(store
            .point(TagCategory::PropertyTags, class, &Identifier::from("0"))
            .is_none());
    }

    #[test]
    fn test_empty_param_types_are_present() {
        let mut store = MetadataStore::new();
        let class = ClassId::new();
        assert!(!store.has_param_types(class));

        store.insert_param_types(class, Vec::new());
        assert!(store.has_param_types(class));
        assert_eq!(store.param_types(class), Some(&[][..]));
    }
}
