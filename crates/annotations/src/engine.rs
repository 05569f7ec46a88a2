use crate::class::ClassId;
use crate::errors::AnnotationError;
use crate::metadata::{Identifier, MetadataBatch};
use crate::store::{MetadataStore, TagCategory};

/// Merge a batch of entries into one injection point
///
/// The batch is checked for repeated keys, then every stored entry is checked
/// against every new entry. Only when both checks pass are the new entries
/// appended, in order, after the existing ones. On error the store is left
/// untouched.
pub fn apply(
    store: &mut MetadataStore,
    category: TagCategory,
    class: ClassId,
    point: &Identifier,
    batch: &MetadataBatch,
) -> Result<(), AnnotationError> {
    if let Some(key) = batch.first_duplicate_key() {
        return Err(AnnotationError::duplicate_key(key.clone()));
    }

    let existing = store.point(category, class, point).unwrap_or_default();
    if let Some(stored) = existing
        .iter()
        .find(|stored| batch.entries().iter().any(|entry| entry.key == stored.key))
    {
        return Err(AnnotationError::duplicate_key(stored.key.clone()));
    }

    store.append(category, class, point.clone(), batch.entries().iter().cloned());
    Ok(())
}
