//! Concurrent writers against one registry
//!
//! Every tagging call validates and writes under one lock, so concurrent
//! callers racing on the same key must see exactly one winner and readers
//! must never observe a partially applied batch.

use elif_annotations::{
    create_tagged, tagged, Annotation, AnnotationSite, MetadataEntry, MetadataRegistry,
    RegistryConfig,
};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_same_key_has_single_winner() {
    let registry = Arc::new(MetadataRegistry::with_config(RegistryConfig::testing()));
    let class = registry.declare_class("Contended").unwrap();
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                tagged("scope", worker)
                    .apply(&registry, &AnnotationSite::constructor_parameter(class, 0))
                    .is_ok()
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|won| *won)
        .count();

    assert_eq!(winners, 1);
    assert_eq!(registry.parameter_tags(class, 0).unwrap().len(), 1);
}

#[test]
fn test_readers_see_whole_batches() {
    let registry = Arc::new(MetadataRegistry::with_config(RegistryConfig::testing()));
    let class = registry.declare_class("Batched").unwrap();
    let batches = 50;

    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for batch in 0..batches {
                create_tagged(vec![
                    MetadataEntry::new(format!("a{}", batch), batch),
                    MetadataEntry::new(format!("b{}", batch), batch),
                ])
                .apply(&registry, &AnnotationSite::property(class, "field"))
                .unwrap();
            }
        })
    };

    let reader = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for _ in 0..batches {
                let len = registry
                    .property_tags(class, "field")
                    .map(|entries| entries.len())
                    .unwrap_or(0);
                assert_eq!(len % 2, 0, "observed a partial batch");
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(
        registry.property_tags(class, "field").unwrap().len(),
        batches * 2
    );
}

#[test]
fn test_concurrent_injectable_registration() {
    let registry = Arc::new(MetadataRegistry::with_config(RegistryConfig::testing()));
    let class = registry.declare_class("Singleton").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.register_injectable(class, None).is_ok())
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    assert_eq!(registry.injectable_count(), 1);
}
