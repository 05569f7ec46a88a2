use crate::class::ClassId;
use crate::metadata::{Identifier, MetadataEntry, TypeDescriptor};
use crate::store::{MetadataStore, TagCategory, TagMap};
use serde::Serialize;

/// Tags recorded at one injection point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointMetadata {
    pub point: Identifier,
    pub entries: Vec<MetadataEntry>,
}

/// Everything recorded for one class, in a stable order
#[derive(Debug, Clone, Serialize)]
pub struct ClassMetadata {
    pub name: String,
    /// `None` until the class is registered as injectable
    pub param_types: Option<Vec<TypeDescriptor>>,
    /// Constructor parameters, by ascending position
    pub parameters: Vec<PointMetadata>,
    /// Fields, by name
    pub properties: Vec<PointMetadata>,
}

impl ClassMetadata {
    pub(crate) fn collect(store: &MetadataStore, class: ClassId, name: String) -> Self {
        let mut parameters = points(store.tags(TagCategory::ParamTags, class));
        parameters.sort_by_key(|point| {
            let index = point.point.as_name().and_then(|name| name.parse::<usize>().ok());
            (index.is_none(), index, point.point.to_string())
        });

        let mut properties = points(store.tags(TagCategory::PropertyTags, class));
        properties.sort_by_key(|point| point.point.to_string());

        Self {
            name,
            param_types: store.param_types(class).map(<[TypeDescriptor]>::to_vec),
            parameters,
            properties,
        }
    }

    pub fn is_injectable(&self) -> bool {
        self.param_types.is_some()
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn points(tags: Option<&TagMap>) -> Vec<PointMetadata> {
    tags.into_iter()
        .flatten()
        .map(|(point, entries)| PointMetadata {
            point: point.clone(),
            entries: entries.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine;

    #[test]
    fn test_parameters_sorted_numerically() {
        let mut store = MetadataStore::new();
        let class = ClassId::new();
        for index in [10, 2, 0] {
            engine::apply(
                &mut store,
                TagCategory::ParamTags,
                class,
                &Identifier::index(index),
                &MetadataEntry::new("index", index).into(),
            )
            .unwrap();
        }

        let snapshot = ClassMetadata::collect(&store, class, "Foo".to_string());
        let order: Vec<String> = snapshot
            .parameters
            .iter()
            .map(|point| point.point.to_string())
            .collect();
        assert_eq!(order, vec!["0", "2", "10"]);
        assert!(!snapshot.is_injectable());
    }

    #[test]
    fn test_json_output() {
        let mut store = MetadataStore::new();
        let class = ClassId::new();
        store.insert_param_types(class, vec![TypeDescriptor::named("String")]);
        engine::apply(
            &mut store,
            TagCategory::PropertyTags,
            class,
            &Identifier::from("logger"),
            &MetadataEntry::new("inject", "Logger").into(),
        )
        .unwrap();

        let json = ClassMetadata::collect(&store, class, "Foo".to_string())
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "Foo");
        assert_eq!(value["param_types"][0], "String");
        assert_eq!(value["properties"][0]["point"], "logger");
        assert_eq!(value["properties"][0]["entries"][0]["key"], "inject");
        assert_eq!(value["properties"][0]["entries"][0]["value"], "Logger");
    }
}
