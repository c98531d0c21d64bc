use crate::{node::PropertyDeclaration, types::Flavor};
use serde::Serialize;

///
/// Schema
///
/// Resolved schema of one model type.
/// `lineage` starts with the model's own name followed by its ancestors,
/// nearest first. `properties` holds ancestor declarations before the
/// model's own, with at most one declaration per key.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Schema {
    name: String,
    flavor: Flavor,
    lineage: Vec<String>,
    properties: Vec<PropertyDeclaration>,
}

impl Schema {
    pub(crate) const fn new(
        name: String,
        flavor: Flavor,
        lineage: Vec<String>,
        properties: Vec<PropertyDeclaration>,
    ) -> Self {
        Self {
            name,
            flavor,
            lineage,
            properties,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn flavor(&self) -> Flavor {
        self.flavor
    }

    #[must_use]
    pub fn lineage(&self) -> &[String] {
        &self.lineage
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyDeclaration] {
        &self.properties
    }

    // get
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&PropertyDeclaration> {
        self.properties.iter().find(|p| p.key == key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.property(key).is_some()
    }

    /// True when `name` is this model or one of its ancestors.
    #[must_use]
    pub fn extends(&self, name: &str) -> bool {
        self.lineage.iter().any(|ancestor| ancestor == name)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
