use crate::{build::RegistryBuilder, error::SchemaError, node::Schema};
use std::{collections::BTreeMap, sync::Arc};

///
/// SchemaProvider
///
/// Source of resolved schemas, looked up by model type name.
/// Returned schemas already include every inherited declaration.
///

pub trait SchemaProvider: Send + Sync {
    fn schema(&self, name: &str) -> Result<Arc<Schema>, SchemaError>;
}

///
/// Registry
/// Resolved, read-only table of model schemas.
///

#[derive(Clone, Debug, Default)]
pub struct Registry {
    schemas: BTreeMap<String, Arc<Schema>>,
}

impl Registry {
    #[must_use]
    pub const fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) const fn from_schemas(schemas: BTreeMap<String, Arc<Schema>>) -> Self {
        Self { schemas }
    }

    // get
    pub fn get(&self, name: &str) -> Result<&Arc<Schema>, SchemaError> {
        self.schemas
            .get(name)
            .ok_or_else(|| SchemaError::not_found(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered model names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Share this registry as the provider handed to model types.
    #[must_use]
    pub fn into_provider(self) -> Arc<dyn SchemaProvider> {
        Arc::new(self)
    }
}

impl SchemaProvider for Registry {
    fn schema(&self, name: &str) -> Result<Arc<Schema>, SchemaError> {
        self.get(name).cloned()
    }
}
