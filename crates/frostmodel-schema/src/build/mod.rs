mod resolve;


use crate::{
    error::SchemaError,
    node::PropertyDeclaration,
    registry::Registry,
    types::Flavor,
};
use tracing::trace;

///
/// RegistryBuilder
///
/// Collects model declarations and resolves them into a `Registry`.
/// Declarations may reference models declared later; names are only
/// resolved by `build`.
///

#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    declarations: Vec<ModelDeclaration>,
}

impl RegistryBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Start declaring an immutable model type.
    pub fn immutable(&mut self, name: impl Into<String>) -> &mut ModelDeclaration {
        self.declare(name, Flavor::Immutable)
    }

    /// Start declaring a mutable model type.
    pub fn mutable(&mut self, name: impl Into<String>) -> &mut ModelDeclaration {
        self.declare(name, Flavor::Mutable)
    }

    pub fn declare(&mut self, name: impl Into<String>, flavor: Flavor) -> &mut ModelDeclaration {
        let index = self.declarations.len();
        self.declarations.push(ModelDeclaration::new(name.into(), flavor));

        &mut self.declarations[index]
    }

    #[must_use]
    pub fn declarations(&self) -> &[ModelDeclaration] {
        &self.declarations
    }

    /// Validate every declaration and resolve inherited schemas.
    pub fn build(self) -> Result<Registry, SchemaError> {
        resolve::resolve(&self.declarations)
    }
}

///
/// ModelDeclaration
/// Own declarations of one model type, before inheritance is applied.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModelDeclaration {
    name: String,
    flavor: Flavor,
    base: Option<String>,
    properties: Vec<PropertyDeclaration>,
}

impl ModelDeclaration {
    const fn new(name: String, flavor: Flavor) -> Self {
        Self {
            name,
            flavor,
            base: None,
            properties: Vec::new(),
        }
    }

    /// Inherit every property declared by `base` and its ancestors.
    pub fn extends(&mut self, base: impl Into<String>) -> &mut Self {
        self.base = Some(base.into());
        self
    }

    /// Declare a scalar (plain data) property.
    pub fn prop(&mut self, key: impl Into<String>) -> &mut Self {
        self.property(PropertyDeclaration::scalar(key))
    }

    /// Declare a property holding an instance of the `model` type.
    pub fn model_ref(&mut self, key: impl Into<String>, model: impl Into<String>) -> &mut Self {
        self.property(PropertyDeclaration::model_ref(key, model))
    }

    /// Add a declaration; a repeated key replaces the earlier declaration.
    pub fn property(&mut self, declaration: PropertyDeclaration) -> &mut Self {
        match self
            .properties
            .iter_mut()
            .find(|existing| existing.key == declaration.key)
        {
            Some(existing) => {
                trace!(model = %self.name, key = %declaration.key, "property redeclared");
                *existing = declaration;
            }
            None => self.properties.push(declaration),
        }

        self
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
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyDeclaration] {
        &self.properties
    }
}
