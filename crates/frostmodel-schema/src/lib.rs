//! Schema layer for frostmodel: property declarations, the fluent registry
//! builder, build-time validation and the `SchemaProvider` seam consumed by
//! the model runtime.

pub mod build;
pub mod error;
pub mod node;
pub mod registry;
pub mod types;
pub mod validate;

/// Maximum length for model type names.
pub const MAX_MODEL_NAME_LEN: usize = 64;

/// Maximum length for property keys.
pub const MAX_PROPERTY_NAME_LEN: usize = 64;

use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::{ModelDeclaration, RegistryBuilder},
        error::{Issue, Issues, SchemaError},
        node::{PropertyDeclaration, PropertyKind, Schema},
        registry::{Registry, SchemaProvider},
        types::Flavor,
    };
    pub use serde::Serialize;
}
