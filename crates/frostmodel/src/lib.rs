//! ## Crate layout
//! - `schema`: property declarations, the registry builder, validation and
//!   the `SchemaProvider` seam.
//! - `core`: plain-data values, deep freeze/copy helpers and the immutable
//!   and mutable model runtime.
//!
//! The `prelude` module covers everything needed to declare model types and
//! work with their instances.

pub use frostmodel_core as core;
pub use frostmodel_schema as schema;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use frostmodel_core::{ModelError, record};
pub use frostmodel_schema::error::SchemaError;

/// Re-exported so callers can hand JSON to `Value::from` / `Record::from_json`
/// without naming the dependency themselves.
#[cfg(feature = "json")]
pub use serde_json;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{ModelError, SchemaError};
    pub use frostmodel_core::{
        prelude::*,
        value::{deep_copy, deep_freeze, is_plain_data},
    };
}
