//! Core runtime for frostmodel: plain-data values, the immutable and mutable
//! model flavors, and the coercion policy that decides what each declared
//! property stores.
#![warn(unreachable_pub)]

#[macro_use]
mod macros;

pub mod error;
pub mod model;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

use thiserror::Error as ThisError;

// re-exports
pub use error::ModelError;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        model::{CloneDepth, ImmutableModel, Model, ModelRef, ModelType, MutableModel},
        record,
        value::{List, Opaque, Record, Value, ValueKind},
    };
    pub use frostmodel_schema::prelude::*;
}
