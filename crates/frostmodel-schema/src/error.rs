use crate::{ThisError, types::Flavor};
use std::fmt;

///
/// SchemaError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum SchemaError {
    #[error("schema not found for model type '{name}'")]
    NotFound { name: String },

    #[error("schema validation failed: {0}")]
    Validation(Issues),
}

impl SchemaError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Return the validation issues carried by this error, if any.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Validation(issues) => issues.as_slice(),
            Self::NotFound { .. } => &[],
        }
    }
}

///
/// Issue
/// One build-time schema problem.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum Issue {
    #[error("model '{model}' extends itself through its base chain")]
    InheritanceCycle { model: String },

    #[error("model '{model}' has an invalid name: {reason}")]
    InvalidModelName { model: String, reason: String },

    #[error("model '{model}', property '{key}' has an invalid key: {reason}")]
    InvalidPropertyKey {
        model: String,
        key: String,
        reason: String,
    },

    #[error("model '{model}' is {flavor} but its base '{base}' is {base_flavor}")]
    MismatchedBaseFlavor {
        model: String,
        flavor: Flavor,
        base: String,
        base_flavor: Flavor,
    },

    #[error("model '{model}' declares no properties")]
    NoProperties { model: String },

    #[error("model '{model}' is declared more than once")]
    RedeclaredModel { model: String },

    #[error("model '{model}' extends unknown model '{base}'")]
    UnknownBase { model: String, base: String },

    #[error("model '{model}', property '{key}' references unknown model '{nested}'")]
    UnknownNestedModel {
        model: String,
        key: String,
        nested: String,
    },
}

///
/// Issues
/// Ordered collection of build issues, reported together.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Issues(Vec<Issue>);

impl Issues {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, issue: Issue) {
        self.0.push(issue);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Issue] {
        &self.0
    }

    /// Fail with every collected issue, or succeed when none were recorded.
    pub fn result(self) -> Result<(), SchemaError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Validation(self))
        }
    }
}

impl fmt::Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, issue) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }

        Ok(())
    }
}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
