use crate::ThisError;
use frostmodel_schema::{error::SchemaError, types::Flavor};

///
/// ModelError
///
/// Failures raised while constructing, updating or writing into models and
/// plain-data containers. Nested failures carry the property path that led
/// to them through `Context`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ModelError {
    #[error("model error at {path}: {source}")]
    Context {
        path: String,
        #[source]
        source: Box<Self>,
    },

    #[error("model type '{model}' is {actual}, expected {expected}")]
    FlavorMismatch {
        model: String,
        expected: Flavor,
        actual: Flavor,
    },

    #[error("model '{actual}' is not compatible with declared model '{expected}'")]
    IncompatibleModel { expected: String, actual: String },

    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("invalid value shape: expected {expected}, found {actual}")]
    InvalidShape {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("cannot write '{key}': {target} is read-only")]
    ReadOnlyViolation { target: &'static str, key: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("unknown property '{key}' on model '{model}'")]
    UnknownProperty { model: String, key: String },
}

impl ModelError {
    pub(crate) fn read_only(target: &'static str, key: impl Into<String>) -> Self {
        Self::ReadOnlyViolation {
            target,
            key: key.into(),
        }
    }

    /// Prepend a field segment to the error path.
    #[must_use]
    pub fn with_field(self, field: impl AsRef<str>) -> Self {
        let field = field.as_ref();
        match self {
            Self::Context { path, source } => Self::Context {
                path: format!("{field}.{path}"),
                source,
            },
            source => Self::Context {
                path: field.to_string(),
                source: Box::new(source),
            },
        }
    }

    /// Return the full contextual path, if available.
    #[must_use]
    pub const fn path(&self) -> Option<&str> {
        match self {
            Self::Context { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// Return the innermost, non-context error variant.
    #[must_use]
    pub fn leaf(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.leaf(),
            _ => self,
        }
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self.leaf(), Self::ReadOnlyViolation { .. })
    }
}
