use serde::Serialize;

///
/// PropertyKind
///
/// Scalar properties hold plain data.
/// ModelRef properties hold an instance of the named nested model type.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyKind {
    Scalar,
    ModelRef { model: String },
}

///
/// PropertyDeclaration
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PropertyDeclaration {
    pub key: String,

    #[serde(flatten)]
    pub kind: PropertyKind,
}

impl PropertyDeclaration {
    pub fn scalar(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: PropertyKind::Scalar,
        }
    }

    pub fn model_ref(key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: PropertyKind::ModelRef {
                model: model.into(),
            },
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// Name of the nested model type, for ModelRef declarations.
    #[must_use]
    pub fn nested_model(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::ModelRef { model } => Some(model),
            PropertyKind::Scalar => None,
        }
    }
}
