//! Error types for binding generation

use std::path::PathBuf;

use crate::types::TypeName;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("constant `{name}` has non-primitive type `{ty}`")]
    InvalidConstantType { name: String, ty: TypeName },

    #[error("constant `{name}` cannot be an array or carry nested fields")]
    InvalidConstantShape { name: String },

    #[error("field `{name}` of `{schema}` clashes with a fixed `{operation}` parameter")]
    ReservedParameter {
        schema: TypeName,
        operation: &'static str,
        name: String,
    },

    #[error("invalid array length: {0}")]
    InvalidArrayLength(i64),

    #[error("unsupported manifest version {found} (expected {expected})")]
    UnsupportedManifestVersion { found: u32, expected: u32 },

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to format generated source")]
    Fmt(#[from] std::fmt::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
