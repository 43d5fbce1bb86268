//! JSON manifest of already-parsed schemas

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Schema;

/// Schema version for compatibility checking
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SchemaManifest {
    pub version: u32,
    pub schemas: Vec<Schema>,
}

impl SchemaManifest {
    pub fn new(schemas: Vec<Schema>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            schemas,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json)?;
        if manifest.version != SCHEMA_VERSION {
            return Err(Error::UnsupportedManifestVersion {
                found: manifest.version,
                expected: SCHEMA_VERSION,
            });
        }
        Ok(manifest)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
