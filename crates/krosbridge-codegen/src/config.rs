//! Generator configuration

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Builder;
use crate::error::{Error, Result};
use crate::generator::Generator;

/// Configuration for binding generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Package prepended to every generated namespace. Empty means none.
    pub package_prefix: String,
    /// Root directory the package tree is written under
    pub output_dir: PathBuf,
    /// Keep inline nested types that already have a file in `output_dir`
    pub skip_existing: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package_prefix: String::new(),
            output_dir: PathBuf::from("."),
            skip_existing: true,
        }
    }
}

impl GeneratorConfig {
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    pub fn package_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.package_prefix = prefix.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn skip_existing(mut self, skip: bool) -> Self {
        self.config.skip_existing = skip;
        self
    }
}

impl Builder for GeneratorConfigBuilder {
    type Output = Generator;

    /// Creates the output directory if it does not exist yet
    fn build(self) -> Result<Self::Output> {
        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        Ok(Generator::new(self.config))
    }
}

impl From<GeneratorConfig> for GeneratorConfigBuilder {
    fn from(config: GeneratorConfig) -> Self {
        Self { config }
    }
}
