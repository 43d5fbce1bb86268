//! Kotlin binding generator for krosbridge.
//!
//! Takes already-parsed ROS message, service and action schemas and writes
//! one Kotlin source file per class: `@Serializable` payload classes plus a
//! topic, service or action wrapper that forwards to the krosbridge runtime.

pub mod code_writer;
pub mod config;
pub mod error;
pub mod generator;
pub mod kotlin;
pub mod manifest;
pub mod resolver;
pub mod types;

pub use config::{GeneratorConfigBuilder, GeneratorConfig};
pub use error::{Error, Result};
pub use generator::{GenerationReport, Generator};
pub use manifest::SchemaManifest;
pub use resolver::TypeResolver;
pub use types::{Action, ArrayType, Field, Message, RosType, Schema, Service, TypeName};

pub trait Builder {
    type Output;
    fn build(self) -> Result<Self::Output>;
}
