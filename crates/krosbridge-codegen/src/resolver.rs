//! Mapping of schema fields onto Kotlin types.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{Error, Result};
use crate::kotlin::{ClassName, DEFAULT_MESSAGES_PACKAGE, KotlinType};
use crate::types::{Field, TypeName};

/// Message families that always live under [`DEFAULT_MESSAGES_PACKAGE`]
pub const WELL_KNOWN_NAMESPACES: [&str; 12] = [
    "actionlib_msgs",
    "nav_msgs",
    "shape_msgs",
    "stereo_msgs",
    "diagnostic_msgs",
    "rosgraph_msgs",
    "std_msgs",
    "trajectory_msgs",
    "geometry_msgs",
    "sensor_msgs",
    "std_srvs",
    "visualization_msgs",
];

pub const MESSAGE_SEGMENT: &str = "msg";
pub const SERVICE_SEGMENT: &str = "srv";

/// ROS primitive types accepted in field and constant declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum RosPrimitive {
    Bool,
    Byte,
    Char,
    String,
    Float32,
    Float64,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
}

impl RosPrimitive {
    /// Primitive named by a bare type name. Namespaced names are never primitive.
    pub fn lookup(ty: &TypeName) -> Option<Self> {
        if ty.has_namespace() {
            return None;
        }
        ty.name.parse().ok()
    }

    /// Kotlin host type. Unsigned types widen to the next signed type so that
    /// their full range fits; `uint64` shares `Long` and loses its top bit.
    pub fn kotlin_class(self) -> ClassName {
        match self {
            RosPrimitive::Bool => ClassName::boolean(),
            RosPrimitive::Byte | RosPrimitive::Int8 => ClassName::byte(),
            RosPrimitive::Char => ClassName::char(),
            RosPrimitive::String => ClassName::string(),
            RosPrimitive::Float32 => ClassName::float(),
            RosPrimitive::Float64 => ClassName::double(),
            RosPrimitive::Uint8 | RosPrimitive::Int16 => ClassName::short(),
            RosPrimitive::Uint16 => ClassName::int(),
            RosPrimitive::Int32
            | RosPrimitive::Uint32
            | RosPrimitive::Int64
            | RosPrimitive::Uint64 => ClassName::long(),
        }
    }
}

/// Whether a declared namespace names one of [`WELL_KNOWN_NAMESPACES`]
pub fn is_well_known(ty: &TypeName) -> bool {
    ty.namespace
        .iter()
        .any(|segment| WELL_KNOWN_NAMESPACES.contains(&segment.as_str()))
}

fn join_package(root: &str, segments: &[String]) -> String {
    std::iter::once(root)
        .chain(segments.iter().map(String::as_str))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Resolves field types against a configurable package prefix
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    package_prefix: String,
}

impl TypeResolver {
    pub fn new(package_prefix: impl Into<String>) -> Self {
        Self {
            package_prefix: package_prefix.into(),
        }
    }

    /// Bare names that always map to the built-in types under the prefix
    fn builtin_class(&self, ty: &TypeName) -> Option<ClassName> {
        if ty.has_namespace() {
            return None;
        }
        let (namespace, simple) = match ty.name.as_str() {
            "Header" => (["std_msgs", MESSAGE_SEGMENT], "Header"),
            "time" => (["primitive", MESSAGE_SEGMENT], "Time"),
            "duration" => (["primitive", MESSAGE_SEGMENT], "Duration"),
            _ => return None,
        };
        let namespace: Vec<String> = namespace.iter().map(|s| s.to_string()).collect();
        Some(ClassName::new(self.package_for(&namespace), simple))
    }

    /// Kotlin package for a namespace under the configured prefix
    pub fn package_for(&self, namespace: &[String]) -> String {
        join_package(&self.package_prefix, namespace)
    }

    /// Class a schema-level type name is generated as
    pub fn class_for(&self, name: &TypeName) -> ClassName {
        ClassName::new(self.package_for(&name.namespace), name.name.clone())
    }

    /// Kotlin type of `field` declared inside a schema living in `enclosing`
    pub fn resolve(&self, field: &Field, enclosing: &[String]) -> KotlinType {
        let scalar = self.resolve_scalar(&field.ty, enclosing);
        tracing::trace!("Resolved `{}` to {}", field, scalar);
        if field.is_array() {
            KotlinType::list(scalar)
        } else {
            scalar
        }
    }

    /// Kotlin type of `field` with any array arity ignored
    pub fn resolve_scalar(&self, ty: &TypeName, enclosing: &[String]) -> KotlinType {
        if let Some(builtin) = self.builtin_class(ty) {
            return builtin.to_type();
        }
        if let Some(primitive) = RosPrimitive::lookup(ty) {
            return primitive.kotlin_class().to_type();
        }
        self.complex_class(ty, enclosing).to_type()
    }

    /// Class a non-primitive reference points at
    pub fn complex_class(&self, ty: &TypeName, enclosing: &[String]) -> ClassName {
        if !ty.has_namespace() {
            let mut namespace = enclosing.to_vec();
            to_message_grouping(&mut namespace);
            return ClassName::new(self.package_for(&namespace), ty.name.clone());
        }

        let mut namespace = ty.namespace.clone();
        if is_well_known(ty) {
            if namespace.last().map(String::as_str) != Some(MESSAGE_SEGMENT) {
                namespace.push(MESSAGE_SEGMENT.to_string());
            }
            return ClassName::new(
                join_package(DEFAULT_MESSAGES_PACKAGE, &namespace),
                ty.name.clone(),
            );
        }

        to_message_grouping(&mut namespace);
        ClassName::new(self.package_for(&namespace), ty.name.clone())
    }

    /// Primitive type of a constant. Constants are never array-wrapped.
    pub fn resolve_constant(&self, field: &Field) -> Result<KotlinType> {
        if field.is_array() || field.is_complex() {
            return Err(Error::InvalidConstantShape {
                name: field.name.clone(),
            });
        }
        RosPrimitive::lookup(&field.ty)
            .map(|primitive| primitive.kotlin_class().to_type())
            .ok_or_else(|| Error::InvalidConstantType {
                name: field.name.clone(),
                ty: field.ty.clone(),
            })
    }
}

/// `srv` becomes `msg`; any other non-empty namespace gets `msg` appended.
fn to_message_grouping(namespace: &mut Vec<String>) {
    match namespace.last().map(String::as_str) {
        None | Some(MESSAGE_SEGMENT) => {}
        Some(SERVICE_SEGMENT) => {
            if let Some(last) = namespace.last_mut() {
                *last = MESSAGE_SEGMENT.to_string();
            }
        }
        Some(_) => namespace.push(MESSAGE_SEGMENT.to_string()),
    }
}
