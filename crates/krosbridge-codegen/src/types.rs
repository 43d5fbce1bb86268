use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Namespaced ROS type name, e.g. `geometry_msgs/msg/Pose`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeName {
    pub name: String,
    /// Namespace segments, outermost first. Empty when none was declared.
    pub namespace: Vec<String>,
}

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    pub fn with_namespace<I, S>(name: impl Into<String>, namespace: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            namespace: namespace.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_namespace(&self) -> bool {
        !self.namespace.is_empty()
    }

    /// Sibling type in the same namespace, e.g. `AddTwoInts` -> `AddTwoIntsRequest`
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            name: format!("{}{}", self.name, suffix),
            namespace: self.namespace.clone(),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.namespace {
            write!(f, "{}/", segment)?;
        }
        f.write_str(&self.name)
    }
}

impl FromStr for TypeName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        match s.rsplit_once('/') {
            Some((namespace, name)) => Self::with_namespace(name, namespace.split('/')),
            None => Self::new(s),
        }
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<TypeName> for String {
    fn from(ty: TypeName) -> Self {
        ty.to_string()
    }
}

/// Array arity of a field. Encoded as `-1` (single), `0` (unbounded) or the fixed length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ArrayType {
    #[default]
    Single,
    Unbounded,
    Fixed(usize),
}

impl TryFrom<i64> for ArrayType {
    type Error = Error;

    fn try_from(length: i64) -> Result<Self, Self::Error> {
        match length {
            -1 => Ok(Self::Single),
            0 => Ok(Self::Unbounded),
            n if n > 0 => usize::try_from(n)
                .map(Self::Fixed)
                .map_err(|_| Error::InvalidArrayLength(length)),
            _ => Err(Error::InvalidArrayLength(length)),
        }
    }
}

impl From<ArrayType> for i64 {
    fn from(array: ArrayType) -> Self {
        match array {
            ArrayType::Single => -1,
            ArrayType::Unbounded => 0,
            ArrayType::Fixed(n) => n as i64,
        }
    }
}

/// Field in a message, service or action payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "type")]
    pub ty: TypeName,
    pub name: String,
    /// Inline definition of an anonymous complex type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Field>,
    /// Literal value text for constants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, rename = "array_length")]
    pub array: ArrayType,
}

impl Field {
    pub fn new(ty: impl Into<TypeName>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            children: Vec::new(),
            value: None,
            array: ArrayType::Single,
        }
    }

    pub fn constant(
        ty: impl Into<TypeName>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(ty, name)
        }
    }

    pub fn with_array(mut self, array: ArrayType) -> Self {
        self.array = array;
        self
    }

    pub fn with_children(mut self, children: Vec<Field>) -> Self {
        self.children = children;
        self
    }

    pub fn is_array(&self) -> bool {
        self.array != ArrayType::Single
    }

    pub fn has_fixed_length(&self) -> bool {
        matches!(self.array, ArrayType::Fixed(_))
    }

    pub fn is_constant(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_variable(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_complex(&self) -> bool {
        !self.children.is_empty()
    }

    /// Same field with the array arity dropped
    pub fn as_scalar(&self) -> Self {
        Self {
            array: ArrayType::Single,
            ..self.clone()
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        match self.array {
            ArrayType::Single => {}
            ArrayType::Unbounded => f.write_str("[]")?,
            ArrayType::Fixed(n) => write!(f, "[{}]", n)?,
        }
        write!(f, " {}", self.name)?;
        if let Some(value) = &self.value {
            write!(f, "={}", value)?;
        }
        Ok(())
    }
}

/// Capability shared by every schema variant: a ROS type identity
pub trait RosType {
    fn name(&self) -> &TypeName;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub name: TypeName,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: TypeName,
    pub request: Vec<Field>,
    pub response: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: TypeName,
    pub goal: Vec<Field>,
    pub result: Vec<Field>,
    pub feedback: Vec<Field>,
}

impl RosType for Message {
    fn name(&self) -> &TypeName {
        &self.name
    }
}

impl RosType for Service {
    fn name(&self) -> &TypeName {
        &self.name
    }
}

impl RosType for Action {
    fn name(&self) -> &TypeName {
        &self.name
    }
}

/// One interface definition handed over by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schema {
    Message(Message),
    Service(Service),
    Action(Action),
}

impl RosType for Schema {
    fn name(&self) -> &TypeName {
        match self {
            Schema::Message(msg) => msg.name(),
            Schema::Service(srv) => srv.name(),
            Schema::Action(action) => action.name(),
        }
    }
}

impl From<Message> for Schema {
    fn from(msg: Message) -> Self {
        Schema::Message(msg)
    }
}

impl From<Service> for Schema {
    fn from(srv: Service) -> Self {
        Schema::Service(srv)
    }
}

impl From<Action> for Schema {
    fn from(action: Action) -> Self {
        Schema::Action(action)
    }
}
