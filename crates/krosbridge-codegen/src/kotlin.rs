//! Kotlin type descriptors and the krosbridge runtime surface the bindings call into.

use std::fmt;

pub const KROSBRIDGE_PACKAGE: &str = "com.github.thoebert.krosbridge";

/// Root package of the hand-written krosbridge message types
pub const DEFAULT_MESSAGES_PACKAGE: &str = "com.github.thoebert.krosbridge.messages";

/// Fully-qualified Kotlin class reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    pub package: String,
    pub simple: String,
}

impl ClassName {
    pub fn new(package: impl Into<String>, simple: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple: simple.into(),
        }
    }

    pub fn canonical(&self) -> String {
        if self.package.is_empty() {
            self.simple.clone()
        } else {
            format!("{}.{}", self.package, self.simple)
        }
    }

    pub fn to_type(&self) -> KotlinType {
        KotlinType::from(self.clone())
    }

    pub fn boolean() -> Self {
        Self::new("kotlin", "Boolean")
    }

    pub fn byte() -> Self {
        Self::new("kotlin", "Byte")
    }

    pub fn char() -> Self {
        Self::new("kotlin", "Char")
    }

    pub fn short() -> Self {
        Self::new("kotlin", "Short")
    }

    pub fn int() -> Self {
        Self::new("kotlin", "Int")
    }

    pub fn long() -> Self {
        Self::new("kotlin", "Long")
    }

    pub fn float() -> Self {
        Self::new("kotlin", "Float")
    }

    pub fn double() -> Self {
        Self::new("kotlin", "Double")
    }

    pub fn string() -> Self {
        Self::new("kotlin", "String")
    }

    pub fn pair() -> Self {
        Self::new("kotlin", "Pair")
    }

    pub fn list() -> Self {
        Self::new("kotlin.collections", "List")
    }

    pub fn serializable() -> Self {
        Self::new("kotlinx.serialization", "Serializable")
    }

    pub fn flow() -> Self {
        Self::new("kotlinx.coroutines.flow", "Flow")
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Classes exposed by the krosbridge runtime
pub mod krosbridge {
    use super::{ClassName, KROSBRIDGE_PACKAGE};

    fn runtime(subpackage: &str, simple: &str) -> ClassName {
        ClassName::new(format!("{}.{}", KROSBRIDGE_PACKAGE, subpackage), simple)
    }

    pub fn ros() -> ClassName {
        ClassName::new(KROSBRIDGE_PACKAGE, "Ros")
    }

    pub fn message() -> ClassName {
        runtime("topic", "Message")
    }

    pub fn generic_topic() -> ClassName {
        runtime("topic", "GenericTopic")
    }

    pub fn service_request() -> ClassName {
        runtime("service", "ServiceRequest")
    }

    pub fn service_response() -> ClassName {
        runtime("service", "ServiceResponse")
    }

    pub fn generic_service() -> ClassName {
        runtime("service", "GenericService")
    }

    pub fn action_goal() -> ClassName {
        runtime("action", "ActionGoal")
    }

    pub fn action_feedback() -> ClassName {
        runtime("action", "ActionFeedback")
    }

    pub fn action_result() -> ClassName {
        runtime("action", "ActionResult")
    }

    pub fn action_type() -> ClassName {
        runtime("action", "ActionType")
    }

    pub fn generic_action() -> ClassName {
        runtime("action", "GenericAction")
    }
}

/// A possibly parameterized, possibly nullable Kotlin type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KotlinType {
    pub class: ClassName,
    pub args: Vec<KotlinType>,
    pub nullable: bool,
}

impl KotlinType {
    pub fn parameterized(class: ClassName, args: Vec<KotlinType>) -> Self {
        Self {
            class,
            args,
            nullable: false,
        }
    }

    pub fn list(element: KotlinType) -> Self {
        Self::parameterized(ClassName::list(), vec![element])
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn is_list(&self) -> bool {
        self.class == ClassName::list()
    }

    /// Rendering with every class fully qualified
    pub fn canonical(&self) -> String {
        self.render_with(&mut |class| class.canonical())
    }

    pub(crate) fn render_with(&self, name_of: &mut dyn FnMut(&ClassName) -> String) -> String {
        let mut out = name_of(&self.class);
        if !self.args.is_empty() {
            let mut args = Vec::with_capacity(self.args.len());
            for arg in &self.args {
                args.push(arg.render_with(&mut *name_of));
            }
            out.push('<');
            out.push_str(&args.join(", "));
            out.push('>');
        }
        if self.nullable {
            out.push('?');
        }
        out
    }
}

impl From<ClassName> for KotlinType {
    fn from(class: ClassName) -> Self {
        Self::parameterized(class, Vec::new())
    }
}

impl fmt::Display for KotlinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

const HARD_KEYWORDS: &[&str] = &[
    "as",
    "break",
    "class",
    "continue",
    "do",
    "else",
    "false",
    "for",
    "fun",
    "if",
    "in",
    "interface",
    "is",
    "null",
    "object",
    "package",
    "return",
    "super",
    "this",
    "throw",
    "true",
    "try",
    "typealias",
    "typeof",
    "val",
    "var",
    "when",
    "while",
];

/// Escape Kotlin hard keywords (`object`, `in`, ...) with backticks
pub fn escape_identifier(name: &str) -> String {
    if HARD_KEYWORDS.contains(&name) {
        format!("`{}`", name)
    } else {
        name.to_string()
    }
}

/// Quoted Kotlin string literal
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
