use crate::code_writer::CodeWriter;
use crate::error::Result;
use crate::kotlin::{ClassName, escape_identifier};
use crate::resolver::{RosPrimitive, TypeResolver, is_well_known};
use crate::types::{Field, TypeName};

use super::Generator;
use super::source::KotlinFile;

/// Render the source of one payload class.
///
/// Variable fields become `public val` constructor properties in declaration
/// order; constants go into the companion object with their literal text
/// copied verbatim. Field types are resolved against `enclosing`.
pub fn render_payload_class(
    resolver: &TypeResolver,
    class: &ClassName,
    fields: &[Field],
    enclosing: &[String],
    base: Option<&ClassName>,
) -> Result<String> {
    let mut file = KotlinFile::new(class.clone());

    // Constant types are checked before anything is rendered
    let mut constants = Vec::new();
    for field in fields.iter().filter(|f| f.is_constant()) {
        let ty = resolver.resolve_constant(field)?;
        let value = field.value.as_deref().unwrap_or_default();
        constants.push(format!(
            "public val {}: {} = {}",
            escape_identifier(&field.name),
            file.type_name(&ty),
            value
        ));
    }

    let properties: Vec<String> = fields
        .iter()
        .filter(|f| f.is_variable())
        .map(|field| {
            let ty = resolver.resolve(field, enclosing);
            format!(
                "public val {}: {}",
                escape_identifier(&field.name),
                file.type_name(&ty)
            )
        })
        .collect();

    let serializable = file.name(&ClassName::serializable());
    let supertype = base
        .map(|b| format!(" : {}()", file.name(b)))
        .unwrap_or_default();
    let name = escape_identifier(&class.simple);

    let mut w = CodeWriter::new(String::new());
    w.writeln(&format!("@{}", serializable))?;
    let header = if properties.is_empty() {
        format!("public class {}{}", name, supertype)
    } else {
        w.writeln(&format!("public data class {}(", name))?;
        {
            let _indent = w.indent();
            let last = properties.len() - 1;
            for (i, property) in properties.iter().enumerate() {
                if i == last {
                    w.writeln(property)?;
                } else {
                    w.writeln(&format!("{},", property))?;
                }
            }
        }
        format!("){}", supertype)
    };

    if constants.is_empty() {
        w.writeln(&header)?;
    } else {
        w.block(&header, |w| {
            w.block("public companion object", |w| {
                for constant in &constants {
                    w.writeln(constant)?;
                }
                Ok(())
            })
        })?;
    }

    Ok(file.finish(&w.into_inner()))
}

impl Generator {
    /// Emit the payload class for a schema-level type, plus every inline
    /// complex type its fields define. The schema's own class is always
    /// written, even over an inline class of the same name.
    pub fn emit_payload_class(
        &mut self,
        name: &TypeName,
        fields: &[Field],
        base: Option<&ClassName>,
    ) -> Result<()> {
        let class = self.resolver.class_for(name);
        self.emit_class(&class, fields, &name.namespace, base, false)
    }

    fn emit_class(
        &mut self,
        class: &ClassName,
        fields: &[Field],
        enclosing: &[String],
        base: Option<&ClassName>,
        nested: bool,
    ) -> Result<()> {
        if nested && self.already_emitted(class) {
            return Ok(());
        }
        let contents = render_payload_class(&self.resolver, class, fields, enclosing, base)?;
        self.mark_emitted(class);

        for field in fields.iter().filter(|f| f.is_variable() && f.is_complex()) {
            self.emit_nested_class(field, enclosing)?;
        }

        self.write_source(class, &contents)?;
        Ok(())
    }

    /// Inline types are placed where references to them resolve; their own
    /// fields resolve against the field's declared namespace, or the
    /// enclosing one when it declares none. Types of the well-known families
    /// already ship with krosbridge and are never emitted.
    fn emit_nested_class(&mut self, field: &Field, enclosing: &[String]) -> Result<()> {
        if RosPrimitive::lookup(&field.ty).is_some() {
            tracing::warn!("Ignoring nested fields of primitive field `{}`", field);
            return Ok(());
        }
        if is_well_known(&field.ty) {
            tracing::debug!("Using the krosbridge peer type for nested `{}`", field);
            return Ok(());
        }
        let class = self.resolver.resolve_scalar(&field.ty, enclosing).class;
        let namespace = if field.ty.has_namespace() {
            field.ty.namespace.clone()
        } else {
            enclosing.to_vec()
        };
        self.emit_class(&class, &field.children, &namespace, None, true)
    }
}
