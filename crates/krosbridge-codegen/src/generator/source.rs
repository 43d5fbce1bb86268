//! One generated `.kt` file: package header, imports and simple-name bookkeeping.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::kotlin::{ClassName, KotlinType, escape_identifier};

pub const SOURCE_EXTENSION: &str = "kt";

/// Dotted name with every segment keyword-escaped
fn escape_qualified(name: &str) -> String {
    name.split('.')
        .map(escape_identifier)
        .collect::<Vec<_>>()
        .join(".")
}

/// Location of the source file declaring `class` beneath `root`
pub fn source_path(root: &Path, class: &ClassName) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in class.package.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{}.{}", class.simple, SOURCE_EXTENSION));
    path
}

/// Source file declaring exactly one top-level class.
///
/// Every referenced class outside the file's package is imported explicitly,
/// `kotlin.*` included, so that same-package declarations never shadow it.
/// A simple name already bound to another class is written fully qualified.
pub struct KotlinFile {
    class: ClassName,
    names: BTreeMap<String, ClassName>,
}

impl KotlinFile {
    pub fn new(class: ClassName) -> Self {
        let mut names = BTreeMap::new();
        names.insert(class.simple.clone(), class.clone());
        Self { class, names }
    }

    pub fn class(&self) -> &ClassName {
        &self.class
    }

    /// Name to write for `class` in this file's body
    pub fn name(&mut self, class: &ClassName) -> String {
        if class.package.is_empty() {
            return escape_identifier(&class.simple);
        }
        match self.names.get(&class.simple) {
            Some(bound) if bound == class => escape_identifier(&class.simple),
            Some(_) => escape_qualified(&class.canonical()),
            None => {
                self.names.insert(class.simple.clone(), class.clone());
                escape_identifier(&class.simple)
            }
        }
    }

    pub fn type_name(&mut self, ty: &KotlinType) -> String {
        ty.render_with(&mut |class| self.name(class))
    }

    /// Sorted import list
    pub fn imports(&self) -> Vec<String> {
        let mut imports: Vec<String> = self
            .names
            .values()
            .filter(|class| !class.package.is_empty() && class.package != self.class.package)
            .map(|class| escape_qualified(&class.canonical()))
            .collect();
        imports.sort();
        imports
    }

    /// Complete file contents around an already rendered body
    pub fn finish(&self, body: &str) -> String {
        let mut out = String::new();
        if !self.class.package.is_empty() {
            out.push_str(&format!("package {}\n\n", escape_qualified(&self.class.package)));
        }
        let imports = self.imports();
        for import in &imports {
            out.push_str(&format!("import {}\n", import));
        }
        if !imports.is_empty() {
            out.push('\n');
        }
        out.push_str(body);
        out
    }
}
