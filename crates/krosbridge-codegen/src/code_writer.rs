//! Indentation-tracking writer for emitting Kotlin source.
//!
//! Indentation is scoped with guards: `indent()` bumps the level and the
//! returned guard restores it on drop. The level lives in an `Rc<Cell<_>>`
//! so a live guard does not hold a borrow of the writer.
//!
//! ```
//! use krosbridge_codegen::code_writer::CodeWriter;
//!
//! let mut w = CodeWriter::new(String::new());
//! w.block("public class Foo", |w| w.writeln("public val x: Int = 1"))
//!     .unwrap();
//! let out = w.into_inner();
//! assert_eq!(out, "public class Foo {\n  public val x: Int = 1\n}\n");
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

const INDENT: &str = "  ";

pub struct CodeWriter<W> {
    writer: W,
    indent_level: Rc<Cell<usize>>,
    at_line_start: bool,
}

impl<W: fmt::Write> CodeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            indent_level: Rc::new(Cell::new(0)),
            at_line_start: true,
        }
    }

    /// Write text without a newline, indenting if at line start
    pub fn write(&mut self, text: &str) -> fmt::Result {
        if text.is_empty() {
            return Ok(());
        }
        if self.at_line_start {
            for _ in 0..self.indent_level.get() {
                self.writer.write_str(INDENT)?;
            }
            self.at_line_start = false;
        }
        self.writer.write_str(text)
    }

    pub fn writeln(&mut self, text: &str) -> fmt::Result {
        self.write(text)?;
        self.writer.write_char('\n')?;
        self.at_line_start = true;
        Ok(())
    }

    pub fn blank_line(&mut self) -> fmt::Result {
        self.writer.write_char('\n')?;
        self.at_line_start = true;
        Ok(())
    }

    /// Indentation increases while the guard is alive
    pub fn indent(&mut self) -> IndentGuard {
        self.indent_level.set(self.indent_level.get() + 1);
        IndentGuard {
            indent_level: Rc::clone(&self.indent_level),
        }
    }

    /// `header {`, indented body, `}`
    pub fn block<F>(&mut self, header: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.writeln(&format!("{} {{", header))?;
        {
            let _indent = self.indent();
            body(self)?;
        }
        self.writeln("}")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub struct IndentGuard {
    indent_level: Rc<Cell<usize>>,
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        let level = self.indent_level.get();
        self.indent_level.set(level.saturating_sub(1));
    }
}
