//! Serializer for the subset of HCL needed to describe Terraform resources.
//!
//! Resource blocks are assembled with a small builder API and written out with
//! two-space indentation, one attribute per line. Output depends only on the
//! order in which structures were added, so identical input always yields
//! byte-identical text.
//!
//! ```rust
//! use tf_export_core::hcl::{Block, Expression};
//!
//! let block = Block::new("resource")
//!     .with_label("github_repository")
//!     .with_label("acme-tools")
//!     .attribute("provider", Expression::traversal(["github", "acme"]))
//!     .attribute("name", "tools")
//!     .attribute("topics", Expression::string_list(Vec::<String>::new()));
//!
//! assert_eq!(
//!     block.to_string(),
//!     "resource \"github_repository\" \"acme-tools\" {\n  provider = github.acme\n  name = \"tools\"\n  topics = []\n}\n"
//! );
//! ```

use std::fmt::{self, Write};

#[cfg(test)]
#[path = "hcl_tests.rs"]
mod tests;

const INDENT: &str = "  ";

/// The right-hand side of an attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    Null,
    Bool(bool),
    Number(i64),
    /// A quoted string literal. Escaping happens on write.
    String(String),
    /// A dotted reference such as `local.github_policy.visibility`.
    Traversal(Vec<String>),
    /// A tuple. Empty tuples are written as `[]`, others one element per line
    /// with a trailing comma.
    Array(Vec<Expression>),
}

impl Expression {
    /// Builds a dotted reference from its segments.
    pub fn traversal<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expression::Traversal(segments.into_iter().map(Into::into).collect())
    }

    /// Builds a tuple of string literals, keeping the input order.
    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expression::Array(
            items
                .into_iter()
                .map(|s| Expression::String(s.into()))
                .collect(),
        )
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::Bool(value)
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Expression::Number(value)
    }
}

impl From<u32> for Expression {
    fn from(value: u32) -> Self {
        Expression::Number(i64::from(value))
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Expression::String(value.to_string())
    }
}

impl From<String> for Expression {
    fn from(value: String) -> Self {
        Expression::String(value)
    }
}

impl<T: Into<Expression>> From<Option<T>> for Expression {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Expression::Null)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expression(f, self, 0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Structure {
    Attribute { key: String, expr: Expression },
    Block(Block),
    BlankLine,
}

/// A block: an identifier, zero or more quoted labels and a body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    identifier: String,
    labels: Vec<String>,
    body: Vec<Structure>,
}

impl Block {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            labels: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, expr: impl Into<Expression>) -> Self {
        self.body.push(Structure::Attribute {
            key: key.into(),
            expr: expr.into(),
        });
        self
    }

    pub fn block(mut self, block: Block) -> Self {
        self.body.push(Structure::Block(block));
        self
    }

    /// Adds an empty line between groups of related structures.
    pub fn blank_line(mut self) -> Self {
        self.body.push(Structure::BlankLine);
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the expression of the first attribute named `key`.
    pub fn get_attribute(&self, key: &str) -> Option<&Expression> {
        self.body.iter().find_map(|s| match s {
            Structure::Attribute { key: k, expr } if k == key => Some(expr),
            _ => None,
        })
    }

    /// Returns the first nested block with the given identifier.
    pub fn get_block(&self, identifier: &str) -> Option<&Block> {
        self.body.iter().find_map(|s| match s {
            Structure::Block(b) if b.identifier == identifier => Some(b),
            _ => None,
        })
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, self, 0)
    }
}

fn write_indent<W: Write>(out: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str(INDENT)?;
    }
    Ok(())
}

fn write_block<W: Write>(out: &mut W, block: &Block, depth: usize) -> fmt::Result {
    write_indent(out, depth)?;
    out.write_str(&block.identifier)?;
    for label in &block.labels {
        out.write_char(' ')?;
        write_quoted(out, label)?;
    }

    if block.body.is_empty() {
        return out.write_str(" {}\n");
    }

    out.write_str(" {\n")?;
    for structure in &block.body {
        match structure {
            Structure::Attribute { key, expr } => {
                write_indent(out, depth + 1)?;
                write!(out, "{} = ", key)?;
                write_expression(out, expr, depth + 1)?;
                out.write_char('\n')?;
            }
            Structure::Block(nested) => write_block(out, nested, depth + 1)?,
            Structure::BlankLine => out.write_char('\n')?,
        }
    }
    write_indent(out, depth)?;
    out.write_str("}\n")
}

fn write_expression<W: Write>(out: &mut W, expr: &Expression, depth: usize) -> fmt::Result {
    match expr {
        Expression::Null => out.write_str("null"),
        Expression::Bool(b) => write!(out, "{}", b),
        Expression::Number(n) => write!(out, "{}", n),
        Expression::String(s) => write_quoted(out, s),
        Expression::Traversal(segments) => out.write_str(&segments.join(".")),
        Expression::Array(items) if items.is_empty() => out.write_str("[]"),
        Expression::Array(items) => {
            out.write_str("[\n")?;
            for item in items {
                write_indent(out, depth + 1)?;
                write_expression(out, item, depth + 1)?;
                out.write_str(",\n")?;
            }
            write_indent(out, depth)?;
            out.write_char(']')
        }
    }
}

/// Writes `value` as a quoted HCL string.
///
/// `${` and `%{` are doubled so text coming from GitHub is never read as a
/// template interpolation or directive.
fn write_quoted<W: Write>(out: &mut W, value: &str) -> fmt::Result {
    out.write_char('"')?;
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.write_str("\\\\")?,
            '"' => out.write_str("\\\"")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.write_char(c)?;
                out.write_char(c)?;
            }
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}
