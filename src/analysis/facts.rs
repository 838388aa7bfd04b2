//! Fact structures extracted from a parsed source file.

use std::fmt;

use tree_sitter::Node;

/// Source location span with byte offsets and line/column positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: Node) -> Self {
        let start = node.start_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Syntactic form of an exported declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    /// `function Foo() {}` (or a named default-exported function expression).
    Function,
    /// A `variable_declarator` inside a `const`/`let`/`var` statement.
    Variable,
    /// `export default function () {}`.
    AnonymousFunction,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Function => "function",
            ExportKind::Variable => "variable",
            ExportKind::AnonymousFunction => "anonymous function",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declaration exported from a file, resolved to its local definition.
#[derive(Debug, Clone, Copy)]
pub struct ExportedDeclaration<'tree> {
    /// The declaring node (`function_declaration`, `function_expression` or
    /// `variable_declarator`).
    pub node: Node<'tree>,
    pub kind: ExportKind,
    /// Whether the name node is a plain identifier. Destructured variables
    /// and anonymous functions have no resolvable name.
    pub has_name: bool,
    pub span: Span,
}

/// Kind of a named type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDeclarationKind {
    Interface,
    TypeAlias,
}

/// An interface or type alias declared at file scope.
#[derive(Debug, Clone, Copy)]
pub struct TypeDeclaration<'tree> {
    pub node: Node<'tree>,
    pub kind: TypeDeclarationKind,
    pub span: Span,
}

/// A syntax problem reported by the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    /// Line number (1-indexed).
    pub line: usize,
    pub message: String,
}

/// Whether a module link brings names in or passes them on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleLinkKind {
    /// `import { A } from './a'`
    Import,
    /// `export { A } from './a'` or `export * from './a'`
    ReExport,
}

/// One name carried across a module link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedName {
    /// Name as seen from the file holding the link.
    pub local: String,
    /// Name exported by the target module (`default` for default imports).
    pub imported: String,
}

/// An `import ... from` or `export ... from` statement at file scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLink {
    pub kind: ModuleLinkKind,
    /// Module specifier without quotes, e.g. `./types`.
    pub specifier: String,
    pub names: Vec<LinkedName>,
    /// `export * from` passes on every export of the target.
    pub wildcard: bool,
}

impl ModuleLink {
    /// Whether the specifier points into the project rather than a package.
    pub fn is_relative(&self) -> bool {
        let s = self.specifier.as_str();
        s == "." || s == ".." || s.starts_with("./") || s.starts_with("../")
    }
}
