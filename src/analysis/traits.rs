//! Core traits for language analysis.

use std::path::{Path, PathBuf};

use tree_sitter::Node;

use super::{ExportedDeclaration, ModuleLink, SyntaxIssue, TypeDeclaration};
use crate::error::Result;

/// Grammar a file was parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

/// Holds a parsed tree-sitter tree and associated metadata.
///
/// The tree is kept alive for the whole run so that nodes from any file of
/// the compilation unit can be handed across module boundaries.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The original source code (kept for node text extraction).
    pub source: Vec<u8>,
    /// The file path as discovered.
    pub path: PathBuf,
    /// Grammar used for this file.
    pub dialect: Dialect,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// Root node of the tree.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

impl std::fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedFile")
            .field("path", &self.path)
            .field("dialect", &self.dialect)
            .finish()
    }
}

/// Language-specific analyzer trait.
///
/// # Thread Safety
///
/// tree_sitter::Parser is not Sync, so implementations create parsers as
/// needed instead of storing one.
pub trait LanguageAnalyzer: Send + Sync {
    /// Returns the language identifier (e.g., "typescript").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this analyzer handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse a source file into a tree-sitter tree.
    ///
    /// Partial parse errors are still returned as a valid tree with ERROR
    /// nodes; use [`LanguageAnalyzer::syntax_issues`] to find them.
    fn parse(&self, path: &Path, source: &[u8]) -> Result<ParsedFile>;

    /// All syntax errors in the file, in source order.
    fn syntax_issues(&self, parsed: &ParsedFile) -> Vec<SyntaxIssue>;

    /// Declarations exported from the file, resolved to their local definitions.
    fn exported_declarations<'a>(
        &self,
        parsed: &'a ParsedFile,
    ) -> Result<Vec<ExportedDeclaration<'a>>>;

    /// Interface and type alias declarations at file scope, in source order.
    fn type_declarations<'a>(&self, parsed: &'a ParsedFile) -> Result<Vec<TypeDeclaration<'a>>>;

    /// File-scope `import ... from` and `export ... from` statements, in
    /// source order.
    fn module_links(&self, parsed: &ParsedFile) -> Result<Vec<ModuleLink>>;

    /// Check if this analyzer handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
