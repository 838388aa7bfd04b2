//! Tree-sitter frontend for TypeScript sources.
//!
//! This module owns everything that touches the parser directly:
//! - Parsing files into trees (`.ts`/`.mts` with the TypeScript grammar,
//!   `.tsx` with the TSX grammar)
//! - Syntax pre-flight checks
//! - Enumerating exported declarations, file-scope type declarations and
//!   module links (imports and re-exports)
//! - The compilation unit that keeps every tree alive for a run
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │ Source Files    │────▶│ Analyzer     │────▶│ CompilationUnit │
//! └─────────────────┘     │ (TypeScript) │     │ (ParsedFiles)   │
//!                         └──────────────┘     └─────────────────┘
//!                                                      │
//!                                                      ▼
//!                                              ┌───────────────┐
//!                                              │ docgen        │
//!                                              └───────────────┘
//! ```

mod facts;
mod languages;
mod traits;
mod unit;

pub use facts::{
    ExportKind, ExportedDeclaration, LinkedName, ModuleLink, ModuleLinkKind, Span, SyntaxIssue,
    TypeDeclaration, TypeDeclarationKind,
};
pub use languages::{get_analyzer, register_analyzers, registered_extensions, TypeScriptAnalyzer};
pub use traits::{Dialect, LanguageAnalyzer, ParsedFile};
pub use unit::CompilationUnit;
