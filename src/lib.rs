//! react-tsdoc - prop documentation for React function components.
//!
//! react-tsdoc reads TypeScript/TSX sources and, for every file exporting a
//! single component, produces a record of the component's summary and its
//! props: whether each is required, its destructuring default, its type as a
//! structured signature and its description from a `@prop` comment block.
//!
//! # Architecture
//!
//! The codebase uses tree-sitter for AST-based analysis:
//!
//! - `analysis`: Parsing, syntax checks and the compilation unit
//! - `tsdoc`: Documentation comment parser with configurable tags
//! - `docgen`: Component detection, prop tables and type signatures
//! - `config`: YAML configuration schema
//! - `report`: Output formatting (JSON, pretty)
//!
//! # Example
//!
//! ```no_run
//! use react_tsdoc::{parse_path, Config};
//!
//! let docs = parse_path("src/components", &Config::default()).unwrap();
//! for (file, doc) in &docs {
//!     println!("{file}: {} props", doc.props.len());
//! }
//! ```

use std::path::Path;

pub mod analysis;
pub mod cli;
pub mod config;
pub mod docgen;
pub mod error;
pub mod report;
pub mod tsdoc;

pub use analysis::{register_analyzers, CompilationUnit, LanguageAnalyzer, ParsedFile};
pub use config::Config;
pub use docgen::{
    generate_docs, generate_docs_for_file, ComponentDoc, DocOptions, ProjectDoc, PropRecord,
    TypeSignature,
};
pub use error::{DocgenError, Result};
pub use tsdoc::{TagDefinition, TagSet};

/// Document a file or directory, keying results relative to the current
/// working directory.
pub fn parse_path<P: AsRef<Path>>(path: P, config: &Config) -> Result<ProjectDoc> {
    let cwd = std::env::current_dir().map_err(|source| DocgenError::Io {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    parse_path_from(cwd, path, config)
}

/// Document a file or directory, keying results relative to `base_dir`.
pub fn parse_path_from<B, P>(base_dir: B, path: P, config: &Config) -> Result<ProjectDoc>
where
    B: AsRef<Path>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let canonical = |p: &Path| {
        p.canonicalize().map_err(|source| DocgenError::Io {
            path: p.to_path_buf(),
            source,
        })
    };
    let root = canonical(path)?;
    let base_dir = canonical(base_dir.as_ref())?;

    let files = if root.is_dir() {
        cli::collect_files(&root, &base_dir, config)?
    } else {
        vec![root]
    };

    let unit = CompilationUnit::load(&base_dir, &files)?;
    generate_docs(&unit, &config.doc_options())
}
