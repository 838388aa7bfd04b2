//! Error taxonomy for documentation extraction.
//!
//! Every variant here is fatal: it aborts the file being processed and, via
//! the orchestrator, the whole run. Soft omissions (no comment, no default,
//! unknown type shapes) never surface as errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a compilation unit or extracting docs from it.
#[derive(Error, Debug)]
pub enum DocgenError {
    #[error("{message} on line {line} in {}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("exported declaration on line {line} in {} has no resolvable name", path.display())]
    UnnamedComponent { path: PathBuf, line: usize },

    #[error("no component function found for `{name}` in {}", path.display())]
    MissingComponentFunction { path: PathBuf, name: String },

    #[error("cannot resolve props type `{name}` used in {}", path.display())]
    UnresolvedTypeReference { path: PathBuf, name: String },

    #[error("Multiple exported component definitions found in {}", path.display())]
    MultipleComponents { path: PathBuf },

    #[error("{message} on line {line} in {}", path.display())]
    DocComment {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("no parser available for {}", path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("failed to parse {}", path.display())]
    ParseFailed { path: PathBuf },

    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("invalid tree-sitter query: {0}")]
    Query(#[from] tree_sitter::QueryError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DocgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_components_message() {
        let err = DocgenError::MultipleComponents {
            path: PathBuf::from("src/Button.tsx"),
        };
        assert_eq!(
            err.to_string(),
            "Multiple exported component definitions found in src/Button.tsx"
        );
    }

    #[test]
    fn test_syntax_message_names_file_and_line() {
        let err = DocgenError::Syntax {
            path: PathBuf::from("a.tsx"),
            line: 3,
            message: "Unexpected token".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected token on line 3 in a.tsx");
    }
}
