//! Language-specific analyzer implementations.

mod typescript;

pub use typescript::TypeScriptAnalyzer;

use super::LanguageAnalyzer;
use once_cell::sync::OnceCell;

/// Static storage for TypeScript analyzer.
static TYPESCRIPT_ANALYZER: OnceCell<TypeScriptAnalyzer> = OnceCell::new();

/// Register all available language analyzers.
///
/// This is idempotent - calling it multiple times is safe.
pub fn register_analyzers() {
    TYPESCRIPT_ANALYZER.get_or_init(TypeScriptAnalyzer::new);
}

/// Get an analyzer for the given file extension (without dot).
///
/// Returns None if no analyzer is registered for the extension.
pub fn get_analyzer(ext: &str) -> Option<&'static dyn LanguageAnalyzer> {
    register_analyzers();

    TYPESCRIPT_ANALYZER
        .get()
        .filter(|a| a.handles_extension(ext))
        .map(|a| a as &'static dyn LanguageAnalyzer)
}

/// Get all registered file extensions.
pub fn registered_extensions() -> Vec<String> {
    register_analyzers();

    TYPESCRIPT_ANALYZER
        .get()
        .map(|a| a.file_extensions().iter().map(|e| e.to_string()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_analyzer_by_extension() {
        assert_eq!(get_analyzer("tsx").unwrap().language_id(), "typescript");
        assert_eq!(get_analyzer("ts").unwrap().language_id(), "typescript");
        assert!(get_analyzer("py").is_none());
    }

    #[test]
    fn test_registered_extensions() {
        let exts = registered_extensions();
        assert!(exts.contains(&"ts".to_string()));
        assert!(exts.contains(&"tsx".to_string()));
    }
}
