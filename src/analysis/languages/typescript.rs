//! TypeScript/TSX language analyzer using tree-sitter.

use std::collections::HashSet;
use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use crate::analysis::{
    Dialect, ExportKind, ExportedDeclaration, LanguageAnalyzer, LinkedName, ModuleLink,
    ModuleLinkKind, ParsedFile, Span, SyntaxIssue, TypeDeclaration, TypeDeclarationKind,
};
use crate::error::{DocgenError, Result};

/// Tree-sitter query for named type declarations.
const TYPE_DECLARATION_QUERY: &str = r#"
; interface Props { ... }
(interface_declaration
  name: (type_identifier) @interface_name
) @interface

; type Props = { ... }
(type_alias_declaration
  name: (type_identifier) @type_alias_name
) @type_alias
"#;

/// Longest snippet of offending source quoted in a syntax error.
const SNIPPET_LEN: usize = 24;

pub struct TypeScriptAnalyzer {
    typescript: Language,
    tsx: Language,
}

impl TypeScriptAnalyzer {
    pub fn new() -> Self {
        Self {
            typescript: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            tsx: tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    fn language(&self, dialect: Dialect) -> &Language {
        match dialect {
            Dialect::TypeScript => &self.typescript,
            Dialect::Tsx => &self.tsx,
        }
    }

    fn dialect_for(path: &Path) -> Dialect {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsx") => Dialect::Tsx,
            _ => Dialect::TypeScript,
        }
    }

    fn create_parser(&self, dialect: Dialect) -> Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(self.language(dialect))?;
        Ok(parser)
    }

    /// Resolve `export default Name` / `export { Name }` to the top-level
    /// declaration of `Name` in the same file.
    fn find_local_declaration<'a>(
        &self,
        parsed: &'a ParsedFile,
        name: &str,
    ) -> Option<ExportedDeclaration<'a>> {
        let root = parsed.root();
        let mut cursor = root.walk();

        for stmt in root.named_children(&mut cursor) {
            let decl = if stmt.kind() == "export_statement" {
                match stmt.child_by_field_name("declaration") {
                    Some(d) => d,
                    None => continue,
                }
            } else {
                stmt
            };

            match decl.kind() {
                "function_declaration" | "generator_function_declaration" => {
                    let found = decl
                        .child_by_field_name("name")
                        .map(|n| parsed.node_text(n) == name)
                        .unwrap_or(false);
                    if found {
                        return Some(function_export(decl));
                    }
                }
                "lexical_declaration" | "variable_declaration" => {
                    let mut inner = decl.walk();
                    let found = decl
                        .named_children(&mut inner)
                        .filter(|d| d.kind() == "variable_declarator")
                        .find(|d| {
                            d.child_by_field_name("name")
                                .map(|n| n.kind() == "identifier" && parsed.node_text(n) == name)
                                .unwrap_or(false)
                        });
                    if let Some(declarator) = found {
                        return Some(variable_export(declarator));
                    }
                }
                _ => {}
            }
        }

        None
    }

    fn exports_from_declaration<'a>(&self, decl: Node<'a>, out: &mut Vec<ExportedDeclaration<'a>>) {
        match decl.kind() {
            "function_declaration" | "generator_function_declaration" => {
                out.push(function_export(decl));
            }
            "lexical_declaration" | "variable_declaration" => {
                let mut cursor = decl.walk();
                out.extend(
                    decl.named_children(&mut cursor)
                        .filter(|d| d.kind() == "variable_declarator")
                        .map(variable_export),
                );
            }
            // Classes, interfaces, enums and ambient declarations are never components.
            _ => {}
        }
    }

    fn exports_from_value<'a>(
        &self,
        parsed: &'a ParsedFile,
        value: Node<'a>,
        out: &mut Vec<ExportedDeclaration<'a>>,
    ) {
        match value.kind() {
            "identifier" => {
                let name = parsed.node_text(value);
                match self.find_local_declaration(parsed, name) {
                    Some(decl) => out.push(decl),
                    None => tracing::debug!(
                        name,
                        path = %parsed.path.display(),
                        "default export does not refer to a local declaration"
                    ),
                }
            }
            "function_expression" | "function" => {
                if value.child_by_field_name("name").is_some() {
                    out.push(function_export(value));
                } else {
                    out.push(ExportedDeclaration {
                        node: value,
                        kind: ExportKind::AnonymousFunction,
                        has_name: false,
                        span: Span::from_node(value),
                    });
                }
            }
            _ => {}
        }
    }

    fn exports_from_clause<'a>(
        &self,
        parsed: &'a ParsedFile,
        clause: Node<'a>,
        out: &mut Vec<ExportedDeclaration<'a>>,
    ) {
        let mut cursor = clause.walk();
        for specifier in clause.named_children(&mut cursor) {
            if specifier.kind() != "export_specifier" {
                continue;
            }
            let Some(name_node) = specifier.child_by_field_name("name") else {
                continue;
            };
            let name = parsed.node_text(name_node);
            if let Some(decl) = self.find_local_declaration(parsed, name) {
                out.push(decl);
            }
        }
    }
}

fn function_export(node: Node) -> ExportedDeclaration {
    ExportedDeclaration {
        node,
        kind: ExportKind::Function,
        has_name: node.child_by_field_name("name").is_some(),
        span: Span::from_node(node),
    }
}

fn variable_export(node: Node) -> ExportedDeclaration {
    ExportedDeclaration {
        node,
        kind: ExportKind::Variable,
        has_name: node
            .child_by_field_name("name")
            .map(|n| n.kind() == "identifier")
            .unwrap_or(false),
        span: Span::from_node(node),
    }
}

/// Text of an identifier or a quoted string, without the quotes.
fn name_text(parsed: &ParsedFile, node: Node) -> String {
    parsed
        .node_text(node)
        .trim_matches(|c| c == '\'' || c == '"')
        .to_string()
}

/// Names bound by `import Default, { A, B as C } from ...`.
fn import_clause_names(parsed: &ParsedFile, clause: Node, out: &mut Vec<LinkedName>) {
    let mut cursor = clause.walk();
    for child in clause.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => out.push(LinkedName {
                local: parsed.node_text(child).to_string(),
                imported: "default".to_string(),
            }),
            "named_imports" => specifier_names(parsed, child, "import_specifier", out),
            // `* as ns` binds a namespace, not a name.
            _ => {}
        }
    }
}

/// `{ A, B as C }` lists of import or export specifiers.
fn specifier_names(parsed: &ParsedFile, list: Node, kind: &str, out: &mut Vec<LinkedName>) {
    let mut cursor = list.walk();
    for specifier in list.named_children(&mut cursor) {
        if specifier.kind() != kind {
            continue;
        }
        let Some(name) = specifier.child_by_field_name("name") else {
            continue;
        };
        let imported = name_text(parsed, name);
        let local = specifier
            .child_by_field_name("alias")
            .map(|alias| name_text(parsed, alias))
            .unwrap_or_else(|| imported.clone());
        out.push(LinkedName { local, imported });
    }
}

fn snippet(parsed: &ParsedFile, node: Node) -> String {
    let text = parsed.node_text(node).trim();
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() > SNIPPET_LEN {
        let cut: String = first_line.chars().take(SNIPPET_LEN).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}

impl Default for TypeScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for TypeScriptAnalyzer {
    fn language_id(&self) -> &'static str {
        "typescript"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["ts", "tsx", "mts", "cts"]
    }

    fn parse(&self, path: &Path, source: &[u8]) -> Result<ParsedFile> {
        let dialect = Self::dialect_for(path);
        let mut parser = self.create_parser(dialect)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| DocgenError::ParseFailed {
                path: path.to_path_buf(),
            })?;

        Ok(ParsedFile {
            tree,
            source: source.to_vec(),
            path: path.to_path_buf(),
            dialect,
        })
    }

    fn syntax_issues(&self, parsed: &ParsedFile) -> Vec<SyntaxIssue> {
        let mut issues = Vec::new();
        let root = parsed.root();
        if !root.has_error() {
            return issues;
        }

        // Pre-order walk so issues come out in source order.
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let line = node.start_position().row + 1;
            if node.is_missing() {
                issues.push(SyntaxIssue {
                    line,
                    message: format!("'{}' expected", node.kind()),
                });
                continue;
            }
            if node.is_error() {
                let text = snippet(parsed, node);
                let message = if text.is_empty() {
                    "Unexpected end of input".to_string()
                } else {
                    format!("Unexpected '{}'", text)
                };
                issues.push(SyntaxIssue { line, message });
                continue;
            }
            if node.has_error() {
                let mut cursor = node.walk();
                let children: Vec<_> = node.children(&mut cursor).collect();
                stack.extend(children.into_iter().rev());
            }
        }

        issues
    }

    fn exported_declarations<'a>(
        &self,
        parsed: &'a ParsedFile,
    ) -> Result<Vec<ExportedDeclaration<'a>>> {
        let root = parsed.root();
        let mut cursor = root.walk();
        let mut exports = Vec::new();

        for stmt in root.named_children(&mut cursor) {
            if stmt.kind() != "export_statement" {
                continue;
            }
            // `export ... from './other'` re-exports another module.
            if stmt.child_by_field_name("source").is_some() {
                continue;
            }

            if let Some(decl) = stmt.child_by_field_name("declaration") {
                self.exports_from_declaration(decl, &mut exports);
            } else if let Some(value) = stmt.child_by_field_name("value") {
                self.exports_from_value(parsed, value, &mut exports);
            } else {
                let mut inner = stmt.walk();
                let clause = stmt
                    .named_children(&mut inner)
                    .find(|n| n.kind() == "export_clause");
                if let Some(clause) = clause {
                    self.exports_from_clause(parsed, clause, &mut exports);
                }
            }
        }

        // A declaration exported twice (`export { A }; export default A;`)
        // is one candidate.
        let mut seen = HashSet::new();
        exports.retain(|e| seen.insert(e.node.id()));

        Ok(exports)
    }

    fn type_declarations<'a>(&self, parsed: &'a ParsedFile) -> Result<Vec<TypeDeclaration<'a>>> {
        let language = self.language(parsed.dialect);
        let query = Query::new(language, TYPE_DECLARATION_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, parsed.root(), &parsed.source[..]);

        let mut declarations = Vec::new();

        while let Some(m) = matches.next() {
            for capture in m.captures {
                let capture_name = query.capture_names()[capture.index as usize];
                let kind = match capture_name {
                    "interface" => TypeDeclarationKind::Interface,
                    "type_alias" => TypeDeclarationKind::TypeAlias,
                    _ => continue,
                };
                let node = capture.node;
                if !is_file_scope(node) {
                    continue;
                }
                declarations.push(TypeDeclaration {
                    node,
                    kind,
                    span: Span::from_node(node),
                });
            }
        }

        declarations.sort_by_key(|d| d.span.start_byte);
        Ok(declarations)
    }

    fn module_links(&self, parsed: &ParsedFile) -> Result<Vec<ModuleLink>> {
        let root = parsed.root();
        let mut cursor = root.walk();
        let mut links = Vec::new();

        for stmt in root.named_children(&mut cursor) {
            let kind = match stmt.kind() {
                "import_statement" => ModuleLinkKind::Import,
                "export_statement" => ModuleLinkKind::ReExport,
                _ => continue,
            };
            let Some(source) = stmt.child_by_field_name("source") else {
                continue;
            };

            let mut link = ModuleLink {
                kind,
                specifier: name_text(parsed, source),
                names: Vec::new(),
                wildcard: false,
            };
            let mut inner = stmt.walk();
            for child in stmt.children(&mut inner) {
                match child.kind() {
                    "import_clause" => import_clause_names(parsed, child, &mut link.names),
                    "export_clause" => {
                        specifier_names(parsed, child, "export_specifier", &mut link.names)
                    }
                    "*" => link.wildcard = true,
                    _ => {}
                }
            }
            links.push(link);
        }

        Ok(links)
    }
}

/// Whether a declaration sits directly in the program, possibly behind `export`.
fn is_file_scope(node: Node) -> bool {
    match node.parent() {
        Some(parent) if parent.kind() == "program" => true,
        Some(parent) if parent.kind() == "export_statement" => parent
            .parent()
            .map(|p| p.kind() == "program")
            .unwrap_or(false),
        _ => false,
    }
}
