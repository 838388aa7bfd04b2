//! Component classification and node selection.

use tree_sitter::Node;

use crate::analysis::{ExportKind, ExportedDeclaration, ParsedFile};
use crate::error::{DocgenError, Result};

/// Name of an exported declaration, if it has a plain identifier.
pub fn component_name<'a>(decl: &ExportedDeclaration<'a>, file: &'a ParsedFile) -> Option<&'a str> {
    if !decl.has_name {
        return None;
    }
    decl.node
        .child_by_field_name("name")
        .map(|n| file.node_text(n))
}

/// Whether an exported declaration is a component.
///
/// Components are function or variable declarations whose name starts with
/// an upper-case letter. A declaration without a usable name is an error.
pub fn is_component(decl: &ExportedDeclaration, file: &ParsedFile) -> Result<bool> {
    let Some(name) = component_name(decl, file) else {
        return Err(DocgenError::UnnamedComponent {
            path: file.path.clone(),
            line: decl.span.start_line,
        });
    };

    match decl.kind {
        ExportKind::Function | ExportKind::Variable => {
            Ok(name.chars().next().is_some_and(char::is_uppercase))
        }
        ExportKind::AnonymousFunction => Ok(false),
    }
}

/// The function node implementing a component.
///
/// For `function C() {}` the declaration itself; for `const C = ...` the
/// first arrow function or function expression in the initializer, found
/// depth-first so wrappers like `memo(() => ...)` are looked through.
pub fn select_function_node<'a>(
    decl: &ExportedDeclaration<'a>,
    file: &'a ParsedFile,
) -> Result<Node<'a>> {
    let found = match decl.kind {
        ExportKind::Function | ExportKind::AnonymousFunction => Some(decl.node),
        ExportKind::Variable => decl
            .node
            .child_by_field_name("value")
            .and_then(first_function_in),
    };

    found.ok_or_else(|| DocgenError::MissingComponentFunction {
        path: file.path.clone(),
        name: component_name(decl, file).unwrap_or_default().to_string(),
    })
}

/// The statement a component's documentation comment precedes.
///
/// Comments attach to the outermost statement: the `export` wrapper when
/// there is one, otherwise the function declaration or the `const`/`let`
/// statement holding the declarator.
pub fn select_doc_comment_anchor<'a>(decl: &ExportedDeclaration<'a>) -> Node<'a> {
    let statement = match decl.kind {
        ExportKind::Variable => decl
            .node
            .parent()
            .filter(|p| matches!(p.kind(), "lexical_declaration" | "variable_declaration"))
            .unwrap_or(decl.node),
        ExportKind::Function | ExportKind::AnonymousFunction => decl.node,
    };

    match statement.parent() {
        Some(parent) if parent.kind() == "export_statement" => parent,
        _ => statement,
    }
}

fn first_function_in(node: Node) -> Option<Node> {
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if matches!(current.kind(), "arrow_function" | "function_expression") {
            return Some(current);
        }
        let mut cursor = current.walk();
        let children: Vec<_> = current.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}
