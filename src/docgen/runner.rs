//! Per-file and per-unit documentation assembly.

use tracing::{debug, info};

use super::binder::bind_descriptions;
use super::component::{
    component_name, is_component, select_doc_comment_anchor, select_function_node,
};
use super::params::{build_param_table, resolve_parameter_type};
use super::types::{ComponentDoc, ProjectDoc, PropTable};
use crate::analysis::{CompilationUnit, ParsedFile};
use crate::error::{DocgenError, Result};
use crate::tsdoc::TagSet;

/// Settings that change what extraction produces.
#[derive(Debug, Clone)]
pub struct DocOptions {
    /// Tags the comment parser accepts.
    pub tags: TagSet,
    /// Fail when a props type reference names nothing in the unit.
    pub strict_type_references: bool,
}

impl Default for DocOptions {
    fn default() -> Self {
        Self {
            tags: TagSet::standard(),
            strict_type_references: true,
        }
    }
}

/// Document the single exported component of `file`, if it has one.
pub fn generate_docs_for_file(
    file: &ParsedFile,
    unit: &CompilationUnit,
    options: &DocOptions,
) -> Result<Option<ComponentDoc>> {
    let analyzer = unit.analyzer(file)?;

    let mut components = Vec::new();
    for decl in analyzer.exported_declarations(file)? {
        if is_component(&decl, file)? {
            components.push(decl);
        } else {
            debug!(
                name = component_name(&decl, file).unwrap_or_default(),
                kind = %decl.kind,
                at = %decl.span,
                "export is not a component"
            );
        }
    }

    let decl = match components.as_slice() {
        [] => return Ok(None),
        [decl] => decl,
        _ => {
            return Err(DocgenError::MultipleComponents {
                path: file.path.clone(),
            })
        }
    };

    let function = select_function_node(decl, file)?;
    let table = match resolve_parameter_type(function, file, unit, options.strict_type_references)?
    {
        Some(parameter_type) => build_param_table(function, file, &parameter_type),
        None => PropTable::new(),
    };

    let anchor = select_doc_comment_anchor(decl);
    let bound = bind_descriptions(anchor, file, table, &options.tags)?;

    debug!(
        name = component_name(decl, file).unwrap_or_default(),
        props = bound.table.len(),
        "documented component"
    );

    Ok(Some(ComponentDoc {
        description: bound.summary,
        props: bound.table,
    }))
}

/// Document every target file of `unit`, keyed by relative path in
/// discovery order. Imported files only serve type lookups.
///
/// The unit is checked for syntax errors first. The first error of any file
/// aborts the run; no partial document is returned.
pub fn generate_docs(unit: &CompilationUnit, options: &DocOptions) -> Result<ProjectDoc> {
    generate_docs_with_progress(unit, options, |_, _| {})
}

/// [`generate_docs`], calling `on_file(index, file)` before each file.
pub fn generate_docs_with_progress<F>(
    unit: &CompilationUnit,
    options: &DocOptions,
    mut on_file: F,
) -> Result<ProjectDoc>
where
    F: FnMut(usize, &ParsedFile),
{
    unit.check_syntax()?;

    let total = unit.targets().len();
    let docs = unit
        .targets()
        .iter()
        .enumerate()
        .try_fold(ProjectDoc::new(), |mut docs, (index, file)| {
            debug!("processing file {} of {}", index + 1, total);
            on_file(index, file);
            if let Some(doc) = generate_docs_for_file(file, unit, options)? {
                docs.insert(unit.relative_path(file), doc);
            }
            Ok::<_, DocgenError>(docs)
        })?;

    info!(files = total, components = docs.len(), "documentation generated");
    Ok(docs)
}
