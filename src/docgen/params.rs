//! Parameter-type location and prop table construction.

use tree_sitter::Node;

use super::signature::{
    annotation_type, is_optional, member_key, member_type_signature, type_members, unquote,
};
use super::types::{DefaultValue, PropRecord, PropTable};
use crate::analysis::{CompilationUnit, ParsedFile, TypeDeclarationKind};
use crate::error::{DocgenError, Result};

/// Where the members of a component's props type live.
#[derive(Debug, Clone, Copy)]
pub enum ParameterType<'a> {
    /// `function C({ a }: { a: string })`: an object type in the component's
    /// own file.
    Inline { members: Node<'a> },
    /// `function C({ a }: Props)`: the body of the interface or type alias
    /// `Props`, possibly declared in another file of the unit.
    Resolved {
        name: &'a str,
        members: Node<'a>,
        file: &'a ParsedFile,
    },
}

impl<'a> ParameterType<'a> {
    pub fn members(&self) -> Node<'a> {
        match self {
            ParameterType::Inline { members } | ParameterType::Resolved { members, .. } => {
                *members
            }
        }
    }
}

/// First formal parameter of a function, skipping comments.
pub fn first_parameter(function: Node) -> Option<Node> {
    let params = function.child_by_field_name("parameters")?;
    let mut cursor = params.walk();
    let first = params
        .named_children(&mut cursor)
        .find(|p| matches!(p.kind(), "required_parameter" | "optional_parameter"));
    first
}

/// Locate the type of the component's props parameter.
///
/// An inline object type is used as is; a named reference is looked up in
/// `unit` through the file's imports (see
/// [`CompilationUnit::find_type_declaration`]). Only one level of naming is
/// followed: `type Props = OtherProps` yields `None`.
///
/// With `strict` set, a reference that names no declaration in the unit is
/// an error; otherwise it yields `None`.
pub fn resolve_parameter_type<'a>(
    function: Node<'a>,
    file: &'a ParsedFile,
    unit: &'a CompilationUnit,
    strict: bool,
) -> Result<Option<ParameterType<'a>>> {
    let Some(annotation) = first_parameter(function)
        .and_then(|p| p.child_by_field_name("type"))
        .and_then(annotation_type)
    else {
        return Ok(None);
    };

    let name_node = match annotation.kind() {
        "object_type" => {
            if type_members(annotation).is_empty() {
                return Ok(None);
            }
            return Ok(Some(ParameterType::Inline {
                members: annotation,
            }));
        }
        "type_identifier" => annotation,
        "generic_type" | "nested_type_identifier" => match annotation.child_by_field_name("name")
        {
            Some(name) => name,
            None => return Ok(None),
        },
        _ => return Ok(None),
    };
    let name = file.node_text(name_node);

    let Some((decl_file, decl)) = unit.find_type_declaration(name, file)? else {
        if strict {
            return Err(DocgenError::UnresolvedTypeReference {
                path: file.path.clone(),
                name: name.to_string(),
            });
        }
        tracing::debug!(name, path = %file.path.display(), "props type not found in unit");
        return Ok(None);
    };

    let members = match decl.kind {
        TypeDeclarationKind::Interface => decl.node.child_by_field_name("body"),
        TypeDeclarationKind::TypeAlias => decl
            .node
            .child_by_field_name("value")
            .filter(|value| value.kind() == "object_type"),
    };

    Ok(members.map(|members| ParameterType::Resolved {
        name,
        members,
        file: decl_file,
    }))
}

/// Build the prop table of `function` from the members of `parameter_type`.
///
/// Defaults come from the function's destructuring pattern; types come from
/// the declaring file of the members.
pub fn build_param_table(
    function: Node,
    file: &ParsedFile,
    parameter_type: &ParameterType,
) -> PropTable {
    let types_source = match parameter_type {
        ParameterType::Inline { .. } => &file.source,
        ParameterType::Resolved { file, .. } => &file.source,
    };

    let bindings = first_parameter(function)
        .and_then(|p| p.child_by_field_name("pattern"))
        .filter(|p| p.kind() == "object_pattern")
        .map(|pattern| destructured_bindings(pattern, file))
        .unwrap_or_default();

    let mut table = PropTable::new();
    for member in type_members(parameter_type.members()) {
        if !matches!(member.kind(), "property_signature" | "method_signature") {
            continue;
        }
        let Some(name) = member_key(member, types_source) else {
            tracing::debug!(
                member = member.utf8_text(types_source).unwrap_or(""),
                "skipping member without a static name"
            );
            continue;
        };

        let default_value = bindings
            .iter()
            .find(|b| b.name == name)
            .and_then(|b| b.default.as_deref())
            .map(DefaultValue::raw);

        table.entry(name).or_insert_with(|| PropRecord {
            required: !is_optional(member),
            default_value,
            ts_type: member_type_signature(member, types_source),
            description: None,
        });
    }

    table
}

/// A property bound by an object destructuring pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    /// Property name being read (not the local alias).
    name: String,
    /// Initializer source text, if any.
    default: Option<String>,
}

fn destructured_bindings(pattern: Node, file: &ParsedFile) -> Vec<Binding> {
    let mut cursor = pattern.walk();
    pattern
        .named_children(&mut cursor)
        .filter_map(|element| match element.kind() {
            // { a }
            "shorthand_property_identifier_pattern" => Some(Binding {
                name: file.node_text(element).to_string(),
                default: None,
            }),
            // { a = 1 }
            "object_assignment_pattern" => {
                let left = element.child_by_field_name("left")?;
                Some(Binding {
                    name: file.node_text(left).to_string(),
                    default: element
                        .child_by_field_name("right")
                        .map(|r| file.node_text(r).to_string()),
                })
            }
            // { a: alias } and { a: alias = 1 }
            "pair_pattern" => {
                let key = element.child_by_field_name("key")?;
                let name = match key.kind() {
                    "string" => unquote(file.node_text(key)).to_string(),
                    "computed_property_name" => return None,
                    _ => file.node_text(key).to_string(),
                };
                let default = element
                    .child_by_field_name("value")
                    .filter(|v| v.kind() == "assignment_pattern")
                    .and_then(|v| v.child_by_field_name("right"))
                    .map(|r| file.node_text(r).to_string());
                Some(Binding { name, default })
            }
            _ => None,
        })
        .collect()
}
