//! Type-signature resolution.
//!
//! Classifies a type annotation node into a [`TypeSignature`] tree. The match
//! is over tree-sitter node kinds; any shape not listed falls back to
//! [`TypeSignature::Unknown`] instead of failing.

use tree_sitter::Node;

use super::types::{
    ObjectProperty, Primitive, PropertyKey, PropertyValue, SignatureArgument, TypeSignature,
};

static PRIMITIVES: phf::Map<&'static str, Primitive> = phf::phf_map! {
    "string" => Primitive::String,
    "number" => Primitive::Number,
    "boolean" => Primitive::Boolean,
    "any" => Primitive::Any,
    "void" => Primitive::Void,
};

/// Classify the type node `node` of a file whose source is `source`.
pub fn resolve_type_signature(node: Node, source: &[u8]) -> TypeSignature {
    match node.kind() {
        "predefined_type" => PRIMITIVES
            .get(text(node, source))
            .map(|p| TypeSignature::Primitive(*p))
            .unwrap_or(TypeSignature::Unknown),
        "literal_type" => TypeSignature::literal(text(node, source)),
        "type_identifier" | "nested_type_identifier" | "generic_type" => {
            TypeSignature::reference(text(node, source))
        }
        "union_type" => {
            let mut elements = Vec::new();
            flatten_union(node, source, &mut elements);
            TypeSignature::Union { elements }
        }
        "array_type" => match first_named_child(node) {
            Some(element) => TypeSignature::Array {
                element: Box::new(resolve_type_signature(element, source)),
            },
            None => TypeSignature::Unknown,
        },
        "tuple_type" => TypeSignature::Tuple {
            elements: tuple_elements(node, source),
        },
        "function_type" => {
            let returns = node
                .child_by_field_name("return_type")
                .or_else(|| last_named_child(node))
                .map(|n| resolve_type_signature(n, source))
                .unwrap_or(TypeSignature::Unknown);
            TypeSignature::Function {
                arguments: function_arguments(node, source),
                returns: Box::new(returns),
            }
        }
        "object_type" => TypeSignature::Object {
            properties: object_properties(node, source),
        },
        "parenthesized_type" => first_named_child(node)
            .map(|inner| resolve_type_signature(inner, source))
            .unwrap_or(TypeSignature::Unknown),
        _ => TypeSignature::Unknown,
    }
}

/// Function signature of a `method_signature` member.
pub fn method_signature(node: Node, source: &[u8]) -> TypeSignature {
    let returns = node
        .child_by_field_name("return_type")
        .and_then(annotation_type)
        .map(|n| resolve_type_signature(n, source))
        .unwrap_or(TypeSignature::Unknown);
    TypeSignature::Function {
        arguments: function_arguments(node, source),
        returns: Box::new(returns),
    }
}

/// Signature of a type member's annotation, or `unknown` without one.
pub fn member_type_signature(member: Node, source: &[u8]) -> TypeSignature {
    if member.kind() == "method_signature" {
        return method_signature(member, source);
    }
    member
        .child_by_field_name("type")
        .and_then(annotation_type)
        .map(|n| resolve_type_signature(n, source))
        .unwrap_or(TypeSignature::Unknown)
}

/// The type inside a `type_annotation` (`: T`), or the node itself.
pub fn annotation_type(node: Node) -> Option<Node> {
    match node.kind() {
        "type_annotation"
        | "opting_type_annotation"
        | "omitting_type_annotation"
        | "adding_type_annotation" => first_named_child(node),
        _ => Some(node),
    }
}

/// Key of a property or method member. Computed keys have none.
pub fn member_key(member: Node, source: &[u8]) -> Option<String> {
    let name = member.child_by_field_name("name")?;
    match name.kind() {
        "property_identifier" | "identifier" | "private_property_identifier" | "number" => {
            Some(text(name, source).to_string())
        }
        "string" => Some(unquote(text(name, source)).to_string()),
        _ => None,
    }
}

/// Whether a member carries the `?` marker.
pub fn is_optional(member: Node) -> bool {
    let mut cursor = member.walk();
    let optional = member
        .children(&mut cursor)
        .any(|c| !c.is_named() && c.kind() == "?");
    optional
}

/// Member nodes of an object type or interface body, without comments.
pub fn type_members(body: Node) -> Vec<Node> {
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

pub(crate) fn unquote(raw: &str) -> &str {
    raw.strip_prefix(['"', '\''])
        .and_then(|s| s.strip_suffix(['"', '\'']))
        .unwrap_or(raw)
}

fn text<'s>(node: Node, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}

fn first_named_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");
    first
}

fn last_named_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let last = node
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .last();
    last
}

/// `A | B | C` parses left-nested; collect leaves in source order.
fn flatten_union(node: Node, source: &[u8], out: &mut Vec<TypeSignature>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "union_type" => flatten_union(child, source, out),
            "comment" => {}
            _ => out.push(resolve_type_signature(child, source)),
        }
    }
}

fn tuple_elements(node: Node, source: &[u8]) -> Vec<TypeSignature> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .map(|element| match element.kind() {
            // [label: T] and [label?: T]
            "required_parameter" | "optional_parameter" => element
                .child_by_field_name("type")
                .and_then(annotation_type)
                .map(|n| resolve_type_signature(n, source))
                .unwrap_or(TypeSignature::Unknown),
            _ => resolve_type_signature(element, source),
        })
        .collect()
}

fn function_arguments(node: Node, source: &[u8]) -> Vec<SignatureArgument> {
    let Some(params) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut cursor = params.walk();
    params
        .named_children(&mut cursor)
        .filter(|p| matches!(p.kind(), "required_parameter" | "optional_parameter"))
        .map(|param| {
            let name = param
                .child_by_field_name("pattern")
                .map(|p| text(p, source).to_string())
                .unwrap_or_default();
            let ty = param
                .child_by_field_name("type")
                .and_then(annotation_type)
                .map(|n| resolve_type_signature(n, source))
                .unwrap_or(TypeSignature::Unknown);
            SignatureArgument { name, ty }
        })
        .collect()
}

fn object_properties(node: Node, source: &[u8]) -> Vec<ObjectProperty> {
    type_members(node)
        .into_iter()
        .filter_map(|member| match member.kind() {
            "property_signature" | "method_signature" => {
                let key = member_key(member, source)?;
                Some(ObjectProperty {
                    key: PropertyKey::Name(key),
                    value: PropertyValue {
                        signature: member_type_signature(member, source),
                        required: !is_optional(member),
                    },
                })
            }
            "index_signature" => {
                let index_type = member.child_by_field_name("index_type")?;
                let signature = member
                    .child_by_field_name("type")
                    .and_then(annotation_type)
                    .map(|n| resolve_type_signature(n, source))
                    .unwrap_or(TypeSignature::Unknown);
                Some(ObjectProperty {
                    key: PropertyKey::Index {
                        name: text(index_type, source).to_string(),
                    },
                    value: PropertyValue {
                        signature,
                        required: true,
                    },
                })
            }
            _ => None,
        })
        .collect()
}
