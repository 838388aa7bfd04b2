//! Documentation records produced by extraction.
//!
//! The JSON shape of these types is the tool's output contract, so
//! serialization is spelled out rather than derived where the shape does not
//! follow the Rust structure.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Scalar keyword types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Any,
    Void,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Any => "any",
            Primitive::Void => "void",
        }
    }
}

/// Canonical classification of a type annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSignature {
    Primitive(Primitive),
    /// A literal type; `value` is its source text (`'primary'`, `42`, `true`).
    Literal { value: String },
    /// A named type, kept as written and not resolved.
    Reference { name: String },
    Union { elements: Vec<TypeSignature> },
    Array { element: Box<TypeSignature> },
    Tuple { elements: Vec<TypeSignature> },
    Function {
        arguments: Vec<SignatureArgument>,
        returns: Box<TypeSignature>,
    },
    Object { properties: Vec<ObjectProperty> },
    Unknown,
}

impl TypeSignature {
    pub fn reference(name: impl Into<String>) -> Self {
        TypeSignature::Reference { name: name.into() }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        TypeSignature::Literal {
            value: value.into(),
        }
    }

    /// The `name` field of the serialized form.
    pub fn name(&self) -> &str {
        match self {
            TypeSignature::Primitive(p) => p.as_str(),
            TypeSignature::Literal { .. } => "literal",
            TypeSignature::Reference { name } => name,
            TypeSignature::Union { .. } => "union",
            TypeSignature::Array { .. } => "Array",
            TypeSignature::Tuple { .. } => "tuple",
            TypeSignature::Function { .. } | TypeSignature::Object { .. } => "signature",
            TypeSignature::Unknown => "unknown",
        }
    }
}

/// One parameter of a function signature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignatureArgument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeSignature,
}

/// Key of an object signature member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyKey {
    /// `foo: T`
    Name(String),
    /// `[key: string]: T`; `name` is the key type as written.
    Index { name: String },
}

/// Value of an object signature member: its type plus requiredness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyValue {
    #[serde(flatten)]
    pub signature: TypeSignature,
    pub required: bool,
}

/// One member of an object signature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectProperty {
    pub key: PropertyKey,
    pub value: PropertyValue,
}

#[derive(Serialize)]
struct FunctionShape<'a> {
    arguments: &'a [SignatureArgument],
    #[serde(rename = "return")]
    returns: &'a TypeSignature,
}

#[derive(Serialize)]
struct ObjectShape<'a> {
    properties: &'a [ObjectProperty],
}

impl Serialize for TypeSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", self.name())?;

        match self {
            TypeSignature::Literal { value } => {
                map.serialize_entry("value", value)?;
            }
            TypeSignature::Union { elements } | TypeSignature::Tuple { elements } => {
                map.serialize_entry("elements", elements)?;
            }
            TypeSignature::Array { element } => {
                map.serialize_entry("elements", std::slice::from_ref(element.as_ref()))?;
            }
            TypeSignature::Function { arguments, returns } => {
                map.serialize_entry("type", "function")?;
                map.serialize_entry(
                    "signature",
                    &FunctionShape {
                        arguments,
                        returns,
                    },
                )?;
            }
            TypeSignature::Object { properties } => {
                map.serialize_entry("type", "object")?;
                map.serialize_entry("signature", &ObjectShape { properties })?;
            }
            TypeSignature::Primitive(_) | TypeSignature::Reference { .. } | TypeSignature::Unknown => {}
        }

        map.end()
    }
}

/// A destructuring default, kept as source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultValue {
    pub value: String,
    /// Always false: defaults are never evaluated.
    pub computed: bool,
}

impl DefaultValue {
    pub fn raw(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            computed: false,
        }
    }
}

/// Documentation for one prop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropRecord {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    pub ts_type: TypeSignature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Props keyed by name, in declaration order.
pub type PropTable = IndexMap<String, PropRecord>;

/// Documentation for the component of one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDoc {
    pub description: String,
    pub props: PropTable,
}

/// Documentation for a whole run, keyed by relative file path.
pub type ProjectDoc = IndexMap<String, ComponentDoc>;
