//! Prop documentation extraction.
//!
//! # Pipeline
//!
//! 1. **Classify** exported declarations; exactly one component per file
//!    ([`component`]).
//! 2. **Locate** the props parameter type, inline or named ([`params`]).
//! 3. **Tabulate** its members with defaults from the destructuring pattern,
//!    classifying each annotation ([`signature`]).
//! 4. **Bind** the leading doc comment: summary plus `@prop` descriptions
//!    ([`binder`]).
//! 5. **Assemble** per-file records into a [`ProjectDoc`] ([`runner`]).

pub mod binder;
pub mod component;
pub mod params;
pub mod runner;
pub mod signature;
pub mod types;

pub use binder::{bind_descriptions, leading_comments, BoundDocs};
pub use component::{
    component_name, is_component, select_doc_comment_anchor, select_function_node,
};
pub use params::{build_param_table, resolve_parameter_type, ParameterType};
pub use runner::{generate_docs, generate_docs_for_file, generate_docs_with_progress, DocOptions};
pub use signature::resolve_type_signature;
pub use types::{
    ComponentDoc, DefaultValue, ObjectProperty, Primitive, ProjectDoc, PropRecord, PropTable,
    PropertyKey, PropertyValue, SignatureArgument, TypeSignature,
};
