//! TSDoc-style documentation comment parsing.
//!
//! [`DocParser`] turns the raw text of a `/** ... */` comment into a
//! [`DocComment`] (summary plus tagged blocks) and a list of diagnostics.
//! The recognized tags come from a [`TagSet`], so new block tags are added
//! through configuration rather than parser changes.

mod parser;
mod tags;

pub use parser::{Diagnostic, DocBlock, DocComment, DocParser, NamedContent, ParserContext};
pub use tags::{TagBinding, TagDefinition, TagSet, TagSyntax, PROP_TAG};
