//! Tag definitions recognized by the comment parser.
//!
//! Tags are configuration data: the parser knows nothing about `@prop` or
//! `@param` beyond what a [`TagDefinition`] says about them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a tag appears in a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagSyntax {
    /// Starts a block that runs until the next block tag (`@remarks ...`).
    Block,
    /// Stands alone and carries no content (`@internal`).
    Modifier,
    /// Appears inside braces within text (`{@link Foo}`).
    Inline,
}

/// How the content of a block tag is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagBinding {
    /// Free text.
    #[default]
    Text,
    /// `<name> - <description>`, not bound to anything (`@param`).
    Named,
    /// `<name> - <description>`, merged onto the prop called `<name>`.
    Prop,
}

impl TagBinding {
    /// Whether the block content must follow the `<name> - <text>` form.
    pub fn is_named(&self) -> bool {
        matches!(self, TagBinding::Named | TagBinding::Prop)
    }
}

/// A single recognized tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDefinition {
    /// Tag name including the leading `@`.
    pub name: String,
    pub syntax: TagSyntax,
    #[serde(default)]
    pub binding: TagBinding,
}

impl TagDefinition {
    pub fn new(name: &str, syntax: TagSyntax, binding: TagBinding) -> Self {
        Self {
            name: name.to_string(),
            syntax,
            binding,
        }
    }
}

/// The tag used to document props.
pub const PROP_TAG: &str = "@prop";

/// Standard TSDoc tags.
static STANDARD_TAGS: phf::OrderedMap<&'static str, (TagSyntax, TagBinding)> = phf::phf_ordered_map! {
    "@param" => (TagSyntax::Block, TagBinding::Named),
    "@typeParam" => (TagSyntax::Block, TagBinding::Named),
    "@returns" => (TagSyntax::Block, TagBinding::Text),
    "@remarks" => (TagSyntax::Block, TagBinding::Text),
    "@example" => (TagSyntax::Block, TagBinding::Text),
    "@deprecated" => (TagSyntax::Block, TagBinding::Text),
    "@see" => (TagSyntax::Block, TagBinding::Text),
    "@throws" => (TagSyntax::Block, TagBinding::Text),
    "@defaultValue" => (TagSyntax::Block, TagBinding::Text),
    "@privateRemarks" => (TagSyntax::Block, TagBinding::Text),
    "@decorator" => (TagSyntax::Block, TagBinding::Text),
    "@alpha" => (TagSyntax::Modifier, TagBinding::Text),
    "@beta" => (TagSyntax::Modifier, TagBinding::Text),
    "@eventProperty" => (TagSyntax::Modifier, TagBinding::Text),
    "@experimental" => (TagSyntax::Modifier, TagBinding::Text),
    "@internal" => (TagSyntax::Modifier, TagBinding::Text),
    "@override" => (TagSyntax::Modifier, TagBinding::Text),
    "@packageDocumentation" => (TagSyntax::Modifier, TagBinding::Text),
    "@public" => (TagSyntax::Modifier, TagBinding::Text),
    "@readonly" => (TagSyntax::Modifier, TagBinding::Text),
    "@sealed" => (TagSyntax::Modifier, TagBinding::Text),
    "@virtual" => (TagSyntax::Modifier, TagBinding::Text),
    "@link" => (TagSyntax::Inline, TagBinding::Text),
    "@inheritDoc" => (TagSyntax::Inline, TagBinding::Text),
    "@label" => (TagSyntax::Inline, TagBinding::Text),
};

/// The set of tags a comment may use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    tags: IndexMap<String, TagDefinition>,
}

impl TagSet {
    /// A set with no tags at all.
    pub fn empty() -> Self {
        Self {
            tags: IndexMap::new(),
        }
    }

    /// Standard TSDoc tags plus `@prop`.
    pub fn standard() -> Self {
        let mut set = Self::empty();
        for (name, (syntax, binding)) in STANDARD_TAGS.entries() {
            set.insert(TagDefinition::new(name, *syntax, *binding));
        }
        set.insert(TagDefinition::new(PROP_TAG, TagSyntax::Block, TagBinding::Prop));
        set
    }

    /// Add or replace a definition.
    pub fn insert(&mut self, definition: TagDefinition) {
        self.tags.insert(definition.name.clone(), definition);
    }

    /// Standard set extended with `extra`; later definitions replace earlier ones.
    pub fn with_custom<I>(extra: I) -> Self
    where
        I: IntoIterator<Item = TagDefinition>,
    {
        let mut set = Self::standard();
        for definition in extra {
            set.insert(definition);
        }
        set
    }

    pub fn get(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.get(name)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for TagSet {
    fn default() -> Self {
        Self::standard()
    }
}
