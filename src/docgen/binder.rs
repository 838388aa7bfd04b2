//! Binding of documentation comments onto prop tables.

use tree_sitter::Node;

use super::types::PropTable;
use crate::analysis::ParsedFile;
use crate::error::{DocgenError, Result};
use crate::tsdoc::{DocParser, TagBinding, TagSet};

/// Summary text and the prop table with descriptions filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundDocs {
    pub summary: String,
    pub table: PropTable,
}

/// Comment nodes directly preceding `anchor`, earliest first.
///
/// A comment starting on the line where the previous statement ends trails
/// that statement and is not included.
pub fn leading_comments(anchor: Node) -> Vec<Node> {
    let mut comments = Vec::new();
    let mut current = anchor.prev_sibling();
    while let Some(node) = current {
        if node.kind() != "comment" {
            break;
        }
        comments.push(node);
        current = node.prev_sibling();
    }
    if let Some(statement) = current {
        let trailing_row = statement.end_position().row;
        comments.retain(|c| c.start_position().row != trailing_row);
    }
    comments.reverse();
    comments
}

/// Parse the first leading comment of `anchor` and merge its prop blocks
/// into `table`.
///
/// Without a comment the summary is empty and the table is returned as is.
/// Prop blocks naming a prop that is not in the table are dropped.
pub fn bind_descriptions(
    anchor: Node,
    file: &ParsedFile,
    mut table: PropTable,
    tags: &TagSet,
) -> Result<BoundDocs> {
    let Some(comment) = leading_comments(anchor).into_iter().next() else {
        return Ok(BoundDocs {
            summary: String::new(),
            table,
        });
    };

    let first_line = comment.start_position().row + 1;
    let context = DocParser::new(tags).parse(file.node_text(comment), first_line);
    if let Some(diagnostic) = context.diagnostics.first() {
        return Err(DocgenError::DocComment {
            path: file.path.clone(),
            line: diagnostic.line,
            message: diagnostic.to_string(),
        });
    }

    for block in context.comment.blocks_with_binding(TagBinding::Prop) {
        let Some(named) = &block.named else {
            continue;
        };
        match table.get_mut(&named.name) {
            Some(record) => {
                record.description = Some(named.description.clone());
            }
            None => tracing::debug!(
                prop = %named.name,
                tag = %block.tag,
                path = %file.path.display(),
                line = block.line,
                "dropping description for undeclared prop"
            ),
        }
    }

    Ok(BoundDocs {
        summary: context.comment.summary(),
        table,
    })
}
