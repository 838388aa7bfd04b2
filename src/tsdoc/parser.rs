//! Parser for `/** ... */` documentation comments.
//!
//! The grammar is the subset of TSDoc needed for component docs:
//!
//! - a summary section running until the first block tag
//! - block tags (`@remarks`, `@prop`) whose content runs until the next one
//! - modifier tags (`@internal`) with no content
//! - inline tags (`{@link Foo}`) rendered to their text
//! - code spans and fenced code blocks, inside which nothing is interpreted
//!
//! Problems are collected as diagnostics rather than returned early, so a
//! caller sees every problem in the comment at once.

use std::fmt;

use super::tags::{TagBinding, TagSet, TagSyntax};

/// A problem found while parsing a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Stable identifier, e.g. `undefined-tag`.
    pub id: &'static str,
    pub message: String,
    /// Line in the source file (1-indexed).
    pub line: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.id)
    }
}

/// `<name> - <description>` content of a named block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedContent {
    pub name: String,
    pub description: String,
}

/// A block tag and its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    pub tag: String,
    pub binding: TagBinding,
    /// Line of the tag in the source file.
    pub line: usize,
    lines: Vec<String>,
    /// Parsed content for named bindings.
    pub named: Option<NamedContent>,
}

impl DocBlock {
    /// Block content with paragraphs separated by a blank line.
    pub fn text(&self) -> String {
        paragraphs(&self.lines).join("\n\n")
    }
}

/// A parsed documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    summary_lines: Vec<String>,
    pub blocks: Vec<DocBlock>,
    pub modifiers: Vec<String>,
}

impl DocComment {
    /// Plain text of the first summary paragraph.
    pub fn summary(&self) -> String {
        paragraphs(&self.summary_lines)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// Blocks with the given binding, in comment order.
    pub fn blocks_with_binding(&self, binding: TagBinding) -> impl Iterator<Item = &DocBlock> {
        self.blocks.iter().filter(move |b| b.binding == binding)
    }

    pub fn has_modifier(&self, tag: &str) -> bool {
        self.modifiers.iter().any(|m| m == tag)
    }
}

/// Result of parsing one comment: the comment plus every diagnostic.
#[derive(Debug, Clone)]
pub struct ParserContext {
    pub comment: DocComment,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParserContext {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Comment parser configured with a tag set.
pub struct DocParser<'t> {
    tags: &'t TagSet,
}

/// Where scanned text currently goes.
#[derive(Clone, Copy)]
enum Section {
    Summary,
    Block(usize),
}

struct State<'t> {
    tags: &'t TagSet,
    comment: DocComment,
    diagnostics: Vec<Diagnostic>,
    section: Section,
}

impl<'t> DocParser<'t> {
    pub fn new(tags: &'t TagSet) -> Self {
        Self { tags }
    }

    /// Parse the raw text of a comment starting on `first_line` of its file.
    pub fn parse(&self, text: &str, first_line: usize) -> ParserContext {
        let mut state = State {
            tags: self.tags,
            comment: DocComment::default(),
            diagnostics: Vec::new(),
            section: Section::Summary,
        };

        let Some(body) = comment_body(text) else {
            state.diag(
                "comment-missing-opening-delimiter",
                "Expecting a leading \"/**\"".to_string(),
                first_line,
            );
            return state.finish();
        };

        let mut in_fence = false;
        for (offset, raw) in body.split('\n').enumerate() {
            let line_no = first_line + offset;
            let line = strip_gutter(raw.trim_end_matches('\r'));

            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
                state.push_line(line.to_string());
                continue;
            }
            if in_fence {
                state.push_line(line.to_string());
                continue;
            }

            state.scan_line(line, line_no);
        }

        if in_fence {
            state.diag(
                "code-fence-missing-delimiter",
                "Missing closing delimiter for code fence".to_string(),
                first_line + body.split('\n').count().saturating_sub(1),
            );
        }

        state.bind_named_blocks();
        state.finish()
    }
}

impl<'t> State<'t> {
    fn diag(&mut self, id: &'static str, message: String, line: usize) {
        self.diagnostics.push(Diagnostic { id, message, line });
    }

    fn finish(self) -> ParserContext {
        ParserContext {
            comment: self.comment,
            diagnostics: self.diagnostics,
        }
    }

    fn push_line(&mut self, line: String) {
        match self.section {
            Section::Summary => self.comment.summary_lines.push(line),
            Section::Block(i) => self.comment.blocks[i].lines.push(line),
        }
    }

    fn start_block(&mut self, tag: &str, binding: TagBinding, line: usize) {
        self.comment.blocks.push(DocBlock {
            tag: tag.to_string(),
            binding,
            line,
            lines: Vec::new(),
            named: None,
        });
        self.section = Section::Block(self.comment.blocks.len() - 1);
    }

    fn scan_line(&mut self, line: &str, line_no: usize) {
        let chars: Vec<char> = line.chars().collect();
        let mut out = String::new();
        let mut in_code = false;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\\' && i + 1 < chars.len() && !in_code {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if c == '`' {
                in_code = !in_code;
                out.push(c);
                i += 1;
                continue;
            }
            if in_code {
                out.push(c);
                i += 1;
                continue;
            }

            match c {
                '{' => {
                    i = self.scan_inline_tag(&chars, i, line_no, &mut out);
                }
                '}' => {
                    self.diag(
                        "unescaped-brace",
                        "The \"}\" character should be escaped using a backslash to avoid confusion with a TSDoc inline tag".to_string(),
                        line_no,
                    );
                    out.push(c);
                    i += 1;
                }
                '@' if i == 0 || chars[i - 1].is_whitespace() => {
                    let name_len = tag_name_len(&chars[i + 1..]);
                    if name_len == 0 {
                        self.diag(
                            "at-sign-without-tag-name",
                            "Expecting a TSDoc tag name after \"@\"; if it is not a tag, use a backslash to escape this character".to_string(),
                            line_no,
                        );
                        out.push(c);
                        i += 1;
                        continue;
                    }

                    let name: String = chars[i..i + 1 + name_len].iter().collect();
                    i += 1 + name_len;

                    match self.tags.get(&name).map(|d| (d.syntax, d.binding)) {
                        None => {
                            self.diag(
                                "undefined-tag",
                                format!("The TSDoc tag \"{}\" is not defined in this configuration", name),
                                line_no,
                            );
                            out.push_str(&name);
                        }
                        Some((TagSyntax::Inline, _)) => {
                            self.diag(
                                "inline-tag-without-braces",
                                format!("The TSDoc tag \"{}\" is an inline tag; it must be enclosed in \"{{ }}\" braces", name),
                                line_no,
                            );
                            out.push_str(&name);
                        }
                        Some((TagSyntax::Modifier, _)) => {
                            self.comment.modifiers.push(name);
                        }
                        Some((TagSyntax::Block, binding)) => {
                            let before = std::mem::take(&mut out);
                            if !before.trim().is_empty() {
                                self.push_line(before);
                            }
                            self.start_block(&name, binding, line_no);
                        }
                    }
                }
                _ => {
                    out.push(c);
                    i += 1;
                }
            }
        }

        if in_code {
            self.diag(
                "code-span-missing-delimiter",
                "The code span is missing its closing backtick".to_string(),
                line_no,
            );
        }

        self.push_line(out);
    }

    /// Scan `{@tag ...}` starting at the `{` at `start`; returns the index after it.
    fn scan_inline_tag(&mut self, chars: &[char], start: usize, line_no: usize, out: &mut String) -> usize {
        if chars.get(start + 1) != Some(&'@') {
            self.diag(
                "unescaped-brace",
                "The \"{\" character must be escaped with a backslash when not used as part of an inline tag".to_string(),
                line_no,
            );
            out.push('{');
            return start + 1;
        }

        let Some(close) = chars[start..].iter().position(|c| *c == '}').map(|p| p + start) else {
            self.diag(
                "inline-tag-missing-right-brace",
                "The TSDoc inline tag name is missing its closing \"}\"".to_string(),
                line_no,
            );
            out.extend(&chars[start..]);
            return chars.len();
        };

        let name_len = tag_name_len(&chars[start + 2..close]);
        let name: String = chars[start + 1..start + 2 + name_len].iter().collect();
        let content: String = chars[start + 2 + name_len..close].iter().collect();

        match self.tags.get(&name).map(|d| d.syntax) {
            Some(TagSyntax::Inline) => out.push_str(&render_inline(&content)),
            Some(_) => {
                self.diag(
                    "tag-not-inline",
                    format!("The TSDoc tag \"{}\" is not an inline tag", name),
                    line_no,
                );
            }
            None => {
                self.diag(
                    "undefined-tag",
                    format!("The TSDoc tag \"{}\" is not defined in this configuration", name),
                    line_no,
                );
            }
        }

        close + 1
    }

    /// Split `<name> - <description>` for every block whose binding needs it.
    fn bind_named_blocks(&mut self) {
        let mut problems = Vec::new();

        for block in &mut self.comment.blocks {
            if !block.binding.is_named() {
                continue;
            }
            let text = block.text();
            match split_named(&text) {
                Some((name, description)) if !name.is_empty() => {
                    block.named = Some(NamedContent {
                        name: name.to_string(),
                        description: description.to_string(),
                    });
                }
                Some(_) => problems.push((
                    "missing-name",
                    format!("The {} block should be followed by a name", block.tag),
                    block.line,
                )),
                None if text.trim().is_empty() => problems.push((
                    "missing-name",
                    format!("The {} block should be followed by a name", block.tag),
                    block.line,
                )),
                None => problems.push((
                    "missing-hyphen",
                    format!(
                        "The {} block should be followed by a name and then a hyphen",
                        block.tag
                    ),
                    block.line,
                )),
            }
        }

        for (id, message, line) in problems {
            self.diag(id, message, line);
        }
    }
}

/// Text between `/**` and `*/`, or None when the framing is wrong.
fn comment_body(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.len() < 5 || !text.starts_with("/**") || !text.ends_with("*/") {
        return None;
    }
    Some(&text[3..text.len() - 2])
}

/// Drop leading whitespace and one `*` gutter plus the space after it.
fn strip_gutter(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => trimmed,
    }
}

fn tag_name_len(chars: &[char]) -> usize {
    match chars.first() {
        Some(c) if c.is_ascii_alphabetic() => chars
            .iter()
            .take_while(|c| c.is_ascii_alphanumeric())
            .count(),
        _ => 0,
    }
}

/// `{@link Target | text}` renders as `text`, `{@link Target}` as `Target`.
fn render_inline(content: &str) -> String {
    match content.split_once('|') {
        Some((_, text)) => text.trim().to_string(),
        None => content.trim().to_string(),
    }
}

fn split_named(text: &str) -> Option<(&str, &str)> {
    if let Some((name, description)) = text.split_once(" - ") {
        return Some((name.trim(), description.trim()));
    }
    text.trim_end()
        .strip_suffix(" -")
        .map(|name| (name.trim(), ""))
}

/// Group lines into paragraphs separated by blank lines; lines inside a
/// paragraph are joined with a single space.
fn paragraphs(lines: &[String]) -> Vec<String> {
    let mut result = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                result.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        result.push(current.join(" "));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> ParserContext {
        let tags = TagSet::standard();
        DocParser::new(&tags).parse(text, 1)
    }

    #[test]
    fn test_summary_and_prop_blocks() {
        let ctx = parse(
            "/**\n * Some description\n * @prop bar - baz\n * @prop qux - quux\n */",
        );
        assert!(!ctx.has_errors(), "{:?}", ctx.diagnostics);
        assert_eq!(ctx.comment.summary(), "Some description");

        let props: Vec<_> = ctx
            .comment
            .blocks_with_binding(TagBinding::Prop)
            .map(|b| b.named.clone().unwrap())
            .collect();
        assert_eq!(
            props,
            vec![
                NamedContent {
                    name: "bar".to_string(),
                    description: "baz".to_string()
                },
                NamedContent {
                    name: "qux".to_string(),
                    description: "quux".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_summary_is_first_paragraph_only() {
        let ctx = parse("/**\n * First line\n * continues here.\n *\n * Second paragraph.\n */");
        assert_eq!(ctx.comment.summary(), "First line continues here.");
    }

    #[test]
    fn test_single_line_comment_block() {
        let ctx = parse("/** Just a basic text field */");
        assert!(!ctx.has_errors());
        assert_eq!(ctx.comment.summary(), "Just a basic text field");
    }

    #[test]
    fn test_multiline_prop_description() {
        let ctx = parse("/**\n * @prop size - Size of the\n *   button in pixels\n */");
        let block = &ctx.comment.blocks[0];
        assert_eq!(block.named.as_ref().unwrap().description, "Size of the button in pixels");
        assert_eq!(block.line, 2);
    }

    #[test]
    fn test_line_comment_is_rejected() {
        let ctx = parse("// just a note");
        assert_eq!(ctx.diagnostics[0].id, "comment-missing-opening-delimiter");
    }

    #[test]
    fn test_undefined_tag() {
        let ctx = parse("/**\n * Summary\n * @foo bar\n */");
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].id, "undefined-tag");
        assert_eq!(ctx.diagnostics[0].line, 3);
        assert_eq!(
            ctx.diagnostics[0].message,
            "The TSDoc tag \"@foo\" is not defined in this configuration"
        );
    }

    #[test]
    fn test_prop_without_hyphen() {
        let ctx = parse("/**\n * @prop value the value\n */");
        assert_eq!(ctx.diagnostics[0].id, "missing-hyphen");
    }

    #[test]
    fn test_prop_without_name() {
        let ctx = parse("/**\n * @prop\n */");
        assert_eq!(ctx.diagnostics[0].id, "missing-name");
    }

    #[test]
    fn test_param_requires_hyphen_too() {
        let ctx = parse("/**\n * @param value the value\n */");
        assert_eq!(ctx.diagnostics[0].id, "missing-hyphen");
    }

    #[test]
    fn test_modifiers_and_text_blocks() {
        let ctx = parse("/**\n * Summary\n * @remarks Extra words\n * @internal\n */");
        assert!(!ctx.has_errors());
        assert!(ctx.comment.has_modifier("@internal"));
        assert_eq!(ctx.comment.blocks[0].tag, "@remarks");
        assert_eq!(ctx.comment.blocks[0].text(), "Extra words");
    }

    #[test]
    fn test_inline_link_renders_text() {
        let ctx = parse("/**\n * See {@link Button | the button} and {@link Card}.\n */");
        assert!(!ctx.has_errors());
        assert_eq!(ctx.comment.summary(), "See the button and Card.");
    }

    #[test]
    fn test_unescaped_braces() {
        let ctx = parse("/**\n * Returns { a: 1 }\n */");
        assert_eq!(ctx.diagnostics.len(), 2);
        assert!(ctx.diagnostics.iter().all(|d| d.id == "unescaped-brace"));
    }

    #[test]
    fn test_escapes_and_code_spans() {
        let ctx = parse("/**\n * Use `{ a: 1 }` or \\{ b \\} and mail me@example.com\n */");
        assert!(!ctx.has_errors(), "{:?}", ctx.diagnostics);
        assert_eq!(
            ctx.comment.summary(),
            "Use `{ a: 1 }` or { b } and mail me@example.com"
        );
    }

    #[test]
    fn test_code_fence_is_not_interpreted() {
        let ctx = parse("/**\n * Summary\n * @example\n * ```tsx\n * <Button onClick={() => {}} />\n * ```\n */");
        assert!(!ctx.has_errors(), "{:?}", ctx.diagnostics);
    }

    #[test]
    fn test_unclosed_code_span() {
        let ctx = parse("/**\n * broken `code\n */");
        assert_eq!(ctx.diagnostics[0].id, "code-span-missing-delimiter");
    }

    #[test]
    fn test_diagnostic_lines_are_offset_by_comment_start() {
        let tags = TagSet::standard();
        let ctx = DocParser::new(&tags).parse("/**\n * @nope\n */", 10);
        assert_eq!(ctx.diagnostics[0].line, 11);
    }
}
