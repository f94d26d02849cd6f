//! Tag section tokenizer and per-tag parsing.
//!
//! Tokenizing is line based: a tag starts only where a (decoration-stripped)
//! line begins with a recognized `@name`. An `@word` inside running prose
//! never opens a block.

use std::sync::LazyLock;

use docket_core::{ParamTag, ReturnTag, TYPE_PARAMETER, TagTable, ThrowsTag, UNKNOWN_TYPE};
use regex::Regex;

use crate::signature::Signature;

static TAG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[\s*]*@(param|returns|return|throws|exception|since|author|deprecated|see|doc|example)(?:\s+(.*?))?\s*$",
    )
    .expect("tag line pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Param,
    Return,
    Throws,
    Since,
    Author,
    Deprecated,
    See,
    Doc,
    Example,
}

impl TagKind {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "param" => Self::Param,
            "return" | "returns" => Self::Return,
            "throws" | "exception" => Self::Throws,
            "since" => Self::Since,
            "author" => Self::Author,
            "deprecated" => Self::Deprecated,
            "see" => Self::See,
            "doc" => Self::Doc,
            "example" => Self::Example,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Param => "param",
            Self::Return => "return",
            Self::Throws => "throws",
            Self::Since => "since",
            Self::Author => "author",
            Self::Deprecated => "deprecated",
            Self::See => "see",
            Self::Doc => "doc",
            Self::Example => "example",
        }
    }
}

/// One tag with the content of its opening line and every continuation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBlock {
    pub kind: TagKind,
    /// Continuation lines are trimmed and joined with `\n`.
    pub content: String,
}

impl TagBlock {
    /// Source text that tokenizes back to this block.
    #[must_use]
    pub fn to_source(&self) -> String {
        if self.content.is_empty() {
            format!("@{}", self.kind.name())
        } else {
            format!("@{} {}", self.kind.name(), self.content)
        }
    }
}

/// Split a tag section into blocks.
///
/// Lines before the first recognized tag are dropped; unrecognized `@tags` and
/// blank lines are folded into (or skipped by) the open block.
#[must_use]
pub fn tokenize(section: &str) -> Vec<TagBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<TagBlock> = None;

    for line in section.lines() {
        if let Some(captures) = TAG_LINE.captures(line) {
            let kind = captures
                .get(1)
                .and_then(|name| TagKind::from_name(name.as_str()));
            if let Some(kind) = kind {
                blocks.extend(open.take());
                open = Some(TagBlock {
                    kind,
                    content: captures
                        .get(2)
                        .map_or("", |content| content.as_str())
                        .trim()
                        .to_string(),
                });
                continue;
            }
        }

        let text = line
            .trim_start_matches(|c: char| c == '*' || c.is_whitespace())
            .trim_end();
        if text.is_empty() {
            continue;
        }
        if let Some(block) = open.as_mut() {
            if !block.content.is_empty() {
                block.content.push('\n');
            }
            block.content.push_str(text);
        }
    }
    blocks.extend(open);
    blocks
}

/// Parse a tag section into a [`TagTable`].
///
/// `signature` supplies parameter and return types; without one (container
/// comments) `@param` types are unknown and `@return` is dropped.
#[must_use]
pub fn parse_tags(section: &str, signature: Option<&Signature>) -> TagTable {
    let mut table = TagTable::default();

    for block in tokenize(section) {
        let content = block.content.as_str();
        match block.kind {
            TagKind::Param => {
                if let Some(param) = param_tag(content, signature) {
                    table.params.push(param);
                }
            }
            TagKind::Return => {
                if let Some(return_type) = signature.and_then(|s| s.return_type.as_deref()) {
                    table.returns = Some(ReturnTag {
                        type_name: return_type.to_string(),
                        description: content.to_string(),
                    });
                }
            }
            TagKind::Throws => table.throws.push(throws_tag(content)),
            TagKind::Since => table.since = non_empty(content),
            TagKind::Author => table.author = non_empty(content),
            TagKind::Deprecated => table.deprecated = non_empty(content),
            TagKind::Doc => table.doc = non_empty(content),
            TagKind::Example => table.example = non_empty(content),
            TagKind::See => table.see.extend(non_empty(content)),
        }
    }
    table
}

fn param_tag(content: &str, signature: Option<&Signature>) -> Option<ParamTag> {
    let (name, description) = first_token(content);
    if name.is_empty() {
        return None;
    }
    let type_name = if name.starts_with('<') && name.ends_with('>') {
        TYPE_PARAMETER
    } else {
        signature
            .and_then(|signature| signature.type_of(name))
            .unwrap_or(UNKNOWN_TYPE)
    };
    Some(ParamTag {
        name: name.to_string(),
        type_name: type_name.to_string(),
        description: description.to_string(),
    })
}

fn throws_tag(content: &str) -> ThrowsTag {
    let (first, description) = first_token(content);
    let end = first
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.' || c == '$'))
        .unwrap_or(first.len());
    if end == 0 {
        return ThrowsTag {
            exception: UNKNOWN_TYPE.to_string(),
            description: content.to_string(),
        };
    }
    ThrowsTag {
        exception: first[..end].to_string(),
        description: description.to_string(),
    }
}

fn first_token(content: &str) -> (&str, &str) {
    let content = content.trim();
    content
        .split_once(char::is_whitespace)
        .map_or((content, ""), |(token, rest)| (token, rest.trim()))
}

fn non_empty(content: &str) -> Option<String> {
    let content = content.trim();
    (!content.is_empty()).then(|| content.to_string())
}
