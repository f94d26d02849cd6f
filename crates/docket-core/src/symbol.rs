//! Declaration symbols supplied by the structural provider.

use serde::{Deserialize, Serialize};

use crate::DeclarationKind;

/// Owner path used when a leaf declaration has no enclosing container.
pub const UNKNOWN_OWNER: &str = "unknown";

/// Zero-based line/character position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Range spanning whole lines `start..=end`.
    #[must_use]
    pub const fn lines(start: u32, end: u32) -> Self {
        Self {
            start: Position::new(start, 0),
            end: Position::new(end, 0),
        }
    }
}

/// One declaration as reported by the provider, possibly with nested children.
///
/// Treated as read-only input: the parser never mutates a symbol tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationSymbol {
    pub name: String,
    pub kind: DeclarationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Full declaration span.
    pub range: Range,
    /// Identifier span.
    pub selection_range: Range,
    #[serde(default)]
    pub children: Vec<DeclarationSymbol>,
    /// Container name reported by flat providers. Provenance only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,
}

impl DeclarationSymbol {
    /// Leaf-style symbol without children.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeclarationKind, range: Range) -> Self {
        Self {
            name: name.into(),
            kind,
            detail: None,
            range,
            selection_range: Range::lines(range.start.line, range.start.line),
            children: Vec::new(),
            container_name: None,
        }
    }

    #[must_use]
    pub fn with_selection(mut self, selection_range: Range) -> Self {
        self.selection_range = selection_range;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Line of the declared identifier.
    #[must_use]
    pub const fn start_line(&self) -> u32 {
        self.selection_range.start.line
    }

    /// Last line of the declaration body, never before [`start_line`](Self::start_line).
    #[must_use]
    pub const fn end_line(&self) -> u32 {
        let end = self.range.end.line;
        let start = self.start_line();
        if end < start { start } else { end }
    }

    /// The name without any parameter list or type suffix the provider appended,
    /// e.g. `merge(String, int[]) : Map` becomes `merge`.
    #[must_use]
    pub fn bare_name(&self) -> &str {
        let name = self.name.split('(').next().unwrap_or(&self.name);
        let name = name.split(':').next().unwrap_or(name);
        name.trim()
    }
}

/// A leaf declaration paired with the dot-joined names of its ancestor containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafDeclaration {
    pub symbol: DeclarationSymbol,
    /// Owner path, or [`UNKNOWN_OWNER`] when no container encloses the symbol.
    pub owner: String,
}

impl LeafDeclaration {
    /// Simple name of the innermost owning container.
    #[must_use]
    pub fn owner_simple_name(&self) -> &str {
        self.owner.rsplit('.').next().unwrap_or(&self.owner)
    }
}
