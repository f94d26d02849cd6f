//! Boundary normalization of provider results.
//!
//! A provider may answer with a hierarchical tree (`name`, `kind`, `range`,
//! `selectionRange`, `children`) or with a flat list of records (`name`,
//! `kind`, `location`, `containerName`). The shape is decided once, on the
//! first element, and nothing past this module sees the difference.

use docket_core::{DeclarationKind, DeclarationSymbol, DocumentId, Range};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTreeSymbol {
    name: String,
    kind: u64,
    #[serde(default)]
    detail: Option<String>,
    range: Range,
    selection_range: Range,
    #[serde(default)]
    children: Vec<WireTreeSymbol>,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    range: Range,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFlatSymbol {
    name: String,
    kind: u64,
    location: WireLocation,
    #[serde(default)]
    container_name: Option<String>,
}

/// A provider answer after shape detection.
#[derive(Debug)]
pub enum SymbolResponse {
    Tree(Vec<DeclarationSymbol>),
    Flat(Vec<DeclarationSymbol>),
    Unrecognized,
}

impl SymbolResponse {
    /// Detect the shape of `value` and decode it.
    #[must_use]
    pub fn detect(value: serde_json::Value) -> Self {
        let serde_json::Value::Array(items) = value else {
            return Self::Unrecognized;
        };
        let Some(first) = items.first() else {
            return Self::Tree(Vec::new());
        };

        let is_tree = first.get("selectionRange").is_some();
        let is_flat = first.get("location").is_some();
        let items = serde_json::Value::Array(items);

        if is_tree {
            match serde_json::from_value::<Vec<WireTreeSymbol>>(items) {
                Ok(symbols) => Self::Tree(symbols.into_iter().map(tree_symbol).collect()),
                Err(_) => Self::Unrecognized,
            }
        } else if is_flat {
            match serde_json::from_value::<Vec<WireFlatSymbol>>(items) {
                Ok(symbols) => Self::Flat(symbols.into_iter().map(flat_symbol).collect()),
                Err(_) => Self::Unrecognized,
            }
        } else {
            Self::Unrecognized
        }
    }

    #[must_use]
    pub fn into_symbols(self) -> Vec<DeclarationSymbol> {
        match self {
            Self::Tree(symbols) | Self::Flat(symbols) => symbols,
            Self::Unrecognized => Vec::new(),
        }
    }
}

/// Normalize a raw provider answer into a symbol tree.
///
/// Unrecognized or malformed answers become an empty list.
#[must_use]
pub fn normalize(document: &DocumentId, value: serde_json::Value) -> Vec<DeclarationSymbol> {
    let response = SymbolResponse::detect(value);
    if matches!(response, SymbolResponse::Unrecognized) {
        tracing::warn!(%document, "unrecognized symbol response shape, treating as empty");
    }
    response.into_symbols()
}

fn tree_symbol(wire: WireTreeSymbol) -> DeclarationSymbol {
    DeclarationSymbol {
        name: wire.name,
        kind: DeclarationKind::from_lsp(wire.kind),
        detail: wire.detail,
        range: wire.range,
        selection_range: wire.selection_range,
        children: wire.children.into_iter().map(tree_symbol).collect(),
        container_name: None,
    }
}

fn flat_symbol(wire: WireFlatSymbol) -> DeclarationSymbol {
    let range = wire.location.range;
    DeclarationSymbol {
        name: wire.name,
        kind: DeclarationKind::from_lsp(wire.kind),
        detail: None,
        range,
        selection_range: Range::new(range.start, range.start),
        children: Vec::new(),
        container_name: wire.container_name,
    }
}
