//! Depth-first flattening of the declaration tree into leaf records.

use docket_core::{DeclarationSymbol, LeafDeclaration, UNKNOWN_OWNER};

/// Collect every leaf declaration with its owner path, in traversal order.
///
/// Containers are never emitted themselves; their children are visited with
/// the owner path extended by the container's name. Kinds that are neither
/// containers nor leaves are skipped.
#[must_use]
pub fn flatten(symbols: &[DeclarationSymbol]) -> Vec<LeafDeclaration> {
    let mut leaves = Vec::new();
    walk(symbols, "", &mut leaves);
    leaves
}

fn walk(symbols: &[DeclarationSymbol], owner: &str, leaves: &mut Vec<LeafDeclaration>) {
    for symbol in symbols {
        if symbol.kind.is_container() {
            if symbol.children.is_empty() {
                continue;
            }
            let path = if owner.is_empty() {
                symbol.bare_name().to_string()
            } else {
                format!("{owner}.{}", symbol.bare_name())
            };
            walk(&symbol.children, &path, leaves);
        } else if symbol.kind.is_leaf() {
            let owner = if owner.is_empty() { UNKNOWN_OWNER } else { owner };
            leaves.push(LeafDeclaration {
                symbol: symbol.clone(),
                owner: owner.to_string(),
            });
        }
    }
}
