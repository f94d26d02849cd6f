//! # docket-symbols
//!
//! Access to the external structural-analysis service that reports a
//! document's declarations.
//!
//! - [`SymbolProvider`] / [`RevisionProvider`]: the seams to external services
//! - [`normalize`]: turns either wire shape (hierarchical tree or flat list)
//!   into [`DeclarationSymbol`](docket_core::DeclarationSymbol) trees
//! - [`SymbolCache`]: LRU cache keyed by (document, version) with at most one
//!   external lookup in flight per key

mod cache;
mod error;
mod normalize;
mod provider;

pub use cache::{CacheStats, SymbolCache};
pub use error::ProviderError;
pub use normalize::{SymbolResponse, normalize};
pub use provider::{NoRevisions, RevisionProvider, SymbolProvider};
