//! # docket-parser
//!
//! Declaration and documentation-comment extraction without a grammar.
//!
//! Given a document's declaration symbols and its raw text, recovers for each
//! leaf declaration:
//! - the full (possibly multi-line) signature, its parameter types and return type
//! - the block comment documenting it, split into description and tag table
//! - field types, constant-ness and enum-constant arguments
//!
//! When no symbols are available a text scan recovers at least the container.
//! [`locate_enclosing`] maps a cursor line back to a declaration in O(log n).

pub mod comment;
pub mod cursor;
pub mod fallback;
pub mod flatten;
pub mod members;
pub mod scanner;
pub mod signature;
pub mod tags;

mod document;
mod error;
mod syntax;

pub use cursor::locate_enclosing;
pub use document::{DocumentParser, ParserOptions, build_model};
pub use error::ParserError;
pub use signature::{DEFAULT_MAX_SIGNATURE_LINES, Signature, extract_signature};
pub use tags::{TagBlock, TagKind, parse_tags, tokenize};
