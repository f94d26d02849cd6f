//! # docket-core
//!
//! Core types shared across all Docket crates.
//!
//! - Declaration symbols as supplied by a structural provider
//!   (kinds, ranges, nesting) and the flattened leaf records built from them
//! - The per-document documentation model consumed by the rendering layer
//!   (method, field and enum-constant documents)
//! - Tag tables parsed from documentation comments
//! - Access levels and document identities

pub mod document;
pub mod kind;
pub mod model;
pub mod symbol;
pub mod tags;
pub mod visibility;

pub use document::DocumentId;
pub use kind::DeclarationKind;
pub use model::{
    Authorship, DocumentModel, EnumConstantDoc, FieldDoc, LineSpan, MethodDoc, MethodKind,
    ModelSource, Parameter,
};
pub use symbol::{DeclarationSymbol, LeafDeclaration, Position, Range, UNKNOWN_OWNER};
pub use tags::{ParamTag, ReturnTag, TYPE_PARAMETER, TagTable, ThrowsTag, UNKNOWN_TYPE};
pub use visibility::Visibility;
