//! The per-document documentation model handed to the rendering layer.
//!
//! Every list in a [`DocumentModel`] is sorted ascending by start line, which
//! is what the cursor locator's binary search relies on.

use serde::{Deserialize, Serialize};

use crate::{DocumentId, TagTable, Visibility};

/// Anything occupying an inclusive, zero-based line span.
pub trait LineSpan {
    fn start_line(&self) -> u32;
    fn end_line(&self) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Method,
    Constructor,
}

/// One `(name, type)` pair from a signature's parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDoc {
    /// `name:startLine`; unique within one document.
    pub id: String,
    pub kind: MethodKind,
    pub name: String,
    /// `name(Type, Type)`.
    pub display_signature: String,
    /// Whitespace-normalized declaration text up to the closing `)`.
    pub signature: String,
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub start_line: u32,
    pub end_line: u32,
    pub has_comment: bool,
    pub description: String,
    pub tags: TagTable,
    pub owner: String,
    pub visibility: Visibility,
}

impl MethodDoc {
    #[must_use]
    pub fn make_id(name: &str, start_line: u32) -> String {
        format!("{name}:{start_line}")
    }
}

impl LineSpan for MethodDoc {
    fn start_line(&self) -> u32 {
        self.start_line
    }

    fn end_line(&self) -> u32 {
        self.end_line
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    /// The trimmed declaration line.
    pub declaration: String,
    pub start_line: u32,
    pub has_comment: bool,
    pub description: String,
    pub is_constant: bool,
    pub visibility: Visibility,
    pub owner: String,
}

impl LineSpan for FieldDoc {
    fn start_line(&self) -> u32 {
        self.start_line
    }

    fn end_line(&self) -> u32 {
        self.start_line
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumConstantDoc {
    pub name: String,
    pub start_line: u32,
    pub has_comment: bool,
    pub description: String,
    /// Balanced `(...)` constructor arguments, or empty.
    pub arguments: String,
    pub owner: String,
}

impl LineSpan for EnumConstantDoc {
    fn start_line(&self) -> u32 {
        self.start_line
    }

    fn end_line(&self) -> u32 {
        self.start_line
    }
}

/// Revision-control authorship of the container declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorship {
    pub author: String,
    pub last_modifier: String,
    pub last_modify_date: String,
}

/// Where the container information came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    /// Built from the provider's symbol tree.
    #[default]
    Symbols,
    /// The provider returned nothing; the container came from a text scan.
    TextFallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    pub document: DocumentId,
    pub container_name: String,
    pub has_comment: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// Line of the primary container's identifier, when one was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_line: Option<u32>,
    pub methods: Vec<MethodDoc>,
    pub fields: Vec<FieldDoc>,
    pub enum_constants: Vec<EnumConstantDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorship: Option<Authorship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    pub source: ModelSource,
}

impl DocumentModel {
    /// Model with no members, used as the starting point of every parse.
    #[must_use]
    pub fn empty(document: DocumentId, container_name: impl Into<String>) -> Self {
        Self {
            document,
            container_name: container_name.into(),
            has_comment: false,
            description: String::new(),
            package_name: None,
            container_line: None,
            methods: Vec::new(),
            fields: Vec::new(),
            enum_constants: Vec::new(),
            authorship: None,
            author: None,
            since: None,
            source: ModelSource::default(),
        }
    }

    /// Sort every member list ascending by start line (stable).
    pub fn sort_members(&mut self) {
        self.methods.sort_by_key(|method| method.start_line);
        self.fields.sort_by_key(|field| field.start_line);
        self.enum_constants.sort_by_key(|constant| constant.start_line);
    }
}
