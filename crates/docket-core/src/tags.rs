//! Structured documentation-comment tags.

use serde::{Deserialize, Serialize};

/// Pseudo-type given to generic parameters documented as `@param <T>`.
pub const TYPE_PARAMETER: &str = "type-parameter";

/// Type given to a parameter whose name does not appear in the signature.
pub const UNKNOWN_TYPE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamTag {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
}

impl ParamTag {
    /// Whether the tag documents a generic parameter (`<T>`).
    #[must_use]
    pub fn is_type_parameter(&self) -> bool {
        self.type_name == TYPE_PARAMETER
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnTag {
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrowsTag {
    pub exception: String,
    pub description: String,
}

/// Tags parsed from one documentation comment.
///
/// Only tags present in the source are populated; `TagTable::default()` is the
/// empty table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagTable {
    pub params: Vec<ParamTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<ReturnTag>,
    pub throws: Vec<ThrowsTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub see: Vec<String>,
}

impl TagTable {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamTag> {
        self.params.iter().find(|param| param.name == name)
    }
}
