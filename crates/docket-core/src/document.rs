use serde::{Deserialize, Serialize};

/// Identity of one open document: a `file://` URI or a plain path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem path behind the identity (`file://` scheme stripped).
    #[must_use]
    pub fn path(&self) -> &str {
        self.0.strip_prefix("file://").unwrap_or(&self.0)
    }

    /// File name without directories or extension: `Foo` for `.../Foo.java`.
    #[must_use]
    pub fn base_name(&self) -> &str {
        let file = self
            .path()
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();
        file.split_once('.').map_or(file, |(stem, _)| stem)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
