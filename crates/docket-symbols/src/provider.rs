use async_trait::async_trait;
use docket_core::{Authorship, DocumentId};

use crate::ProviderError;

/// The structural-analysis service that knows a document's declarations.
#[async_trait]
pub trait SymbolProvider: Send + Sync {
    /// Raw lookup result: either a hierarchical `DocumentSymbol`-style tree or a
    /// flat `SymbolInformation`-style list. See [`normalize`](crate::normalize).
    async fn document_symbols(
        &self,
        document: &DocumentId,
    ) -> Result<serde_json::Value, ProviderError>;

    /// Version of the document if it is currently open. Used only as a cache key.
    fn open_document_version(&self, document: &DocumentId) -> Option<i32>;
}

/// Revision-control metadata for a file.
#[async_trait]
pub trait RevisionProvider: Send + Sync {
    async fn is_under_version_control(&self, path: &str) -> Result<bool, ProviderError>;

    async fn authorship(&self, path: &str, line: u32) -> Result<Option<Authorship>, ProviderError>;
}

/// Revision provider for documents outside any repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRevisions;

#[async_trait]
impl RevisionProvider for NoRevisions {
    async fn is_under_version_control(&self, _path: &str) -> Result<bool, ProviderError> {
        Ok(false)
    }

    async fn authorship(
        &self,
        _path: &str,
        _line: u32,
    ) -> Result<Option<Authorship>, ProviderError> {
        Ok(None)
    }
}
