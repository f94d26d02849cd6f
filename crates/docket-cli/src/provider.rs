//! Symbol provider backed by a JSON dump on disk.

use std::path::PathBuf;

use async_trait::async_trait;
use docket_core::DocumentId;
use docket_symbols::{ProviderError, SymbolProvider};

/// Answers every lookup with the contents of one dump file.
///
/// Without a dump the answer is an empty list, which sends the parser down
/// the text fallback path.
#[derive(Debug, Clone, Default)]
pub struct DumpedSymbols {
    dump: Option<PathBuf>,
}

impl DumpedSymbols {
    #[must_use]
    pub const fn new(dump: Option<PathBuf>) -> Self {
        Self { dump }
    }
}

#[async_trait]
impl SymbolProvider for DumpedSymbols {
    async fn document_symbols(
        &self,
        document: &DocumentId,
    ) -> Result<serde_json::Value, ProviderError> {
        let Some(path) = &self.dump else {
            tracing::debug!(%document, "no symbol dump given");
            return Ok(serde_json::Value::Array(Vec::new()));
        };
        let raw = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn open_document_version(&self, _document: &DocumentId) -> Option<i32> {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn missing_dump_answers_empty_list() {
        let provider = DumpedSymbols::default();
        let answer = provider
            .document_symbols(&DocumentId::new("Order.java"))
            .await
            .expect("empty answer");
        assert_eq!(answer, json!([]));
    }

    #[tokio::test]
    async fn reads_dump_file() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("symbols.json");
        std::fs::write(&path, r#"[{"name":"Order","kind":5}]"#).expect("dump should write");

        let provider = DumpedSymbols::new(Some(path));
        let answer = provider
            .document_symbols(&DocumentId::new("Order.java"))
            .await
            .expect("dump should load");
        assert_eq!(answer, json!([{ "name": "Order", "kind": 5 }]));
    }

    #[tokio::test]
    async fn malformed_dump_is_a_json_error() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("symbols.json");
        std::fs::write(&path, "{ not json").expect("dump should write");

        let provider = DumpedSymbols::new(Some(path));
        let error = provider
            .document_symbols(&DocumentId::new("Order.java"))
            .await
            .expect_err("dump is malformed");
        assert!(matches!(error, ProviderError::Json(_)));
    }

    #[tokio::test]
    async fn unreadable_dump_is_an_io_error() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let provider = DumpedSymbols::new(Some(temp.path().join("absent.json")));
        let error = provider
            .document_symbols(&DocumentId::new("Order.java"))
            .await
            .expect_err("dump is absent");
        assert!(matches!(error, ProviderError::Io(_)));
    }
}
