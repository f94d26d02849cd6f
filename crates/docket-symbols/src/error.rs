//! Errors raised by external providers.

/// Failure of an external symbol or revision lookup.
///
/// Never surfaces past [`SymbolCache`](crate::SymbolCache) or the document
/// parser: both log it and continue with an empty result.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Lookup failed for {document}: {message}")]
    LookupFailed { document: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
