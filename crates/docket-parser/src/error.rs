//! Parser error types for docket-parser.

/// Errors raised while extracting a single declaration.
///
/// The document parser never returns these to its caller: the affected
/// declaration is logged and dropped, the rest of the document is kept.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Line {line} is outside the document ({line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },

    #[error("Extraction failed for {name}: {message}")]
    ExtractionFailed { name: String, message: String },
}
