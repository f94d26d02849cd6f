use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use docket_config::DocketConfig;
use docket_core::DocumentId;
use docket_parser::{DocumentParser, ParserOptions};
use docket_symbols::SymbolCache;

use crate::cli::Commands;
use crate::provider::DumpedSymbols;

pub mod locate;
pub mod parse;

#[cfg(test)]
mod testing;

pub async fn dispatch(command: Commands, config: &DocketConfig) -> anyhow::Result<()> {
    match command {
        Commands::Parse(args) => parse::handle(&args, config).await,
        Commands::Locate(args) => locate::handle(&args, config).await,
    }
}

/// A parser wired to the dump at `symbols` with the configured limits.
fn parser_for(symbols: Option<&Path>, config: &DocketConfig) -> anyhow::Result<DocumentParser> {
    if let Some(path) = symbols {
        anyhow::ensure!(
            path.is_file(),
            "symbol dump '{}' does not exist",
            path.display()
        );
    }
    let provider = Arc::new(DumpedSymbols::new(symbols.map(Path::to_path_buf)));
    let options = ParserOptions {
        max_signature_lines: config.parser.max_signature_lines,
        prefer_file_name_container: config.parser.prefer_file_name_container,
    };
    Ok(DocumentParser::new(SymbolCache::new(provider, config.cache.capacity)).with_options(options))
}

/// Read a source file and name it the way editors do.
async fn read_source(file: &Path) -> anyhow::Result<(DocumentId, String)> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read source file {}", file.display()))?;
    let absolute = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
    Ok((DocumentId::new(absolute.display().to_string()), text))
}
