use docket_config::DocketConfig;
use docket_core::DocumentModel;

use crate::cli::ParseArgs;
use crate::output::output;

/// Handle `docket parse`.
pub async fn handle(args: &ParseArgs, config: &DocketConfig) -> anyhow::Result<()> {
    let model = document(args, config).await?;
    output(&model, args.compact)
}

pub async fn document(args: &ParseArgs, config: &DocketConfig) -> anyhow::Result<DocumentModel> {
    let parser = super::parser_for(args.symbols.as_deref(), config)?;
    let (document, text) = super::read_source(&args.file).await?;
    Ok(parser.parse(&document, &text).await)
}
