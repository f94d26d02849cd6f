use docket_config::DocketConfig;
use docket_core::MethodDoc;
use docket_parser::locate_enclosing;

use crate::cli::LocateArgs;
use crate::output::output;

/// Handle `docket locate`.
pub async fn handle(args: &LocateArgs, config: &DocketConfig) -> anyhow::Result<()> {
    let method = enclosing(args, config).await?;
    output(&method, false)
}

pub async fn enclosing(
    args: &LocateArgs,
    config: &DocketConfig,
) -> anyhow::Result<Option<MethodDoc>> {
    let parser = super::parser_for(args.symbols.as_deref(), config)?;
    let (document, text) = super::read_source(&args.file).await?;
    let model = parser.parse(&document, &text).await;
    Ok(locate_enclosing(&model.methods, args.line).cloned())
}
