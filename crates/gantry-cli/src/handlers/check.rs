use crate::cli::CheckArgs;
use crate::filter::LineFilter;
use crate::output;
use crate::script;
use gantry_core::AppConfig;
use serde::Serialize;

#[derive(Serialize)]
pub struct CheckedCommand {
    pub line: usize,
    pub description: String,
}

pub async fn handle(args: CheckArgs) -> anyhow::Result<()> {
    let config = AppConfig::load();

    let source = tokio::fs::read_to_string(&args.script)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read script {}: {}", args.script, e))?;

    let filter = LineFilter::from_args(&args.patterns, args.negate)?;
    let commands = script::parse_script(&source, filter.as_ref(), &config)?;

    let items: Vec<CheckedCommand> = commands
        .into_iter()
        .map(|parsed| CheckedCommand {
            line: parsed.line,
            description: parsed.description,
        })
        .collect();

    output::output_list(items);
    Ok(())
}
