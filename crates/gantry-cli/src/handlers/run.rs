use crate::cli::RunArgs;
use crate::context::CliContext;
use crate::filter::LineFilter;
use crate::output;
use crate::script;
use chrono::{DateTime, Utc};
use gantry_core::AppConfig;
use gantry_domain::Rig;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub script: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub executed: Vec<String>,
    pub undone: Vec<String>,
    pub rig: Rig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<String>,
}

pub async fn handle(ctx: &mut CliContext, args: RunArgs) -> anyhow::Result<()> {
    let started_at = Utc::now();
    let config = AppConfig::load();

    let source = tokio::fs::read_to_string(&args.script)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read script {}: {}", args.script, e))?;

    let filter = LineFilter::from_args(&args.patterns, args.negate)?;
    let commands = script::parse_script(&source, filter.as_ref(), &config)?;
    tracing::info!("Parsed {} commands from {}", commands.len(), args.script);

    ctx.enqueue_parsed(commands);

    if let Err(e) = ctx.execute_all() {
        if args.rollback {
            let done = ctx.controller.history_len();
            tracing::warn!("Rolling back {} executed commands", done);
            ctx.undo_last(done)?;
        } else {
            // failed runs persist their partial progress
            ctx.save().await?;
        }
        output::output_error(&e.to_string());
    }

    let executed = ctx.controller.history_descriptions();

    let mut undone = Vec::new();
    if let Some(n) = args.undo {
        let before = ctx.controller.history_len();
        ctx.undo_last(n)?;
        let count = before - ctx.controller.history_len();
        undone = executed[executed.len() - count..]
            .iter()
            .rev()
            .cloned()
            .collect();
        tracing::info!("Undid {} of {} executed commands", count, before);
    }

    ctx.save().await?;

    let report = RunReport {
        run_id: Uuid::new_v4(),
        script: args.script,
        started_at,
        finished_at: Utc::now(),
        executed,
        undone,
        rig: ctx.rig.clone(),
        state_file: ctx.state_path(),
    };
    output::output_success(report);
    Ok(())
}
