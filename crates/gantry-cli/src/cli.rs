use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gantry")]
#[command(about = "A scriptable motion-command sequencer with bounded undo", long_about = None)]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")"))]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Path to the rig state file (or set GANTRY_FILE env var)
    #[arg(long, short = 'f', value_name = "FILE", env = "GANTRY_FILE", global = true)]
    pub file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a motion script against the rig
    Run(RunArgs),
    /// Parse a motion script without executing anything
    Check(CheckArgs),
    /// Show the persisted rig state
    Status,
    /// Reinitialize the rig state file
    Reset,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Path to the motion script
    #[arg(value_name = "SCRIPT")]
    pub script: String,

    /// Keep only script lines matching this regex (repeatable; a line
    /// must match every pattern)
    #[arg(long = "match", value_name = "REGEX")]
    pub patterns: Vec<String>,

    /// Invert the line filter
    #[arg(long)]
    pub negate: bool,

    /// Undo the last N commands after the script completes
    #[arg(long, value_name = "N")]
    pub undo: Option<usize>,

    /// On failure, undo everything this run executed instead of keeping
    /// partial progress
    #[arg(long)]
    pub rollback: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the motion script
    #[arg(value_name = "SCRIPT")]
    pub script: String,

    /// Keep only script lines matching this regex (repeatable)
    #[arg(long = "match", value_name = "REGEX")]
    pub patterns: Vec<String>,

    /// Invert the line filter
    #[arg(long)]
    pub negate: bool,
}
