use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "balance-monitor", version, about = "Alerts on relative balance changes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll the configured account and emit alerts (default)
    Run(RunArgs),

    /// Decode a hex alert payload and print it as JSON
    Decode {
        /// ABI payload, with or without 0x prefix
        payload: String,
    },
}

#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Override POLL_INTERVAL_MS
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    pub max_ticks: Option<u64>,

    /// Force JSON log output
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// `run` with default arguments when no subcommand is given.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Run(RunArgs::default()))
    }
}
