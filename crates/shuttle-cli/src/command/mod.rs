use clap::{Parser, Subcommand};

use self::{check_config::CheckConfigArg, default_config::DefaultConfigArg, track::TrackArg};

mod check_config;
mod default_config;
mod track;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Record rallies and score a match in the terminal
    Track(#[clap(flatten)] TrackArg),
    /// Print the built-in court configuration as JSON
    DefaultConfig(#[clap(flatten)] DefaultConfigArg),
    /// Validate a court configuration file and summarize it
    CheckConfig(#[clap(flatten)] CheckConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Track(TrackArg::default())) {
        Mode::Track(arg) => track::run(&arg)?,
        Mode::DefaultConfig(arg) => default_config::run(&arg)?,
        Mode::CheckConfig(arg) => check_config::run(&arg)?,
    }
    Ok(())
}
