use clap::{Parser, Subcommand};

mod ask;
mod classify;
mod report;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Answer a free-text question about the passenger dataset
    Ask(ask::AskArg),
    /// Print the full statistical profile of the dataset
    Report(report::ReportArg),
    /// Show which analysis intent a query routes to
    Classify(classify::ClassifyArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Ask(arg) => ask::run(&arg),
        Mode::Report(arg) => report::run(&arg),
        Mode::Classify(arg) => classify::run(&arg),
    }
}
