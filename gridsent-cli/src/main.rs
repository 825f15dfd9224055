use anyhow::Result;
use clap::Parser;
use gridsent_cli::commands::Commands;

/// Gridded sentiment aggregation over large record streams
#[derive(Debug, Parser)]
#[command(name = "gridsent", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
        Commands::List { subcommand } => {
            subcommand.execute();
            Ok(())
        }
    }
}
