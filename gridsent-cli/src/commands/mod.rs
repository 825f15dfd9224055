//! CLI command implementations

use clap::Subcommand;

pub mod generate_config;
pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Aggregate sentiment per grid cell over a record stream
    Process(process::ProcessArgs),

    /// Check a lexicon and a grid without processing anything
    Validate(validate::ValidateArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Print the requested listing
    pub fn execute(&self) {
        match self {
            ListCommands::Formats => {
                println!("Available output formats:");
                for (name, description) in crate::output::OutputFormat::describe_all() {
                    println!("  {name:<10} - {description}");
                }
            }
        }
    }
}
