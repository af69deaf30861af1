//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use amalgam::output::OutputConfig;

use crate::commands;

/// Amalgam - Merge a C/C++ source tree into a single header
#[derive(Parser, Debug)]
#[command(name = "amalgam")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Amalgamate the source tree into a single self-contained header
    Build(commands::build::BuildArgs),

    /// Resolve and print the dependency-first file order
    Order(commands::order::OrderArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.log_level.clone()),
        )
        .init();

        let output_config = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Build(args) => commands::build::execute(args, &output_config),
            Commands::Order(args) => commands::order::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
