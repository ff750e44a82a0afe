pub mod args;
mod config;
mod display_model;
mod handlers;
mod render;

pub use args::Cli;
use args::{Commands, ConfigCommands, OutputFormat};
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let format = cli.format.unwrap_or(OutputFormat::Text);
    match cli.command {
        Commands::Analyze(args) => handlers::analyze::handle(args, cli.config.as_deref(), format),
        Commands::Config { command } => match command {
            ConfigCommands::Init { force } => handlers::init::handle(cli.config, force),
        },
    }
}
