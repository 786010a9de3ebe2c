//! Vellum CLI - incremental markdown site compiler
//!
//! Usage: vellum <COMMAND>
//!
//! Commands:
//!   build   Compile the site once
//!   watch   Watch for changes and rebuild continuously

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { root } => commands::cmd_build(&root, cli.json, cli.verbose),
        Commands::Watch { root } => commands::cmd_watch(&root, cli.json),
    }
}
