use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Vellum - incremental markdown site compiler
#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the site once
    Build {
        /// Project root (holds the content directory and vellum.toml)
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Watch for changes and rebuild continuously
    Watch {
        /// Project root (holds the content directory and vellum.toml)
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
}
