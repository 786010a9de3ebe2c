//! Command implementations for the CLI binary

mod build;
mod watch;

pub use build::cmd_build;
pub use watch::cmd_watch;
