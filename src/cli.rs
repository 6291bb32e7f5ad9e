// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kalunwa", version, about = "Kalunwa content backend")]
pub struct Cli {
    /// Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API.
    Serve,
    /// Insert content from a JSON fixture file in one transaction.
    Load { path: PathBuf },
    /// Delete an image that no jumbotron, event, project or news item uses.
    DeleteImage { id: i64 },
}

impl Cli {
    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}
