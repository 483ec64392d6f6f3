//! Command-line arguments.

use clap::{Parser, Subcommand};

/// Smart Fitness Management System: members, classes, workouts and reports
#[derive(Parser, Debug)]
#[command(name = "fitcenter", version, about, long_about = None)]
pub struct Cli {
    /// SQLite database, e.g. `sqlite:fitcenter.db` (overrides DATABASE_URL)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the web interface (the default)
    Serve {
        /// Address to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run the numbered-menu interface on the terminal
    Text,

    /// Load sample members, trainers, classes and payments into an empty database
    Seed,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            host: None,
            port: None,
        })
    }

    /// Tracing filter used when `RUST_LOG` is unset. The text interface
    /// keeps quiet so log lines do not interleave with the menu.
    pub fn default_log_filter(&self) -> &'static str {
        match self.command() {
            Command::Text => "fitcenter=warn",
            _ => "fitcenter=info,tower_http=info",
        }
    }
}
