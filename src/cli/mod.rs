//! CLI module for Focus Battle
//!
//! - `serve`: run the web server (default)
//! - `init-db`: create the SQLite schema and exit

pub mod init_db;
pub mod serve;

use clap::{Parser, Subcommand};

/// Focus Battle - focus session tracker with a leaderboard
#[derive(Parser)]
#[command(name = "focus-battle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the web server (default)
    Serve,

    /// Create the database schema if it does not exist
    InitDb,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::try_parse_from(["focus-battle"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::try_parse_from(["focus-battle", "serve"]).unwrap();
        assert_eq!(cli.command, Some(Command::Serve));

        let cli = Cli::try_parse_from(["focus-battle", "init-db"]).unwrap();
        assert_eq!(cli.command, Some(Command::InitDb));
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Cli::try_parse_from(["focus-battle", "migrate"]).is_err());
    }
}
