use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gallerist")]
#[command(author, version, about = "Image gallery backend backed by a media host")]
pub struct Cli {
    /// Path to config file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate a configuration file and print warnings
    Validate {
        /// Config file to validate
        #[arg(required = false)]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_with_overrides() {
        let cli = Cli::parse_from(["gallerist", "-c", "g.json", "start", "--port", "9000"]);
        assert_eq!(cli.config, Some(PathBuf::from("g.json")));
        match cli.command {
            Commands::Start { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected start"),
        }
    }

    #[test]
    fn parses_validate_positional() {
        let cli = Cli::parse_from(["gallerist", "validate", "other.json"]);
        assert!(matches!(cli.command, Commands::Validate { config: Some(_) }));
    }
}
