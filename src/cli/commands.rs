//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "rehabrag")]
#[command(about = "Rehabilitation assistant: RAG over your research notes plus a progress tracker")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the RAG pipeline and start the API server
    Serve {
        /// Host to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Ask a single question and print the answer
    Ask {
        /// The question to ask
        question: String,
        /// Show the retrieved chunks
        #[arg(short, long)]
        sources: bool,
    },
    /// Split the source document into chunks without calling any provider
    Chunks {
        /// Document to chunk (overrides document.path)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show current configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from(["rehabrag", "serve", "--host", "127.0.0.1", "-p", "9000"])
            .unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_ask_with_global_flags() {
        let cli = Cli::try_parse_from([
            "rehabrag",
            "ask",
            "How often?",
            "--sources",
            "--config",
            "custom.toml",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(
            cli.command,
            Commands::Ask { ref question, sources: true } if question == "How often?"
        ));
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(Cli::try_parse_from(["rehabrag", "ask"]).is_err());
    }
}
