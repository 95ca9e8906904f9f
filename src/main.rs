use clap::Parser;
use rehabrag::cli::handle_ask;
use rehabrag::cli::handle_chunks_command;
use rehabrag::cli::handle_config_command;
use rehabrag::cli::handle_serve_api;
use rehabrag::cli::Cli;
use rehabrag::cli::Commands;
use rehabrag::config::AppConfig;
use rehabrag::RehabRag;
use rehabrag::Result;
use tracing::error;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Keys may come from a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration first
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };
    config.apply_env_overrides();

    // Initialize logging with configuration; keep the guard alive for the file writer
    let _guard = if cli.verbose {
        rehabrag::logging::init_logging_with_level(&config.logging.dir, "debug")?
    } else {
        rehabrag::logging::init_logging_with_config(&config.logging)?
    };

    config.validate()?;
    info!("Configuration loaded successfully");

    let result = run(cli.command, config).await;
    if let Err(e) = &result {
        error!("Command failed: {}", e);
    }
    result
}

async fn run(command: Commands, config: AppConfig) -> Result<()> {
    match command {
        Commands::Serve { host, port } => {
            let app = RehabRag::new(config);
            handle_serve_api(&app, host, port).await
        }
        Commands::Ask { question, sources } => {
            let app = RehabRag::new(config);
            handle_ask(&app, &question, sources).await
        }
        Commands::Chunks { path } => handle_chunks_command(&config, path),
        Commands::Config => handle_config_command(&config),
    }
}
