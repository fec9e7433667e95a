use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use polarjoin_server::{logging, server, signals, AppConfig, CliArgs};
use survey_calc::SurveyCalcModule;

use std::path::PathBuf;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// polarjoin server - polar and join survey calculations over HTTP
#[derive(Parser)]
#[command(name = "polarjoin-server")]
#[command(about = "polarjoin server - polar and join survey calculations over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.clone(),
        port: cli.port,
        verbose: cli.verbose,
        print_config: cli.print_config,
    };

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (POLARJOIN__*) -> 4) CLI overrides
    let mut config = AppConfig::load_layered(args.config.as_deref())?;
    config.apply_cli_overrides(&args);
    config.validate()?;

    if args.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    let _log_guard = logging::init_logging(&config.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "polarjoin server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config).await,
    }
}

async fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    let module = SurveyCalcModule::new(config.survey_calc.clone())
        .context("invalid survey_calc configuration")?;
    server::self_check(module.client().as_ref()).await?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    let cancel = signals::shutdown_token()?;
    server::serve(config, cancel).await
}
