use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

use toolr::ToolOrchestrator;
use toolr::controller::{RobotController, SimController};
use toolr::domain::{OperatingMode, ToolParameters};
use toolr::session::ensure_operational;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Read a ToolParameters JSON file.
fn load_params(path: &Path) -> Result<ToolParameters> {
    let content =
        fs::read_to_string(path).context(format!("Failed to read params file {}", path.display()))?;
    let params: ToolParameters =
        serde_json::from_str(&content).context(format!("Failed to parse params file {}", path.display()))?;
    Ok(params)
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    // TODO: swap SimController for the hardware transport adapter (connect
    // via config.robot.serial) once one lands
    let controller = Arc::new(SimController::new());

    ensure_operational(controller.as_ref(), &config.session.options()).await?;

    let orchestrator =
        ToolOrchestrator::with_tolerance(controller.clone(), config.validation.quat_tolerance);

    match &cli.command {
        Commands::List => handle_list(&orchestrator).await,
        Commands::Active => handle_active(&orchestrator).await,
        Commands::Exists { name } => handle_exists(&orchestrator, name).await,
        Commands::Params { name } => handle_params(&orchestrator, name).await,
        Commands::Add { name, params } => {
            require_idle_mode(controller.as_ref()).await?;
            handle_add(&orchestrator, name, params).await
        }
        Commands::Update { name, params } => {
            require_idle_mode(controller.as_ref()).await?;
            handle_update(&orchestrator, name, params).await
        }
        Commands::Switch { name } => {
            require_idle_mode(controller.as_ref()).await?;
            handle_switch(&orchestrator, name).await
        }
        Commands::Remove { name } => {
            require_idle_mode(controller.as_ref()).await?;
            handle_remove(&orchestrator, name).await
        }
        Commands::Replace { name, params } => {
            require_idle_mode(controller.as_ref()).await?;
            handle_replace(&orchestrator, name, params).await
        }
    }
}

/// Put the robot into IDLE mode before a pool mutation.
async fn require_idle_mode<C: RobotController>(controller: &C) -> Result<()> {
    if !controller.mode().await?.is_idle() {
        info!("Switching robot to IDLE mode");
        controller.switch_mode(OperatingMode::Idle).await?;
    }
    Ok(())
}

async fn handle_list<C: RobotController>(orchestrator: &ToolOrchestrator<C>) -> Result<()> {
    let pool = orchestrator.list().await?;
    println!("{}", "All configured tools:".cyan());
    for (i, entry) in pool.iter().enumerate() {
        println!("[{}] {}", i, entry.name);
    }
    Ok(())
}

async fn handle_active<C: RobotController>(orchestrator: &ToolOrchestrator<C>) -> Result<()> {
    let name = orchestrator.active_name().await?;
    println!("{} {}", "Current active tool:".cyan(), name);
    Ok(())
}

async fn handle_exists<C: RobotController>(
    orchestrator: &ToolOrchestrator<C>,
    name: &str,
) -> Result<()> {
    if orchestrator.exists(name).await? {
        println!("{} {}", name, "exists".green());
    } else {
        println!("{} {}", name, "does not exist".red());
    }
    Ok(())
}

async fn handle_params<C: RobotController>(
    orchestrator: &ToolOrchestrator<C>,
    name: &str,
) -> Result<()> {
    let params = orchestrator.params(name).await?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

async fn handle_add<C: RobotController>(
    orchestrator: &ToolOrchestrator<C>,
    name: &str,
    params_path: &Path,
) -> Result<()> {
    let params = load_params(params_path)?;
    orchestrator.add(name, &params).await?;
    println!("{} {}", "Added:".green(), name);
    Ok(())
}

async fn handle_update<C: RobotController>(
    orchestrator: &ToolOrchestrator<C>,
    name: &str,
    params_path: &Path,
) -> Result<()> {
    let params = load_params(params_path)?;
    orchestrator.update(name, &params).await?;
    println!("{} {}", "Updated:".green(), name);
    Ok(())
}

async fn handle_switch<C: RobotController>(
    orchestrator: &ToolOrchestrator<C>,
    name: &str,
) -> Result<()> {
    orchestrator.switch(name).await?;
    println!("{} {}", "Active tool:".green(), name);
    Ok(())
}

async fn handle_remove<C: RobotController>(
    orchestrator: &ToolOrchestrator<C>,
    name: &str,
) -> Result<()> {
    orchestrator.remove(name).await?;
    println!("{} {}", "Removed:".red(), name);
    Ok(())
}

async fn handle_replace<C: RobotController>(
    orchestrator: &ToolOrchestrator<C>,
    name: &str,
    params_path: &Path,
) -> Result<()> {
    let params = load_params(params_path)?;
    orchestrator.replace(name, &params).await?;
    println!("{} {}", "Replaced:".green(), name);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
