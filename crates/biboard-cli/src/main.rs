//! Biboard CLI - single-operator BI project tracking

mod render;
mod shell;

use std::io::{self, IsTerminal};

use biboard_core::config::{Config, PASSWORD_ENV};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use render::OutputFormat;
use shell::{Interactive, Piped, Shell};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "biboard")]
#[command(author, version, about = "Single-operator tracker for BI projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format (text or json); defaults to display.default_format
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Evaluate progress and days remaining as of this date (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    as_of: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Shell,

    /// List the project statuses and their labels
    Statuses,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Run health check
    Doctor,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show config file path
    Path,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so tables and JSON on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("biboard=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => cmd_shell(cli.format, cli.quiet, cli.as_of),
        Commands::Statuses => {
            let format = resolve_format(cli.format, &Config::load()?);
            render::statuses(&mut io::stdout(), format)
        }
        Commands::Config { action } => cmd_config(action, cli.quiet),
        Commands::Doctor => cmd_doctor(cli.quiet),
    }
}

fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.or_else(|| OutputFormat::parse(&config.display.default_format))
        .unwrap_or_default()
}

// ============================================================================
// Command Implementations
// ============================================================================

fn cmd_shell(format: Option<OutputFormat>, quiet: bool, as_of: Option<NaiveDate>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let credentials = config.operator_credentials()?;
    let format = resolve_format(format, &config);

    let mut shell = Shell::new(credentials, &config, format, quiet);
    if let Some(day) = as_of {
        shell = shell.with_today(day);
    }
    let mut stdout = io::stdout();

    if io::stdin().is_terminal() {
        let mut input = Interactive::new()?;
        shell.run(&mut input, &mut stdout)?;
    } else {
        let mut input = Piped::new(io::stdin().lock());
        shell.run(&mut input, &mut stdout)?;
    }

    let session = shell.session();
    info!(
        session = %session.id,
        projects = session.store().len(),
        "Session ended"
    );
    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn cmd_doctor(quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        println!("Biboard Health Check");
        println!("====================");
        println!();
    }

    let mut all_ok = true;

    match Config::load() {
        Ok(config) => {
            if !quiet {
                println!("[OK] Configuration: Valid");
                println!("[OK] Operator: {}", config.operator.username);
            }

            match config.operator.resolved_password() {
                Ok(Some(_)) => {
                    if !quiet {
                        println!("[OK] Password: Configured (from {})", PASSWORD_ENV);
                    }
                }
                Ok(None) => {
                    all_ok = false;
                    println!("[!!] Password: Not set. Export {} before starting a session.", PASSWORD_ENV);
                }
                Err(e) => {
                    all_ok = false;
                    println!("[!!] Password: {}", e);
                }
            }
        }
        Err(e) => {
            all_ok = false;
            warn!(error = %e, "Configuration failed to load");
            println!("[!!] Configuration: {}", e);
        }
    }

    if !quiet {
        println!();
        if all_ok {
            println!("All checks passed.");
        } else {
            println!("Some checks failed.");
        }
    }

    if all_ok {
        Ok(())
    } else {
        Err(anyhow::anyhow!("Health check failed"))
    }
}
