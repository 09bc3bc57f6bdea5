//! CLI definitions and entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::commands;
use regtools::config::Config;
use regtools::output::OutputMode;

/// regtools - maintenance tools for the customer registration app
#[derive(Parser, Debug)]
#[command(
    name = "regtools",
    version,
    about = "Maintenance tools for the customer registration app",
    long_about = "Maintenance tools for the customer registration app.\n\n\
                  fix-imports removes redundant default imports from a source tree.\n\
                  verify reports how completely a submitted customer was stored."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ~/.regtools/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Remove a redundant `import React from 'react'` where other react imports exist
    FixImports {
        /// Directory to scan (default: fixer.root from config)
        root: Option<PathBuf>,

        /// Report what would change without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Verify that a customer submission was stored completely
    Verify {
        /// Customer ID to verify (default: most recent customer)
        customer_id: Option<String>,

        /// Lookback window in minutes when no customer ID is given
        minutes_back: Option<u32>,

        #[command(flatten)]
        db: DbArgs,
    },

    /// Show version
    Version,
}

/// Database connection overrides
#[derive(Args, Debug, Default)]
pub struct DbArgs {
    /// Database host
    #[arg(long)]
    pub host: Option<String>,

    /// Database port
    #[arg(long)]
    pub port: Option<u16>,

    /// Database name
    #[arg(long)]
    pub database: Option<String>,

    /// Database user
    #[arg(long)]
    pub user: Option<String>,

    /// Database password
    #[arg(long)]
    pub password: Option<String>,
}

/// Run the CLI
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are reported through the error path too
            err.print()?;
            return Ok(if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        },
    };

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::FixImports { root, dry_run }) => {
            let config = Config::load(cli.config.as_deref())?;
            config.fixer.validate()?;
            commands::fix_imports(root.as_deref(), dry_run, &config, output_mode)
        },
        Some(Command::Verify {
            customer_id,
            minutes_back,
            db,
        }) => {
            let mut config = Config::load(cli.config.as_deref())?;
            config.database.validate()?;
            commands::apply_db_args(&mut config, db);
            commands::verify(customer_id, minutes_back, &config, output_mode)
        },
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("regtools v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(ExitCode::SUCCESS)
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("regtools v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'regtools --help' for usage");
                println!("Run 'regtools verify' to check the latest submission");
            }
            Ok(ExitCode::SUCCESS)
        },
    }
}
