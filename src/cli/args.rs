//! Command line argument parsing
//!
//! This module handles CLI argument parsing with subcommands:
//! - `serve`: Run the HTTP API
//! - `analyze`: Rank the tasks in a JSON file and print the result
//! - `strategies`: List the scoring strategies and their weights
//! - `show-config`: Show configuration discovery information
//! - `init-config`: Write the default configuration to a file

use crate::task::Strategy;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug)]
pub enum ExecutionMode {
    Serve(ServeConfig),
    Analyze(AnalyzeConfig),
    ListStrategies,
    ShowConfig,
    InitConfig(PathBuf),
}

#[derive(Debug)]
pub struct ServeConfig {
    pub config_override: Option<PathBuf>,
    pub bind_override: Option<String>,
}

#[derive(Debug)]
pub struct AnalyzeConfig {
    pub file: PathBuf,
    pub config_override: Option<PathBuf>,
    pub strategy: Option<Strategy>,
    pub today: Option<NaiveDate>,
    pub compact: bool,
}

#[derive(Debug, Parser)]
#[command(name = "task-analyzer")]
#[command(author = "Task Analyzer Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate task lists, detect dependency cycles and rank tasks by priority")]
#[command(long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Configuration file path
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,
        /// Address to listen on, e.g. 0.0.0.0:8000
        #[arg(short = 'b', long = "bind")]
        bind: Option<String>,
    },
    /// Rank the tasks in a JSON file (a request object or a bare task array)
    Analyze {
        /// Path to the JSON task file
        file: PathBuf,
        /// Configuration file path
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,
        /// Scoring strategy (smart_balance, fastest_wins, high_impact, deadline_driven)
        #[arg(short = 's', long = "strategy")]
        strategy: Option<String>,
        /// Score as if today were this date (YYYY-MM-DD)
        #[arg(long = "today", value_name = "DATE")]
        today: Option<NaiveDate>,
        /// Print single-line JSON
        #[arg(long = "compact")]
        compact: bool,
    },
    /// List scoring strategies and their weights
    Strategies,
    /// Show configuration discovery information
    ShowConfig,
    /// Write the default configuration as TOML
    InitConfig {
        /// Destination file
        #[arg(default_value = "task-analyzer.toml")]
        path: PathBuf,
    },
}

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn mode(&self) -> Result<ExecutionMode, String> {
        match &self.command {
            Some(Commands::Serve { config, bind }) => Ok(ExecutionMode::Serve(ServeConfig {
                config_override: config.clone(),
                bind_override: bind.clone(),
            })),
            Some(Commands::Analyze {
                file,
                config,
                strategy,
                today,
                compact,
            }) => Ok(ExecutionMode::Analyze(AnalyzeConfig {
                file: file.clone(),
                config_override: config.clone(),
                strategy: strategy.as_deref().map(Strategy::from_name),
                today: *today,
                compact: *compact,
            })),
            Some(Commands::Strategies) => Ok(ExecutionMode::ListStrategies),
            Some(Commands::ShowConfig) => Ok(ExecutionMode::ShowConfig),
            Some(Commands::InitConfig { path }) => Ok(ExecutionMode::InitConfig(path.clone())),
            None => Err(
                "No command specified. Use 'task-analyzer --help' to see available commands."
                    .to_string(),
            ),
        }
    }
}
