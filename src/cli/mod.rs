//! CLI-specific functionality for the task analyzer
//!
//! This module contains all CLI-related code including argument parsing,
//! task file loading, and configuration discovery.

pub mod args;
pub mod config;
pub mod tasks;

pub use args::{AnalyzeConfig, Args, ExecutionMode, ServeConfig};
pub use config::ConfigDiscovery;
pub use tasks::{FileError, TaskLoader};
