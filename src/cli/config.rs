//! Configuration discovery and loading
//!
//! This module handles the configuration discovery hierarchy:
//! 1. `$TASK_ANALYZER_CONFIG`
//! 2. Current directory: ./task-analyzer.toml or ./.task-analyzer/config.toml
//! 3. User config: ~/.task-analyzer/config.toml
//! 4. System config: /etc/task-analyzer/config.toml
//! 5. Built-in defaults

use crate::{config::ServiceConfig, env};
use anyhow::Result;
use std::env as std_env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration discovery system
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Load `config_override` if given, otherwise discover a config file
    pub fn load(config_override: Option<&Path>) -> Result<ServiceConfig> {
        match config_override {
            Some(path) => {
                info!("Loading configuration override from: {:?}", path);
                ServiceConfig::from_toml_file(path)
            }
            None => Self::discover_config(),
        }
    }

    /// Discover and load configuration using the hierarchy
    pub fn discover_config() -> Result<ServiceConfig> {
        if let Some(config_path) = Self::find_config_file() {
            info!("Loading configuration from: {:?}", config_path);
            return ServiceConfig::from_toml_file(config_path);
        }

        info!("No configuration file found, using defaults");
        Ok(ServiceConfig::default())
    }

    /// Find configuration file using discovery hierarchy
    pub fn find_config_file() -> Option<PathBuf> {
        Self::first_existing(&Self::get_config_candidates())
    }

    /// First candidate that exists and is a regular file
    pub fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
        for candidate in candidates {
            debug!("Checking for config file: {:?}", candidate);
            if candidate.is_file() {
                debug!("Found config file: {:?}", candidate);
                return Some(candidate.clone());
            }
        }

        debug!("No config file found in discovery hierarchy");
        None
    }

    /// Get list of configuration file candidates in priority order
    pub fn get_config_candidates() -> Vec<PathBuf> {
        Self::candidates_for(
            std_env::var_os(env::CONFIG_ENV_VAR).map(PathBuf::from),
            std_env::current_dir().ok(),
            Self::get_home_dir(),
        )
    }

    /// Candidate list for explicit locations, in priority order
    pub fn candidates_for(
        explicit: Option<PathBuf>,
        current_dir: Option<PathBuf>,
        home_dir: Option<PathBuf>,
    ) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Some(path) = explicit {
            candidates.push(path);
        }

        if let Some(current_dir) = current_dir {
            candidates.push(env::local_config_file_path(&current_dir));
            candidates.push(env::local_app_config_file_path(&current_dir));
        }

        if let Some(home_dir) = home_dir {
            candidates.push(env::user_config_file_path(&home_dir));
        }

        #[cfg(unix)]
        candidates.push(PathBuf::from(env::SYSTEM_CONFIG_FILE));

        candidates
    }

    /// Get home directory path
    fn get_home_dir() -> Option<PathBuf> {
        std_env::var("HOME")
            .ok()
            .or_else(|| std_env::var("USERPROFILE").ok())
            .map(PathBuf::from)
    }

    /// Show configuration discovery information for debugging
    pub fn show_discovery_info() {
        println!("Configuration Discovery Hierarchy:");
        println!();

        let candidates = Self::get_config_candidates();
        for (i, candidate) in candidates.iter().enumerate() {
            let status = if candidate.exists() {
                if candidate.is_file() {
                    "✓ EXISTS"
                } else {
                    "✗ NOT A FILE"
                }
            } else {
                "✗ NOT FOUND"
            };

            println!("  {}. {:?} - {}", i + 1, candidate, status);
        }

        println!();
        if let Some(found) = Self::first_existing(&candidates) {
            println!("Active configuration: {:?}", found);
        } else {
            println!("Active configuration: Built-in defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_candidate_order() {
        let candidates = ConfigDiscovery::candidates_for(
            Some(PathBuf::from("/custom/analyzer.toml")),
            Some(PathBuf::from("/work")),
            Some(PathBuf::from("/home/someone")),
        );

        assert_eq!(candidates[0], PathBuf::from("/custom/analyzer.toml"));
        assert_eq!(candidates[1], PathBuf::from("/work/task-analyzer.toml"));
        assert_eq!(
            candidates[2],
            PathBuf::from("/work/.task-analyzer/config.toml")
        );
        assert_eq!(
            candidates[3],
            PathBuf::from("/home/someone/.task-analyzer/config.toml")
        );
    }

    #[test]
    fn test_first_existing_skips_missing_and_directories() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        let directory = temp_dir.path().join("dir.toml");
        let present = temp_dir.path().join("present.toml");
        std::fs::create_dir(&directory).unwrap();
        std::fs::write(&present, "").unwrap();

        let found = ConfigDiscovery::first_existing(&[missing, directory, present.clone()]);
        assert_eq!(found, Some(present));
    }

    #[test]
    fn test_load_override() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("override.toml");
        std::fs::write(&config_path, "[server]\nbind_address = \"127.0.0.1:1234\"\n").unwrap();

        let config = ConfigDiscovery::load(Some(&config_path)).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:1234");

        assert!(ConfigDiscovery::load(Some(&temp_dir.path().join("nope.toml"))).is_err());
    }
}
