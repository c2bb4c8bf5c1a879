//! Environment constants and path utilities for the task analyzer.
//!
//! This module centralizes hardcoded paths, addresses and names used
//! throughout the application, making them easier to maintain and modify.

use std::path::{Path, PathBuf};

/// Application directory name (hidden directory like .git, .vscode)
pub const APP_DIR_NAME: &str = ".task-analyzer";

/// Configuration file name inside the application directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration file name looked up in the working directory
pub const LOCAL_CONFIG_FILE_NAME: &str = "task-analyzer.toml";

/// System-wide configuration file (Unix-like systems)
pub const SYSTEM_CONFIG_FILE: &str = "/etc/task-analyzer/config.toml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "TASK_ANALYZER_CONFIG";

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

pub const DEFAULT_LOG_FILTER: &str = "task_analyzer=info,tower_http=info";

/// HTTP API paths
pub mod api {
    /// API root, serving the endpoint index
    pub const ROOT: &str = "/api/tasks/";

    /// API root without the trailing slash, redirected to [`ROOT`]
    pub const ROOT_NO_SLASH: &str = "/api/tasks";

    pub const ANALYZE_ENDPOINT: &str = "/api/tasks/analyze/";

    pub const SUGGEST_ENDPOINT: &str = "/api/tasks/suggest/";
}

/// Build the application directory path from a base directory
pub fn app_dir_path(base: &Path) -> PathBuf {
    base.join(APP_DIR_NAME)
}

/// `./task-analyzer.toml` relative to `dir`
pub fn local_config_file_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE_NAME)
}

/// `./.task-analyzer/config.toml` relative to `dir`
pub fn local_app_config_file_path(dir: &Path) -> PathBuf {
    app_dir_path(dir).join(CONFIG_FILE_NAME)
}

/// `~/.task-analyzer/config.toml`
pub fn user_config_file_path(home_dir: &Path) -> PathBuf {
    app_dir_path(home_dir).join(CONFIG_FILE_NAME)
}
