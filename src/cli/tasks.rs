//! Task file loading for the `analyze` command
//!
//! A task file is JSON in one of two shapes:
//! - a full request object: `{ "strategy": "...", "tasks": [...] }`
//! - a bare array of tasks: `[ {...}, {...} ]`

use crate::task::AnalyzeRequest;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("File '{path}' not found")]
    NotFound { path: PathBuf },

    #[error("IO error reading '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Task parsing error in '{path}': {reason}")]
    ParseError { path: PathBuf, reason: String },
}

/// Task loader responsible for reading task files
pub struct TaskLoader;

impl TaskLoader {
    /// Read and parse a task file
    pub fn load_request<P: AsRef<Path>>(path: P) -> Result<AnalyzeRequest, FileError> {
        let path = path.as_ref().to_path_buf();
        debug!("Loading task file: {:?}", path);

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound { path: path.clone() },
            _ => FileError::IoError {
                path: path.clone(),
                source: e,
            },
        })?;

        Self::parse_request(&content).map_err(|reason| FileError::ParseError { path, reason })
    }

    /// Parse task file contents
    pub fn parse_request(content: &str) -> Result<AnalyzeRequest, String> {
        let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;

        let request = match value {
            Value::Array(tasks) => AnalyzeRequest {
                strategy: None,
                tasks,
            },
            object @ Value::Object(_) => {
                serde_json::from_value(object).map_err(|e| e.to_string())?
            }
            other => {
                return Err(format!(
                    "expected a task array or a request object, found {}",
                    match other {
                        Value::Null => "null",
                        Value::Bool(_) => "a boolean",
                        Value::Number(_) => "a number",
                        _ => "a string",
                    }
                ));
            }
        };

        debug!("Parsed {} task(s)", request.tasks.len());
        Ok(request)
    }
}
