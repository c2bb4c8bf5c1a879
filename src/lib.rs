//! # Task Analyzer
//!
//! A small task-prioritization service. Clients submit a list of tasks with
//! due dates, importance, estimated effort and dependency links; the service
//! validates them, rejects lists with circular dependencies, scores every task
//! under a selectable weighting strategy and returns them by descending
//! priority.
//!
//! ## Architecture Overview
//!
//! - **[`task`]**: Scoring, cycle detection, validation and the analyzer that sequences them
//! - **[`server`]**: axum HTTP API around the analyzer
//! - **[`config`]**: TOML service configuration
//! - **[`cli`]**: Command-line interface and configuration discovery
//!
//! ## Scoring
//!
//! Each task gets an urgency (from days until due), an inverse effort factor
//! and a dependency factor. A [`Strategy`] weights these together with the
//! task's importance; the result is scaled, clamped to `[0, 100]` and rounded
//! to two decimals. "Today" comes from an injected [`Clock`], so scoring is
//! deterministic under test.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//! use task_analyzer::{AnalyzeRequest, AnalyzerConfig, FixedClock, TaskAnalyzer};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
//! let analyzer = TaskAnalyzer::new(Arc::new(FixedClock(today)), AnalyzerConfig::default());
//!
//! let request: AnalyzeRequest = serde_json::from_value(serde_json::json!({
//!     "strategy": "fastest_wins",
//!     "tasks": [
//!         {"title": "Fix login bug", "due_date": "2026-01-16", "estimated_hours": 2, "importance": 8},
//!         {"title": "Write docs", "due_date": "2026-02-01", "estimated_hours": 1, "importance": 4}
//!     ]
//! }))
//! .unwrap();
//!
//! let response = analyzer.analyze(&request).unwrap();
//! assert_eq!(response.total_tasks, 2);
//! assert!(response.tasks[0].priority_score >= response.tasks[1].priority_score);
//! ```

/// Task scoring and dependency analysis.
///
/// Holds the priority scorer, the dependency cycle detector, request
/// validation and the [`TaskAnalyzer`] that ties them together.
pub mod task;

/// HTTP API server.
pub mod server;

/// Service configuration.
pub mod config;

/// Environment constants and path utilities.
pub mod env;

// CLI module for command-line interface
pub mod cli;

pub use config::{LoggingConfig, ServerConfig, ServiceConfig};
pub use task::{
    AnalysisResponse, AnalyzeError, AnalyzeRequest, AnalyzerConfig, Clock, Cycle, FixedClock,
    PriorityLevel, PriorityScorer, ScoredTask, Strategy, SystemClock, Task, TaskAnalyzer, TaskId,
    calculate_priority_score, find_cycles,
};
