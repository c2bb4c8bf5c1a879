use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Identifier for tasks, assigned from the position in the submitted list
pub type TaskId = u64;

/// Closed dependency loop; the first id is repeated at the end
pub type Cycle = Vec<TaskId>;

/// Per-field validation messages, keyed by field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Importance used when a task is built without one
pub const DEFAULT_IMPORTANCE: u8 = 5;

/// Effort estimate used when a task is built without one
pub const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;

/// Core task record consumed by the scorer and the cycle detector
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default = "default_importance")]
    pub importance: u8,
    #[serde(default = "default_estimated_hours")]
    pub estimated_hours: f64,
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
}

fn default_importance() -> u8 {
    DEFAULT_IMPORTANCE
}

fn default_estimated_hours() -> f64 {
    DEFAULT_ESTIMATED_HOURS
}

impl Task {
    /// Create a task with default importance, effort and no due date
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            due_date: None,
            importance: DEFAULT_IMPORTANCE,
            estimated_hours: DEFAULT_ESTIMATED_HOURS,
            dependencies: Vec::new(),
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_importance(mut self, importance: u8) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<TaskId>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Whole days until the due date, negative when overdue
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.due_date
            .map(|due| due.signed_duration_since(today).num_days())
    }
}

/// Coarse priority band derived from the score
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
}

impl PriorityLevel {
    pub const HIGH_THRESHOLD: f64 = 70.0;
    pub const MEDIUM_THRESHOLD: f64 = 40.0;

    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            PriorityLevel::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            PriorityLevel::Medium
        } else {
            PriorityLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityLevel::High => "High Priority",
            PriorityLevel::Medium => "Medium Priority",
            PriorityLevel::Low => "Low Priority",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Task annotated with its computed priority
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub priority_score: f64,
    pub priority_level: PriorityLevel,
    pub explanation: String,
}

/// Reasons a task list is rejected before scoring
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyzeError {
    #[error("No tasks provided")]
    EmptyTaskList,

    #[error("Invalid task data: task {index}: {}", format_field_errors(.errors))]
    InvalidTaskSchema { index: usize, errors: FieldErrors },

    #[error("Circular dependencies detected: {}", format_cycles(.cycles))]
    CircularDependency { cycles: Vec<Cycle> },
}

impl AnalyzeError {
    /// Stable snake_case name used in API error payloads
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzeError::EmptyTaskList => "empty_task_list",
            AnalyzeError::InvalidTaskSchema { .. } => "invalid_task_schema",
            AnalyzeError::CircularDependency { .. } => "circular_dependency",
        }
    }
}

fn format_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Renders cycles as `[[1, 2, 1], [3, 3]]`
pub fn format_cycles(cycles: &[Cycle]) -> String {
    let rendered = cycles
        .iter()
        .map(|cycle| {
            let ids = cycle
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{}]", ids)
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", rendered)
}
