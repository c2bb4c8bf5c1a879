use crate::task::clock::*;
use crate::task::types::*;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::debug;

/// Urgency assigned to tasks without a due date
pub const NO_DUE_DATE_URGENCY: u8 = 3;

/// Effort estimates above this many hours all score the same
pub const EFFORT_CAP_HOURS: f64 = 10.0;

/// Smallest effort factor a task can receive
pub const MIN_EFFORT_FACTOR: f64 = 0.1;

/// Multiplier applied to the weighted sum before clamping
const SCORE_SCALE: f64 = 5.0;

const MAX_SCORE: f64 = 100.0;

/// Weighting profile that decides which factor dominates the score
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    SmartBalance,
    FastestWins,
    HighImpact,
    DeadlineDriven,
}

/// Weights for task scoring algorithm
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyWeights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependencies: f64,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::SmartBalance,
        Strategy::FastestWins,
        Strategy::HighImpact,
        Strategy::DeadlineDriven,
    ];

    /// Resolve a strategy name; unknown names fall back to `SmartBalance`
    pub fn from_name(name: &str) -> Self {
        match name {
            "fastest_wins" => Strategy::FastestWins,
            "high_impact" => Strategy::HighImpact,
            "deadline_driven" => Strategy::DeadlineDriven,
            _ => Strategy::SmartBalance,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "smart_balance",
            Strategy::FastestWins => "fastest_wins",
            Strategy::HighImpact => "high_impact",
            Strategy::DeadlineDriven => "deadline_driven",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "Smart Balance",
            Strategy::FastestWins => "Fastest Wins",
            Strategy::HighImpact => "High Impact",
            Strategy::DeadlineDriven => "Deadline Driven",
        }
    }

    pub fn weights(&self) -> StrategyWeights {
        match self {
            Strategy::SmartBalance => StrategyWeights {
                urgency: 0.4,
                importance: 0.3,
                effort: 0.2,
                dependencies: 0.2,
            },
            Strategy::FastestWins => StrategyWeights {
                urgency: 0.2,
                importance: 0.2,
                effort: 0.6,
                dependencies: 0.1,
            },
            Strategy::HighImpact => StrategyWeights {
                urgency: 0.2,
                importance: 0.6,
                effort: 0.1,
                dependencies: 0.2,
            },
            Strategy::DeadlineDriven => StrategyWeights {
                urgency: 0.7,
                importance: 0.2,
                effort: 0.05,
                dependencies: 0.1,
            },
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Unknown names and non-string values resolve to the default strategy.
impl<'de> Deserialize<'de> for Strategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(name) => Strategy::from_name(&name),
            _ => Strategy::default(),
        })
    }
}

/// Intermediate factors behind a score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub days_until_due: Option<i64>,
    pub urgency: u8,
    pub importance: u8,
    pub effort_factor: f64,
    pub dependency_factor: f64,
    pub weighted_sum: f64,
    pub score: f64,
}

/// Urgency on a 1-10 scale from the days left until the due date
pub fn urgency_for(days_until_due: Option<i64>) -> u8 {
    let Some(days) = days_until_due else {
        return NO_DUE_DATE_URGENCY;
    };

    match days {
        d if d < 0 => 10,
        0 => 9,
        1 => 8,
        2..=3 => 7,
        4..=7 => 5,
        d => (10 - d.div_euclid(7)).max(1) as u8,
    }
}

/// Inverse effort: short tasks approach 10, anything at or above the cap gets the floor
pub fn effort_factor(estimated_hours: f64) -> f64 {
    (EFFORT_CAP_HOURS - estimated_hours.min(EFFORT_CAP_HOURS)).max(MIN_EFFORT_FACTOR)
}

/// Two points per prerequisite, with a baseline of 1 for independent tasks
pub fn dependency_factor(dependency_count: usize) -> f64 {
    if dependency_count == 0 {
        1.0
    } else {
        dependency_count as f64 * 2.0
    }
}

/// Round the exact binary value to two decimals; `{:.2}` never rescales first
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Full factor breakdown for `task` scored on `today`
pub fn score_breakdown(task: &Task, strategy: Strategy, today: NaiveDate) -> ScoreBreakdown {
    let days_until_due = task.days_until_due(today);
    let urgency = urgency_for(days_until_due);
    let importance = task.importance.clamp(1, 10);
    let effort = effort_factor(task.estimated_hours);
    let dependencies = dependency_factor(task.dependencies.len());

    let weights = strategy.weights();
    let weighted_sum = urgency as f64 * weights.urgency
        + importance as f64 * weights.importance
        + effort * weights.effort
        + dependencies * weights.dependencies;

    let score = round2((weighted_sum * SCORE_SCALE).clamp(0.0, MAX_SCORE));

    ScoreBreakdown {
        days_until_due,
        urgency,
        importance,
        effort_factor: effort,
        dependency_factor: dependencies,
        weighted_sum,
        score,
    }
}

/// Priority score in [0, 100], rounded to two decimals
pub fn calculate_priority_score(task: &Task, strategy: Strategy, today: NaiveDate) -> f64 {
    score_breakdown(task, strategy, today).score
}

/// Scores tasks against the date reported by its clock
#[derive(Debug, Clone)]
pub struct PriorityScorer<C: Clock> {
    clock: C,
}

impl<C: Clock> PriorityScorer<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Score a single task
    pub fn score(&self, task: &Task, strategy: Strategy) -> f64 {
        self.breakdown(task, strategy).score
    }

    pub fn breakdown(&self, task: &Task, strategy: Strategy) -> ScoreBreakdown {
        score_breakdown(task, strategy, self.clock.today())
    }

    /// Score a task and attach its priority band and explanation
    pub fn score_task(&self, task: Task, strategy: Strategy) -> ScoredTask {
        let breakdown = self.breakdown(&task, strategy);
        let level = PriorityLevel::from_score(breakdown.score);
        let explanation = build_explanation(&task, &breakdown, level);

        debug!(
            "Task {} scored {:.2} under {} (urgency {}, effort {:.2}, deps {:.1})",
            task.id,
            breakdown.score,
            strategy,
            breakdown.urgency,
            breakdown.effort_factor,
            breakdown.dependency_factor
        );

        ScoredTask {
            task,
            priority_score: breakdown.score,
            priority_level: level,
            explanation,
        }
    }

    /// Score every task and order them by descending score, keeping submission order on ties
    pub fn rank(&self, tasks: Vec<Task>, strategy: Strategy) -> Vec<ScoredTask> {
        let mut scored = tasks
            .into_iter()
            .map(|task| self.score_task(task, strategy))
            .collect::<Vec<_>>();

        scored.sort_by(|a, b| {
            b.priority_score
                .partial_cmp(&a.priority_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored
    }
}

/// Build a human-readable explanation for a score
pub fn build_explanation(task: &Task, breakdown: &ScoreBreakdown, level: PriorityLevel) -> String {
    let mut reasons = Vec::new();

    match breakdown.days_until_due {
        Some(days) if days < 0 => reasons.push("overdue".to_string()),
        Some(0) => reasons.push("due today".to_string()),
        Some(1) => reasons.push("due tomorrow".to_string()),
        Some(2..=3) => reasons.push("due within 3 days".to_string()),
        Some(4..=7) => reasons.push("due this week".to_string()),
        _ => {}
    }

    if task.importance >= 9 {
        reasons.push("very high importance".to_string());
    } else if task.importance >= 7 {
        reasons.push("high importance".to_string());
    }

    if task.estimated_hours <= 1.0 {
        reasons.push("a quick win (1 hour or less)".to_string());
    } else if task.estimated_hours <= 2.0 {
        reasons.push("low effort (2 hours or less)".to_string());
    } else if task.estimated_hours >= 8.0 {
        reasons.push("a high effort task".to_string());
    }

    if !task.dependencies.is_empty() {
        reasons.push(format!(
            "depends on {} other task(s)",
            task.dependencies.len()
        ));
    }

    let level = level.label().to_lowercase();
    if reasons.is_empty() {
        format!("{} with a score of {:.2}.", capitalize(&level), breakdown.score)
    } else {
        format!("{} because it is {}.", capitalize(&level), reasons.join(", "))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
