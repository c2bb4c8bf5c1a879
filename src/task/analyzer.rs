use crate::task::clock::*;
use crate::task::dependencies::*;
use crate::task::scheduler::*;
use crate::task::types::*;
use crate::task::validation::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Payload accepted by the analyzer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub strategy: Option<Strategy>,
    /// Raw task objects; `null` is treated like an empty list
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<serde_json::Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ranked tasks along with the strategy that produced the order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResponse {
    pub strategy: Strategy,
    pub tasks: Vec<ScoredTask>,
    pub total_tasks: usize,
}

/// Configuration for the task analyzer
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Strategy used when a request names none
    #[serde(default)]
    pub default_strategy: Strategy,
}

/// Validates, checks and ranks submitted task lists
#[derive(Debug, Clone)]
pub struct TaskAnalyzer {
    scorer: PriorityScorer<Arc<dyn Clock>>,
    config: AnalyzerConfig,
}

impl TaskAnalyzer {
    pub fn new(clock: Arc<dyn Clock>, config: AnalyzerConfig) -> Self {
        Self {
            scorer: PriorityScorer::new(clock),
            config,
        }
    }

    /// Analyzer on the host clock with default settings
    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock), AnalyzerConfig::default())
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn scorer(&self) -> &PriorityScorer<Arc<dyn Clock>> {
        &self.scorer
    }

    /// Validate the request, reject dependency loops, then rank every task
    pub fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResponse, AnalyzeError> {
        let strategy = request.strategy.unwrap_or(self.config.default_strategy);

        let tasks = validate_tasks(&request.tasks).inspect_err(|e| {
            warn!("Rejected task list: {}", e);
        })?;

        self.rank_tasks(tasks, strategy)
    }

    /// Rank already-validated tasks, rejecting the list if it has dependency loops
    pub fn rank_tasks(
        &self,
        tasks: Vec<Task>,
        strategy: Strategy,
    ) -> Result<AnalysisResponse, AnalyzeError> {
        if tasks.is_empty() {
            return Err(AnalyzeError::EmptyTaskList);
        }

        let cycles = {
            let graph = DependencyGraph::new(&tasks);
            let missing = graph.missing_dependencies();
            if !missing.is_empty() {
                debug!("Dependencies on unknown task ids: {:?}", missing);
            }
            graph.find_cycles()
        };
        if !cycles.is_empty() {
            let error = AnalyzeError::CircularDependency { cycles };
            warn!("Rejected task list: {}", error);
            return Err(error);
        }

        let ranked = self.scorer.rank(tasks, strategy);

        info!(
            "Ranked {} tasks using {} (top score {:.2})",
            ranked.len(),
            strategy,
            ranked.first().map(|t| t.priority_score).unwrap_or_default()
        );

        Ok(AnalysisResponse {
            strategy,
            total_tasks: ranked.len(),
            tasks: ranked,
        })
    }
}
