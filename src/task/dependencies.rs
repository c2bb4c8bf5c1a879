use crate::task::types::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Read-only view of the dependency edges in a task list
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    /// Tasks in submission order
    tasks: &'a [Task],
    /// First task index for each id
    index: HashMap<TaskId, usize>,
}

/// Pending visit during the depth-first traversal
struct Frame {
    task_id: TaskId,
    path: Vec<TaskId>,
}

impl<'a> DependencyGraph<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        let mut index = HashMap::with_capacity(tasks.len());
        for (position, task) in tasks.iter().enumerate() {
            index.entry(task.id).or_insert(position);
        }

        Self { tasks, index }
    }

    /// Dependencies of `task_id`; unknown ids have none
    pub fn dependencies_of(&self, task_id: TaskId) -> &'a [TaskId] {
        match self.index.get(&task_id) {
            Some(&position) => &self.tasks[position].dependencies,
            None => &[],
        }
    }

    pub fn contains(&self, task_id: TaskId) -> bool {
        self.index.contains_key(&task_id)
    }

    /// Ids referenced as dependencies that no task carries
    pub fn missing_dependencies(&self) -> Vec<TaskId> {
        let mut seen = HashSet::new();
        self.tasks
            .iter()
            .flat_map(|task| task.dependencies.iter().copied())
            .filter(|dep_id| !self.contains(*dep_id) && seen.insert(*dep_id))
            .collect()
    }

    /// Every dependency loop closed while walking the graph.
    ///
    /// Each task not yet visited starts a depth-first walk. Reaching an id
    /// already on the current path records the loop from its first occurrence
    /// back to itself; reaching an id visited by an earlier walk ends the
    /// branch silently. Loops are reported once per closing edge found, in
    /// traversal order, without deduplication.
    pub fn find_cycles(&self) -> Vec<Cycle> {
        let mut cycles = Vec::new();
        let mut visited: HashSet<TaskId> = HashSet::new();

        for task in self.tasks {
            if visited.contains(&task.id) {
                continue;
            }

            let mut stack = vec![Frame {
                task_id: task.id,
                path: Vec::new(),
            }];

            while let Some(Frame { task_id, mut path }) = stack.pop() {
                if let Some(start) = path.iter().position(|&id| id == task_id) {
                    let mut cycle = path.split_off(start);
                    cycle.push(task_id);
                    debug!("Dependency cycle closed at task {}: {:?}", task_id, cycle);
                    cycles.push(cycle);
                    continue;
                }

                if !visited.insert(task_id) {
                    continue;
                }

                path.push(task_id);

                // Reverse push keeps dependencies visited in their listed order;
                // the first dependency takes the path without a copy.
                if let Some((&first, rest)) = self.dependencies_of(task_id).split_first() {
                    for &dep_id in rest.iter().rev() {
                        stack.push(Frame {
                            task_id: dep_id,
                            path: path.clone(),
                        });
                    }
                    stack.push(Frame {
                        task_id: first,
                        path,
                    });
                }
            }
        }

        if !cycles.is_empty() {
            warn!("Detected {} circular dependency chain(s)", cycles.len());
        }

        cycles
    }

    pub fn has_cycles(&self) -> bool {
        !self.find_cycles().is_empty()
    }
}

/// Every dependency loop in `tasks`; see [`DependencyGraph::find_cycles`]
pub fn find_cycles(tasks: &[Task]) -> Vec<Cycle> {
    DependencyGraph::new(tasks).find_cycles()
}
