//! State derived from a board snapshot. Recomputed on every read.

use std::collections::{HashMap, HashSet};

use crate::graph::model::{Board, Task, TaskState};

/// A dependency drawn as `from -> to`: `to` waits for `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

/// Which part of the board is in focus.
///
/// An active flow takes precedence over an active category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub active_category: Option<String>,
    pub active_flow: Option<String>,
}

pub fn tasks_by_id(tasks: &[Task]) -> HashMap<&str, &Task> {
    tasks.iter().map(|t| (t.id.as_str(), t)).collect()
}

/// True when any dependency is unfinished or no longer exists.
pub fn is_blocked(task: &Task, tasks_by_id: &HashMap<&str, &Task>) -> bool {
    task.dependencies.iter().any(|dep| {
        tasks_by_id
            .get(dep.as_str())
            .is_none_or(|t| t.state != TaskState::Done)
    })
}

/// Tasks on screen under `filter`. A task whose category is hidden, or whose
/// category or flow no longer exists, is never shown.
pub fn visible_tasks<'a>(board: &'a Board, filter: &Filter) -> Vec<&'a Task> {
    let shown = board
        .categories
        .iter()
        .map(|c| (c.id.as_str(), c.visible))
        .collect::<HashMap<_, _>>();
    let flows = board
        .flows
        .iter()
        .map(|f| f.id.as_str())
        .collect::<HashSet<_>>();
    board
        .tasks
        .iter()
        .filter(|t| shown.get(t.category_id.as_str()).copied().unwrap_or(false))
        .filter(|t| flows.contains(t.flow_id.as_str()))
        .filter(|t| match (&filter.active_flow, &filter.active_category) {
            (Some(flow), _) => t.flow_id == *flow,
            (None, Some(category)) => t.category_id == *category,
            (None, None) => true,
        })
        .collect()
}

/// Every dependency as an edge, in board order.
pub fn edge_list(tasks: &[Task]) -> Vec<Edge<'_>> {
    tasks
        .iter()
        .flat_map(|t| {
            t.dependencies.iter().map(move |dep| Edge {
                from: dep.as_str(),
                to: t.id.as_str(),
            })
        })
        .collect()
}

/// Dependencies that point at a task which no longer exists.
pub fn dangling_dependencies(tasks: &[Task]) -> Vec<(&Task, &str)> {
    let by_id = tasks_by_id(tasks);
    tasks
        .iter()
        .flat_map(|t| t.dependencies.iter().map(move |dep| (t, dep.as_str())))
        .filter(|(_, dep)| !by_id.contains_key(dep))
        .collect()
}
