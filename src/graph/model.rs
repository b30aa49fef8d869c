use std::collections::HashSet;
use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::cycle;

/// Width of every task node, in world units.
pub const NODE_WIDTH: f64 = 120.0;
/// Height of every task node, in world units.
pub const NODE_HEIGHT: f64 = 48.0;

/// Window new tasks are dropped into, in world units.
pub const SPAWN_X: Range<f64> = 80.0..560.0;
pub const SPAWN_Y: Range<f64> = 80.0..400.0;

/// Colors handed out to new categories when none is chosen.
pub const PALETTE: [&str; 8] = [
    "#4f8cff", "#2fbf71", "#f5a524", "#e5484d", "#8e4ec6", "#12a594", "#f76b15", "#d6409f",
];

/// Lifecycle of a task. Advances through a fixed 3-cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    #[default]
    NotStarted,
    InProgress,
    Done,
}

impl TaskState {
    pub fn next(self) -> Self {
        match self {
            Self::NotStarted => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::NotStarted,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Done => "done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// `#rrggbb`
    pub color: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category_id: String,
}

/// A unit of work placed on the canvas.
///
/// `dependencies` lists the tasks that must be done before this one. It is kept
/// duplicate-free; order is insertion order so that saved boards are stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub state: TaskState,
    pub category_id: String,
    pub flow_id: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub x: f64,
    pub y: f64,
}

impl Task {
    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d == id)
    }
}

/// Partial update for [`Board::update_task`]. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub state: Option<TaskState>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl TaskPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn state(state: TaskState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }
}

/// Why a mutation was refused. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no active category")]
    NoActiveCategory,
    #[error("no active flow")]
    NoActiveFlow,
    #[error("category not found: {0}")]
    CategoryNotFound(String),
    #[error("flow not found: {0}")]
    FlowNotFound(String),
    #[error("task not found: {0}")]
    TaskNotFound(String),
    #[error("a task cannot depend on itself")]
    SelfEdge,
    #[error("dependency already exists")]
    Duplicate,
    #[error("dependency would create a cycle")]
    Cycle,
}

/// The whole board: categories, flows and tasks.
///
/// Mutations never modify `self`; they return the next board so callers can
/// keep or discard previous snapshots freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub flows: Vec<Flow>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Board {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn flow(&self, id: &str) -> Option<&Flow> {
        self.flows.iter().find(|f| f.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Flows owned by `category_id`, in creation order.
    pub fn flows_in<'a>(&'a self, category_id: &'a str) -> impl Iterator<Item = &'a Flow> {
        self.flows.iter().filter(move |f| f.category_id == category_id)
    }

    pub fn create_category<R: Rng + ?Sized>(
        &self,
        name: &str,
        color: Option<&str>,
        rng: &mut R,
    ) -> (Board, Category) {
        let id = new_id(rng);
        let color = match color {
            Some(color) => color.to_string(),
            None => PALETTE[rng.random_range(0..PALETTE.len())].to_string(),
        };
        let category = Category {
            id,
            name: name.to_string(),
            color,
            visible: true,
        };
        let mut next = self.clone();
        next.categories.push(category.clone());
        (next, category)
    }

    pub fn toggle_category_visibility(&self, id: &str) -> Board {
        let mut next = self.clone();
        if let Some(category) = next.categories.iter_mut().find(|c| c.id == id) {
            category.visible = !category.visible;
        }
        next
    }

    pub fn create_flow<R: Rng + ?Sized>(
        &self,
        category_id: Option<&str>,
        title: &str,
        rng: &mut R,
    ) -> Result<(Board, Flow), Rejection> {
        let Some(category) = category_id.and_then(|id| self.category(id)) else {
            return Err(Rejection::NoActiveCategory);
        };
        let flow = Flow {
            id: new_id(rng),
            title: title.to_string(),
            description: String::new(),
            category_id: category.id.clone(),
        };
        let mut next = self.clone();
        next.flows.push(flow.clone());
        Ok((next, flow))
    }

    /// Create a task in `flow_id` at a random spot inside the spawn window.
    pub fn create_task<R: Rng + ?Sized>(
        &self,
        flow_id: &str,
        name: &str,
        rng: &mut R,
    ) -> Result<(Board, Task), Rejection> {
        let Some(flow) = self.flow(flow_id) else {
            return Err(Rejection::FlowNotFound(flow_id.to_string()));
        };
        let task = Task {
            id: new_id(rng),
            name: name.to_string(),
            description: String::new(),
            state: TaskState::NotStarted,
            category_id: flow.category_id.clone(),
            flow_id: flow.id.clone(),
            dependencies: Vec::new(),
            x: rng.random_range(SPAWN_X).floor(),
            y: rng.random_range(SPAWN_Y).floor(),
        };
        let mut next = self.clone();
        next.tasks.push(task.clone());
        Ok((next, task))
    }

    /// Merge `patch` into task `id`. Unknown ids are ignored: a UI event may
    /// arrive after the task was deleted.
    pub fn update_task(&self, id: &str, patch: &TaskPatch) -> Board {
        let mut next = self.clone();
        if let Some(task) = next.task_mut(id) {
            if let Some(name) = &patch.name {
                task.name = name.clone();
            }
            if let Some(description) = &patch.description {
                task.description = description.clone();
            }
            if let Some(state) = patch.state {
                task.state = state;
            }
            if let Some(x) = patch.x {
                task.x = x;
            }
            if let Some(y) = patch.y {
                task.y = y;
            }
        }
        next
    }

    pub fn advance_task_state(&self, id: &str) -> Board {
        match self.task(id) {
            Some(task) => self.update_task(id, &TaskPatch::state(task.state.next())),
            None => self.clone(),
        }
    }

    /// Remove a task and strip it from every other task's dependencies.
    pub fn delete_task(&self, id: &str) -> Board {
        self.without_tasks(&HashSet::from([id.to_string()]))
    }

    /// Remove a flow together with its tasks.
    pub fn delete_flow(&self, id: &str) -> Board {
        let doomed = self
            .tasks
            .iter()
            .filter(|t| t.flow_id == id)
            .map(|t| t.id.clone())
            .collect::<HashSet<_>>();
        let mut next = self.without_tasks(&doomed);
        next.flows.retain(|f| f.id != id);
        next
    }

    /// Remove a category, its flows and every task filed under either.
    pub fn delete_category(&self, id: &str) -> Board {
        let doomed = self
            .tasks_under_category(id)
            .map(|t| t.id.clone())
            .collect::<HashSet<_>>();
        let mut next = self.without_tasks(&doomed);
        next.flows.retain(|f| f.category_id != id);
        next.categories.retain(|c| c.id != id);
        next
    }

    /// Tasks filed under the category directly or through one of its flows.
    pub fn tasks_under_category<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Task> {
        let flow_ids = self
            .flows_in(id)
            .map(|f| f.id.as_str())
            .collect::<HashSet<_>>();
        self.tasks
            .iter()
            .filter(move |t| t.category_id == id || flow_ids.contains(t.flow_id.as_str()))
    }

    /// Make `target` depend on `source`.
    pub fn add_dependency(&self, source: &str, target: &str) -> Result<Board, Rejection> {
        if source == target {
            return Err(Rejection::SelfEdge);
        }
        if self.task(source).is_none() {
            return Err(Rejection::TaskNotFound(source.to_string()));
        }
        let Some(dependent) = self.task(target) else {
            return Err(Rejection::TaskNotFound(target.to_string()));
        };
        if dependent.depends_on(source) {
            return Err(Rejection::Duplicate);
        }
        if cycle::would_create_cycle(&self.tasks, source, target) {
            return Err(Rejection::Cycle);
        }
        let mut next = self.clone();
        if let Some(task) = next.task_mut(target) {
            task.dependencies.push(source.to_string());
        }
        Ok(next)
    }

    pub fn remove_dependency(&self, source: &str, target: &str) -> Board {
        let mut next = self.clone();
        if let Some(task) = next.task_mut(target) {
            task.dependencies.retain(|d| d != source);
        }
        next
    }

    fn without_tasks(&self, doomed: &HashSet<String>) -> Board {
        let mut next = self.clone();
        next.tasks.retain(|t| !doomed.contains(&t.id));
        for task in &mut next.tasks {
            task.dependencies.retain(|d| !doomed.contains(d));
        }
        next
    }
}

fn new_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.random())
        .into_uuid()
        .to_string()
}
