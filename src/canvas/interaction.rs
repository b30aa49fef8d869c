//! Pointer, wheel and command handling for the canvas.
//!
//! [`Session`] is the only place that mutates the board in response to user
//! input. Every event is folded into a single [`Interaction`] value, so the
//! state machine can be driven and inspected without a terminal.

use rand::RngCore;

use crate::canvas::scene::{self, RenderInput, Scene};
use crate::canvas::viewport::{Point, Viewport};
use crate::graph::derive::{self, Filter};
use crate::graph::model::{Board, NODE_HEIGHT, NODE_WIDTH, Rejection, TaskPatch};

#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Idle,
    /// `grab_offset` is cursor minus node position, in world units, taken at
    /// press time so the node does not jump under the cursor.
    Dragging {
        task_id: String,
        grab_offset: Point,
    },
    /// `origin` is the viewport offset at press time.
    Panning {
        origin: Point,
        pointer_start: Point,
    },
    Linking {
        source: Option<String>,
    },
}

impl Interaction {
    /// While true, moves and releases anywhere on screen belong to this
    /// interaction.
    pub fn captures_pointer(&self) -> bool {
        matches!(self, Self::Dragging { .. } | Self::Panning { .. })
    }

    pub fn link_mode(&self) -> bool {
        matches!(self, Self::Linking { .. })
    }

    pub fn link_source(&self) -> Option<&str> {
        match self {
            Self::Linking { source } => source.as_deref(),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Dragging { .. } => "Dragging",
            Self::Panning { .. } => "Panning",
            Self::Linking { source: None } => "LINK: pick source",
            Self::Linking { source: Some(_) } => "LINK: pick target",
        }
    }
}

/// Raw canvas input. Positions are screen pixels relative to the canvas;
/// `hit` is the task under the pointer, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    PointerDown { at: Point, hit: Option<String> },
    PointerMove { at: Point },
    PointerUp,
    Click { hit: Option<String> },
    DoubleClick { hit: Option<String> },
    /// Sign of `delta` picks the direction; negative zooms in.
    Wheel { delta: f64 },
    ToggleLinkMode,
}

/// Board edits that don't come from the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateCategory { name: String, color: Option<String> },
    CreateFlow { title: String },
    CreateTask { name: String },
    DeleteTask { id: String },
    /// Removes the flow and every task in it.
    DeleteFlow { id: String },
    /// Removes the category with all of its flows and tasks.
    DeleteCategory { id: String },
    AdvanceState { id: String },
    ToggleCategoryVisibility { id: String },
    /// `target` gains a dependency on `source`.
    Link { source: String, target: String },
    Unlink { source: String, target: String },
    SelectCategory(Option<String>),
    SelectFlow(Option<String>),
    Select(Option<String>),
    Pan { dx: f64, dy: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Unchanged,
    /// Mid-gesture change; the caller should redraw but not persist yet.
    Transient,
    /// Board or viewport changed; persist.
    Changed,
    Rejected(Rejection),
}

impl Outcome {
    pub fn should_persist(&self) -> bool {
        matches!(self, Self::Changed)
    }
}

pub struct Session {
    pub board: Board,
    pub viewport: Viewport,
    pub selection: Option<String>,
    pub filter: Filter,
    pub interaction: Interaction,
    /// Grid size dropped nodes snap to, in world units.
    pub grid: Option<f64>,
    rng: Box<dyn RngCore>,
}

impl Session {
    pub fn new(board: Board, viewport: Viewport, rng: Box<dyn RngCore>) -> Self {
        Self {
            board,
            viewport: viewport.clamped(),
            selection: None,
            filter: Filter::default(),
            interaction: Interaction::Idle,
            grid: None,
            rng,
        }
    }

    /// Topmost visible task under screen point `at`.
    pub fn hit_test(&self, at: Point) -> Option<String> {
        let world = self.viewport.screen_to_world(at);
        derive::visible_tasks(&self.board, &self.filter)
            .into_iter()
            .rev()
            .find(|t| {
                world.x >= t.x
                    && world.x < t.x + NODE_WIDTH
                    && world.y >= t.y
                    && world.y < t.y + NODE_HEIGHT
            })
            .map(|t| t.id.clone())
    }

    pub fn scene(&self) -> Scene {
        let visible = derive::visible_tasks(&self.board, &self.filter);
        let edges = derive::edge_list(&self.board.tasks);
        let by_id = derive::tasks_by_id(&self.board.tasks);
        let input = RenderInput {
            visible: &visible,
            edges: &edges,
            viewport: self.viewport,
            selection: self.selection.as_deref(),
            link_source: self.interaction.link_source(),
        };
        scene::layout(&input, &by_id, &self.board.categories)
    }

    pub fn handle(&mut self, event: CanvasEvent) -> Outcome {
        match event {
            CanvasEvent::PointerDown { at, hit } => self.pointer_down(at, hit),
            CanvasEvent::PointerMove { at } => self.pointer_move(at),
            CanvasEvent::PointerUp => self.pointer_up(),
            CanvasEvent::Click { hit } => self.click(hit),
            CanvasEvent::DoubleClick { hit } => self.double_click(hit),
            CanvasEvent::Wheel { delta } => {
                let next = self.viewport.zoomed(delta);
                if next == self.viewport {
                    return Outcome::Unchanged;
                }
                self.viewport = next;
                Outcome::Changed
            }
            CanvasEvent::ToggleLinkMode => {
                self.interaction = if self.interaction.link_mode() {
                    Interaction::Idle
                } else {
                    Interaction::Linking { source: None }
                };
                Outcome::Unchanged
            }
        }
    }

    fn pointer_down(&mut self, at: Point, hit: Option<String>) -> Outcome {
        if self.interaction != Interaction::Idle {
            return Outcome::Unchanged;
        }
        match hit.and_then(|id| self.board.task(&id).map(|t| (id, Point::new(t.x, t.y)))) {
            Some((task_id, node)) => {
                let grab_offset = self.viewport.screen_to_world(at) - node;
                self.selection = Some(task_id.clone());
                self.interaction = Interaction::Dragging {
                    task_id,
                    grab_offset,
                };
            }
            None => {
                self.selection = None;
                self.interaction = Interaction::Panning {
                    origin: self.viewport.offset(),
                    pointer_start: at,
                };
            }
        }
        Outcome::Transient
    }

    fn pointer_move(&mut self, at: Point) -> Outcome {
        match &self.interaction {
            Interaction::Dragging {
                task_id,
                grab_offset,
            } => {
                let pos = self.viewport.screen_to_world(at) - *grab_offset;
                self.board = self
                    .board
                    .update_task(task_id, &TaskPatch::position(pos.x, pos.y));
                Outcome::Transient
            }
            Interaction::Panning {
                origin,
                pointer_start,
            } => {
                self.viewport = self.viewport.panned_from(*origin, at - *pointer_start);
                Outcome::Transient
            }
            _ => Outcome::Unchanged,
        }
    }

    fn pointer_up(&mut self) -> Outcome {
        match std::mem::replace(&mut self.interaction, Interaction::Idle) {
            Interaction::Dragging { task_id, .. } => {
                if let (Some(grid), Some(task)) = (self.grid, self.board.task(&task_id)) {
                    let snapped = TaskPatch::position(snap(task.x, grid), snap(task.y, grid));
                    self.board = self.board.update_task(&task_id, &snapped);
                }
                Outcome::Changed
            }
            Interaction::Panning { .. } => Outcome::Changed,
            other => {
                self.interaction = other;
                Outcome::Unchanged
            }
        }
    }

    fn click(&mut self, hit: Option<String>) -> Outcome {
        let Interaction::Linking { source } = &self.interaction else {
            return Outcome::Unchanged;
        };
        let Some(target) = hit else {
            return Outcome::Unchanged;
        };
        match source.clone() {
            None => {
                self.interaction = Interaction::Linking {
                    source: Some(target),
                };
                Outcome::Unchanged
            }
            Some(source) if source == target => {
                self.interaction = Interaction::Linking { source: None };
                Outcome::Unchanged
            }
            Some(source) => {
                self.interaction = Interaction::Linking { source: None };
                match self.board.add_dependency(&source, &target) {
                    Ok(next) => {
                        self.board = next;
                        Outcome::Changed
                    }
                    Err(rejection) => {
                        tracing::debug!(%source, %target, %rejection, "dependency rejected");
                        Outcome::Rejected(rejection)
                    }
                }
            }
        }
    }

    fn double_click(&mut self, hit: Option<String>) -> Outcome {
        if self.interaction.link_mode() {
            return Outcome::Unchanged;
        }
        match hit {
            Some(id) if self.board.task(&id).is_some() => {
                self.board = self.board.advance_task_state(&id);
                Outcome::Changed
            }
            _ => Outcome::Unchanged,
        }
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::CreateCategory { name, color } => {
                let (next, category) =
                    self.board
                        .create_category(&name, color.as_deref(), &mut *self.rng);
                self.board = next;
                self.filter = Filter {
                    active_category: Some(category.id),
                    active_flow: None,
                };
                Outcome::Changed
            }
            Command::CreateFlow { title } => {
                let category = self.filter.active_category.clone();
                match self
                    .board
                    .create_flow(category.as_deref(), &title, &mut *self.rng)
                {
                    Ok((next, flow)) => {
                        self.board = next;
                        self.filter.active_flow = Some(flow.id);
                        Outcome::Changed
                    }
                    Err(rejection) => Outcome::Rejected(rejection),
                }
            }
            Command::CreateTask { name } => {
                let Some(flow) = self.filter.active_flow.clone() else {
                    return Outcome::Rejected(Rejection::NoActiveFlow);
                };
                match self.board.create_task(&flow, &name, &mut *self.rng) {
                    Ok((next, task)) => {
                        self.board = next;
                        self.selection = Some(task.id);
                        Outcome::Changed
                    }
                    Err(rejection) => Outcome::Rejected(rejection),
                }
            }
            Command::DeleteTask { id } => {
                if self.board.task(&id).is_none() {
                    return Outcome::Unchanged;
                }
                self.board = self.board.delete_task(&id);
                self.forget_missing();
                Outcome::Changed
            }
            Command::DeleteFlow { id } => {
                if self.board.flow(&id).is_none() {
                    return Outcome::Unchanged;
                }
                self.board = self.board.delete_flow(&id);
                self.forget_missing();
                Outcome::Changed
            }
            Command::DeleteCategory { id } => {
                if self.board.category(&id).is_none() {
                    return Outcome::Unchanged;
                }
                self.board = self.board.delete_category(&id);
                self.forget_missing();
                Outcome::Changed
            }
            Command::AdvanceState { id } => {
                if self.board.task(&id).is_none() {
                    return Outcome::Unchanged;
                }
                self.board = self.board.advance_task_state(&id);
                Outcome::Changed
            }
            Command::ToggleCategoryVisibility { id } => {
                if self.board.category(&id).is_none() {
                    return Outcome::Unchanged;
                }
                self.board = self.board.toggle_category_visibility(&id);
                Outcome::Changed
            }
            Command::Link { source, target } => match self.board.add_dependency(&source, &target) {
                Ok(next) => {
                    self.board = next;
                    Outcome::Changed
                }
                Err(rejection) => Outcome::Rejected(rejection),
            },
            Command::Unlink { source, target } => {
                let next = self.board.remove_dependency(&source, &target);
                if next == self.board {
                    return Outcome::Unchanged;
                }
                self.board = next;
                Outcome::Changed
            }
            Command::SelectCategory(id) => {
                let id = id.filter(|id| self.board.category(id).is_some());
                let keep_flow = match (&id, &self.filter.active_flow) {
                    (Some(category), Some(flow)) => self
                        .board
                        .flow(flow)
                        .is_some_and(|f| f.category_id == *category),
                    _ => false,
                };
                if !keep_flow {
                    self.filter.active_flow = None;
                }
                self.filter.active_category = id;
                Outcome::Unchanged
            }
            Command::SelectFlow(id) => {
                match id.and_then(|id| self.board.flow(&id).cloned()) {
                    Some(flow) => {
                        self.filter.active_category = Some(flow.category_id);
                        self.filter.active_flow = Some(flow.id);
                    }
                    None => self.filter.active_flow = None,
                }
                Outcome::Unchanged
            }
            Command::Select(id) => {
                self.selection = id.filter(|id| self.board.task(id).is_some());
                Outcome::Unchanged
            }
            Command::Pan { dx, dy } => {
                self.viewport = self
                    .viewport
                    .panned_from(self.viewport.offset(), Point::new(dx, dy));
                Outcome::Changed
            }
        }
    }
}

impl Session {
    /// Drop filter, selection and gesture references to entities that no
    /// longer exist.
    fn forget_missing(&mut self) {
        if let Some(category) = &self.filter.active_category
            && self.board.category(category).is_none()
        {
            self.filter.active_category = None;
        }
        if let Some(flow) = &self.filter.active_flow
            && self.board.flow(flow).is_none()
        {
            self.filter.active_flow = None;
        }
        if let Some(selected) = &self.selection
            && self.board.task(selected).is_none()
        {
            self.selection = None;
        }
        let gone = |id: &str| self.board.task(id).is_none();
        let reset = match &self.interaction {
            Interaction::Linking { source: Some(s) } if gone(s) => {
                Some(Interaction::Linking { source: None })
            }
            Interaction::Dragging { task_id, .. } if gone(task_id) => Some(Interaction::Idle),
            _ => None,
        };
        if let Some(next) = reset {
            self.interaction = next;
        }
    }
}

fn snap(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return value;
    }
    (value / grid).round() * grid
}
