//! Screen-space layout of what the canvas should draw.
//!
//! The renderer only needs to paint rectangles and arrows; everything
//! positional is resolved here so it can be tested without a terminal.

use std::collections::HashMap;

use crate::canvas::viewport::{Point, Viewport};
use crate::graph::derive::{self, Edge};
use crate::graph::model::{Category, NODE_HEIGHT, NODE_WIDTH, Task, TaskState};

/// Inputs of one frame.
#[derive(Debug)]
pub struct RenderInput<'a> {
    pub visible: &'a [&'a Task],
    pub edges: &'a [Edge<'a>],
    pub viewport: Viewport,
    pub selection: Option<&'a str>,
    pub link_source: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    pub id: String,
    pub name: String,
    pub state: TaskState,
    pub blocked: bool,
    pub selected: bool,
    pub link_source: bool,
    /// Category color, `#rrggbb`.
    pub color: String,
    /// Top-left corner in screen pixels.
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl NodeBox {
    pub fn right_anchor(&self) -> Point {
        Point::new(self.origin.x + self.width, self.origin.y + self.height / 2.0)
    }

    pub fn left_anchor(&self) -> Point {
        Point::new(self.origin.x, self.origin.y + self.height / 2.0)
    }
}

/// Arrow from a dependency's right edge to its dependent's left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub from: String,
    pub to: String,
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<NodeBox>,
    pub arrows: Vec<Arrow>,
}

/// Lay out `input` on screen.
///
/// `tasks_by_id` must cover the whole board, not only the visible part, so
/// that blocked flags see hidden dependencies. Edges with an endpoint that is
/// not visible are dropped.
pub fn layout(
    input: &RenderInput<'_>,
    tasks_by_id: &HashMap<&str, &Task>,
    categories: &[Category],
) -> Scene {
    let colors = categories
        .iter()
        .map(|c| (c.id.as_str(), c.color.as_str()))
        .collect::<HashMap<_, _>>();
    let vp = input.viewport;

    let nodes = input
        .visible
        .iter()
        .map(|task| NodeBox {
            id: task.id.clone(),
            name: task.name.clone(),
            state: task.state,
            blocked: derive::is_blocked(task, tasks_by_id),
            selected: input.selection == Some(task.id.as_str()),
            link_source: input.link_source == Some(task.id.as_str()),
            color: colors
                .get(task.category_id.as_str())
                .copied()
                .unwrap_or("#888888")
                .to_string(),
            origin: vp.world_to_screen(Point::new(task.x, task.y)),
            width: vp.scale(NODE_WIDTH),
            height: vp.scale(NODE_HEIGHT),
        })
        .collect::<Vec<_>>();

    let placed = nodes
        .iter()
        .map(|n| (n.id.as_str(), n))
        .collect::<HashMap<_, _>>();
    let arrows = input
        .edges
        .iter()
        .filter_map(|edge| {
            let from = placed.get(edge.from)?;
            let to = placed.get(edge.to)?;
            Some(Arrow {
                from: edge.from.to_string(),
                to: edge.to.to_string(),
                start: from.right_anchor(),
                end: to.left_anchor(),
            })
        })
        .collect();

    Scene { nodes, arrows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::derive::{edge_list, tasks_by_id};
    use crate::graph::model::tests::{board_with, task};

    #[test]
    fn nodes_are_scaled_and_translated() {
        let mut t = task("t1", &[]);
        t.x = 100.0;
        t.y = 50.0;
        let board = board_with(vec![t]);
        let visible = board.tasks.iter().collect::<Vec<_>>();
        let input = RenderInput {
            visible: &visible,
            edges: &[],
            viewport: Viewport {
                x: 10.0,
                y: 20.0,
                zoom: 0.5,
            },
            selection: Some("t1"),
            link_source: None,
        };
        let scene = layout(&input, &tasks_by_id(&board.tasks), &board.categories);
        let node = &scene.nodes[0];
        assert_eq!(node.origin, Point::new(60.0, 45.0));
        assert_eq!(node.width, 60.0);
        assert_eq!(node.height, 24.0);
        assert!(node.selected);
        assert!(!node.link_source);
        assert_eq!(node.color, "#4f8cff");
    }

    #[test]
    fn arrows_run_right_anchor_to_left_anchor() {
        let a = task("a", &[]);
        let mut b = task("b", &["a"]);
        b.x = 200.0;
        let board = board_with(vec![a, b]);
        let visible = board.tasks.iter().collect::<Vec<_>>();
        let edges = edge_list(&board.tasks);
        let input = RenderInput {
            visible: &visible,
            edges: &edges,
            viewport: Viewport::default(),
            selection: None,
            link_source: Some("a"),
        };
        let scene = layout(&input, &tasks_by_id(&board.tasks), &board.categories);
        assert_eq!(
            scene.arrows,
            vec![Arrow {
                from: "a".into(),
                to: "b".into(),
                start: Point::new(120.0, 24.0),
                end: Point::new(200.0, 24.0),
            }]
        );
        assert!(scene.nodes[0].link_source);
        assert!(scene.nodes[1].blocked);
    }

    #[test]
    fn edges_to_hidden_or_missing_tasks_are_dropped() {
        let board = board_with(vec![task("a", &[]), task("b", &["a", "ghost"])]);
        let visible = vec![&board.tasks[1]];
        let edges = edge_list(&board.tasks);
        let input = RenderInput {
            visible: &visible,
            edges: &edges,
            viewport: Viewport::default(),
            selection: None,
            link_source: None,
        };
        let scene = layout(&input, &tasks_by_id(&board.tasks), &board.categories);
        assert_eq!(scene.nodes.len(), 1);
        assert!(scene.arrows.is_empty());
        assert!(scene.nodes[0].blocked);
    }
}
