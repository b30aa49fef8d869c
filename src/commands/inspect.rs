//! `flowboard inspect`: query derived board state.

use anyhow::Result;

use crate::board;
use crate::commands::OpenBoard;
use crate::graph::derive;
use crate::graph::model::{Board, Task, TaskState};

pub fn run_blocked() -> Result<()> {
    let board = load_board_from_root()?;
    let blocked = blocked_tasks(&board);
    if blocked.is_empty() {
        println!("  No blocked tasks.");
    } else {
        for (task, waiting_on) in blocked {
            println!(
                "  {} [{}] waiting on: {}",
                task.name,
                task.id,
                waiting_on.join(", ")
            );
        }
    }
    Ok(())
}

pub fn run_dangling() -> Result<()> {
    let board = load_board_from_root()?;
    let dangling = derive::dangling_dependencies(&board.tasks);
    if dangling.is_empty() {
        println!("  No dangling dependencies.");
    } else {
        for (task, missing) in dangling {
            println!("  {} [{}] -> missing {}", task.name, task.id, missing);
        }
    }
    Ok(())
}

pub fn run_task(id: &str) -> Result<()> {
    let board = load_board_from_root()?;
    match task_report(&board, id) {
        None => println!("  Task not found: {}", id),
        Some(lines) => {
            for line in lines {
                println!("  {}", line);
            }
        }
    }
    Ok(())
}

/// Blocked tasks with the names of whatever they still wait on.
pub fn blocked_tasks(board: &Board) -> Vec<(&Task, Vec<String>)> {
    let by_id = derive::tasks_by_id(&board.tasks);
    board
        .tasks
        .iter()
        .filter(|t| derive::is_blocked(t, &by_id))
        .map(|t| {
            let waiting_on = t
                .dependencies
                .iter()
                .filter_map(|dep| match by_id.get(dep.as_str()) {
                    Some(d) if d.state == TaskState::Done => None,
                    Some(d) => Some(d.name.clone()),
                    None => Some(format!("<missing {dep}>")),
                })
                .collect();
            (t, waiting_on)
        })
        .collect()
}

pub fn task_report(board: &Board, id: &str) -> Option<Vec<String>> {
    let task = board.task(id)?;
    let by_id = derive::tasks_by_id(&board.tasks);
    let category = board
        .category(&task.category_id)
        .map(|c| c.name.as_str())
        .unwrap_or("<missing>");
    let flow = board
        .flow(&task.flow_id)
        .map(|f| f.title.as_str())
        .unwrap_or("<missing>");

    let mut lines = vec![
        format!("{} [{}]", task.name, task.id),
        format!("state: {}", task.state.label()),
        format!("blocked: {}", derive::is_blocked(task, &by_id)),
        format!("category: {category}  flow: {flow}"),
        format!("position: ({}, {})", task.x, task.y),
    ];
    if !task.description.is_empty() {
        lines.push(format!("description: {}", task.description));
    }

    lines.push("depends on:".to_string());
    if task.dependencies.is_empty() {
        lines.push("  (nothing)".to_string());
    }
    for dep in &task.dependencies {
        lines.push(match by_id.get(dep.as_str()) {
            Some(d) => format!("  {} [{}] {}", d.name, d.id, d.state.label()),
            None => format!("  <missing {dep}>"),
        });
    }

    let dependents: Vec<&Task> = board.tasks.iter().filter(|t| t.depends_on(id)).collect();
    lines.push("needed by:".to_string());
    if dependents.is_empty() {
        lines.push("  (nothing)".to_string());
    }
    for d in dependents {
        lines.push(format!("  {} [{}]", d.name, d.id));
    }
    Some(lines)
}

fn load_board_from_root() -> Result<Board> {
    let root = board::find_root()?;
    Ok(OpenBoard::open(&root).session.board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::tests::{board_with, task};

    fn named(id: &str, name: &str, state: TaskState, deps: &[&str]) -> Task {
        let mut t = task(id, deps);
        t.name = name.to_string();
        t.state = state;
        t
    }

    fn sample() -> Board {
        board_with(vec![
            named("a", "Design", TaskState::Done, &[]),
            named("b", "Build", TaskState::InProgress, &["a"]),
            named("c", "Ship", TaskState::NotStarted, &["a", "b", "gone"]),
        ])
    }

    #[test]
    fn blocked_lists_only_unfinished_prerequisites() {
        let board = sample();
        let blocked = blocked_tasks(&board);
        assert_eq!(blocked.len(), 1);
        assert_eq!(blocked[0].0.id, "c");
        assert_eq!(
            blocked[0].1,
            vec!["Build".to_string(), "<missing gone>".to_string()]
        );
    }

    #[test]
    fn no_blocked_tasks_when_prerequisites_done() {
        let board = board_with(vec![
            named("a", "Design", TaskState::Done, &[]),
            named("b", "Build", TaskState::NotStarted, &["a"]),
        ]);
        assert!(blocked_tasks(&board).is_empty());
    }

    #[test]
    fn task_report_shows_both_directions() {
        let board = sample();
        let lines = task_report(&board, "b").unwrap();
        assert_eq!(
            lines,
            vec![
                "Build [b]",
                "state: in progress",
                "blocked: false",
                "category: Work  flow: Launch",
                "position: (0, 0)",
                "depends on:",
                "  Design [a] done",
                "needed by:",
                "  Ship [c]",
            ]
        );
    }

    #[test]
    fn task_report_unknown_id() {
        assert!(task_report(&sample(), "zzz").is_none());
    }

    // -----------------------------------------------------------------------
    // Integration: load from real files
    // -----------------------------------------------------------------------

    #[test]
    fn integration_load_and_inspect() {
        use crate::store::snapshot::{self, Snapshot};
        use std::fs;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        fs::create_dir_all(board::board_dir(dir.path())).unwrap();
        let snapshot = Snapshot {
            data: sample(),
            viewport: Default::default(),
        };
        snapshot::save(&board::state_path(dir.path()), &snapshot).unwrap();

        let root = board::find_root_from(dir.path()).unwrap();
        let board = OpenBoard::open(&root).session.board;
        assert_eq!(board.tasks.len(), 3);
        assert_eq!(blocked_tasks(&board).len(), 1);
        let dangling = derive::dangling_dependencies(&board.tasks);
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].1, "gone");
    }
}
