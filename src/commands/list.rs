//! `flowboard list`: print every dependency edge in board order.

use anyhow::Result;

use crate::board;
use crate::commands::OpenBoard;
use crate::graph::derive;
use crate::graph::model::Board;

pub fn run() -> Result<()> {
    let root = board::find_root()?;
    let opened = OpenBoard::open(&root);

    let lines = list_edges(&opened.session.board);
    if lines.is_empty() {
        println!("  No dependencies.");
    } else {
        for line in lines {
            println!("  {}", line);
        }
    }
    Ok(())
}

/// `prerequisite -> dependent`, by task name.
fn list_edges(board: &Board) -> Vec<String> {
    let by_id = derive::tasks_by_id(&board.tasks);
    let name = |id: &str| match by_id.get(id) {
        Some(task) => task.name.clone(),
        None => format!("<missing {id}>"),
    };
    derive::edge_list(&board.tasks)
        .iter()
        .map(|edge| format!("{} -> {}", name(edge.from), name(edge.to)))
        .collect()
}
