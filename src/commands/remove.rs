//! `flowboard remove`: delete a task, or a flow or category with everything
//! inside it.

use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;

use crate::board;
use crate::canvas::interaction::Command;
use crate::commands::OpenBoard;
use crate::prompt::{Answer, InputProvider, StdinPrompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Category,
    Flow,
    Task,
}

pub fn run(kind: Kind, id: &str, yes: bool) -> Result<()> {
    let root = board::find_root()?;
    let mut input: Box<dyn InputProvider> = if yes {
        Box::new(Answer::yes())
    } else {
        Box::new(StdinPrompt::new())
    };
    remove_in(&root, kind, id, &mut *input)
}

pub fn remove_in(root: &Path, kind: Kind, id: &str, input: &mut dyn InputProvider) -> Result<()> {
    let mut opened = OpenBoard::open(root);
    let board = &opened.session.board;
    let found = match kind {
        Kind::Task => board.task(id).map(|t| (format!("task \"{}\"", t.name), 1)),
        Kind::Flow => board.flow(id).map(|f| {
            let tasks = board.tasks.iter().filter(|t| t.flow_id == id).count();
            (format!("flow \"{}\"", f.title), tasks)
        }),
        Kind::Category => board.category(id).map(|c| {
            let tasks = board.tasks_under_category(id).count();
            (format!("category \"{}\"", c.name), tasks)
        }),
    };
    let Some((label, tasks)) = found else {
        println!("  Not found: {}", id);
        return Ok(());
    };

    let question = match kind {
        Kind::Task => format!("Delete {label}?"),
        _ => format!(
            "Delete {label} and {tasks} task{}?",
            if tasks == 1 { "" } else { "s" }
        ),
    };
    if !input.confirm(&question)? {
        println!("  Nothing changed.");
        return Ok(());
    }

    let id = id.to_string();
    let command = match kind {
        Kind::Task => Command::DeleteTask { id },
        Kind::Flow => Command::DeleteFlow { id },
        Kind::Category => Command::DeleteCategory { id },
    };
    let outcome = opened.session.apply(command);
    opened.finish(&outcome, &format!("deleted {label}"))
}
