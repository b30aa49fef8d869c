//! `flowboard add`: create categories, flows and tasks from the shell.
//!
//! A name given on the command line is used as-is; otherwise it is asked
//! for on stdin. An empty answer creates nothing.

use std::path::Path;

use anyhow::Result;

use crate::board;
use crate::canvas::interaction::{Command, Outcome};
use crate::commands::OpenBoard;
use crate::graph::model::Rejection;
use crate::prompt::{self, Answer, InputProvider, StdinPrompt};

pub fn run_category(name: Option<String>, color: Option<String>) -> Result<()> {
    let root = board::find_root()?;
    category_in(&root, &mut *input_for(name), color)
}

pub fn run_flow(category: &str, title: Option<String>) -> Result<()> {
    let root = board::find_root()?;
    flow_in(&root, category, &mut *input_for(title))
}

pub fn run_task(flow: &str, name: Option<String>) -> Result<()> {
    let root = board::find_root()?;
    task_in(&root, flow, &mut *input_for(name))
}

fn input_for(given: Option<String>) -> Box<dyn InputProvider> {
    match given {
        Some(text) => Box::new(Answer::text(Some(text))),
        None => Box::new(StdinPrompt::new()),
    }
}

pub fn category_in(
    root: &Path,
    input: &mut dyn InputProvider,
    color: Option<String>,
) -> Result<()> {
    let mut opened = OpenBoard::open(root);
    let outcome = prompt::create_category(&mut opened.session, input, color)?;
    let id = opened.session.filter.active_category.clone().unwrap_or_default();
    opened.finish(&outcome, &format!("created category [{id}]"))
}

pub fn flow_in(root: &Path, category: &str, input: &mut dyn InputProvider) -> Result<()> {
    let mut opened = OpenBoard::open(root);
    opened
        .session
        .apply(Command::SelectCategory(Some(category.to_string())));
    let outcome = if opened.session.filter.active_category.is_none() {
        Outcome::Rejected(Rejection::CategoryNotFound(category.to_string()))
    } else {
        prompt::create_flow(&mut opened.session, input)?
    };
    let id = opened.session.filter.active_flow.clone().unwrap_or_default();
    opened.finish(&outcome, &format!("created flow [{id}]"))
}

pub fn task_in(root: &Path, flow: &str, input: &mut dyn InputProvider) -> Result<()> {
    let mut opened = OpenBoard::open(root);
    opened
        .session
        .apply(Command::SelectFlow(Some(flow.to_string())));
    let outcome = if opened.session.filter.active_flow.is_none() {
        Outcome::Rejected(Rejection::FlowNotFound(flow.to_string()))
    } else {
        prompt::create_task(&mut opened.session, input)?
    };
    let id = opened.session.selection.clone().unwrap_or_default();
    opened.finish(&outcome, &format!("created task [{id}]"))
}
