//! `flowboard link` / `flowboard unlink`: edit dependencies by task id.

use std::path::Path;

use anyhow::Result;

use crate::board;
use crate::canvas::interaction::Command;
use crate::commands::OpenBoard;

pub fn run_link(source: &str, target: &str) -> Result<()> {
    let root = board::find_root()?;
    link_in(&root, source, target)
}

pub fn run_unlink(source: &str, target: &str) -> Result<()> {
    let root = board::find_root()?;
    unlink_in(&root, source, target)
}

/// Make `target` depend on `source`.
pub fn link_in(root: &Path, source: &str, target: &str) -> Result<()> {
    let mut opened = OpenBoard::open(root);
    let outcome = opened.session.apply(Command::Link {
        source: source.to_string(),
        target: target.to_string(),
    });
    opened.finish(&outcome, &format!("{target} now depends on {source}"))
}

pub fn unlink_in(root: &Path, source: &str, target: &str) -> Result<()> {
    let mut opened = OpenBoard::open(root);
    let outcome = opened.session.apply(Command::Unlink {
        source: source.to_string(),
        target: target.to_string(),
    });
    opened.finish(&outcome, &format!("{target} no longer depends on {source}"))
}
