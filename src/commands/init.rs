//! `flowboard init`: create an empty board in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Result, bail};
use crossterm::style::Stylize;

use crate::board;
use crate::store::config::{self, Config};
use crate::store::snapshot;

const GITIGNORE: &str = "flowboard.log\n";

pub fn run() -> Result<()> {
    let root = std::env::current_dir()?;
    run_in(&root)
}

/// Run init inside `root`.
pub fn run_in(root: &Path) -> Result<()> {
    let dir = board::board_dir(root);
    let state_path = board::state_path(root);

    if state_path.exists() {
        bail!(
            "a board already exists here (.flowboard/board.json). Run `flowboard view` to open it."
        );
    }

    fs::create_dir_all(&dir)?;

    snapshot::save(&state_path, &snapshot::seed())?;
    println!("  {} .flowboard/board.json", "Created".green().bold());

    let config_path = board::config_path(root);
    if !config_path.exists() {
        fs::write(&config_path, config::serialize(&Config::default()))?;
        println!("  {} .flowboard/config.flowboard", "Created".green().bold());
    }

    let gitignore = dir.join(".gitignore");
    if !gitignore.exists() {
        fs::write(&gitignore, GITIGNORE)?;
    }

    println!(
        "  {} {}",
        "Next".cyan().bold(),
        "flowboard view".dark_grey()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_board_directory() {
        let dir = TempDir::new().unwrap();
        run_in(dir.path()).unwrap();
        assert!(board::board_dir(dir.path()).is_dir());
    }

    #[test]
    fn writes_seed_board() {
        let dir = TempDir::new().unwrap();
        run_in(dir.path()).unwrap();
        let loaded = snapshot::load(&board::state_path(dir.path()));
        assert_eq!(loaded, snapshot::seed());
    }

    #[test]
    fn writes_default_config() {
        let dir = TempDir::new().unwrap();
        run_in(dir.path()).unwrap();
        let content = fs::read_to_string(board::config_path(dir.path())).unwrap();
        assert_eq!(config::parse(&content).unwrap(), Config::default());
    }

    #[test]
    fn keeps_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(board::board_dir(dir.path())).unwrap();
        fs::write(board::config_path(dir.path()), "snap_to_grid: true\n").unwrap();
        run_in(dir.path()).unwrap();
        let content = fs::read_to_string(board::config_path(dir.path())).unwrap();
        assert!(config::parse(&content).unwrap().snap_to_grid);
    }

    #[test]
    fn ignores_log_file() {
        let dir = TempDir::new().unwrap();
        run_in(dir.path()).unwrap();
        let content = fs::read_to_string(board::board_dir(dir.path()).join(".gitignore")).unwrap();
        assert!(content.contains("flowboard.log"));
    }

    #[test]
    fn error_if_already_initialised() {
        let dir = TempDir::new().unwrap();
        run_in(dir.path()).unwrap();
        assert!(run_in(dir.path()).is_err());
    }
}
