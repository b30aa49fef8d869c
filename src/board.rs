//! Where a board lives on disk: `<root>/.flowboard/`.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};

const DIR: &str = ".flowboard";
const STATE_FILE: &str = "board.json";
const CONFIG_FILE: &str = "config.flowboard";
const LOG_FILE: &str = "flowboard.log";

/// The nearest ancestor of `start` (itself included) holding a saved board.
///
/// Only a regular `board.json` counts; a bare `.flowboard/` left behind by a
/// failed `init` does not.
pub fn find_root_from(start: &Path) -> Result<PathBuf> {
    start
        .ancestors()
        .find(|dir| state_path(dir).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            anyhow!(
                "no board in {} or its parents; `flowboard init` creates one",
                start.display()
            )
        })
}

pub fn find_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    find_root_from(&cwd)
}

pub fn board_dir(root: &Path) -> PathBuf {
    root.join(DIR)
}

pub fn state_path(root: &Path) -> PathBuf {
    board_dir(root).join(STATE_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    board_dir(root).join(CONFIG_FILE)
}

pub fn log_path(root: &Path) -> PathBuf {
    board_dir(root).join(LOG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::snapshot;
    use std::fs;
    use tempfile::TempDir;

    fn saved_board() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(board_dir(dir.path())).unwrap();
        snapshot::save(&state_path(dir.path()), &snapshot::seed()).unwrap();
        dir
    }

    #[test]
    fn nested_directory_resolves_to_board_root() {
        let dir = saved_board();
        let nested = dir.path().join("notes").join("2026");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_root_from(&nested).unwrap(), dir.path());
        assert_eq!(find_root_from(dir.path()).unwrap(), dir.path());
    }

    #[test]
    fn nearest_board_wins() {
        let outer = saved_board();
        let inner = outer.path().join("side-project");
        fs::create_dir_all(board_dir(&inner)).unwrap();
        snapshot::save(&state_path(&inner), &snapshot::seed()).unwrap();
        assert_eq!(find_root_from(&inner.join("src")).unwrap(), inner);
        assert_eq!(find_root_from(outer.path()).unwrap(), outer.path());
    }

    #[test]
    fn board_dir_without_saved_state_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(board_dir(dir.path())).unwrap();
        assert!(find_root_from(dir.path()).is_err());

        fs::create_dir_all(state_path(dir.path())).unwrap();
        let err = find_root_from(dir.path()).unwrap_err();
        assert!(err.to_string().contains("flowboard init"));
    }
}
