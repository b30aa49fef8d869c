//! On-disk form of the board: `{data: {categories, flows, tasks}, viewport}`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::canvas::viewport::Viewport;
use crate::graph::model::{Board, Category, Flow, PALETTE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub data: Board,
    #[serde(default)]
    pub viewport: Viewport,
}

impl Default for Snapshot {
    fn default() -> Self {
        seed()
    }
}

/// Board written by `init` and used whenever the saved one can't be read.
pub fn seed() -> Snapshot {
    Snapshot {
        data: Board {
            categories: vec![Category {
                id: "general".to_string(),
                name: "General".to_string(),
                color: PALETTE[0].to_string(),
                visible: true,
            }],
            flows: vec![Flow {
                id: "backlog".to_string(),
                title: "Backlog".to_string(),
                description: String::new(),
                category_id: "general".to_string(),
            }],
            tasks: Vec::new(),
        },
        viewport: Viewport::default(),
    }
}

pub fn parse(content: &str) -> Result<Snapshot> {
    let mut snapshot: Snapshot =
        serde_json::from_str(content).context("board file is not a valid snapshot")?;
    snapshot.viewport = snapshot.viewport.clamped();
    Ok(snapshot)
}

pub fn serialize(snapshot: &Snapshot) -> Result<String> {
    let mut out = serde_json::to_string_pretty(snapshot)?;
    out.push('\n');
    Ok(out)
}

/// Read the board at `path`, falling back to [`seed`] when the file is
/// missing, unreadable or malformed. Never fails.
pub fn load(path: &Path) -> Snapshot {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no saved board, starting from seed");
            return seed();
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not read board, starting from seed");
            return seed();
        }
    };
    match parse(&content) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = format!("{err:#}"), "corrupt board, starting from seed");
            seed()
        }
    }
}

pub fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let content = serialize(snapshot)?;
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::tests::{board_with, task};
    use crate::graph::model::TaskState;
    use tempfile::TempDir;

    fn sample() -> Snapshot {
        let mut t2 = task("t2", &["t1"]);
        t2.state = TaskState::InProgress;
        t2.x = 212.5;
        t2.y = -3.25;
        Snapshot {
            data: board_with(vec![task("t1", &[]), t2]),
            viewport: Viewport {
                x: -40.0,
                y: 12.0,
                zoom: 1.3,
            },
        }
    }

    #[test]
    fn serialized_shape_uses_camel_case_and_snake_case_states() {
        let text = serialize(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["data"]["tasks"][1]["state"], "in_progress");
        assert_eq!(value["data"]["tasks"][1]["categoryId"], "c1");
        assert_eq!(value["data"]["tasks"][1]["dependencies"][0], "t1");
        assert_eq!(value["data"]["flows"][0]["categoryId"], "c1");
        assert_eq!(value["viewport"]["zoom"], 1.3);
    }

    #[test]
    fn save_load_save_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        let first = serialize(&sample()).unwrap();
        save(&path, &sample()).unwrap();
        let loaded = load(&path);
        assert_eq!(loaded, sample());
        assert_eq!(serialize(&loaded).unwrap(), first);
    }

    #[test]
    fn missing_file_loads_seed() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load(&dir.path().join("nope.json")), seed());
    }

    #[test]
    fn garbage_loads_seed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load(&path), seed());
    }

    #[test]
    fn missing_categories_loads_seed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, r#"{"data": {"flows": [], "tasks": []}}"#).unwrap();
        assert_eq!(load(&path), seed());
    }

    #[test]
    fn optional_fields_default() {
        let snapshot = parse(
            r#"{"data": {"categories": [], "tasks": [
                {"id": "a", "name": "A", "categoryId": "c", "flowId": "f", "x": 1, "y": 2}
            ]}}"#,
        )
        .unwrap();
        let t = &snapshot.data.tasks[0];
        assert_eq!(t.state, TaskState::NotStarted);
        assert!(t.dependencies.is_empty());
        assert!(snapshot.data.flows.is_empty());
        assert_eq!(snapshot.viewport, Viewport::default());
    }

    #[test]
    fn out_of_range_zoom_is_clamped_on_load() {
        let snapshot =
            parse(r#"{"data": {"categories": []}, "viewport": {"x": 0, "y": 0, "zoom": 9}}"#)
                .unwrap();
        assert_eq!(snapshot.viewport.zoom, 2.5);
    }

    #[test]
    fn save_into_missing_directory_fails_without_panicking() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing/board.json");
        assert!(save(&path, &seed()).is_err());
    }
}
