//! `config.flowboard`: user preferences, one `key: value` per line.

use anyhow::{Result, bail};

/// Grid size used when `snap_to_grid` is on, in world units.
pub const GRID_SIZE: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub confirm_delete: bool,
    pub show_edges: bool,
    pub snap_to_grid: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            confirm_delete: true,
            show_edges: true,
            snap_to_grid: false,
        }
    }
}

impl Config {
    pub fn grid(&self) -> Option<f64> {
        self.snap_to_grid.then_some(GRID_SIZE)
    }
}

/// Parse a config file. Comments (`#`) and unknown keys are skipped.
pub fn parse(content: &str) -> Result<Config> {
    let mut config = Config::default();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            bail!("config line {}: expected `key: value`, got `{}`", idx + 1, line);
        };
        let key = key.trim();
        let value = value.trim();
        let slot = match key {
            "confirm_delete" => &mut config.confirm_delete,
            "show_edges" => &mut config.show_edges,
            "snap_to_grid" => &mut config.snap_to_grid,
            _ => continue,
        };
        *slot = match value {
            "true" => true,
            "false" => false,
            other => bail!(
                "config line {}: `{}` must be true or false, got `{}`",
                idx + 1,
                key,
                other
            ),
        };
    }
    Ok(config)
}

pub fn serialize(config: &Config) -> String {
    format!(
        "\
# flowboard configuration
# Edit manually or run: flowboard setup

# Ask before deleting a task
confirm_delete: {}

# Draw dependency arrows on the canvas
show_edges: {}

# Round dropped node positions to a {}-unit grid
snap_to_grid: {}
",
        config.confirm_delete, config.show_edges, GRID_SIZE, config.snap_to_grid
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_then_parse_preserves_values() {
        let cfg = Config {
            confirm_delete: false,
            show_edges: true,
            snap_to_grid: true,
        };
        assert_eq!(parse(&serialize(&cfg)).unwrap(), cfg);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse("").unwrap(), Config::default());
        assert_eq!(parse("# only a comment\n\n").unwrap(), Config::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = parse("theme: dark\nshow_edges: false\n").unwrap();
        assert!(!cfg.show_edges);
        assert!(cfg.confirm_delete);
    }

    #[test]
    fn bad_boolean_is_an_error() {
        let err = parse("confirm_delete: maybe\n").unwrap_err();
        assert!(err.to_string().contains("confirm_delete"));
    }

    #[test]
    fn line_without_colon_is_an_error() {
        assert!(parse("snap_to_grid\n").is_err());
    }

    #[test]
    fn grid_only_when_snapping() {
        assert_eq!(Config::default().grid(), None);
        let cfg = Config {
            snap_to_grid: true,
            ..Config::default()
        };
        assert_eq!(cfg.grid(), Some(GRID_SIZE));
    }
}
