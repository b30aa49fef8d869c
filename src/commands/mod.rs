pub mod add;
pub mod init;
pub mod inspect;
pub mod link;
pub mod list;
pub mod remove;
pub mod view;

use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::style::Stylize;

use crate::board;
use crate::canvas::interaction::{Outcome, Session};
use crate::store::snapshot::{self, Snapshot};

/// A board loaded for a one-shot command.
pub struct OpenBoard {
    pub state_path: PathBuf,
    pub session: Session,
}

impl OpenBoard {
    pub fn open(root: &Path) -> Self {
        let state_path = board::state_path(root);
        let snapshot = snapshot::load(&state_path);
        let session = Session::new(snapshot.data, snapshot.viewport, Box::new(rand::rng()));
        Self {
            state_path,
            session,
        }
    }

    pub fn save(&self) -> Result<()> {
        let snapshot = Snapshot {
            data: self.session.board.clone(),
            viewport: self.session.viewport,
        };
        snapshot::save(&self.state_path, &snapshot)
    }

    /// Save after a `Changed` outcome and tell the user what happened.
    /// Rejections are printed, not returned as errors.
    pub fn finish(&self, outcome: &Outcome, done: &str) -> Result<()> {
        match outcome {
            Outcome::Changed => {
                self.save()?;
                println!("  {} {}", "Done".green().bold(), done);
            }
            Outcome::Rejected(rejection) => {
                tracing::info!(%rejection, "command rejected");
                println!("  {} {}", "Rejected".red().bold(), rejection);
            }
            Outcome::Unchanged | Outcome::Transient => {
                println!("  {}", "Nothing changed.".dark_grey());
            }
        }
        Ok(())
    }
}
