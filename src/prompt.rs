//! Asking the user for names and confirmations.
//!
//! Creation flows take an [`InputProvider`] instead of reading input
//! themselves. A missing or blank answer aborts the creation and leaves the
//! board untouched.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::canvas::interaction::{Command, Outcome, Session};

pub trait InputProvider {
    /// Ask for a line of text. `None` means the user backed out.
    fn text(&mut self, title: &str) -> Result<Option<String>>;
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Answers that were already collected elsewhere, such as a TUI modal or a
/// command-line argument.
#[derive(Debug, Clone, Default)]
pub struct Answer {
    pub text: Option<String>,
    pub confirmed: bool,
}

impl Answer {
    pub fn text(text: Option<String>) -> Self {
        Self {
            text,
            confirmed: false,
        }
    }

    pub fn yes() -> Self {
        Self {
            text: None,
            confirmed: true,
        }
    }
}

impl InputProvider for Answer {
    fn text(&mut self, _title: &str) -> Result<Option<String>> {
        Ok(self.text.take())
    }

    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(self.confirmed)
    }
}

/// Line-based prompts on stdin/stdout.
pub struct StdinPrompt<R> {
    input: R,
}

impl StdinPrompt<io::StdinLock<'static>> {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> StdinPrompt<R> {
    pub fn from_reader(input: R) -> Self {
        Self { input }
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("  {prompt}: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<R: BufRead> InputProvider for StdinPrompt<R> {
    fn text(&mut self, title: &str) -> Result<Option<String>> {
        self.read_line(title)
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{question} [y/N]"))?;
        Ok(matches!(
            answer.as_deref().map(str::trim),
            Some("y") | Some("Y") | Some("yes")
        ))
    }
}

/// Ask for a non-empty name. Whitespace is trimmed.
pub fn ask_name(input: &mut dyn InputProvider, title: &str) -> Result<Option<String>> {
    Ok(input
        .text(title)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

pub fn create_category(
    session: &mut Session,
    input: &mut dyn InputProvider,
    color: Option<String>,
) -> Result<Outcome> {
    let Some(name) = ask_name(input, "Category name")? else {
        return Ok(Outcome::Unchanged);
    };
    Ok(session.apply(Command::CreateCategory { name, color }))
}

pub fn create_flow(session: &mut Session, input: &mut dyn InputProvider) -> Result<Outcome> {
    let Some(title) = ask_name(input, "Flow title")? else {
        return Ok(Outcome::Unchanged);
    };
    Ok(session.apply(Command::CreateFlow { title }))
}

pub fn create_task(session: &mut Session, input: &mut dyn InputProvider) -> Result<Outcome> {
    let Some(name) = ask_name(input, "Task name")? else {
        return Ok(Outcome::Unchanged);
    };
    Ok(session.apply(Command::CreateTask { name }))
}

/// Delete `id`, asking first when `confirm` is set.
pub fn delete_task(
    session: &mut Session,
    input: &mut dyn InputProvider,
    id: &str,
    confirm: bool,
) -> Result<Outcome> {
    let Some(task) = session.board.task(id) else {
        return Ok(Outcome::Unchanged);
    };
    if confirm && !input.confirm(&format!("Delete task \"{}\"?", task.name))? {
        return Ok(Outcome::Unchanged);
    }
    Ok(session.apply(Command::DeleteTask { id: id.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::viewport::Viewport;
    use crate::graph::model::tests::{board_with, task};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    fn session() -> Session {
        let mut s = Session::new(
            board_with(vec![task("t1", &[])]),
            Viewport::default(),
            Box::new(StdRng::seed_from_u64(3)),
        );
        s.apply(Command::SelectFlow(Some("f1".into())));
        s
    }

    #[test]
    fn blank_or_missing_answer_aborts_creation() {
        let mut s = session();
        let before = s.board.clone();
        for answer in [None, Some(String::new()), Some("   ".to_string())] {
            let out = create_task(&mut s, &mut Answer::text(answer)).unwrap();
            assert_eq!(out, Outcome::Unchanged);
        }
        assert_eq!(s.board, before);
    }

    #[test]
    fn answer_is_trimmed_and_created() {
        let mut s = session();
        let out = create_task(&mut s, &mut Answer::text(Some("  Write docs \n".into()))).unwrap();
        assert_eq!(out, Outcome::Changed);
        assert!(s.board.tasks.iter().any(|t| t.name == "Write docs"));
    }

    #[test]
    fn flow_creation_reports_missing_category() {
        let mut s = session();
        s.apply(Command::SelectCategory(None));
        let out = create_flow(&mut s, &mut Answer::text(Some("Later".into()))).unwrap();
        assert_eq!(
            out,
            Outcome::Rejected(crate::graph::model::Rejection::NoActiveCategory)
        );
    }

    #[test]
    fn category_creation_uses_color() {
        let mut s = session();
        create_category(
            &mut s,
            &mut Answer::text(Some("Home".into())),
            Some("#123456".into()),
        )
        .unwrap();
        assert_eq!(s.board.categories.last().unwrap().color, "#123456");
    }

    #[test]
    fn delete_respects_confirmation() {
        let mut s = session();
        let out = delete_task(&mut s, &mut Answer::default(), "t1", true).unwrap();
        assert_eq!(out, Outcome::Unchanged);
        assert!(s.board.task("t1").is_some());

        let out = delete_task(&mut s, &mut Answer::yes(), "t1", true).unwrap();
        assert_eq!(out, Outcome::Changed);
        assert!(s.board.task("t1").is_none());
    }

    #[test]
    fn stdin_prompt_reads_lines() {
        let mut prompt = StdinPrompt::from_reader(Cursor::new("Groceries\ny\n"));
        assert_eq!(
            ask_name(&mut prompt, "Name").unwrap().as_deref(),
            Some("Groceries")
        );
        assert!(prompt.confirm("Sure?").unwrap());
        assert_eq!(prompt.text("More").unwrap(), None);
    }
}
