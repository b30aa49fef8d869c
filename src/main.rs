mod board;
mod canvas;
mod commands;
mod graph;
mod logging;
mod prompt;
mod store;
mod tui;

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};

use crate::logging::LogTarget;

#[derive(Parser)]
#[command(
    name = "flowboard",
    about = "A visual board of tasks, flows and the dependencies between them"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty board in the current directory
    Init,
    /// Open the interactive TUI canvas
    View {
        /// Launch with a built-in sample board (no board required)
        #[arg(long)]
        demo: bool,
    },
    /// Open the TUI settings panel
    Setup,
    /// List every dependency, prerequisite first
    List,
    /// Query derived board state
    #[command(
        group(
            ArgGroup::new("inspect_query")
                .args(["blocked", "dangling", "task"])
                .required(true)
                .multiple(false)
        )
    )]
    Inspect {
        /// List tasks waiting on unfinished or missing prerequisites
        #[arg(long)]
        blocked: bool,
        /// List dependencies pointing at tasks that no longer exist
        #[arg(long)]
        dangling: bool,
        /// Show one task with its prerequisites and dependents
        #[arg(long, value_name = "ID")]
        task: Option<String>,
    },
    /// Create a category, flow or task
    #[command(subcommand)]
    Add(AddCommand),
    /// Make TARGET depend on SOURCE
    Link { source: String, target: String },
    /// Remove TARGET's dependency on SOURCE
    Unlink { source: String, target: String },
    /// Delete a task, or a flow or category together with its tasks
    Remove {
        #[arg(value_enum)]
        kind: commands::remove::Kind,
        id: String,
        /// Skip the confirmation question
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AddCommand {
    /// Add a category; asks for the name when omitted
    Category {
        name: Option<String>,
        /// Hex color such as #4f8cff; picked from the palette when omitted
        #[arg(long)]
        color: Option<String>,
    },
    /// Add a flow to a category; asks for the title when omitted
    Flow {
        #[arg(long, value_name = "ID")]
        category: String,
        title: Option<String>,
    },
    /// Add a task to a flow; asks for the name when omitted
    Task {
        #[arg(long, value_name = "ID")]
        flow: String,
        name: Option<String>,
    },
}

impl Command {
    /// The TUI owns the terminal, so its logs go to a file instead.
    fn log_target(&self) -> LogTarget {
        match self {
            Command::View { demo: true } => LogTarget::Discard,
            Command::View { .. } | Command::Setup => match board::find_root() {
                Ok(root) => LogTarget::File(board::log_path(&root)),
                Err(_) => LogTarget::Discard,
            },
            _ => LogTarget::Stderr,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.command.log_target())?;

    match cli.command {
        Command::Init => commands::init::run(),
        Command::View { demo } => commands::view::run(demo),
        Command::Setup => commands::view::run_setup(),
        Command::List => commands::list::run(),
        Command::Inspect { dangling, task, .. } => match task {
            Some(id) => commands::inspect::run_task(&id),
            None if dangling => commands::inspect::run_dangling(),
            // inspect_query is required, so only --blocked is left
            None => commands::inspect::run_blocked(),
        },
        Command::Add(AddCommand::Category { name, color }) => {
            commands::add::run_category(name, color)
        }
        Command::Add(AddCommand::Flow { category, title }) => {
            commands::add::run_flow(&category, title)
        }
        Command::Add(AddCommand::Task { flow, name }) => commands::add::run_task(&flow, name),
        Command::Link { source, target } => commands::link::run_link(&source, &target),
        Command::Unlink { source, target } => commands::link::run_unlink(&source, &target),
        Command::Remove { kind, id, yes } => commands::remove::run(kind, &id, yes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn inspect_rejects_multiple_query_flags() {
        let parsed = Cli::try_parse_from(["flowboard", "inspect", "--blocked", "--dangling"]);
        assert!(
            parsed.is_err(),
            "inspect flags should be mutually exclusive"
        );
        let err = parsed.err().expect("expected clap parse error");
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn inspect_requires_a_query_flag() {
        let err = Cli::try_parse_from(["flowboard", "inspect"])
            .err()
            .expect("bare inspect should not parse");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from(["flowboard", "inspect", "--blocked"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Inspect {
                blocked: true,
                dangling: false,
                task: None
            }
        ));
    }

    #[test]
    fn inspect_accepts_single_query_flag() {
        let cli = Cli::try_parse_from(["flowboard", "inspect", "--task", "t1"])
            .expect("single inspect flag should parse");
        match cli.command {
            Command::Inspect { task, blocked, .. } => {
                assert_eq!(task.as_deref(), Some("t1"));
                assert!(!blocked);
            }
            _ => panic!("expected inspect command"),
        }
    }

    #[test]
    fn add_task_takes_optional_name() {
        let cli = Cli::try_parse_from(["flowboard", "add", "task", "--flow", "backlog"])
            .expect("name is optional");
        match cli.command {
            Command::Add(AddCommand::Task { flow, name }) => {
                assert_eq!(flow, "backlog");
                assert!(name.is_none());
            }
            _ => panic!("expected add task command"),
        }
        assert!(Cli::try_parse_from(["flowboard", "add", "flow", "Later"]).is_err());
    }

    #[test]
    fn remove_parses_kind() {
        let cli = Cli::try_parse_from(["flowboard", "remove", "flow", "f1", "-y"]).unwrap();
        match cli.command {
            Command::Remove { kind, id, yes } => {
                assert_eq!(kind, commands::remove::Kind::Flow);
                assert_eq!(id, "f1");
                assert!(yes);
            }
            _ => panic!("expected remove command"),
        }
        assert!(Cli::try_parse_from(["flowboard", "remove", "board", "x"]).is_err());
    }

    #[test]
    fn demo_view_discards_logs() {
        assert_eq!(Command::View { demo: true }.log_target(), LogTarget::Discard);
        assert_eq!(Command::List.log_target(), LogTarget::Stderr);
    }
}
