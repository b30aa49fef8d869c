use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};

use crate::board;
use crate::canvas::interaction::{CanvasEvent, Command, Outcome, Session};
use crate::canvas::viewport::Viewport;
use crate::graph::derive;
use crate::graph::model::{Board, Category, Flow, Rejection, Task, TaskState};
use crate::prompt::{self, Answer};
use crate::store::config::{self, Config};
use crate::store::snapshot::{self, Snapshot};
use crate::tui::input::{self, Action, ClickTracker, Direction, PAN_STEP};
use crate::tui::render::{self, BoardRenderData, SidebarCategory, SidebarFlow, centered_rect};
use crate::tui::settings::{self, SettingsEvent, SettingsPanelState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingTextKind {
    NewCategory,
    NewFlow,
    NewTask,
}

#[derive(Debug, Clone)]
struct PendingText {
    title: String,
    buffer: String,
    cursor: usize,
    kind: PendingTextKind,
}

#[derive(Debug, Clone)]
enum PendingConfirm {
    DeleteTask { id: String, name: String },
}

/// A left-button press that has not been released yet.
#[derive(Debug, Clone)]
struct Press {
    hit: Option<String>,
    moved: bool,
}

struct AppState {
    session: Session,
    state_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    config: Config,
    canvas_area: Rect,
    show_help: bool,
    show_settings: bool,
    settings_state: SettingsPanelState,
    status_message: Option<String>,
    pending_text: Option<PendingText>,
    pending_confirm: Option<PendingConfirm>,
    clicks: ClickTracker,
    press: Option<Press>,
    demo: bool,
}

impl AppState {
    fn load(demo: bool, open_settings: bool) -> Result<Self> {
        if demo {
            let mut app = Self::new(demo_snapshot(), Config::default());
            app.demo = true;
            app.show_settings = open_settings;
            app.status_message = Some("demo mode: changes are in-memory only".to_string());
            return Ok(app);
        }

        let root = board::find_root()?;
        let state_path = board::state_path(&root);
        let config_path = board::config_path(&root);

        let snapshot = snapshot::load(&state_path);
        let cfg = if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            config::parse(&content)?
        } else {
            Config::default()
        };

        let mut app = Self::new(snapshot, cfg);
        app.state_path = Some(state_path);
        app.config_path = Some(config_path);
        app.show_settings = open_settings;
        app.select_first_flow();
        Ok(app)
    }

    fn new(snapshot: Snapshot, config: Config) -> Self {
        let mut session = Session::new(snapshot.data, snapshot.viewport, Box::new(rand::rng()));
        session.grid = config.grid();
        Self {
            session,
            state_path: None,
            config_path: None,
            config,
            canvas_area: Rect::default(),
            show_help: false,
            show_settings: false,
            settings_state: SettingsPanelState::default(),
            status_message: None,
            pending_text: None,
            pending_confirm: None,
            clicks: ClickTracker::default(),
            press: None,
            demo: false,
        }
    }

    fn select_first_flow(&mut self) {
        let Some(category) = self.session.board.categories.first().map(|c| c.id.clone()) else {
            return;
        };
        let flow = self
            .session
            .board
            .flows_in(&category)
            .next()
            .map(|f| f.id.clone());
        self.session.apply(Command::SelectCategory(Some(category)));
        if flow.is_some() {
            self.session.apply(Command::SelectFlow(flow));
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        self.canvas_area = render::areas(frame.area()).canvas;

        let scene = self.session.scene();
        let sidebar = self.sidebar();
        let selected_name = self
            .session
            .selection
            .as_deref()
            .and_then(|id| self.session.board.task(id))
            .map(|t| t.name.as_str());
        let hints = self.hints();
        let data = BoardRenderData {
            scene: &scene,
            categories: &sidebar,
            zoom: self.session.viewport.zoom,
            selected_name,
            mode_label: self.mode_label(),
            link_mode: self.session.interaction.link_mode(),
            hints: &hints,
            message: self.status_message.as_deref(),
            show_help: self.show_help,
            show_edges: self.config.show_edges,
        };
        render::draw(frame, &data);

        if self.show_settings {
            settings::draw(frame, &self.settings_state, &self.config);
        }
        if let Some(prompt) = &self.pending_text {
            draw_text_prompt(frame, prompt);
        } else if let Some(confirm) = &self.pending_confirm {
            draw_confirm_prompt(frame, confirm);
        }
    }

    fn sidebar(&self) -> Vec<SidebarCategory<'_>> {
        let board = &self.session.board;
        let filter = &self.session.filter;
        board
            .categories
            .iter()
            .map(|category| SidebarCategory {
                name: &category.name,
                color: &category.color,
                visible: category.visible,
                active: filter.active_category.as_deref() == Some(category.id.as_str()),
                flows: board
                    .flows_in(&category.id)
                    .map(|flow| SidebarFlow {
                        title: &flow.title,
                        task_count: board.tasks.iter().filter(|t| t.flow_id == flow.id).count(),
                        active: filter.active_flow.as_deref() == Some(flow.id.as_str()),
                    })
                    .collect(),
            })
            .collect()
    }

    fn mode_label(&self) -> &'static str {
        if self.show_settings {
            return "Settings";
        }
        if self.pending_text.is_some() {
            return "Input";
        }
        if self.pending_confirm.is_some() {
            return "Confirming";
        }
        self.session.interaction.label()
    }

    fn hints(&self) -> String {
        if self.show_settings {
            return "[j/k or arrows] select  [h/l or Enter] change  [Esc] close".to_string();
        }
        if self.pending_text.is_some() {
            return "type name, [Backspace] delete, [Enter] create, [Esc] cancel".to_string();
        }
        if self.pending_confirm.is_some() {
            return "[y] confirm  [n/Esc] cancel".to_string();
        }
        if self.session.interaction.link_mode() {
            return "LINK: click prerequisite, then dependent  [l/Esc] leave link mode".to_string();
        }
        "[drag] move/pan  [wheel/+/-] zoom  [c/f/n] new  [l] link  [Enter] state  [x] delete  [g/w] filter  [s] setup"
            .to_string()
    }

    fn overlay_open(&self) -> bool {
        self.show_settings || self.pending_text.is_some() || self.pending_confirm.is_some()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        self.status_message = None;

        if self.show_settings {
            let event = settings::handle_key(key, &mut self.settings_state, &mut self.config);
            match event {
                SettingsEvent::Changed => {
                    self.session.grid = self.config.grid();
                    self.persist_config();
                }
                SettingsEvent::Close => self.show_settings = false,
                SettingsEvent::None => {}
            }
            return Ok(false);
        }

        if self.pending_confirm.is_some() {
            return self.handle_confirm_key(key);
        }

        let in_text_mode = self.pending_text.is_some();
        let action = input::action_for_key(key, in_text_mode);

        if in_text_mode {
            return self.handle_text_action(action);
        }

        match action {
            Action::Quit => return Ok(true),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::OpenSettings => self.show_settings = true,
            Action::Pan(direction) => {
                let (dx, dy) = match direction {
                    Direction::Up => (0.0, PAN_STEP),
                    Direction::Down => (0.0, -PAN_STEP),
                    Direction::Left => (PAN_STEP, 0.0),
                    Direction::Right => (-PAN_STEP, 0.0),
                };
                let outcome = self.session.apply(Command::Pan { dx, dy });
                self.apply_outcome(outcome);
            }
            Action::ZoomIn => {
                let outcome = self.session.handle(CanvasEvent::Wheel { delta: -1.0 });
                self.apply_outcome(outcome);
            }
            Action::ZoomOut => {
                let outcome = self.session.handle(CanvasEvent::Wheel { delta: 1.0 });
                self.apply_outcome(outcome);
            }
            Action::NewCategory => self.start_text_prompt(PendingTextKind::NewCategory),
            Action::NewFlow => {
                if self.session.filter.active_category.is_none() {
                    self.status_message = Some(format!(
                        "{}: pick one with [g]",
                        Rejection::NoActiveCategory
                    ));
                } else {
                    self.start_text_prompt(PendingTextKind::NewFlow);
                }
            }
            Action::NewTask => {
                if self.session.filter.active_flow.is_none() {
                    self.status_message =
                        Some(format!("{}: pick one with [w]", Rejection::NoActiveFlow));
                } else {
                    self.start_text_prompt(PendingTextKind::NewTask);
                }
            }
            Action::ToggleLinkMode => {
                self.session.handle(CanvasEvent::ToggleLinkMode);
            }
            Action::DeleteTask => self.start_delete()?,
            Action::AdvanceState => {
                if let Some(id) = self.session.selection.clone() {
                    let outcome = self.session.apply(Command::AdvanceState { id });
                    self.apply_outcome(outcome);
                }
            }
            Action::NextTask => self.cycle_task(),
            Action::NextCategory => self.cycle_category(),
            Action::NextFlow => self.cycle_flow(),
            Action::ToggleCategoryVisibility => match self.session.filter.active_category.clone()
            {
                Some(id) => {
                    let outcome = self.session.apply(Command::ToggleCategoryVisibility { id });
                    self.apply_outcome(outcome);
                }
                None => {
                    self.status_message = Some(Rejection::NoActiveCategory.to_string());
                }
            },
            Action::ClearFilter => {
                self.session.apply(Command::SelectCategory(None));
            }
            Action::Cancel => {
                if self.session.interaction.link_mode() {
                    self.session.handle(CanvasEvent::ToggleLinkMode);
                } else if self.show_help {
                    self.show_help = false;
                } else {
                    self.session.apply(Command::Select(None));
                }
            }
            Action::SubmitText
            | Action::Backspace
            | Action::CursorLeft
            | Action::CursorRight
            | Action::InputChar(_)
            | Action::Noop => {}
        }
        Ok(false)
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(PendingConfirm::DeleteTask { id, .. }) = self.pending_confirm.take() {
                    let outcome =
                        prompt::delete_task(&mut self.session, &mut Answer::yes(), &id, true)?;
                    self.apply_outcome(outcome);
                }
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.pending_confirm = None;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_text_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::SubmitText => {
                if let Some(prompt) = self.pending_text.take() {
                    self.apply_text_prompt(prompt)?;
                }
            }
            Action::Cancel => self.pending_text = None,
            Action::Backspace => {
                if let Some(prompt) = &mut self.pending_text
                    && prompt.cursor > 0
                {
                    let from = byte_index_for_cursor(&prompt.buffer, prompt.cursor - 1);
                    let to = byte_index_for_cursor(&prompt.buffer, prompt.cursor);
                    prompt.buffer.replace_range(from..to, "");
                    prompt.cursor -= 1;
                }
            }
            Action::InputChar(c) => {
                if let Some(prompt) = &mut self.pending_text {
                    let at = byte_index_for_cursor(&prompt.buffer, prompt.cursor);
                    prompt.buffer.insert(at, c);
                    prompt.cursor += 1;
                }
            }
            Action::CursorLeft => {
                if let Some(prompt) = &mut self.pending_text {
                    prompt.cursor = prompt.cursor.saturating_sub(1);
                }
            }
            Action::CursorRight => {
                if let Some(prompt) = &mut self.pending_text {
                    let max = prompt.buffer.chars().count();
                    prompt.cursor = (prompt.cursor + 1).min(max);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn start_text_prompt(&mut self, kind: PendingTextKind) {
        let title = match kind {
            PendingTextKind::NewCategory => "New category name",
            PendingTextKind::NewFlow => "New flow title",
            PendingTextKind::NewTask => "New task name",
        };
        self.pending_text = Some(PendingText {
            title: title.to_string(),
            buffer: String::new(),
            cursor: 0,
            kind,
        });
    }

    fn apply_text_prompt(&mut self, prompt: PendingText) -> Result<()> {
        let mut answer = Answer::text(Some(prompt.buffer));
        let outcome = match prompt.kind {
            PendingTextKind::NewCategory => {
                prompt::create_category(&mut self.session, &mut answer, None)?
            }
            PendingTextKind::NewFlow => prompt::create_flow(&mut self.session, &mut answer)?,
            PendingTextKind::NewTask => prompt::create_task(&mut self.session, &mut answer)?,
        };
        if outcome == Outcome::Unchanged {
            self.status_message = Some("nothing created: name was empty".to_string());
        }
        self.apply_outcome(outcome);
        Ok(())
    }

    fn start_delete(&mut self) -> Result<()> {
        let Some(id) = self.session.selection.clone() else {
            self.status_message = Some("select a task to delete".to_string());
            return Ok(());
        };
        if self.config.confirm_delete {
            if let Some(task) = self.session.board.task(&id) {
                self.pending_confirm = Some(PendingConfirm::DeleteTask {
                    name: task.name.clone(),
                    id,
                });
            }
            return Ok(());
        }
        let outcome = prompt::delete_task(&mut self.session, &mut Answer::default(), &id, false)?;
        self.apply_outcome(outcome);
        Ok(())
    }

    fn cycle_task(&mut self) {
        let ids: Vec<String> = derive::visible_tasks(&self.session.board, &self.session.filter)
        .into_iter()
        .map(|t| t.id.clone())
        .collect();
        let next = match self.session.selection.as_deref() {
            Some(current) => ids
                .iter()
                .position(|id| id == current)
                .map(|idx| ids[(idx + 1) % ids.len()].clone())
                .or_else(|| ids.first().cloned()),
            None => ids.first().cloned(),
        };
        self.session.apply(Command::Select(next));
    }

    fn cycle_category(&mut self) {
        let ids: Vec<String> = self
            .session
            .board
            .categories
            .iter()
            .map(|c| c.id.clone())
            .collect();
        let next = next_in_cycle(&ids, self.session.filter.active_category.as_deref());
        self.session.apply(Command::SelectCategory(next));
    }

    fn cycle_flow(&mut self) {
        let board = &self.session.board;
        let ids: Vec<String> = match self.session.filter.active_category.as_deref() {
            Some(category) => board.flows_in(category).map(|f| f.id.clone()).collect(),
            None => board.flows.iter().map(|f| f.id.clone()).collect(),
        };
        let next = next_in_cycle(&ids, self.session.filter.active_flow.as_deref());
        match next {
            Some(flow) => {
                self.session.apply(Command::SelectFlow(Some(flow)));
            }
            // past the last flow: back to the whole category
            None => {
                self.session.apply(Command::SelectFlow(None));
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.overlay_open() {
            return;
        }
        let at = input::cell_to_screen(mouse.column, mouse.row, self.canvas_area);
        let inside = input::contains(self.canvas_area, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.status_message = None;
                let hit = self.session.hit_test(at);
                let double = self.clicks.press(hit.as_deref(), Instant::now());
                if double && !self.session.interaction.link_mode() {
                    self.press = None;
                    let outcome = self.session.handle(CanvasEvent::DoubleClick { hit });
                    self.apply_outcome(outcome);
                    return;
                }
                let outcome = self.session.handle(CanvasEvent::PointerDown {
                    at,
                    hit: hit.clone(),
                });
                self.press = Some(Press { hit, moved: false });
                self.apply_outcome(outcome);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(press) = &mut self.press {
                    press.moved = true;
                }
                if self.session.interaction.captures_pointer() {
                    let outcome = self.session.handle(CanvasEvent::PointerMove { at });
                    self.apply_outcome(outcome);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(press) = self.press.take() else {
                    return;
                };
                let outcome = self.session.handle(CanvasEvent::PointerUp);
                self.apply_outcome(outcome);
                if !press.moved {
                    let outcome = self.session.handle(CanvasEvent::Click { hit: press.hit });
                    self.apply_outcome(outcome);
                }
            }
            MouseEventKind::ScrollUp if inside => {
                let outcome = self.session.handle(CanvasEvent::Wheel { delta: -1.0 });
                self.apply_outcome(outcome);
            }
            MouseEventKind::ScrollDown if inside => {
                let outcome = self.session.handle(CanvasEvent::Wheel { delta: 1.0 });
                self.apply_outcome(outcome);
            }
            _ => {}
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Changed => self.persist(),
            Outcome::Rejected(rejection) => {
                tracing::info!(%rejection, "mutation rejected");
                self.status_message = Some(rejection.to_string());
            }
            Outcome::Unchanged | Outcome::Transient => {}
        }
    }

    /// Write the board and viewport. Failures are reported, never fatal.
    fn persist(&mut self) {
        if self.demo {
            return;
        }
        let Some(path) = &self.state_path else {
            return;
        };
        let snapshot = Snapshot {
            data: self.session.board.clone(),
            viewport: self.session.viewport,
        };
        if let Err(err) = snapshot::save(path, &snapshot) {
            tracing::warn!(path = %path.display(), error = format!("{err:#}"), "failed to save board");
            self.status_message = Some(format!("save failed: {err}"));
        }
    }

    fn persist_config(&mut self) {
        if self.demo {
            return;
        }
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(err) = fs::write(path, config::serialize(&self.config)) {
            tracing::warn!(path = %path.display(), error = %err, "failed to save settings");
            self.status_message = Some(format!("settings not saved: {err}"));
        }
    }
}

pub fn run(demo: bool, open_settings: bool) -> Result<()> {
    let mut app = AppState::load(demo, open_settings)?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| app.draw(f))?;
        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if matches!(key.kind, KeyEventKind::Release | KeyEventKind::Repeat) {
                    continue;
                }
                if app.handle_key(key)? {
                    break;
                }
            }
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }

    app.persist();
    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
    }
}

/// The id after `current`, or `None` once the list is exhausted so the
/// caller can fall back to "everything".
fn next_in_cycle(ids: &[String], current: Option<&str>) -> Option<String> {
    match current {
        None => ids.first().cloned(),
        Some(current) => ids
            .iter()
            .position(|id| id == current)
            .and_then(|idx| ids.get(idx + 1))
            .cloned(),
    }
}

fn draw_text_prompt(frame: &mut Frame, prompt: &PendingText) {
    let area = centered_rect(frame.area(), 60, 28);
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            prompt.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        line_with_cursor(
            &prompt.buffer,
            prompt.cursor,
            "name",
            Style::default().fg(Color::White),
            Style::default().fg(Color::DarkGray),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Enter creates, Esc cancels. An empty name creates nothing.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .title(" new ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_confirm_prompt(frame: &mut Frame, confirm: &PendingConfirm) {
    let area = centered_rect(frame.area(), 56, 22);
    frame.render_widget(Clear, area);
    let text = match confirm {
        PendingConfirm::DeleteTask { name, .. } => format!("Delete task \"{name}\"?"),
    };
    let paragraph = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("  "),
            Span::styled(text, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Tasks depending on it lose that dependency.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                "[y/Enter]",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" yes   ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                "[n/Esc]",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" no", Style::default().fg(Color::DarkGray)),
        ]),
    ])
    .block(
        Block::default()
            .title(" confirm ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(paragraph, area);
}

fn line_with_cursor(
    text: &str,
    cursor: usize,
    placeholder: &str,
    text_style: Style,
    placeholder_style: Style,
    caret_style: Style,
) -> Line<'static> {
    let mut spans = Vec::new();
    let char_len = text.chars().count();
    let clamped = cursor.min(char_len);

    if char_len == 0 {
        spans.push(Span::styled("▌", caret_style));
        if !placeholder.is_empty() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(placeholder.to_string(), placeholder_style));
        }
        return Line::from(spans);
    }

    let split = byte_index_for_cursor(text, clamped);
    let (left, right) = text.split_at(split);
    if !left.is_empty() {
        spans.push(Span::styled(left.to_string(), text_style));
    }
    spans.push(Span::styled("▌", caret_style));
    if !right.is_empty() {
        spans.push(Span::styled(right.to_string(), text_style));
    }
    Line::from(spans)
}

fn byte_index_for_cursor(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

fn demo_task(
    id: &str,
    name: &str,
    state: TaskState,
    (category_id, flow_id): (&str, &str),
    dependencies: &[&str],
    (x, y): (f64, f64),
) -> Task {
    Task {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        state,
        category_id: category_id.to_string(),
        flow_id: flow_id.to_string(),
        dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        x,
        y,
    }
}

fn demo_snapshot() -> Snapshot {
    let categories = vec![
        Category {
            id: "work".to_string(),
            name: "Work".to_string(),
            color: "#4f8cff".to_string(),
            visible: true,
        },
        Category {
            id: "home".to_string(),
            name: "Home".to_string(),
            color: "#f5a623".to_string(),
            visible: true,
        },
    ];
    let flows = vec![
        Flow {
            id: "launch".to_string(),
            title: "Launch".to_string(),
            description: String::new(),
            category_id: "work".to_string(),
        },
        Flow {
            id: "weekend".to_string(),
            title: "Weekend".to_string(),
            description: String::new(),
            category_id: "home".to_string(),
        },
    ];
    let launch = ("work", "launch");
    let weekend = ("home", "weekend");
    let tasks = vec![
        demo_task("spec", "Write spec", TaskState::Done, launch, &[], (40.0, 40.0)),
        demo_task(
            "proto",
            "Build prototype",
            TaskState::InProgress,
            launch,
            &["spec"],
            (220.0, 40.0),
        ),
        demo_task("docs", "Write docs", TaskState::NotStarted, launch, &["spec"], (220.0, 140.0)),
        demo_task("review", "Review", TaskState::NotStarted, launch, &["proto"], (400.0, 40.0)),
        demo_task(
            "ship",
            "Ship it",
            TaskState::NotStarted,
            launch,
            &["review", "docs"],
            (580.0, 90.0),
        ),
        demo_task("shop", "Groceries", TaskState::NotStarted, weekend, &[], (40.0, 260.0)),
        demo_task("cook", "Cook dinner", TaskState::NotStarted, weekend, &["shop"], (220.0, 260.0)),
    ];
    Snapshot {
        data: Board {
            categories,
            flows,
            tasks,
        },
        viewport: Viewport::default(),
    }
}
