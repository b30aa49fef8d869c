use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};

use crate::store::config::Config;
use crate::tui::render::centered_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEvent {
    None,
    Changed,
    Close,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsPanelState {
    pub selected_row: usize,
}

const SETTINGS_ROW_COUNT: usize = 3;

pub fn handle_key(
    key: KeyEvent,
    state: &mut SettingsPanelState,
    config: &mut Config,
) -> SettingsEvent {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => SettingsEvent::Close,
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected_row = state.selected_row.saturating_sub(1);
            SettingsEvent::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.selected_row = (state.selected_row + 1).min(SETTINGS_ROW_COUNT - 1);
            SettingsEvent::None
        }
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Enter
        | KeyCode::Char(' ') => adjust(config, state.selected_row),
        _ => SettingsEvent::None,
    }
}

pub fn draw(frame: &mut Frame, state: &SettingsPanelState, config: &Config) {
    let area = centered_rect(frame.area(), 56, 44);
    frame.render_widget(Clear, area);

    let title = Line::from(vec![
        Span::styled(
            "Setup",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("[Esc] close", Style::default().fg(Color::Gray)),
    ]);

    let selected_row = state.selected_row.min(SETTINGS_ROW_COUNT - 1);
    let mut lines = vec![
        settings_row(selected_row == 0, "confirm delete", config.confirm_delete),
        settings_row(selected_row == 1, "show dependency arrows", config.show_edges),
        settings_row(selected_row == 2, "snap to grid", config.snap_to_grid),
        Line::from(""),
        Line::from(Span::styled(
            "About this option",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    for text in selected_row_description(selected_row) {
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "Use arrows/hjkl or Enter/Space to toggle.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Changes write to config immediately.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::new(1, 1, 1, 0)),
    );
    frame.render_widget(panel, area);
}

fn settings_row(selected: bool, key: &str, enabled: bool) -> Line<'static> {
    let indicator = if selected { ">" } else { " " };
    let base_style = if selected {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let value_text = if enabled { "[ON]" } else { "[OFF]" };
    let mut value_style = if enabled {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::LightRed)
    };
    if selected {
        value_style = value_style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
    } else {
        value_style = value_style.add_modifier(Modifier::BOLD);
    }

    Line::from(vec![
        Span::styled(format!("{indicator} {key:<24}"), base_style),
        Span::styled(value_text, value_style),
    ])
}

fn selected_row_description(selected_row: usize) -> [&'static str; 2] {
    match selected_row {
        0 => [
            "Ask for confirmation before a task is deleted",
            "with [x] or [Delete].",
        ],
        1 => [
            "Draw an arrow from every dependency to the task",
            "waiting on it.",
        ],
        2 => [
            "When a dragged task is dropped, round its position",
            "to the nearest grid line.",
        ],
        _ => ["", ""],
    }
}

fn adjust(config: &mut Config, selected_row: usize) -> SettingsEvent {
    let flag = match selected_row {
        0 => &mut config.confirm_delete,
        1 => &mut config.show_edges,
        2 => &mut config.snap_to_grid,
        _ => return SettingsEvent::None,
    };
    *flag = !*flag;
    SettingsEvent::Changed
}
