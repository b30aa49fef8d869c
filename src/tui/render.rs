use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};

use crate::canvas::scene::{NodeBox, Scene};
use crate::graph::model::TaskState;
use crate::tui::input::{CELL_HEIGHT, CELL_WIDTH};

const SIDEBAR_WIDTH: u16 = 30;

#[derive(Debug, Clone)]
pub struct SidebarFlow<'a> {
    pub title: &'a str,
    pub task_count: usize,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct SidebarCategory<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub visible: bool,
    pub active: bool,
    pub flows: Vec<SidebarFlow<'a>>,
}

#[derive(Debug)]
pub struct BoardRenderData<'a> {
    pub scene: &'a Scene,
    pub categories: &'a [SidebarCategory<'a>],
    pub zoom: f64,
    pub selected_name: Option<&'a str>,
    pub mode_label: &'a str,
    pub link_mode: bool,
    pub hints: &'a str,
    pub message: Option<&'a str>,
    pub show_help: bool,
    pub show_edges: bool,
}

/// Where each pane lands for a given terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardAreas {
    pub outer: Rect,
    pub sidebar: Rect,
    pub canvas_frame: Rect,
    /// Drawable inside of the canvas pane; pointer coordinates are relative to it.
    pub canvas: Rect,
    pub status: Rect,
}

pub fn areas(frame_area: Rect) -> BoardAreas {
    let outer = frame_area.inner(Margin {
        horizontal: 1,
        vertical: 0,
    });
    let inner = outer_block(None).inner(outer);
    let [panes, status] =
        Layout::vertical([Constraint::Min(6), Constraint::Length(4)]).areas(inner);
    let [sidebar, canvas_frame] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
            .areas(panes);
    let canvas = canvas_block(false).inner(canvas_frame);
    BoardAreas {
        outer,
        sidebar,
        canvas_frame,
        canvas,
        status,
    }
}

fn outer_block(badge: Option<(&str, Color)>) -> Block<'static> {
    let mut title_spans = vec![
        Span::styled("flowboard", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled("[?] help", Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled("[q] quit", Style::default().fg(Color::DarkGray)),
    ];
    if let Some((label, color)) = badge {
        title_spans.push(Span::raw("  "));
        title_spans.push(Span::styled(
            format!("[{}]", label),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(badge.map(|(_, c)| c).unwrap_or(Color::DarkGray)))
        .title(Line::from(title_spans))
}

fn canvas_block(link_mode: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if link_mode {
            Color::Magenta
        } else {
            Color::DarkGray
        }))
        .title(Span::styled(
            "CANVAS",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        ))
}

pub fn draw(frame: &mut Frame, data: &BoardRenderData<'_>) {
    let areas = areas(frame.area());
    let badge = data.link_mode.then_some(("LINK", Color::Magenta));
    frame.render_widget(outer_block(badge), areas.outer);

    draw_sidebar(frame, areas.sidebar, data.categories);

    frame.render_widget(canvas_block(data.link_mode), areas.canvas_frame);
    if data.show_edges {
        draw_arrows(frame, areas.canvas, data.scene);
    }
    for node in &data.scene.nodes {
        draw_node(frame, areas.canvas, node);
    }
    if data.scene.nodes.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No tasks to display. [n] adds one to the active flow.",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(empty, areas.canvas);
    }

    draw_status(frame, areas.status, data);

    if data.show_help {
        render_help_overlay(frame);
    }
}

fn draw_sidebar(frame: &mut Frame, area: Rect, categories: &[SidebarCategory<'_>]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            "CATEGORIES",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = usize::from(inner.width);
    let mut lines = Vec::new();
    if categories.is_empty() {
        lines.push(Line::from(Span::styled(
            "No categories. [c] adds one.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for category in categories {
        let name_style = if category.active {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else if category.visible {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![
            Span::raw(if category.active { "> " } else { "  " }),
            Span::styled("■ ", Style::default().fg(parse_hex(category.color))),
            Span::styled(truncate_text(category.name, width.saturating_sub(14)), name_style),
        ];
        if !category.visible {
            spans.push(Span::styled(
                " (hidden)",
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
        for flow in &category.flows {
            let style = if flow.active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(vec![
                Span::raw(if flow.active { "   › " } else { "     " }),
                Span::styled(truncate_text(flow.title, width.saturating_sub(11)), style),
                Span::styled(
                    format!(" ({})", flow.task_count),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_arrows(frame: &mut Frame, area: Rect, scene: &Scene) {
    let width_px = f64::from(area.width) * CELL_WIDTH;
    let height_px = f64::from(area.height) * CELL_HEIGHT;
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width_px])
        .y_bounds([0.0, height_px])
        .paint(|ctx| {
            // canvas y grows upward, screen y grows downward
            for arrow in &scene.arrows {
                ctx.draw(&CanvasLine::new(
                    arrow.start.x,
                    height_px - arrow.start.y,
                    arrow.end.x,
                    height_px - arrow.end.y,
                    Color::DarkGray,
                ));
            }
            ctx.layer();
            for arrow in &scene.arrows {
                let (x, y) = (arrow.end.x - CELL_WIDTH / 2.0, height_px - arrow.end.y);
                if (0.0..width_px).contains(&x) && (0.0..height_px).contains(&y) {
                    ctx.print(x, y, Span::styled("▸", Style::default().fg(Color::Gray)));
                }
            }
        });
    frame.render_widget(canvas, area);
}

/// Terminal cells covered by `node`, clipped to `area`.
pub fn node_rect(node: &NodeBox, area: Rect) -> Option<Rect> {
    let left = f64::from(area.x) + (node.origin.x / CELL_WIDTH).floor();
    let top = f64::from(area.y) + (node.origin.y / CELL_HEIGHT).floor();
    let width = (node.width / CELL_WIDTH).round().max(3.0);
    let height = (node.height / CELL_HEIGHT).round().max(3.0);

    let right = (left + width).min(f64::from(area.right()));
    let bottom = (top + height).min(f64::from(area.bottom()));
    let left = left.max(f64::from(area.x));
    let top = top.max(f64::from(area.y));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

fn draw_node(frame: &mut Frame, area: Rect, node: &NodeBox) {
    let Some(rect) = node_rect(node, area) else {
        return;
    };
    let (border_type, border_color) = if node.link_source {
        (BorderType::Thick, Color::Magenta)
    } else if node.selected {
        (BorderType::Double, Color::White)
    } else {
        (BorderType::Rounded, parse_hex(&node.color))
    };
    let title_style = if node.selected || node.link_source {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let inner_width = usize::from(rect.width.saturating_sub(2));

    let (symbol, state_color) = match node.state {
        TaskState::NotStarted => ("○", Color::Gray),
        TaskState::InProgress => ("◐", Color::Yellow),
        TaskState::Done => ("●", Color::Green),
    };
    let mut spans = vec![Span::styled(
        format!("{} {}", symbol, node.state.label()),
        Style::default().fg(state_color),
    )];
    if node.blocked {
        spans.push(Span::styled(
            " blocked",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            truncate_text(&node.name, inner_width),
            title_style,
        ));
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), rect);
}

fn draw_status(frame: &mut Frame, area: Rect, data: &BoardRenderData<'_>) {
    let top_status = format!(
        "{}   selected: {}   zoom: {:.0}%",
        data.mode_label,
        data.selected_name.unwrap_or("—"),
        data.zoom * 100.0
    );
    let mut hint_line = data.hints.to_string();
    if let Some(msg) = data.message {
        hint_line.push_str("   ");
        hint_line.push_str(msg);
    }
    let accent = if data.link_mode {
        Color::Magenta
    } else {
        Color::Cyan
    };

    let status = Paragraph::new(vec![
        Line::from(Span::styled(
            top_status,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            hint_line,
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if data.link_mode {
                Color::Magenta
            } else {
                Color::DarkGray
            }))
            .padding(Padding::new(1, 1, 0, 0)),
    );
    frame.render_widget(status, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(frame.area(), 76, 70);
    frame.render_widget(Clear, area);
    let help = Paragraph::new(vec![
        Line::from("MOUSE"),
        Line::from("  drag a task to move it, drag empty canvas to pan, wheel to zoom"),
        Line::from("  double-click a task to advance its state"),
        Line::from(""),
        Line::from("LINKING"),
        Line::from("  [l] toggles link mode; click the prerequisite, then the task"),
        Line::from("  that waits for it. Click the same task twice to cancel."),
        Line::from(""),
        Line::from("KEYS"),
        Line::from("  [c] category  [f] flow  [n] task  [x/Del] delete task"),
        Line::from("  [g/Shift-Tab] next category  [w] next flow  [a] show all"),
        Line::from("  [v] hide/show active category  [Tab] next task"),
        Line::from("  [Enter/Space] advance state  [+/-] zoom  [arrows/hjk] pan"),
        Line::from("  [s] setup"),
        Line::from(""),
        Line::from("Esc backs out one step."),
    ])
    .block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, area);
}

pub fn parse_hex(color: &str) -> Color {
    let hex = color.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Color::Gray;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}

fn truncate_text(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let count = text.chars().count();
    if count <= max_width {
        return text.to_string();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let mut out = text.chars().take(max_width - 1).collect::<String>();
    out.push('…');
    out
}

pub fn centered_rect(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .flex(Flex::Center)
    .split(area);
    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .flex(Flex::Center)
    .split(vertical[1])[1]
}
