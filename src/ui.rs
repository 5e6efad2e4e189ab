//! Terminal UI rendering with ratatui

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::GameState;
use crate::settings::{KeyBindings, Settings};
use crate::shapes::rotations;
use crate::snapshot::Snapshot;
use crate::tetromino::PieceKind;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const EMPTY: &str = "  ";

/// Total width needed: board(22) + sidebar(26)
const GAME_WIDTH: u16 = 48;
/// Total height needed: board(20) + 2 for borders
const GAME_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, settings: &Settings) {
    let area = frame.area();
    let block_char = settings.visual.block_chars();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_WIDTH as u16 * 2 + 2),
            Constraint::Min(20),
        ])
        .split(game_area);

    render_board(frame, main_layout[0], snapshot, block_char);
    render_sidebar(frame, main_layout[1], snapshot, settings);

    // Overlays
    match snapshot.state {
        GameState::Paused => render_overlay(frame, area, "PAUSED", "Press any key"),
        GameState::GameOver => {
            let keys = &settings.keys;
            let hint = format!(
                "{} restart  {} quit",
                key_label(&keys.restart),
                key_label(&keys.quit)
            );
            render_overlay(frame, area, "GAME OVER", &hint);
        }
        GameState::Playing => {}
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the game board with the active piece on top of locked cells
fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, block_char: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let show_active = snapshot.state != GameState::GameOver;

    let lines: Vec<Line> = (0..BOARD_HEIGHT)
        .map(|y| {
            let spans: Vec<Span> = (0..BOARD_WIDTH)
                .map(|x| {
                    let active = show_active
                        .then(|| snapshot.active_at(x as i32, y as i32))
                        .flatten();
                    match active.or_else(|| snapshot.locked_at(x, y)) {
                        Some(kind) => Span::styled(block_char, Style::default().fg(kind.color())),
                        None => Span::raw(EMPTY),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render title, stats, next piece and controls
fn render_sidebar(frame: &mut Frame, area: Rect, snapshot: &Snapshot, settings: &Settings) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Stats
            Constraint::Length(4), // Next
            Constraint::Min(6),    // Controls
        ])
        .split(area);

    render_stats(frame, layout[0], snapshot);
    render_next(frame, layout[1], snapshot.next, settings.visual.block_chars());
    render_controls(frame, layout[2], &settings.keys);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .title(" QUADRIS ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let stat = |label: &'static str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!("{:<7}", label), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(color).bold()),
        ])
    };

    let lines = vec![
        Line::raw(""),
        stat("SCORE", snapshot.score.to_string(), Color::Yellow),
        Line::raw(""),
        stat("LEVEL", snapshot.level.to_string(), Color::Cyan),
        Line::raw(""),
        stat("LINES", snapshot.lines.to_string(), Color::Green),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the next piece in its spawn orientation
fn render_next(frame: &mut Frame, area: Rect, kind: PieceKind, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 1 || inner.width < 8 {
        return;
    }

    let shape = &rotations(kind)[0];
    let min_y = shape.iter().map(|&(_, y)| y).min().unwrap_or(0);

    // Every spawn shape spans at most 2 rows
    let lines: Vec<Line> = (0..2)
        .map(|row| {
            let spans: Vec<Span> = (0..4)
                .map(|x| {
                    if shape.contains(&(x, min_y + row)) {
                        Span::styled(block_char, Style::default().fg(kind.color()))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Display name for a list of bound keys, e.g. "Up/x"
fn key_label(keys: &[String]) -> String {
    if keys.is_empty() {
        "-".to_string()
    } else {
        keys.join("/")
    }
}

/// Render the controls legend from the configured bindings
fn render_controls(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
    let hint = |text: String| Line::styled(text, Style::default().fg(Color::DarkGray));
    let lines = vec![
        Line::raw(""),
        Line::styled(" Controls", Style::default().fg(Color::Gray)),
        hint(format!(
            " {}/{} move",
            key_label(&keys.move_left),
            key_label(&keys.move_right)
        )),
        hint(format!(" {} rotate", key_label(&keys.rotate))),
        hint(format!(
            " {} soft, {} hard drop",
            key_label(&keys.soft_drop),
            key_label(&keys.hard_drop)
        )),
        hint(format!(
            " {} pause, {} restart",
            key_label(&keys.pause),
            key_label(&keys.restart)
        )),
        hint(format!(" {} quit", key_label(&keys.quit))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
