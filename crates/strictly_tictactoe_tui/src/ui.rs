//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position as ScreenPosition, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::rc::Rc;
use strictly_tictactoe::{Board, Player, Position, Square};

use crate::app::App;

/// Splits the screen into title, buttons, board, status and help rows.
fn screen_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Mode buttons
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area)
}

/// Where the squares and grid lines of the board land on screen.
struct BoardLayout {
    cells: Vec<(Position, Rect)>,
    row_gaps: Vec<Rect>,
    col_gaps: Vec<Rect>,
}

impl BoardLayout {
    fn new(area: Rect) -> Self {
        let board_area = center_rect(area, 40, 11);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(board_area);

        let mut layout = Self {
            cells: Vec::with_capacity(9),
            row_gaps: vec![rows[1], rows[3]],
            col_gaps: Vec::with_capacity(6),
        };

        for row in 0..3 {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(12),
                    Constraint::Length(1),
                    Constraint::Length(12),
                    Constraint::Length(1),
                    Constraint::Length(12),
                ])
                .split(rows[row * 2]);
            for col in 0..3 {
                if let Some(pos) = Position::at(row, col) {
                    layout.cells.push((pos, cols[col * 2]));
                }
            }
            layout.col_gaps.extend([cols[1], cols[3]]);
        }
        layout
    }
}

/// Square under a mouse click at (`column`, `row`), given the screen `area`.
pub fn cell_at(area: Rect, column: u16, row: u16) -> Option<Position> {
    BoardLayout::new(screen_chunks(area)[2])
        .cells
        .into_iter()
        .find(|(_, rect)| rect.contains(ScreenPosition::new(column, row)))
        .map(|(pos, _)| pos)
}

/// Renders the whole screen for `app`.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = screen_chunks(frame.area());

    let title = Paragraph::new("Strictly Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_buttons(frame, chunks[1], app);
    draw_board(frame, chunks[2], app.session().board(), app.cursor());

    let status = Paragraph::new(app.status_text())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new("1-9, arrows+Enter or click to play · q to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

/// Mode and reset "buttons", greyed out while disabled.
fn draw_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let button = |label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(label, style)
    };

    let line = Line::from(vec![
        button("[t] Two players", app.mode_keys_enabled()),
        Span::raw("   "),
        button("[a] Versus computer", app.mode_keys_enabled()),
        Span::raw("   "),
        button("[r] Reset", app.reset_enabled()),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Position) {
    let layout = BoardLayout::new(area);
    for (pos, rect) in &layout.cells {
        draw_cell(frame, *rect, board, cursor, *pos);
    }
    for gap in &layout.row_gaps {
        draw_separator(frame, *gap);
    }
    for gap in &layout.col_gaps {
        draw_separator_vertical(frame, *gap);
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, cursor: Position, pos: Position) {
    let (symbol, base_style) = match board.get(pos) {
        Square::Empty => (
            format!("{}", pos.to_index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Player::X) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if pos == cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {} ", symbol), style)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
