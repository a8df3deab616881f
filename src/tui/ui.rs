//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app::{App, Focus};
use super::mode::GameMode;
use crate::games::tictactoe::{Mark, Position, Square, winning_line};

const CELL_WIDTH: u16 = 12;
const CELL_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;

/// Screen regions for one frame.
struct Regions {
    title: Rect,
    board: Rect,
    status: Rect,
    controls: Option<Rect>,
}

fn regions(area: Rect, mode: GameMode) -> Regions {
    let mut constraints = vec![
        Constraint::Length(3),            // Title
        Constraint::Min(BOARD_HEIGHT),    // Board
        Constraint::Length(4),            // Status
    ];
    if mode == GameMode::Peer {
        constraints.push(Constraint::Length(5)); // Peer controls
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    Regions {
        title: chunks[0],
        board: center_rect(chunks[1], BOARD_WIDTH, BOARD_HEIGHT),
        status: chunks[2],
        controls: chunks.get(3).copied(),
    }
}

/// Screen rectangles of the nine cells, by board index.
///
/// Drawing and mouse hit-testing both go through here so they agree.
pub fn board_cells(area: Rect, mode: GameMode) -> [Rect; 9] {
    let board = regions(area, mode).board;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
        ])
        .split(board);

    let mut cells = [Rect::default(); 9];
    for (r, row) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
            ])
            .split(row);
        for (c, col) in [cols[0], cols[2], cols[4]].into_iter().enumerate() {
            cells[r * 3 + c] = col;
        }
    }
    cells
}

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let regions = regions(area, app.mode());

    let title = Paragraph::new(format!("Tic Tac Toe - {}", app.mode().name()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, regions.title);

    draw_board(frame, app, area, regions.board);

    let headline_style = if app.winner().is_some() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let status = Paragraph::new(vec![
        Line::from(Span::styled(app.headline(), headline_style)),
        Line::from(app.notice()),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, regions.status);

    if let Some(controls) = regions.controls {
        draw_controls(frame, app, controls);
    }
}

fn draw_board(frame: &mut Frame, app: &App, area: Rect, board_area: Rect) {
    let board = app.game().board();
    let highlight = winning_line(board).filter(|_| app.winner().is_some());
    let cells = board_cells(area, app.mode());

    for (index, rect) in cells.iter().enumerate() {
        let pos = Position::from_index(index).unwrap_or(Position::Center);
        let (symbol, base_style) = match board.at(pos) {
            Square::Empty => (
                (index + 1).to_string(),
                Style::default().fg(Color::DarkGray),
            ),
            Square::Occupied(Mark::X) => (
                "X".to_string(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Square::Occupied(Mark::O) => (
                "O".to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        };

        let mut style = base_style;
        if highlight.is_some_and(|line| line.contains(&pos)) {
            style = style.bg(Color::Green).fg(Color::Black);
        } else if pos == app.cursor() && app.focus() == Focus::Board {
            style = style.bg(Color::White).fg(Color::Black);
        }

        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(format!(" {} ", symbol), style)),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, *rect);
    }

    for i in 1..3 {
        let y = board_area.y + i * (CELL_HEIGHT + 1) - 1;
        let sep = Paragraph::new("─".repeat(BOARD_WIDTH as usize))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(sep, Rect::new(board_area.x, y, board_area.width, 1).intersection(board_area));
    }
    for i in 1..3 {
        let x = board_area.x + i * (CELL_WIDTH + 1) - 1;
        for row in 0..3 {
            let y = board_area.y + row * (CELL_HEIGHT + 1);
            let sep = Paragraph::new(vec![Line::from("│"); CELL_HEIGHT as usize])
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, Rect::new(x, y, 1, CELL_HEIGHT).intersection(board_area));
        }
    }
}

fn draw_controls(frame: &mut Frame, app: &App, area: Rect) {
    let field_style = if app.focus() == Focus::PeerField {
        Style::default().fg(Color::Black).bg(Color::White)
    } else {
        Style::default().fg(Color::White)
    };
    let caret = if app.focus() == Focus::PeerField { "_" } else { "" };

    let lines = vec![
        Line::from(vec![
            Span::raw("Peer ID: "),
            Span::styled(format!("{}{}", app.peer_input(), caret), field_style),
        ]),
        Line::from(format!("Session: {}", app.session().describe())),
        Line::from(Span::styled(
            "c create room | j/Tab edit peer id | Enter join",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines).block(Block::default().title("Peer").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
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
