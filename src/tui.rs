use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;
use tracing::{debug, warn};

use crate::config::{Config, LOSS_PAUSE, WIN_PAUSE};
use crate::cover::CoverState;
use crate::engine::{tile_char, Round, RoundStatus};
use crate::field::Tile;
use crate::game::Game;

pub fn run_tui(config: Config) -> io::Result<()> {
    let mut game = Game::new(config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    // Checked before touching the terminal so an oversized board never leaves it in raw mode.
    let extent = grid_extent(config.rows, config.cols)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "board does not fit in a terminal"))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let _guard = TermGuard;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // (row, col)
    let mut cursor = (0usize, 0usize);
    let tick_rate = Duration::from_millis(250);
    let mut finished_at: Option<Instant> = None;

    let mut last_inner_board = Rect::default();
    let res = loop {
        let pause_left = finished_at.map(|t| pause_for(game.round().status()).saturating_sub(t.elapsed()));
        terminal.draw(|f| { last_inner_board = ui(f, game.round(), extent, cursor, pause_left); })?;

        if event::poll(tick_rate)? {
            let round = game.round_mut();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                        KeyCode::Char('h') | KeyCode::Left => {
                            if cursor.1 > 0 { cursor.1 -= 1; }
                        }
                        KeyCode::Char('l') | KeyCode::Right => {
                            if cursor.1 + 1 < round.cols() { cursor.1 += 1; }
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            if cursor.0 > 0 { cursor.0 -= 1; }
                        }
                        KeyCode::Char('j') | KeyCode::Down => {
                            if cursor.0 + 1 < round.rows() { cursor.0 += 1; }
                        }
                        KeyCode::Char('f') => { let _ = round.secondary_click(cursor.0, cursor.1); }
                        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => {
                            if let Ok(outcome) = round.primary_click(cursor.0, cursor.1) {
                                debug!(?outcome, row = cursor.0, col = cursor.1, "key reveal");
                            }
                        }
                        KeyCode::Char('n') => {
                            new_round(&mut game);
                            finished_at = None;
                        }
                        _ => {}
                    }
                }
                Event::Mouse(m) => {
                    if let MouseEventKind::Down(btn) = m.kind {
                        // Clicks outside the grid never reach the round.
                        if let Some((row, col)) = pos_to_cell(m.column, m.row, last_inner_board, extent) {
                            let (row, col) = (row as usize, col as usize);
                            cursor = (row, col);
                            match btn {
                                MouseButton::Left => {
                                    if let Ok(outcome) = round.primary_click(row, col) {
                                        debug!(?outcome, row, col, "mouse reveal");
                                    }
                                }
                                MouseButton::Right => { let _ = round.secondary_click(row, col); }
                                MouseButton::Middle => {}
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        match finished_at {
            None if game.round().status().is_over() => finished_at = Some(Instant::now()),
            Some(t) if t.elapsed() >= pause_for(game.round().status()) => {
                new_round(&mut game);
                finished_at = None;
            }
            _ => {}
        }
    };

    terminal.show_cursor()?;
    res
}

fn new_round(game: &mut Game) {
    if let Err(e) = game.reset() {
        warn!(error = %e, "could not start a new round");
    }
}

fn pause_for(status: RoundStatus) -> Duration {
    match status {
        RoundStatus::Won => WIN_PAUSE,
        _ => LOSS_PAUSE,
    }
}

fn ui(f: &mut ratatui::Frame, round: &Round, extent: (u16, u16), cursor: (usize, usize), pause_left: Option<Duration>) -> Rect {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.size());

    let restart = pause_left.map(|d| format!(" New round in {}s.", d.as_secs() + 1)).unwrap_or_default();
    let (status, color) = match round.status() {
        RoundStatus::Lost => (format!("You lose! D:{}", restart), Color::Red),
        RoundStatus::Won => (format!("You WIN! :){}", restart), Color::Green),
        RoundStatus::InProgress => (
            "Mouse: left=reveal/chord, right=flag • Arrows/HJKL move • Enter/Space reveal • f flag • n new • q quit".to_string(),
            Color::Cyan,
        ),
    };
    let header = Paragraph::new(status)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Minesweeper"));
    f.render_widget(header, root[0]);

    let area = centered_grid_area(root[1], extent);
    let inner = inner_area(area);
    draw_board(f, round, area, cursor);

    let footer = Paragraph::new(format!(
        "Size: {}x{}  Mines: {}  Left: {}  Moves: {}",
        round.rows(), round.cols(), round.mines(), round.mines_left(), round.moves()
    ))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, root[2]);
    inner
}

/// Board size as terminal `(rows, cols)`, or `None` when the bordered grid
/// would not fit in terminal coordinates.
pub fn grid_extent(rows: usize, cols: usize) -> Option<(u16, u16)> {
    let rows = u16::try_from(rows).ok()?;
    let cols = u16::try_from(cols).ok()?;
    cols.checked_mul(CELL_W)?.checked_add(2)?;
    rows.checked_add(2)?;
    Some((rows, cols))
}

fn centered_grid_area(parent: Rect, (rows, cols): (u16, u16)) -> Rect {
    // Each cell is one glyph and a space, plus the block border.
    let grid_w = cols.saturating_mul(CELL_W).saturating_add(2);
    let grid_h = rows.saturating_add(2);
    let x = parent.x.saturating_add((parent.width.saturating_sub(grid_w)) / 2);
    let y = parent.y.saturating_add((parent.height.saturating_sub(grid_h)) / 2);
    Rect { x, y, width: grid_w.min(parent.width), height: grid_h.min(parent.height) }
}

const CELL_W: u16 = 2;

fn draw_board(f: &mut ratatui::Frame, round: &Round, area: Rect, cursor: (usize, usize)) {
    let status = round.status();
    let mut lines: Vec<Line> = Vec::with_capacity(round.rows());
    for r in 0..round.rows() {
        let mut spans: Vec<Span> = Vec::with_capacity(round.cols());
        for c in 0..round.cols() {
            let Some(tile) = round.field().tile(r, c) else { continue };
            let state = round.cover().get((r, c));
            let (mut ch, mut style) = cell_glyph(status, tile, state);

            if cursor == (r, c) && !status.is_over() {
                style = style.add_modifier(Modifier::REVERSED);
                if ch == ' ' { ch = '·'; }
            }
            spans.push(Span::styled(format!("{} ", ch), style));
        }
        lines.push(Line::from(spans));
    }

    let board_block = Block::default().borders(Borders::ALL).title("Board");
    let para = Paragraph::new(lines).block(board_block);
    f.render_widget(para, area);
}

fn cell_glyph(status: RoundStatus, tile: Tile, state: CoverState) -> (char, Style) {
    match (status, tile, state) {
        (RoundStatus::Won, Tile::Mine, _) => ('☺', Style::default().fg(Color::Green)),
        (RoundStatus::Lost, Tile::Mine, CoverState::Uncovered) => ('*', Style::default().fg(Color::White).bg(Color::Red)),
        (RoundStatus::Lost, Tile::Mine, _) => ('*', Style::default().fg(Color::Red)),
        (_, _, CoverState::Flagged) => ('F', Style::default().fg(Color::Yellow)),
        (_, _, CoverState::Covered) => ('·', Style::default().fg(Color::DarkGray)),
        (_, Tile::Count(n), CoverState::Uncovered) => (tile_char(tile), number_style(n)),
        (_, Tile::Mine, CoverState::Uncovered) => ('*', Style::default().fg(Color::Red)),
    }
}

fn number_style(n: u8) -> Style {
    match n {
        0 => Style::default().fg(Color::Gray),
        1 => Style::default().fg(Color::Blue),
        2 => Style::default().fg(Color::Cyan),
        3 => Style::default().fg(Color::Green),
        4 => Style::default().fg(Color::LightYellow),
        5 => Style::default().fg(Color::Yellow),
        6 => Style::default().fg(Color::Magenta),
        7 => Style::default().fg(Color::LightRed),
        _ => Style::default().fg(Color::LightMagenta),
    }
}

fn inner_area(area: Rect) -> Rect {
    // Same as Block::inner() for Borders::ALL.
    Rect { x: area.x.saturating_add(1), y: area.y.saturating_add(1), width: area.width.saturating_sub(2), height: area.height.saturating_sub(2) }
}

/// Maps a terminal position to `(row, col)` inside the board, if it lands on one.
fn pos_to_cell(mx: u16, my: u16, inner: Rect, (rows, cols): (u16, u16)) -> Option<(u16, u16)> {
    if mx < inner.x || my < inner.y { return None; }
    let col = (mx - inner.x) / CELL_W;
    let row = my - inner.y;
    if row < rows && col < cols { Some((row, col)) } else { None }
}

struct TermGuard;
impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}
