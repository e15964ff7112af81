//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictac::{Mode, Player, Position, Square, View};

const X_COLOR: Color = Color::Rgb(0xe7, 0x4c, 0x3c);
const O_COLOR: Color = Color::Rgb(0x34, 0x98, 0xdb);

const HELP: &str =
    "arrows/1-9 move · enter play · m mode · s first player · h your letter · r restart · q quit";

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, view: &View, cursor: Position) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Settings
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let settings = Paragraph::new(settings_line(view))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(settings, chunks[1]);

    draw_board(frame, chunks[2], view, cursor);

    let status = if view.thinking {
        format!("{} (AI is thinking...)", view.message)
    } else {
        view.message.clone()
    };
    let status_text = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[3]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

/// One-line summary of the current settings.
pub fn settings_line(view: &View) -> String {
    let settings = view.settings;
    match settings.mode {
        Mode::PvP => format!("{} · {} starts", settings.mode.label(), settings.starting_player),
        Mode::PvAi => format!(
            "{} · you are {} · {} starts",
            settings.mode.label(),
            settings.human_player,
            settings.starting_player
        ),
    }
}

fn draw_board(frame: &mut Frame, area: Rect, view: &View, cursor: Position) {
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

    for row in 0..3 {
        draw_row(frame, rows[row * 2], view, cursor, row);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, view: &View, cursor: Position, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..3 {
        draw_cell(frame, cols[col * 2], view, cursor, row * 3 + col);
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, view: &View, cursor: Position, index: usize) {
    let (symbol, base_style) = match view.cells[index] {
        Square::Empty => (
            format!(" {} ", index + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(player) => (
            format!(" {} ", player.symbol()),
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD),
        ),
    };

    let on_winning_line = view
        .winning_line
        .is_some_and(|line| line.contains(&index));
    let style = if on_winning_line {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if index == cursor.to_index() && view.accepts_input {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    // Vertically center the symbol in the 3-line cell.
    let paragraph = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(symbol, style)),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::X => X_COLOR,
        Player::O => O_COLOR,
    }
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("────────────┼────────────┼────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
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

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;
    use tictac::{Game, GameSettings, RngSource};

    fn view_after(moves: &[usize]) -> View {
        let mut game = Game::new(GameSettings::default(), Duration::ZERO, RngSource::seeded(3));
        for &index in moves {
            game.on_cell_activated(index);
        }
        game.view()
    }

    #[test]
    fn test_settings_line() {
        let mut view = view_after(&[]);
        assert_eq!(settings_line(&view), "Player vs Player · X starts");
        view.settings.mode = Mode::PvAi;
        view.settings.human_player = Player::O;
        assert_eq!(settings_line(&view), "Player vs AI · you are O · X starts");
    }

    #[test]
    fn test_draw_renders_marks_and_status() {
        let view = view_after(&[0, 3, 1, 4, 2]);
        let backend = TestBackend::new(60, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw(frame, &view, Position::Center))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Player X Wins!"));
        assert!(text.contains('X'));
        assert!(text.contains('O'));
    }
}
