use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{GameState, Tile, TileGrid};
use crate::metrics::GameMetrics;

pub struct Renderer {
    tile_width: usize,
}

impl Renderer {
    pub fn new(tile_width: usize) -> Self {
        Self {
            tile_width: tile_width.max(1),
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, grid: &TileGrid, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let board = self.board_area(chunks[1], grid);
        frame.render_widget(self.render_grid(grid), board);

        let status = state.status.lines();
        if !status.is_empty() {
            let popup = centered(board, status.len() as u16 + 2);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_status(&status), popup);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Center the board in `area`, clipped to what fits
    fn board_area(&self, area: Rect, grid: &TileGrid) -> Rect {
        let width = ((grid.width() * self.tile_width) as u16).min(area.width);
        let height = (grid.height() as u16).min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    fn cell(&self, tile: Tile) -> Span<'static> {
        let pad = |glyph: char| format!("{:<width$}", glyph, width = self.tile_width);

        match tile {
            Tile::Empty => Span::raw(" ".repeat(self.tile_width)),
            Tile::Wall => Span::styled(
                "█".repeat(self.tile_width),
                Style::default().fg(Color::Green),
            ),
            Tile::Apple => Span::styled(
                pad('●'),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            // Snake head - distinct glyph from the body
            Tile::SnakeHead => Span::styled(
                pad('■'),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Tile::SnakeBody => Span::styled(pad('□'), Style::default().fg(Color::Red)),
        }
    }

    fn render_grid(&self, grid: &TileGrid) -> Paragraph<'static> {
        let lines: Vec<Line> = (0..grid.height())
            .map(|y| Line::from(grid.row(y).iter().map(|t| self.cell(*t)).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
    }

    fn render_status(&self, status: &[String]) -> Paragraph<'static> {
        let text: Vec<Line> = status
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let style = if i == 0 {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(Span::styled(line.clone(), style))
            })
            .collect();

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Delay: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}ms", state.move_delay_ms),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(2)
    }
}

/// A box at most 30 columns wide and `height` rows tall in the middle of `area`
fn centered(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let width = area.width.min(30);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
