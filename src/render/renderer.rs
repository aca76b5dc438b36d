use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Direction, GameState, Phase, SegmentLinks};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match state.phase {
            Phase::GameOver | Phase::Won => {
                let banner = self.render_end_screen(state, metrics);
                frame.render_widget(banner, game_area);
            }
            Phase::Paused | Phase::Running => {
                let grid = self.render_grid(state);
                frame.render_widget(grid, game_area);
            }
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let grid = state.grid;
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(grid.height);

        for y in 0..grid.height {
            let mut spans = Vec::with_capacity(grid.width);

            for x in 0..grid.width {
                let cell = grid.index_of(x, y);

                let span = if cell == head {
                    Span::styled(
                        "◉ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if let Some(links) = state.segment_links(cell) {
                    Span::styled(segment_glyph(links), Style::default().fg(Color::Green))
                } else if cell == state.food {
                    Span::styled(
                        "✱ ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        let title = if state.is_paused() {
            " Snake (paused) "
        } else {
            " Snake "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];

        if state.is_paused() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_end_screen(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let (headline, color) = if state.is_won() {
            ("YOU FILLED THE GRID", Color::Green)
        } else {
            ("GAME OVER", Color::Red)
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Magenta)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-column glyph joining a body cell to its neighbours
pub fn segment_glyph(links: SegmentLinks) -> &'static str {
    use Direction::*;

    let has = |d: Direction| links.prev == Some(d) || links.next == Some(d);

    match (has(Up), has(Down), has(Left), has(Right)) {
        (true, true, _, _) => "┃ ",
        (_, _, true, true) => "━━",
        (false, true, false, true) => "┏━",
        (false, true, true, false) => "┓ ",
        (true, false, false, true) => "┗━",
        (true, false, true, false) => "┛ ",
        // tail end: only one link
        (_, _, _, true) => "╺━",
        (_, _, true, _) => "╸ ",
        _ => "┃ ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn links(prev: Option<Direction>, next: Option<Direction>) -> SegmentLinks {
        SegmentLinks { prev, next }
    }

    #[test]
    fn test_segment_glyphs() {
        use Direction::*;
        assert_eq!(segment_glyph(links(Some(Left), Some(Right))), "━━");
        assert_eq!(segment_glyph(links(Some(Up), Some(Down))), "┃ ");
        assert_eq!(segment_glyph(links(Some(Down), Some(Right))), "┏━");
        assert_eq!(segment_glyph(links(Some(Left), Some(Up))), "┛ ");
        assert_eq!(segment_glyph(links(None, Some(Right))), "╺━");
        assert_eq!(segment_glyph(links(None, Some(Down))), "┃ ");
    }

    fn draw(state: &GameState) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| Renderer::new().render(frame, state, &metrics))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_paused_grid() {
        let mut engine = GameEngine::new(GameConfig::small().with_seed(3)).unwrap();
        let state = engine.new_game().unwrap();

        let screen = draw(&state);
        assert!(screen.contains("PAUSED"));
        assert!(screen.contains("Score"));
        assert!(screen.contains('◉'));
    }

    #[test]
    fn test_render_game_over() {
        let mut engine = GameEngine::new(GameConfig::small().with_seed(3)).unwrap();
        let mut state = engine.new_game().unwrap();
        state.phase = Phase::GameOver;

        let screen = draw(&state);
        assert!(screen.contains("GAME OVER"));
    }
}
