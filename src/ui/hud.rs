use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::SnakeColor;
use crate::scoreboard::ScoreEntry;
use crate::snapshot::GameSnapshot;

/// Values shown by the HUD that are not part of the game state.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    /// High-score table, highest first.
    pub high_scores: &'a [ScoreEntry],
    pub snake_color: SnakeColor,
}

impl HudInfo<'_> {
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.high_scores.first().map_or(0, |entry| entry.score)
    }
}

/// Renders the status line and returns the play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &GameSnapshot,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(status_line(snapshot, info))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        status_area,
    );

    play_area
}

fn status_line(snapshot: &GameSnapshot, info: &HudInfo<'_>) -> Line<'static> {
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let accent = Style::default().fg(info.snake_color.terminal_color());

    Line::from(vec![
        Span::raw("Score "),
        Span::styled(snapshot.score.to_string(), value),
        Span::raw("  Length "),
        Span::styled(snapshot.snake.len().to_string(), accent),
        Span::raw("  Tick "),
        Span::styled(format!("{}ms", snapshot.tick_interval_ms), value),
        Span::raw("  Best "),
        Span::styled(info.best_score().max(snapshot.score).to_string(), value),
        Span::raw(format!("  {} {}x{}", snapshot.difficulty, snapshot.cols, snapshot.rows)),
    ])
}
