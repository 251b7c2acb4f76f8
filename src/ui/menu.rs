use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::game::DeathReason;
use crate::scoreboard::ScoreEntry;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_scores: &[ScoreEntry]) {
    let popup = centered_popup(area, 80, 90);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let mut body = vec![
        Line::from("[Space] Start"),
        Line::from("[Arrows]/drag Steer"),
        Line::from("[D/G/C] Settings"),
        Line::from("[R] Restart  [Q] Quit"),
        Line::from(""),
    ];
    body.extend(high_score_lines(high_scores));
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 70, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[Space] Resume"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_scores: &[ScoreEntry],
    death_reason: Option<DeathReason>,
) {
    let popup = centered_popup(area, 80, 90);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("GAME OVER"),
        Line::from(format!("Score: {score}")),
        Line::from(death_reason_text(death_reason)),
        Line::from(""),
    ];
    lines.extend(high_score_lines(high_scores));
    lines.push(Line::from(""));
    lines.push(Line::from("[Space] Play again"));
    lines.push(Line::from("[Q] Quit"));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn high_score_lines(high_scores: &[ScoreEntry]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("High scores").style(Style::default().fg(Color::Yellow))];
    if high_scores.is_empty() {
        lines.push(Line::from("none yet"));
    }
    lines.extend(high_scores.iter().enumerate().map(|(index, entry)| {
        Line::from(format!("{}. {} {}", index + 1, entry.name, entry.score))
    }));
    lines
}

fn death_reason_text(reason: Option<DeathReason>) -> &'static str {
    match reason {
        Some(DeathReason::SelfCollision) => "Cause: bit yourself",
        Some(DeathReason::BoardFull) => "Cause: board full",
        None => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use crate::scoreboard::ScoreEntry;

    use super::high_score_lines;

    fn text(lines: &[ratatui::text::Line<'_>]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn high_score_lines_are_ranked_from_one() {
        let entries = [
            ScoreEntry {
                name: "Ada".to_owned(),
                score: 120,
            },
            ScoreEntry {
                name: "Bo".to_owned(),
                score: 90,
            },
        ];

        assert_eq!(
            text(&high_score_lines(&entries)),
            vec!["High scores", "1. Ada 120", "2. Bo 90"]
        );
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(text(&high_score_lines(&[])), vec!["High scores", "none yet"]);
    }
}
