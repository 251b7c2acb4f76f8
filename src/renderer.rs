use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::game::GameStatus;
use crate::snake::Position;
use crate::snapshot::GameSnapshot;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Terminal columns per grid cell; two keeps cells roughly square.
pub const CELL_COLUMNS: u16 = 2;

const GLYPH_SNAKE_HEAD: &str = "██";
const GLYPH_SNAKE_BODY: &str = "▓▓";
const GLYPH_FOOD: &str = "()";

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &GameSnapshot, info: &HudInfo<'_>) {
    let play_area = render_hud(frame, frame.area(), snapshot, info);

    let board = board_area(play_area, snapshot);
    let block = Block::bordered().border_style(Style::new().fg(Color::DarkGray));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_food(frame, inner, snapshot);
    render_snake(frame, inner, snapshot, info);

    match snapshot.status {
        GameStatus::Idle => render_start_menu(frame, board, info.high_scores),
        GameStatus::Paused => render_pause_menu(frame, board),
        GameStatus::Over => render_game_over_menu(
            frame,
            board,
            snapshot.score,
            info.high_scores,
            snapshot.death_reason,
        ),
        GameStatus::Running => {}
    }
}

/// Bordered board rectangle, centered and clipped to `area`.
fn board_area(area: Rect, snapshot: &GameSnapshot) -> Rect {
    let width = snapshot
        .cols
        .saturating_mul(CELL_COLUMNS)
        .saturating_add(2)
        .min(area.width);
    let height = snapshot.rows.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot) {
    let Some((x, y)) = cell_to_terminal(inner, snapshot.food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(Color::Red));
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    snapshot: &GameSnapshot,
    info: &HudInfo<'_>,
) {
    let color = info.snake_color.terminal_color();
    let buffer = frame.buffer_mut();

    for (index, segment) in snapshot.snake.iter().enumerate() {
        let Some((x, y)) = cell_to_terminal(inner, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new().fg(color).add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(color));
        }
    }
}

fn cell_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
