//! Play field rendering.
//!
//! Uses a cell buffer for per-character color control: sky, pipes, and the
//! bird are drawn into a 2D grid in field coordinates scaled to the area,
//! then stamped row-by-row as Paragraph widgets.

use super::hud;
use crate::core::session::UiSnapshot;
use crate::simulation::{Phase, Pipe, World};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SKY_TOP: (u8, u8, u8) = (70, 180, 200);
const SKY_BOT: (u8, u8, u8) = (190, 232, 245);
const PIPE_BODY: Color = Color::Rgb(100, 170, 40);
const PIPE_CAP: Color = Color::Rgb(145, 215, 62);
const BIRD_BODY: Color = Color::Rgb(245, 200, 66);
const BIRD_EYE: Color = Color::Rgb(20, 20, 20);
const BIRD_BEAK: Color = Color::Rgb(225, 75, 35);

/// Render the whole game screen. Returns the play field area so pointer
/// rows can be mapped back to field coordinates.
pub fn render_game(frame: &mut Frame, area: Rect, world: &World, ui: &UiSnapshot) -> Rect {
    let inner = hud::render_frame_border(frame, area, ui);
    let layout = hud::screen_layout(inner, &world.field);

    render_play_field(frame, layout.field, world);

    if ui.phase == Phase::Idle {
        render_start_prompt(frame, layout.field);
    }
    if ui.overlay_visible {
        hud::render_crash_banner(frame, layout.field, ui);
    }

    hud::render_status(frame, layout.status, ui);
    hud::render_info_panel(frame, layout.info, world, ui);

    layout.field
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Maps field units onto a grid of terminal cells.
#[derive(Debug, Clone, Copy)]
pub struct FieldScale {
    pub cols: u16,
    pub rows: u16,
    sx: f64,
    sy: f64,
}

impl FieldScale {
    pub fn new(cols: u16, rows: u16, field_width: f64, field_height: f64) -> Self {
        Self {
            cols,
            rows,
            sx: f64::from(cols) / field_width,
            sy: f64::from(rows) / field_height,
        }
    }

    /// Column containing field x (may be off-grid).
    pub fn col(&self, x: f64) -> i32 {
        (x * self.sx).floor() as i32
    }

    /// Row containing field y (may be off-grid).
    pub fn row(&self, y: f64) -> i32 {
        (y * self.sy).floor() as i32
    }

    /// Field y at the vertical middle of a row.
    pub fn row_center(&self, row: u16) -> f64 {
        (f64::from(row) + 0.5) / self.sy
    }

    /// Field x at the horizontal middle of a column.
    pub fn col_center(&self, col: u16) -> f64 {
        (f64::from(col) + 0.5) / self.sx
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}

fn sky_color(row: u16, rows: u16) -> Color {
    let t = if rows > 1 {
        f64::from(row) / f64::from(rows - 1)
    } else {
        0.0
    };
    Color::Rgb(
        lerp(SKY_TOP.0, SKY_BOT.0, t),
        lerp(SKY_TOP.1, SKY_BOT.1, t),
        lerp(SKY_TOP.2, SKY_BOT.2, t),
    )
}

fn pipe_blocks(pipe: &Pipe, y: f64) -> bool {
    y < pipe.gap_top() || y > pipe.gap_bottom()
}

/// Draw the world into a `rows × cols` cell grid.
pub fn build_field_cells(world: &World, cols: u16, rows: u16) -> Vec<Vec<Cell>> {
    let scale = FieldScale::new(cols, rows, world.field.width, world.field.height);
    let mut buffer: Vec<Vec<Cell>> = (0..rows)
        .map(|r| {
            vec![
                Cell {
                    bg: sky_color(r, rows),
                    ..Cell::default()
                };
                cols as usize
            ]
        })
        .collect();

    // ── Pipes: top rectangle down to gap top, bottom one from gap bottom ──
    for pipe in &world.pipes {
        for col in 0..cols {
            let x = scale.col_center(col);
            if x < pipe.left() || x >= pipe.right() {
                continue;
            }
            for row in 0..rows {
                let y = scale.row_center(row);
                if !pipe_blocks(pipe, y) {
                    continue;
                }
                let next_open = row + 1 < rows && !pipe_blocks(pipe, scale.row_center(row + 1));
                let prev_open = row > 0 && !pipe_blocks(pipe, scale.row_center(row - 1));
                let color = if next_open || prev_open {
                    PIPE_CAP
                } else {
                    PIPE_BODY
                };
                buffer[row as usize][col as usize] = Cell {
                    ch: '█',
                    fg: color,
                    bg: color,
                };
            }
        }
    }

    // ── Bird: body across its extent, eye on the last body cell, beak after ──
    let bird = &world.bird;
    let row = scale.row(bird.y);
    if row >= 0 && row < i32::from(rows) {
        let row = row as usize;
        let first = scale.col(bird.left()).max(0);
        let last = scale.col(bird.right()).max(first);
        let bg = buffer[row][0].bg;
        for col in first..=last {
            if col >= i32::from(cols) {
                break;
            }
            let ch = if col == last { '•' } else { '█' };
            let fg = if col == last { BIRD_EYE } else { BIRD_BODY };
            buffer[row][col as usize] = Cell {
                ch,
                fg,
                bg: BIRD_BODY,
            };
        }
        let beak = last + 1;
        if beak < i32::from(cols) {
            buffer[row][beak as usize] = Cell {
                ch: '►',
                fg: BIRD_BEAK,
                bg,
            };
        }
    }

    buffer
}

fn render_play_field(frame: &mut Frame, area: Rect, world: &World) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let buffer = build_field_cells(world, area.width, area.height);
    let lines: Vec<Line> = buffer
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| {
                        Span::styled(cell.ch.to_string(), Style::default().fg(cell.fg).bg(cell.bg))
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_start_prompt(frame: &mut Frame, area: Rect) {
    if area.height < 3 {
        return;
    }
    let prompt_area = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    let prompt = Paragraph::new(Span::styled(
        " Press Space to fly ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(prompt, prompt_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;

    fn world() -> World {
        World::new(&GameConfig::default(), 0)
    }

    #[test]
    fn test_scale_maps_field_corners() {
        let scale = FieldScale::new(36, 24, 360.0, 480.0);
        assert_eq!(scale.col(0.0), 0);
        assert_eq!(scale.col(359.9), 35);
        assert_eq!(scale.row(479.9), 23);
        assert!((scale.row_center(0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_bird_drawn_at_center_row() {
        let cells = build_field_cells(&world(), 36, 24);
        let row = &cells[12];
        assert!(row.iter().any(|c| c.ch == '►'));
        assert!(row.iter().any(|c| c.ch == '•'));
        assert!(cells[0].iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn test_pipe_leaves_gap_open() {
        let mut w = world();
        w.pipes.push_back(Pipe::new(200.0, 52.0, 240.0, 150.0));
        let cells = build_field_cells(&w, 36, 24);
        let col = 22; // field x 225, inside the pipe
        assert_eq!(cells[0][col].ch, '█');
        assert_eq!(cells[23][col].ch, '█');
        // Rows whose centers fall inside 165..315 stay open.
        for row in 8..=15 {
            assert_eq!(cells[row][col].ch, ' ', "row {row}");
        }
        assert_eq!(cells[7][col].fg, PIPE_CAP);
        assert_eq!(cells[16][col].fg, PIPE_CAP);
        assert_eq!(cells[3][col].fg, PIPE_BODY);
    }

    #[test]
    fn test_offscreen_pipe_not_drawn() {
        let mut w = world();
        w.pipes.push_back(Pipe::new(-60.0, 52.0, 240.0, 150.0));
        let cells = build_field_cells(&w, 36, 24);
        assert!(cells.iter().flatten().all(|c| c.ch != '█' || c.bg == BIRD_BODY));
    }
}
