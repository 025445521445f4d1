//! Screen chrome around the play field: layout, status bar, info panel, and
//! the crash banner.
//!
//! Line builders are pure functions of the world and `UiSnapshot` so they can
//! be tested without a terminal.

use crate::core::session::UiSnapshot;
use crate::simulation::{ControlMode, Field, Phase, World};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const INFO_WIDTH: u16 = 22;
const STATUS_HEIGHT: u16 = 2;
/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;
const BANNER_WIDTH: u16 = 36;
const BANNER_HEIGHT: u16 = 6;

/// Where each part of the screen goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Play field, sized to the field's aspect ratio.
    pub field: Rect,
    pub status: Rect,
    pub info: Rect,
}

/// Split the inside of the outer border. The field keeps its proportions
/// when the terminal is wider than needed and is centered in its column.
pub fn screen_layout(inner: Rect, field: &Field) -> ScreenLayout {
    let info_width = INFO_WIDTH.min(inner.width / 3);
    let left_width = inner.width - info_width;
    let field_rows = inner.height.saturating_sub(STATUS_HEIGHT);

    let wanted_cols = (f64::from(field_rows) * field.width / field.height * CELL_ASPECT).round();
    let field_cols = (wanted_cols as u16).clamp(1u16.min(left_width), left_width);
    let pad = (left_width - field_cols) / 2;

    ScreenLayout {
        field: Rect {
            x: inner.x + pad,
            y: inner.y,
            width: field_cols,
            height: field_rows,
        },
        status: Rect {
            x: inner.x,
            y: inner.y + field_rows,
            width: left_width,
            height: inner.height - field_rows,
        },
        info: Rect {
            x: inner.x + left_width,
            y: inner.y,
            width: info_width,
            height: inner.height,
        },
    }
}

/// Border color tracks the round phase.
pub fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Idle => Color::Cyan,
        Phase::Running => Color::Green,
        Phase::Paused => Color::Yellow,
        Phase::Ended => Color::Red,
    }
}

/// Draw the outer border titled with the control mode. Returns its inside.
pub fn render_frame_border(frame: &mut Frame, area: Rect, ui: &UiSnapshot) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" Skyward - {} ", ui.mode))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(phase_color(ui.phase)));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

pub(crate) fn pipe_noun(n: u32) -> &'static str {
    if n == 1 {
        "pipe"
    } else {
        "pipes"
    }
}

/// `(key, action)` hints valid for the current mode and phase.
pub(crate) fn controls_for(ui: &UiSnapshot) -> Vec<(&'static str, &'static str)> {
    let mut controls = match (ui.phase, ui.mode) {
        (Phase::Idle, _) => vec![("[Space]", "Start")],
        (Phase::Ended, _) => vec![],
        (_, ControlMode::Discrete) => vec![("[↑/↓]", "Steer")],
        (_, ControlMode::Pursuit) => vec![("[Mouse]", "Steer")],
    };
    match ui.phase {
        Phase::Running if ui.can_pause => controls.push(("[P]", "Pause")),
        Phase::Paused if ui.can_pause => controls.push(("[P]", "Resume")),
        _ => {}
    }
    if ui.phase != Phase::Idle {
        controls.push(("[R]", "Restart"));
    }
    controls.push(("[Q]", "Quit"));
    controls
}

/// Headline for the status bar.
pub(crate) fn status_text(ui: &UiSnapshot) -> String {
    match ui.phase {
        Phase::Idle => "Press Space to start!".to_string(),
        Phase::Running => format!("Score: {}", ui.score),
        Phase::Paused => format!("Paused - Score: {}", ui.score),
        Phase::Ended if ui.new_best => format!("New best - Score: {}", ui.score),
        Phase::Ended => format!("Crashed - Score: {}", ui.score),
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, ui: &UiSnapshot) {
    if area.height == 0 {
        return;
    }
    let headline = Paragraph::new(status_text(ui))
        .style(Style::default().fg(phase_color(ui.phase)))
        .alignment(Alignment::Center);
    frame.render_widget(headline, Rect { height: 1, ..area });

    if area.height < 2 {
        return;
    }
    let mut spans = Vec::new();
    for (key, action) in controls_for(ui) {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let hints = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(
        hints,
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// Text of the game-over banner.
pub(crate) fn banner_lines(ui: &UiSnapshot) -> Vec<Line<'static>> {
    let (title, accent) = if ui.new_best {
        ("NEW BEST!", Color::Yellow)
    } else {
        ("CRASH!", Color::Red)
    };
    let detail = if ui.new_best {
        format!("Best saved: {}", ui.best_score)
    } else {
        format!("Best: {}", ui.best_score)
    };
    vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("You cleared {} {}.", ui.score, pipe_noun(ui.score)),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(detail, Style::default().fg(Color::Cyan))),
        Line::from(Span::styled(
            "[R] Restart  [Q] Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// Banner centered over the field; the last frame stays visible around it.
pub fn render_crash_banner(frame: &mut Frame, field_area: Rect, ui: &UiSnapshot) {
    let width = field_area.width.min(BANNER_WIDTH);
    let height = field_area.height.min(BANNER_HEIGHT);
    let banner = Rect {
        x: field_area.x + (field_area.width - width) / 2,
        y: field_area.y + (field_area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, banner);

    let accent = if ui.new_best { Color::Yellow } else { Color::Red };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = block.inner(banner);
    frame.render_widget(block, banner);
    frame.render_widget(
        Paragraph::new(banner_lines(ui)).alignment(Alignment::Center),
        inner,
    );
}

fn stat(label: &'static str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Side panel: phase, score, best, and round counters.
pub(crate) fn info_lines(world: &World, ui: &UiSnapshot) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!(" {} ", ui.phase.label()),
            Style::default()
                .fg(phase_color(ui.phase))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        stat(" Score: ", ui.score.to_string(), Color::White),
        stat(" Best: ", ui.best_score.to_string(), Color::Yellow),
        Line::from(""),
        stat(" Control: ", ui.mode.name().to_string(), Color::Green),
        stat(" Pipes: ", world.pipes.len().to_string(), Color::Green),
        stat(" Rounds: ", world.rounds_played.to_string(), Color::Green),
    ]
}

pub fn render_info_panel(frame: &mut Frame, area: Rect, world: &World, ui: &UiSnapshot) {
    if area.width == 0 {
        return;
    }
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }
    frame.render_widget(Paragraph::new(info_lines(world, ui)), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;

    fn snapshot(phase: Phase, mode: ControlMode) -> UiSnapshot {
        UiSnapshot {
            phase,
            score: 4,
            best_score: 9,
            new_best: false,
            overlay_visible: phase == Phase::Ended,
            mode,
            can_pause: mode == ControlMode::Discrete,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_layout_keeps_field_proportions() {
        let inner = Rect::new(1, 1, 118, 38);
        let layout = screen_layout(inner, &Field::default());
        // 36 rows of a 3:4 field at 2:1 cells -> 54 columns.
        assert_eq!(layout.field.height, 36);
        assert_eq!(layout.field.width, 54);
        assert_eq!(layout.status.height, 2);
        assert_eq!(layout.info.width, INFO_WIDTH);
        assert_eq!(layout.info.x + layout.info.width, inner.x + inner.width);
        // Centered in the left column.
        let left = inner.width - INFO_WIDTH;
        assert_eq!(layout.field.x - inner.x, (left - 54) / 2);
    }

    #[test]
    fn test_layout_narrow_terminal_uses_full_column() {
        let inner = Rect::new(0, 0, 42, 40);
        let layout = screen_layout(inner, &Field::default());
        assert_eq!(layout.field.width, 42 - 14);
        assert_eq!(layout.field.x, 0);
    }

    #[test]
    fn test_controls_reflect_mode_and_phase() {
        let pursuit = controls_for(&snapshot(Phase::Running, ControlMode::Pursuit));
        assert_eq!(pursuit[0], ("[Mouse]", "Steer"));
        assert!(!pursuit.iter().any(|(_, action)| *action == "Pause"));

        let paused = controls_for(&snapshot(Phase::Paused, ControlMode::Discrete));
        assert!(paused.contains(&("[P]", "Resume")));

        let idle = controls_for(&snapshot(Phase::Idle, ControlMode::Discrete));
        assert_eq!(idle[0], ("[Space]", "Start"));
        assert!(!idle.iter().any(|(key, _)| *key == "[R]"));
    }

    #[test]
    fn test_status_text_per_phase() {
        let mut ui = snapshot(Phase::Ended, ControlMode::Discrete);
        assert_eq!(status_text(&ui), "Crashed - Score: 4");
        ui.new_best = true;
        assert_eq!(status_text(&ui), "New best - Score: 4");
        ui.phase = Phase::Paused;
        assert_eq!(status_text(&ui), "Paused - Score: 4");
    }

    #[test]
    fn test_banner_celebrates_new_best() {
        let mut ui = snapshot(Phase::Ended, ControlMode::Discrete);
        let lines = banner_lines(&ui);
        assert_eq!(text(&lines[0]), "CRASH!");
        assert_eq!(text(&lines[1]), "You cleared 4 pipes.");
        assert_eq!(text(&lines[2]), "Best: 9");

        ui.new_best = true;
        ui.score = 1;
        let lines = banner_lines(&ui);
        assert_eq!(text(&lines[0]), "NEW BEST!");
        assert_eq!(text(&lines[1]), "You cleared 1 pipe.");
    }

    #[test]
    fn test_info_lines_show_round_counters() {
        let mut world = World::new(&GameConfig::default(), 9);
        world.rounds_played = 3;
        let lines = info_lines(&world, &snapshot(Phase::Running, ControlMode::Pursuit));
        let all: Vec<String> = lines.iter().map(text).collect();
        assert!(all.contains(&" Rounds: 3".to_string()));
        assert!(all.contains(&" Control: Mouse".to_string()));
        assert!(all.contains(&" Best: 9".to_string()));
    }

    #[test]
    fn test_pipe_noun() {
        assert_eq!(pipe_noun(1), "pipe");
        assert_eq!(pipe_noun(0), "pipes");
        assert_eq!(pipe_noun(7), "pipes");
    }
}
