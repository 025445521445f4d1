//! Terminal rendering. Pure output: reads the world and UI snapshot, never
//! writes back into the simulation.

pub mod field_scene;
pub mod hud;

use crate::core::session::UiSnapshot;
use crate::simulation::World;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

const MIN_WIDTH: u16 = 44;
const MIN_HEIGHT: u16 = 14;

/// Draw one frame. Returns the play field area, or `None` when the
/// terminal is too small to show it.
pub fn draw(frame: &mut Frame, world: &World, ui: &UiSnapshot) -> Option<Rect> {
    let area = frame.size();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = Paragraph::new(format!(
            "Terminal too small ({}x{}), need {}x{}",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        ))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return None;
    }
    Some(field_scene::render_game(frame, area, world, ui))
}
