pub mod header;
pub mod plain;
pub mod statusbar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::format::clock_now;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, chunks[0], app.report(), &clock_now());
    statusbar::render(frame, chunks[2], app.source_name());
}

#[cfg(test)]
mod tests;
