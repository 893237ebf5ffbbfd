// UI rendering module
//
// This module contains all UI rendering components for remy.
// The main draw() function orchestrates rendering of all UI panels.

mod banner;
mod eye;
mod status_bar;

use crate::app::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use banner::render_banner;
use eye::render_widget_panel;
use status_bar::render_status_bar;

/// Main UI drawing function
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let size = f.area();

    // Main layout: banner, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Banner
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_banner(f, chunks[0], app);

    // Body: one panel per widget, side by side
    let count = app.registry.len().max(1) as u32;
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(chunks[1]);

    for (id, area) in panels.iter().enumerate().take(app.registry.len()) {
        render_widget_panel(f, *area, app, id);
    }

    render_status_bar(f, chunks[2], app);
}
