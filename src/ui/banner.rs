// Banner rendering module
//
// Renders the one-line title with the resolved theme inputs.

use crate::app::AppState;
use crate::theme::{MIST_WHITE, SIGNAL_GREEN, SLATE_BLUE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render_banner(f: &mut Frame, area: Rect, app: &AppState) {
    // Title picks up the first widget's live color so it cycles along
    let accent = app
        .registry
        .get(0)
        .map(|w| w.color().to_color())
        .unwrap_or(SLATE_BLUE);

    let system = if app.system_prefers_dark() { "dark" } else { "light" };

    let line = Line::from(vec![
        Span::styled(
            " (o o) remy ",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled("the terminal eye", Style::default().fg(Color::Gray)),
        Span::raw("   "),
        Span::styled("theme: ", Style::default().fg(MIST_WHITE)),
        Span::styled(
            app.theme_override.label(),
            Style::default().fg(SIGNAL_GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  system: ", Style::default().fg(MIST_WHITE)),
        Span::styled(system, Style::default().fg(SIGNAL_GREEN)),
    ]);

    let banner = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(SLATE_BLUE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(banner, area);
}
