// Status Bar rendering module
//
// Renders the bottom status bar with keyboard shortcuts and the active
// mode/theme indicators.

use crate::app::AppState;
use crate::theme::{ThemeOverride, ALERT_RED, MIST_WHITE, SIGNAL_GREEN, SLATE_BLUE};
use crate::widget::Mode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    // Calculate available width for hints (subtract borders and indicators)
    let available_width = area.width.saturating_sub(4) as usize;

    struct Hint {
        priority: u8,
        key: &'static str,
        desc: &'static str,
        color: Color,
    }

    let hints = [
        Hint {
            priority: 1,
            key: "Q:",
            desc: "Quit | ",
            color: ALERT_RED,
        },
        Hint {
            priority: 1,
            key: "F/T/I:",
            desc: "Mode | ",
            color: SLATE_BLUE,
        },
        Hint {
            priority: 1,
            key: "A/L/D:",
            desc: "Theme | ",
            color: SLATE_BLUE,
        },
        Hint {
            priority: 2,
            key: "S:",
            desc: "System | ",
            color: SLATE_BLUE,
        },
        Hint {
            priority: 2,
            key: "B:",
            desc: "Blink | ",
            color: SLATE_BLUE,
        },
    ];

    let indicators = build_indicators(app);
    let indicator_width: usize = indicators.iter().map(|s| s.content.chars().count()).sum();

    let mut spans = vec![Span::styled(" ", Style::default())];
    let mut current_length = 1 + indicator_width;

    // Add hints by priority until we run out of space
    for priority in 1..=2 {
        for hint in hints.iter().filter(|h| h.priority == priority) {
            let hint_length = hint.key.len() + hint.desc.len();
            if current_length + hint_length <= available_width {
                spans.push(Span::styled(
                    hint.key,
                    Style::default().fg(hint.color).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(hint.desc));
                current_length += hint_length;
            }
        }
    }

    spans.extend(indicators);

    let status_bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(SLATE_BLUE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}

/// Indicator spans: `[mode] [theme] [pointer]`
pub fn build_indicators(app: &AppState) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    let mode_color = match app.mode {
        Mode::Follow => SIGNAL_GREEN,
        Mode::Thinking => Color::Cyan,
        Mode::Idle => MIST_WHITE,
    };
    spans.push(Span::styled("[", Style::default().fg(MIST_WHITE)));
    spans.push(Span::styled(
        app.mode.as_str(),
        Style::default().fg(mode_color).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("] ", Style::default().fg(MIST_WHITE)));

    let theme_color = if app.theme_override == ThemeOverride::Auto {
        MIST_WHITE
    } else {
        SIGNAL_GREEN
    };
    spans.push(Span::styled("[theme:", Style::default().fg(MIST_WHITE)));
    spans.push(Span::styled(
        app.theme_override.label(),
        Style::default().fg(theme_color).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("] ", Style::default().fg(MIST_WHITE)));

    let pointer = match app.pointer {
        Some((column, row)) => format!("{},{}", column, row),
        None => "-".to_string(),
    };
    spans.push(Span::styled("[ptr:", Style::default().fg(MIST_WHITE)));
    spans.push(Span::styled(pointer, Style::default().fg(Color::Cyan)));
    spans.push(Span::styled("]", Style::default().fg(MIST_WHITE)));

    spans
}
