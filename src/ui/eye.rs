// Eye widget rendering module
//
// Draws one widget snapshot on a braille canvas: a stroked ring and two
// filled, rounded eyes, all in the widget's live color. The snapshot uses a
// 20x20 view box with y growing downward; the canvas has y growing upward,
// so every y is flipped.

use crate::app::AppState;
use crate::widget::{
    EyeRect, ModeMarker, WidgetSnapshot, BORDER_CENTER, BORDER_RADIUS, BORDER_STROKE, VIEW_BOX,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, BorderType, Borders,
    },
    Frame,
};

/// Vertical distance between fill lines, in view-box units
const FILL_STEP: f64 = 0.25;

/// Concentric circles used to give the ring its stroke width
const RING_PASSES: usize = 4;

/// Render widget `id` into `area` and report its center back to the app
pub fn render_widget_panel(f: &mut Frame, area: Rect, app: &mut AppState, id: usize) {
    let Some(snapshot) = app.registry.get(id).map(|w| w.snapshot()) else {
        return;
    };

    let block = panel_block(&snapshot);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let icon = icon_area(inner);
    if icon.width == 0 || icon.height == 0 {
        return;
    }
    app.place_widget(
        id,
        f64::from(icon.x) + f64::from(icon.width) / 2.0,
        f64::from(icon.y) + f64::from(icon.height) / 2.0,
    );

    let color = snapshot.color.to_color();
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, VIEW_BOX])
        .y_bounds([0.0, VIEW_BOX])
        .paint(move |ctx| {
            draw_ring(ctx, color);
            for eye in [&snapshot.left, &snapshot.right] {
                for (y, x1, x2) in eye_scanlines(eye) {
                    ctx.draw(&CanvasLine {
                        x1,
                        y1: y,
                        x2,
                        y2: y,
                        color,
                    });
                }
            }
        });

    f.render_widget(canvas, icon);
}

/// Panel frame; the mode marker picks the border style
fn panel_block(snapshot: &WidgetSnapshot) -> Block<'static> {
    let color = snapshot.color.to_color();
    let (border_type, border_style) = match snapshot.marker {
        None => (BorderType::Rounded, Style::default().fg(color)),
        Some(ModeMarker::Thinking) => (
            BorderType::Double,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Some(ModeMarker::Idle) => (
            BorderType::Plain,
            Style::default().fg(color).add_modifier(Modifier::DIM),
        ),
    };

    let title = format!(
        " remy #{} · {} · {} ",
        snapshot.id + 1,
        snapshot.mode,
        snapshot.theme
    );

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Gray))
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);

    match snapshot.marker {
        Some(marker) => {
            let class = format!(" .{} ", marker.class_name());
            block.title_bottom(Line::from(class).right_aligned())
        }
        None => block,
    }
}

/// Largest centered region that shows the view box square
///
/// Terminal cells are about twice as tall as wide, so a square icon is
/// twice as many columns as rows.
pub fn icon_area(inner: Rect) -> Rect {
    let width = inner.width.min(inner.height.saturating_mul(2));
    let height = width / 2;
    Rect {
        x: inner.x + (inner.width - width) / 2,
        y: inner.y + (inner.height - height) / 2,
        width,
        height,
    }
}

fn draw_ring(ctx: &mut ratatui::widgets::canvas::Context<'_>, color: Color) {
    let inner_radius = BORDER_RADIUS - BORDER_STROKE / 2.0;
    for pass in 0..RING_PASSES {
        let radius = inner_radius + BORDER_STROKE * pass as f64 / (RING_PASSES - 1) as f64;
        ctx.draw(&Circle {
            x: BORDER_CENTER.x,
            y: VIEW_BOX - BORDER_CENTER.y,
            radius,
            color,
        });
    }
}

/// Horizontal fill lines `(canvas_y, x1, x2)` covering a rounded eye
pub fn eye_scanlines(eye: &EyeRect) -> Vec<(f64, f64, f64)> {
    let radius = eye.radius.min(eye.width / 2.0).min(eye.height / 2.0).max(0.0);
    let steps = (eye.height / FILL_STEP).ceil().max(0.0) as usize;
    let bottom = eye.y + eye.height;

    (0..=steps)
        .map(|i| {
            let y = (eye.y + i as f64 * FILL_STEP).min(bottom);
            // Distance to the nearer horizontal edge decides the corner inset
            let edge = (y - eye.y).min(bottom - y);
            let inset = if edge < radius {
                let dy = radius - edge;
                radius - (radius * radius - dy * dy).max(0.0).sqrt()
            } else {
                0.0
            };
            (VIEW_BOX - y, eye.x + inset, eye.x + eye.width - inset)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::widget::{Point, LEFT_EYE_BASE};
    use ratatui::{backend::TestBackend, Terminal};

    fn open_eye() -> EyeRect {
        EyeRect {
            x: 7.0,
            y: 7.5,
            width: 2.0,
            height: 5.0,
            radius: 1.0,
        }
    }

    #[test]
    fn test_icon_area_keeps_aspect() {
        let icon = icon_area(Rect::new(0, 0, 80, 20));
        assert_eq!(icon.width, 40);
        assert_eq!(icon.height, 20);
        assert_eq!(icon.x, 20);

        let icon = icon_area(Rect::new(2, 3, 20, 30));
        assert_eq!(icon.width, 20);
        assert_eq!(icon.height, 10);
        assert_eq!(icon.y, 3 + 10);
    }

    #[test]
    fn test_icon_area_empty() {
        assert_eq!(icon_area(Rect::new(5, 5, 0, 0)).width, 0);
    }

    #[test]
    fn test_scanlines_cover_eye() {
        let lines = eye_scanlines(&open_eye());
        assert_eq!(lines.len(), 21);

        // Top and bottom rows are pinched by the rounded corners
        let (top_y, top_x1, top_x2) = lines[0];
        assert_eq!(top_y, VIEW_BOX - 7.5);
        assert_eq!((top_x1, top_x2), (8.0, 8.0));

        let (mid_y, mid_x1, mid_x2) = lines[10];
        assert_eq!(mid_y, VIEW_BOX - 10.0);
        assert_eq!((mid_x1, mid_x2), (7.0, 9.0));

        let (bottom_y, _, _) = lines[20];
        assert_eq!(bottom_y, VIEW_BOX - 12.5);
    }

    #[test]
    fn test_scanlines_closed_eye() {
        let closed = EyeRect {
            y: 9.5,
            height: 1.0,
            ..open_eye()
        };
        let lines = eye_scanlines(&closed);
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|&(_, x1, x2)| x1 <= x2));
        // Radius shrinks to half the height; the middle row spans the width
        assert_eq!(lines[2].1, 7.0);
    }

    #[test]
    fn test_draw_places_widgets() {
        let mut app = test_app(2);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| crate::ui::draw(f, &mut app)).unwrap();

        // Placed widgets now react to a far-away pointer
        app.pointer_moved(0, 0);
        for widget in app.registry.iter() {
            let eyes = widget.eyes();
            assert!(eyes.left.pos.x < LEFT_EYE_BASE.x);
            assert!(eyes.left.pos != Point::new(LEFT_EYE_BASE.x, LEFT_EYE_BASE.y));
        }
    }
}
