mod visuals;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Screen};
use crate::config::ScreenGeometry;
use crate::scene::{Layer, Scene};

pub fn render(frame: &mut Frame, app: &App) {
    render_scene(frame, &app.scene);

    let area = frame.area();
    if area.height == 0 {
        return;
    }
    let footer_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    frame.render_widget(footer(&app.screen), footer_area);
}

/// Draw every registered visual, one layer at a time.
pub fn render_scene(frame: &mut Frame, scene: &Scene) {
    let area = frame.area();
    let geometry = ScreenGeometry::new(area.width, area.height);
    for &layer in Layer::all() {
        for visual in scene.visuals(layer) {
            visuals::draw(frame, &geometry, visual);
        }
    }
}

fn footer(screen: &Screen) -> Paragraph<'static> {
    let key = Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::Rgb(100, 100, 130));
    let mut spans = vec![
        Span::styled("↑↓", key),
        Span::styled(" Select  ", text),
        Span::styled("Enter", key),
        Span::styled(" Confirm  ", text),
    ];
    if matches!(screen, Screen::GameOver) {
        spans.push(Span::styled("H", key));
        spans.push(Span::styled(" High Scores  ", text));
    }
    spans.push(Span::styled("q", key));
    spans.push(Span::styled(" Quit", text));
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
