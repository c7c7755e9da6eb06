use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::assets::{self, Sprite};
use crate::config::ScreenGeometry;
use crate::scene::Visual;

const BACKDROP: Color = Color::Rgb(15, 15, 25);
const HIGHLIGHT: Color = Color::Rgb(255, 220, 80);

pub(super) fn draw(frame: &mut Frame, geometry: &ScreenGeometry, visual: &Visual) {
    let screen = frame.area();
    match visual {
        Visual::Backdrop => {
            frame.render_widget(Clear, screen);
            frame.render_widget(Block::default().style(Style::default().bg(BACKDROP)), screen);
        }
        Visual::Banner { sprite, center_y } => {
            let area = geometry.centered(sprite.width(), sprite.height(), *center_y);
            let lines: Vec<Line> = sprite.lines().map(Line::from).collect();
            let banner = Paragraph::new(lines)
                .style(Style::default().fg(sprite.color).add_modifier(Modifier::BOLD));
            frame.render_widget(banner, area.intersection(screen));
        }
        Visual::ScoreLine {
            label,
            score,
            center_y,
        } => {
            let line = score_line(label, *score);
            let area = geometry.centered(line.width() as u16, 1, *center_y);
            frame.render_widget(Paragraph::new(line), area.intersection(screen));
        }
        Visual::Text { text, center_y } => {
            let area = geometry.centered(text.chars().count() as u16, 1, *center_y);
            let p = Paragraph::new(text.as_str()).style(Style::default().fg(Color::Rgb(255, 255, 255)));
            frame.render_widget(p, area.intersection(screen));
        }
        Visual::Button {
            sprite,
            bounds,
            highlighted,
        } => {
            frame.render_widget(button(sprite, *highlighted), bounds.intersection(screen));
        }
    }
}

fn score_line(label: &Sprite, score: u32) -> Line<'static> {
    Line::from(vec![
        Span::styled(label.art, Style::default().fg(label.color).add_modifier(Modifier::BOLD)),
        Span::styled(
            assets::spaced_digits(score),
            Style::default().fg(Color::Rgb(255, 255, 255)).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn button(sprite: &Sprite, highlighted: bool) -> Paragraph<'static> {
    let (border_type, border_color, label_style) = if highlighted {
        (
            BorderType::Double,
            HIGHLIGHT,
            Style::default().fg(Color::Rgb(255, 255, 255)).add_modifier(Modifier::BOLD),
        )
    } else {
        (BorderType::Rounded, Color::Rgb(60, 60, 80), Style::default().fg(sprite.color))
    };
    Paragraph::new(Line::from(Span::styled(sprite.art, label_style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(Style::default().fg(border_color)),
        )
}
