//! # Scene Component
//!
//! Draws one history entry's screen. The router resolves the entry to its
//! route's text; the fade transition decides how strongly it shows.
//! Terminals have no alpha channel, so opacity is approximated by blending
//! the text colour towards the background.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::core::history::Params;
use crate::tui::component::Component;
use crate::tui::transition::Presentation;

pub struct Scene<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub params: &'a Params,
    pub presentation: Presentation,
}

/// Grey level for a given opacity; 0.0 disappears into the background.
fn shade(opacity: f32) -> Color {
    let level = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(level, level, level)
}

impl Component for Scene<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.presentation.offscreen {
            return;
        }
        let color = shade(self.presentation.opacity);

        let mut lines = vec![Line::styled(
            self.body.to_string(),
            Style::default().fg(color),
        )];
        if !self.params.is_empty() {
            lines.push(Line::default());
            for (key, value) in self.params {
                lines.push(Line::styled(
                    format!("{key}: {value}"),
                    Style::default().fg(color).add_modifier(Modifier::ITALIC),
                ));
            }
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", self.title));

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}
