//! # Activity Panel Component
//!
//! The most recent lifecycle events (enter, leave, will-focus, did-focus),
//! newest at the bottom.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::component::Component;

pub struct ActivityPanel {
    pub entries: Vec<String>,
}

impl Component for ActivityPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let skip = self.entries.len().saturating_sub(visible);
        let lines: Vec<Line> = self
            .entries
            .iter()
            .skip(skip)
            .map(|entry| {
                let color = if entry.starts_with("leave") {
                    Color::Red
                } else if entry.starts_with("enter") {
                    Color::Green
                } else {
                    Color::Gray
                };
                Line::styled(entry.clone(), Style::default().fg(color))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Lifecycle ");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
