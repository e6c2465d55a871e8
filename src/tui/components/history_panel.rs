//! # History Panel Component
//!
//! Shows the navigation history as a back-stack. The current entry is
//! marked; entries past it are forward history and render dimmed, since the
//! next push will discard them.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::history::Location;
use crate::tui::component::Component;

pub struct HistoryPanel<'a> {
    pub entries: &'a [Location],
    pub index: Option<usize>,
}

impl<'a> HistoryPanel<'a> {
    pub fn new(entries: &'a [Location], index: Option<usize>) -> Self {
        Self { entries, index }
    }

    fn line(&self, position: usize, location: &Location) -> Line<'static> {
        let current = self.index == Some(position);
        let forward = self.index.is_some_and(|i| position > i);

        let marker = if current { "▶ " } else { "  " };
        let style = if current {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if forward {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled(marker, style),
            Span::styled(location.name.clone(), style),
            Span::styled(format!("  {}", location.key), Style::default().fg(Color::DarkGray)),
        ];
        if !location.params.is_empty() {
            spans.push(Span::styled(
                format!("  {}", serde_json::Value::Object(location.params.clone())),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

impl Component for HistoryPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Newest entry on top, like a stack.
        let lines: Vec<Line> = self
            .entries
            .iter()
            .enumerate()
            .rev()
            .map(|(position, location)| self.line(position, location))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" History ({}) ", self.entries.len()));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
