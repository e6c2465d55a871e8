//! # TitleBar Component
//!
//! Top status bar showing where focus currently sits.
//!
//! ## Responsibilities
//!
//! - Display the focus stack as a breadcrumb (`main › library › books`)
//! - Display status messages (e.g., "At books (route-3)", "Already there")
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"Wayfinder | main › home | At home (route-0)"`
//! 2. **No status**: `"Wayfinder | main › home"`
//! 3. **Nothing focused**: `"Wayfinder"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SEPARATOR: &str = " › ";

/// Top status bar component.
pub struct TitleBar {
    /// Names of the entered routes, root first
    pub breadcrumb: Vec<String>,
    /// Status message from the core App state
    pub status_message: String,
}

impl TitleBar {
    pub fn new(breadcrumb: Vec<String>, status_message: String) -> Self {
        Self {
            breadcrumb,
            status_message,
        }
    }

    fn text(&self) -> String {
        let mut text = String::from("Wayfinder");
        if !self.breadcrumb.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.breadcrumb.join(SEPARATOR));
        }
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
