//! # Route Picker Component
//!
//! Lists every leaf route and turns a selection into a navigation request.
//! Enter pushes the route, `g` jumps to it (reusing a history entry when one
//! exists) and `r` resets history to it.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RoutePickerState` lives in `TuiState`
//! - `RoutePicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Persistent state for the route picker.
pub struct RoutePickerState {
    /// Leaf route names with their nesting depth, in declaration order.
    pub routes: Vec<(String, usize)>,
    pub selected: usize,
    pub list_state: ListState,
}

/// Navigation requested from the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    Push(String),
    JumpTo(String),
    ResetTo(String),
}

impl RoutePickerState {
    pub fn new(routes: Vec<(String, usize)>) -> Self {
        let mut list_state = ListState::default();
        if !routes.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            routes,
            selected: 0,
            list_state,
        }
    }

    /// Move the selection onto `name`, if it is listed.
    pub fn select_name(&mut self, name: &str) {
        if let Some(position) = self.routes.iter().position(|(n, _)| n == name) {
            self.selected = position;
            self.list_state.select(Some(position));
        }
    }

    fn selected_name(&self) -> Option<String> {
        self.routes.get(self.selected).map(|(name, _)| name.clone())
    }
}

impl EventHandler for RoutePickerState {
    type Event = PickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent> {
        match event {
            TuiEvent::CursorUp => {
                if !self.routes.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.routes.is_empty() {
                    self.selected = (self.selected + 1).min(self.routes.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self.selected_name().map(PickerEvent::Push),
            TuiEvent::InputChar('g') => self.selected_name().map(PickerEvent::JumpTo),
            TuiEvent::InputChar('r') => self.selected_name().map(PickerEvent::ResetTo),
            _ => None,
        }
    }
}

/// Transient render wrapper around the picker state.
pub struct RoutePicker<'a> {
    state: &'a mut RoutePickerState,
    focused_route: Option<&'a str>,
}

impl<'a> RoutePicker<'a> {
    pub fn new(state: &'a mut RoutePickerState, focused_route: Option<&'a str>) -> Self {
        Self {
            state,
            focused_route,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = " Enter Push  g Jump  r Reset ";

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Routes ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self
            .state
            .routes
            .iter()
            .enumerate()
            .map(|(i, (name, depth))| {
                let is_focused = self.focused_route == Some(name.as_str());
                let indent = "  ".repeat(depth.saturating_sub(1));
                let marker = if is_focused { " *" } else { "" };

                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };

                ListItem::new(Line::from(vec![
                    Span::raw(indent),
                    Span::styled(name.clone(), style),
                    Span::styled(marker, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
