//! # Application State
//!
//! The outer store for navigation. `App` owns the current `NavigationState`
//! value; the router only ever sees borrowed snapshots of it.
//!
//! ```text
//! App
//! ├── history: NavigationState   // back-stack, replaced wholesale on change
//! ├── status_message: String     // status bar text
//! └── transitions: u64           // accepted history changes
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::history::NavigationState;

#[derive(Debug)]
pub struct App {
    pub history: NavigationState,
    pub status_message: String,
    pub transitions: u64,
}

impl App {
    pub fn new(history: NavigationState) -> Self {
        Self {
            history,
            status_message: String::from("Welcome to Wayfinder!"),
            transitions: 0,
        }
    }

    /// Name of the focused history entry, if any.
    pub fn current_name(&self) -> Option<&str> {
        self.history.current().map(|loc| loc.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new(NavigationState::create(Some("home")));
        assert_eq!(app.status_message, "Welcome to Wayfinder!");
        assert_eq!(app.current_name(), Some("home"));
        assert_eq!(app.transitions, 0);
    }
}
